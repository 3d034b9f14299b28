use std::collections::HashMap;

use log::{debug, trace};

use crate::grammar::{Grammar, Symbol, EPSILON};
use super::nullable::Nullability;
use super::TerminalSet;

// Terminals that can start a derivation, and whether the derivation can be
// empty. `nullable` stands in for `"epsilon"` being a member.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FirstSet {
    pub terminals: TerminalSet,
    pub nullable: bool,
}

static UNKNOWN: FirstSet = FirstSet {
    terminals: TerminalSet::new(),
    nullable: false,
};

impl FirstSet {
    fn terminal(text: &str) -> Self {
        FirstSet {
            terminals: TerminalSet::from([text.to_string()]),
            nullable: false,
        }
    }

    fn empty() -> Self {
        FirstSet {
            terminals: TerminalSet::new(),
            nullable: true,
        }
    }

    // Lookaheads that can't tell the two apart. Two derivations that can both
    // be empty share `"epsilon"`.
    pub fn shared(&self, other: &FirstSet) -> TerminalSet {
        let mut shared: TerminalSet = self.terminals.intersection(&other.terminals).cloned().collect();
        if self.nullable && other.nullable {
            shared.insert(EPSILON.to_string());
        }
        shared
    }
}

// FIRST sets of every nonterminal. Filled once by `compute` and only read
// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstSets {
    map: HashMap<String, FirstSet>,
}

impl FirstSets {
    pub fn compute(grammar: &Grammar, nullability: &Nullability) -> Self {
        let map = grammar.nonterminals()
            .map(|name| {
                let nullable = nullability.is_nullable(&Symbol::Nonterminal(name.to_string()));
                (name.to_string(), FirstSet { terminals: TerminalSet::new(), nullable })
            })
            .collect();
        let mut this = FirstSets { map };

        let mut passes = 1;
        while this.pass(grammar) {
            passes += 1;
        }
        debug!("FIRST sets reached a fixed point after {} passes", passes);

        this
    }

    // Unions FIRST of every production into its head's set, returns whether
    // any set grew
    pub(super) fn pass(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;

        for head in grammar.heads() {
            let gained: TerminalSet = grammar.productions(head)
                .iter()
                .flat_map(|production| self.first_of_chain(&production.symbols).terminals)
                .collect();

            if let Some(set) = self.map.get_mut(head) {
                let before = set.terminals.len();
                set.terminals.extend(gained);
                if set.terminals.len() != before {
                    trace!("FIRST({}) grew to {:?}", head, set.terminals);
                    changed = true;
                }
            }
        }

        changed
    }

    pub fn first_of_symbol(&self, symbol: &Symbol) -> FirstSet {
        match symbol {
            Symbol::Terminal(_) if symbol.is_epsilon() => FirstSet::empty(),
            Symbol::Terminal(text) => FirstSet::terminal(text),
            Symbol::Nonterminal(name) => self.map.get(name).unwrap_or(&UNKNOWN).clone(),
        }
    }

    // Stops at the first symbol that can't be empty. The empty sequence has
    // an empty FIRST set that is not marked nullable.
    pub fn first_of_chain(&self, chain: &[Symbol]) -> FirstSet {
        let mut result = FirstSet::default();
        if chain.is_empty() {
            return result;
        }

        for symbol in chain {
            let first = self.first_of_symbol(symbol);
            result.terminals.extend(first.terminals);
            if !first.nullable {
                return result;
            }
        }

        result.nullable = true;
        result
    }

    // FIRST of a nonterminal, never containing `"epsilon"`
    pub fn first(&self, name: &str) -> &TerminalSet {
        &self.map.get(name).unwrap_or(&UNKNOWN).terminals
    }

    pub fn is_nullable(&self, symbol: &Symbol) -> bool {
        self.first_of_symbol(symbol).nullable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::{grammar, set};

    fn n(name: &str) -> Symbol {
        Symbol::Nonterminal(name.to_string())
    }

    fn t(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    fn first_sets(grammar: &Grammar) -> FirstSets {
        FirstSets::compute(grammar, &Nullability::compute(grammar))
    }

    #[test]
    fn first_of_terminal_is_itself() {
        let first = first_sets(&grammar(""));

        assert_eq!(first.first_of_symbol(&t("a")), FirstSet { terminals: set(&["a"]), nullable: false });
        assert_eq!(first.first_of_symbol(&Symbol::epsilon()), FirstSet { terminals: set(&[]), nullable: true });
    }

    #[test]
    fn first_of_empty_chain_is_empty() {
        let first = first_sets(&grammar(""));

        assert_eq!(first.first_of_chain(&[]), FirstSet::default());
    }

    #[test]
    fn first_of_chain_skips_nullable_prefix() {
        let grammar = grammar("
            S -> A B \"c\" .
            A -> \"a\" .
            A -> \"epsilon\" .
            B -> \"b\" .
            B -> \"epsilon\" .
        ");
        let first = first_sets(&grammar);

        assert_eq!(first.first_of_chain(&[n("A"), n("B")]), FirstSet { terminals: set(&["a", "b"]), nullable: true });
        assert_eq!(first.first_of_chain(&[n("A"), t("x"), n("B")]), FirstSet { terminals: set(&["a", "x"]), nullable: false });
        assert_eq!(first.first("S"), &set(&["a", "b", "c"]));
        assert!(!first.is_nullable(&n("S")));
    }

    #[test]
    fn first_never_exposes_epsilon() {
        let grammar = grammar("
            S -> \"a\" S .
            S -> \"epsilon\" .
            T -> S S .
        ");
        let first = first_sets(&grammar);

        assert_eq!(first.first("S"), &set(&["a"]));
        assert_eq!(first.first("T"), &set(&["a"]));
        for name in grammar.nonterminals() {
            assert!(!first.first(name).contains(EPSILON));
        }
        assert!(first.is_nullable(&n("T")));
    }

    #[test]
    fn first_through_later_definitions() {
        // Needs more than one pass because `expr` is defined before `factor`
        let grammar = grammar("
            expr -> term \"+\" expr .
            expr -> term .
            term -> factor .
            factor -> \"(\" expr \")\" .
            factor -> \"id\" .
        ");
        let first = first_sets(&grammar);

        for name in ["expr", "term", "factor"] {
            assert_eq!(first.first(name), &set(&["(", "id"]), "{}", name);
        }
    }

    #[test]
    fn indirect_left_recursion_terminates() {
        let grammar = grammar("
            A -> B \"x\" .
            B -> A \"y\" .
            B -> \"b\" .
        ");
        let first = first_sets(&grammar);

        assert_eq!(first.first("A"), &set(&["b"]));
        assert_eq!(first.first("B"), &set(&["b"]));
    }

    #[test]
    fn undefined_nonterminal_has_empty_first() {
        let first = first_sets(&grammar("S -> Z \"z\" ."));

        assert!(first.first("Z").is_empty());
        assert!(first.first("not-a-symbol").is_empty());
        assert!(first.first("S").is_empty());
    }

    #[test]
    fn passes_only_grow() {
        let grammar = grammar("
            A -> B .
            B -> C \"b\" .
            C -> D .
            C -> \"c\" .
            D -> \"d\" .
        ");
        let nullability = Nullability::compute(&grammar);
        let mut first = FirstSets {
            map: grammar.nonterminals().map(|name| (name.to_string(), FirstSet::default())).collect(),
        };

        let mut previous = first.clone();
        while first.pass(&grammar) {
            for name in grammar.nonterminals() {
                assert!(previous.first(name).is_subset(first.first(name)), "{}", name);
            }
            previous = first.clone();
        }

        assert_eq!(first, FirstSets::compute(&grammar, &nullability));
        assert_eq!(first.first("A"), &set(&["c", "d"]));
    }

    #[test]
    fn shared_lookaheads() {
        let a = FirstSet { terminals: set(&["x", "y"]), nullable: true };
        let b = FirstSet { terminals: set(&["y", "z"]), nullable: false };
        let c = FirstSet { terminals: set(&[]), nullable: true };

        assert_eq!(a.shared(&b), set(&["y"]));
        assert_eq!(a.shared(&c), set(&[EPSILON]));
        assert!(b.shared(&c).is_empty());
    }
}
