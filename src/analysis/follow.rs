use std::collections::HashMap;

use log::{debug, trace};

use crate::grammar::{Grammar, Symbol, END_OF_INPUT, EPSILON};
use super::first::FirstSets;
use super::TerminalSet;

static NO_FOLLOW: TerminalSet = TerminalSet::new();

// FOLLOW sets of every nonterminal
#[derive(Debug, Clone, PartialEq)]
pub struct FollowSets {
    map: HashMap<String, TerminalSet>,
}

impl FollowSets {
    pub fn compute(grammar: &Grammar, first: &FirstSets) -> Self {
        let mut this = FollowSets::seeded(grammar);

        let mut passes = 1;
        while this.pass(grammar, first) {
            passes += 1;
        }
        debug!("FOLLOW sets reached a fixed point after {} passes", passes);

        this
    }

    // Empty sets everywhere except the end of input after the start symbol
    fn seeded(grammar: &Grammar) -> Self {
        let mut this = FollowSets {
            map: grammar.nonterminals().map(|name| (name.to_string(), TerminalSet::new())).collect(),
        };

        if let Some(start) = &grammar.start_symbol {
            this.unify(&Symbol::Nonterminal(start.clone()), &TerminalSet::from([END_OF_INPUT.to_string()]));
        }

        this
    }

    // For every `A -> Y1 .. Yk` and every Yi:
    //   FOLLOW(Yi) gains FIRST(Y(i+1) .. Yk)
    //   FOLLOW(Yi) gains FOLLOW(A) when Y(i+1) .. Yk can be empty
    pub(super) fn pass(&mut self, grammar: &Grammar, first: &FirstSets) -> bool {
        let mut changed = false;

        for (head, production) in grammar.all_productions() {
            let symbols = &production.symbols;
            for (i, symbol) in symbols.iter().enumerate() {
                let rest = &symbols[i + 1..];
                let trailer = first.first_of_chain(rest);
                changed |= self.unify(symbol, &trailer.terminals);

                if rest.is_empty() || trailer.nullable {
                    let inherited = self.follow(head).clone();
                    changed |= self.unify(symbol, &inherited);
                }
            }
        }

        changed
    }

    // Merges `additional` into FOLLOW(symbol) and returns whether it grew.
    // Terminals, `"epsilon"` included, have no FOLLOW set to merge into.
    pub fn unify(&mut self, symbol: &Symbol, additional: &TerminalSet) -> bool {
        let name = match symbol {
            Symbol::Nonterminal(name) => name,
            Symbol::Terminal(_) => return false,
        };

        let set = self.map.entry(name.clone()).or_default();
        let before = set.len();
        set.extend(additional.iter().filter(|t| *t != EPSILON).cloned());

        let grew = set.len() != before;
        if grew {
            trace!("FOLLOW({}) grew to {:?}", name, set);
        }
        grew
    }

    // Empty for terminals and unknown names
    pub fn follow(&self, name: &str) -> &TerminalSet {
        self.map.get(name).unwrap_or(&NO_FOLLOW)
    }
}
