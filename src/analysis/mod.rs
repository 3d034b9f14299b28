/*
    This module decides whether a grammar can be parsed with one token of
    lookahead. Each phase runs to a fixed point before the next one starts:
    nullability, then FIRST, then FOLLOW, then the conflict checks.
*/

pub mod conflicts;
pub mod first;
pub mod follow;
pub mod nullable;

use std::collections::BTreeSet;

use log::info;

use crate::grammar::{Grammar, Symbol};
use conflicts::ConflictWarning;
use first::FirstSets;
use follow::FollowSets;
use nullable::Nullability;

// Terminal texts, without quotes
pub type TerminalSet = BTreeSet<String>;

// Everything computed for one grammar. Borrowing the grammar keeps the sets
// from being mixed up with another one.
#[derive(Debug)]
pub struct Analysis<'g> {
    grammar: &'g Grammar,
    pub nullability: Nullability,
    pub first: FirstSets,
    pub follow: FollowSets,
}

pub fn analyze(grammar: &Grammar) -> Analysis<'_> {
    let nullability = Nullability::compute(grammar);
    let first = FirstSets::compute(grammar, &nullability);
    let follow = FollowSets::compute(grammar, &first);

    info!(
        "analyzed {} nonterminals, {} of them nullable",
        grammar.nonterminals().count(),
        nullability.len()
    );

    Analysis {
        grammar,
        nullability,
        first,
        follow
    }
}

impl<'g> Analysis<'g> {
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn is_nullable(&self, name: &str) -> bool {
        self.nullability.is_nullable(&Symbol::Nonterminal(name.to_string()))
    }

    pub fn first(&self, name: &str) -> &TerminalSet {
        self.first.first(name)
    }

    pub fn follow(&self, name: &str) -> &TerminalSet {
        self.follow.follow(name)
    }

    pub fn conflicts(&self) -> Vec<ConflictWarning> {
        conflicts::check(self.grammar, &self.first)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use super::*;
    use crate::analysis::conflicts::ConflictType;
    use crate::grammar::{END_OF_INPUT, EPSILON};
    use crate::parser;

    pub fn grammar(text: &str) -> Grammar {
        parser::parse_reader(text.as_bytes(), Path::new("<test>")).grammar
    }

    pub fn set(terminals: &[&str]) -> TerminalSet {
        terminals.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn optional_repetition() {
        let grammar = grammar("S -> \"a\" S .\nS -> \"epsilon\" .");
        let analysis = analyze(&grammar);

        assert!(analysis.is_nullable("S"));
        assert_eq!(analysis.first("S"), &set(&["a"]));
        assert_eq!(analysis.follow("S"), &set(&[END_OF_INPUT]));
        assert!(analysis.conflicts().is_empty());
    }

    #[test]
    fn duplicate_alternatives() {
        let grammar = grammar("A -> \"x\" .\nA -> \"x\" .");
        let warnings = analyze(&grammar).conflicts();

        assert_eq!(warnings.len(), 1);
        assert!(matches!(&warnings[0].kind, ConflictType::Alternation { nonterminal, .. } if nonterminal == "A"));
    }

    #[test]
    fn nullable_prefix_clash() {
        let grammar = grammar("B -> C \"y\" .\nC -> \"epsilon\" .\nC -> \"y\" .");
        let warnings = analyze(&grammar).conflicts();

        assert_eq!(warnings.len(), 1);
        assert!(matches!(&warnings[0].kind, ConflictType::Concatenation { nonterminal, .. } if nonterminal == "B"));
    }

    #[test]
    fn left_recursive_production_is_not_analyzed() {
        let grammar = grammar("X -> X \"a\" .\nX -> \"b\" .");
        let analysis = analyze(&grammar);

        assert_eq!(analysis.first("X"), &set(&["b"]));
        assert_eq!(analysis.follow("X"), &set(&[END_OF_INPUT]));
        assert!(analysis.conflicts().is_empty());
    }

    #[test]
    fn sets_never_hold_epsilon() {
        let grammar = grammar("
            program -> block \".\" .
            block -> \"begin\" statements \"end\" .
            statements -> statement statements .
            statements -> \"epsilon\" .
            statement -> \"let\" name \"=\" value .
            statement -> \"epsilon\" .
            name -> \"id\" .
            value -> \"epsilon\" .
            value -> \"num\" .
        ");
        let analysis = analyze(&grammar);

        for name in grammar.nonterminals() {
            assert!(!analysis.first(name).contains(EPSILON), "{}", name);
            assert!(!analysis.follow(name).contains(EPSILON), "{}", name);
        }
        assert!(analysis.follow("program").contains(END_OF_INPUT));
        // Two nullable alternatives and a nullable symbol before itself
        assert_eq!(analysis.conflicts().len(), 2);
    }

    #[test]
    fn empty_grammar() {
        let grammar = grammar("");
        let analysis = analyze(&grammar);

        assert!(analysis.grammar().is_empty());
        assert!(analysis.conflicts().is_empty());
    }
}
