use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::*;
use crate::grammar::{Grammar, Production, Symbol};
use super::first::FirstSets;
use super::TerminalSet;

#[derive(Debug, PartialEq, Clone)]
pub enum ConflictType {
    // Two productions of the same nonterminal share a lookahead
    Alternation {
        nonterminal: String,
        first: Vec<Symbol>,
        second: Vec<Symbol>,
        shared: TerminalSet,
    },
    // A nullable symbol shares a lookahead with the symbol after it
    Concatenation {
        nonterminal: String,
        production: Vec<Symbol>,
        left: Symbol,
        right: Symbol,
        shared: TerminalSet,
    },
}

impl DiagnosticKind for ConflictType {
    fn severity(&self) -> Severity {
        Severity::Warning
    }
}

fn show_symbols(symbols: &[Symbol]) -> String {
    symbols.iter().join(" ")
}

pub fn show_terminals(terminals: &TerminalSet) -> String {
    format!("{{{}}}", terminals.iter().map(|t| format!("\"{}\"", t)).join(", "))
}

impl Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictType::Alternation { nonterminal, first, second, shared } => write!(
                f,
                "Uniqueness conflict for `{}` between `{}` and `{}` on {}",
                nonterminal, show_symbols(first), show_symbols(second), show_terminals(shared)
            ),
            ConflictType::Concatenation { nonterminal, production, left, right, shared } => write!(
                f,
                "Uniqueness conflict for `{}` in `{}`: nullable `{}` and `{}` both start with {}",
                nonterminal, show_symbols(production), left, right, show_terminals(shared)
            ),
        }
    }
}

pub type ConflictWarning = Diagnostic<ConflictType>;

// Every pair of alternatives must start differently. Pairs are by position,
// so a duplicated production conflicts with itself.
fn alternation_conflicts(head: &str, productions: &[Production], first: &FirstSets) -> Vec<ConflictWarning> {
    productions.iter()
        .tuple_combinations()
        .filter_map(|(p1, p2)| {
            let shared = first.first_of_chain(&p1.symbols).shared(&first.first_of_chain(&p2.symbols));
            if shared.is_empty() {
                return None;
            }

            Some(ConflictWarning {
                location: p2.location.clone(),
                kind: ConflictType::Alternation {
                    nonterminal: head.to_string(),
                    first: p1.symbols.clone(),
                    second: p2.symbols.clone(),
                    shared
                }
            })
        })
        .collect()
}

// After a nullable symbol, the next one must start differently
fn concatenation_conflicts(head: &str, production: &Production, first: &FirstSets) -> Vec<ConflictWarning> {
    production.symbols.iter()
        .tuple_windows()
        .filter(|(left, _)| first.is_nullable(left))
        .filter_map(|(left, right)| {
            let shared: TerminalSet = first.first_of_symbol(left).terminals
                .intersection(&first.first_of_symbol(right).terminals)
                .cloned()
                .collect();
            if shared.is_empty() {
                return None;
            }

            Some(ConflictWarning {
                location: production.location.clone(),
                kind: ConflictType::Concatenation {
                    nonterminal: head.to_string(),
                    production: production.symbols.clone(),
                    left: left.clone(),
                    right: right.clone(),
                    shared
                }
            })
        })
        .collect()
}

// Reads the finished sets only, so checking twice gives the same list
pub fn check(grammar: &Grammar, first: &FirstSets) -> Vec<ConflictWarning> {
    let mut warnings = Vec::new();

    for head in grammar.heads() {
        let productions = grammar.productions(head);
        warnings.extend(alternation_conflicts(head, productions, first));
        for production in productions {
            warnings.extend(concatenation_conflicts(head, production, first));
        }
    }

    return warnings;
}
