use itertools::{Either, Itertools};

use crate::grammar::Grammar;
use super::CompileErrorType::{LeftRecursiveProduction, UndefinedNonterminal};
use super::{CompileError, CompileErrors, Rule};

// Splits off the rules whose production starts with their own head. Those are
// reported and never reach the grammar.
pub fn reject_left_recursion(rules: Vec<Rule>) -> (Vec<Rule>, CompileErrors) {
    rules.into_iter().partition_map(|rule| {
        if rule.production.is_left_recursive(&rule.symbol) {
            Either::Right(CompileError {
                location: rule.production.location,
                kind: LeftRecursiveProduction(rule.symbol)
            })
        } else {
            Either::Left(rule)
        }
    })
}

// One error per undefined nonterminal, placed at its earliest reference
pub fn get_undefined_symbols(grammar: &Grammar) -> CompileErrors {
    grammar.all_productions()
        .flat_map(|(_, production)| production.nonterminals().map(move |name| (name, &production.location)))
        .filter(|(name, _)| !grammar.is_defined(name))
        .sorted_by_key(|(_, location)| location.line)
        .unique_by(|(name, _)| *name)
        .map(|(name, location)| CompileError {
            location: location.clone(),
            kind: UndefinedNonterminal(name.to_string())
        })
        .collect()
}
