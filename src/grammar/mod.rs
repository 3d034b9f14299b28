/*
    This module is for storing grammars
*/

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::Location;

// Terminal standing for the empty production
pub const EPSILON: &str = "epsilon";
// Terminal that follows the start symbol
pub const END_OF_INPUT: &str = "end-of-file";

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn epsilon() -> Self {
        Symbol::Terminal(EPSILON.to_string())
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Terminal(text) if text == EPSILON)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(text) => write!(f, "\"{}\"", text),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
        }
    }
}

// The right hand side of a single rule, with where it was read from
#[derive(Debug, PartialEq, Clone)]
pub struct Production {
    pub symbols: Vec<Symbol>,
    pub location: Location,
}

impl Production {
    // Drops `"epsilon"` from longer sequences, and turns a sequence with
    // nothing left into the single `"epsilon"` production
    pub fn new(symbols: Vec<Symbol>, location: Location) -> Self {
        let mut symbols = symbols.into_iter().filter(|s| !s.is_epsilon()).collect_vec();
        if symbols.is_empty() {
            symbols.push(Symbol::epsilon());
        }

        Production { symbols, location }
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.len() == 1 && self.symbols[0].is_epsilon()
    }

    pub fn is_left_recursive(&self, head: &str) -> bool {
        matches!(self.symbols.first(), Some(Symbol::Nonterminal(name)) if name == head)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().filter_map(|symbol| match symbol {
            Symbol::Nonterminal(name) => Some(name.as_str()),
            _ => None
        })
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbols.iter().join(" "))
    }
}

#[derive(Debug, PartialEq, Default)]
pub struct Grammar {
    pub start_symbol: Option<String>,
    pub rules: HashMap<String, Vec<Production>>,
    // Every nonterminal name seen, heads or references, in order of appearance
    symbols: Vec<String>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    // The first head added becomes the start symbol
    pub fn add_production(&mut self, head: String, production: Production) {
        self.note_symbol(&head);
        for name in production.nonterminals() {
            self.note_symbol(name);
        }

        if self.start_symbol.is_none() {
            self.start_symbol = Some(head.clone());
        }
        self.rules.entry(head).or_default().push(production);
    }

    fn note_symbol(&mut self, name: &str) {
        if !self.symbols.iter().any(|s| s == name) {
            self.symbols.push(name.to_string());
        }
    }

    // Returns false, leaving the grammar untouched, if `name` has no productions
    pub fn set_start_symbol(&mut self, name: &str) -> bool {
        if !self.is_defined(name) {
            return false;
        }
        self.start_symbol = Some(name.to_string());
        return true;
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    // Undefined nonterminals have no productions
    pub fn productions(&self, name: &str) -> &[Production] {
        self.rules.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    // All nonterminals, including referenced but undefined ones
    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    // Nonterminals with at least one production
    pub fn heads(&self) -> impl Iterator<Item = &str> {
        self.nonterminals().filter(move |name| self.is_defined(name))
    }

    pub fn all_productions(&self) -> impl Iterator<Item = (&str, &Production)> {
        self.heads().flat_map(move |head| self.productions(head).iter().map(move |p| (head, p)))
    }
}
