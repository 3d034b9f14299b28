use std::collections::HashSet;

use log::{debug, trace};

use crate::grammar::{Grammar, Symbol};

// Nonterminals that can derive the empty string
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Nullability {
    nullable: HashSet<String>,
}

impl Nullability {
    pub fn compute(grammar: &Grammar) -> Self {
        let mut this = Nullability::default();

        let mut passes = 1;
        while this.pass(grammar) {
            passes += 1;
        }
        debug!("nullability reached a fixed point after {} passes", passes);

        this
    }

    // One scan over every nonterminal, returns whether anything was marked
    pub(super) fn pass(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;

        for head in grammar.heads() {
            if self.nullable.contains(head) {
                continue;
            }

            let derives_empty = grammar.productions(head)
                .iter()
                .any(|production| production.is_empty() || self.all_nullable(&production.symbols));

            if derives_empty {
                trace!("`{}` is nullable", head);
                self.nullable.insert(head.to_string());
                changed = true;
            }
        }

        changed
    }

    pub fn is_nullable(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Terminal(_) => symbol.is_epsilon(),
            Symbol::Nonterminal(name) => self.nullable.contains(name),
        }
    }

    // Vacuously true for an empty sequence
    pub fn all_nullable(&self, symbols: &[Symbol]) -> bool {
        symbols.iter().all(|symbol| self.is_nullable(symbol))
    }

    pub fn len(&self) -> usize {
        self.nullable.len()
    }
}
