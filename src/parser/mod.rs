/*
    This module loads BNF grammars, one production per line
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::info;

use crate::grammar::*;
use crate::error_handling::*;
use lexer::*;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule has no `->` after the nonterminal
    MissingArrow,
    // A rule has more than one `->`
    UnexpectedArrow,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // A rule does not end with `.`
    MissingPeriod,
    // A `.` shows up before the end of the rule
    UnexpectedPeriod,
    // There is an unclosed quote
    UnmatchedQuote,
    // A character that can't start any token
    UnexpectedCharacter(char),
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // A production starts with its own nonterminal
    LeftRecursiveProduction(String),
    // The requested start symbol has no productions
    UndefinedStartSymbol(String),
    // A blank line got too deep into the parser
    // This is a problem with the loader, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl DiagnosticKind for CompileErrorType {
    fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        use CompileErrorType::*;
        match (self, other) {
            (FileError(a), FileError(b)) => a.kind() == b.kind(),
            (UnexpectedCharacter(a), UnexpectedCharacter(b)) => a == b,
            (UndefinedNonterminal(a), UndefinedNonterminal(b))
            | (LeftRecursiveProduction(a), LeftRecursiveProduction(b))
            | (UndefinedStartSymbol(a), UndefinedStartSymbol(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            CompileErrorType::UnexpectedArrow => write!(f, "Unexpected `->` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::MissingPeriod => write!(f, "Production does not end with `.`"),
            CompileErrorType::UnexpectedPeriod => write!(f, "Unexpected `.` before the end of the production"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::UnexpectedCharacter(c) => write!(f, "Unexpected character `{}`", c),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Undefined nonterminal `{}`", nonterminal),
            CompileErrorType::LeftRecursiveProduction(nonterminal) => write!(f, "Left-recursive production for `{}` was dropped", nonterminal),
            CompileErrorType::UndefinedStartSymbol(nonterminal) => write!(f, "Start symbol `{}` has no productions", nonterminal),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with the loader, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Diagnostic<CompileErrorType>;
pub type CompileErrors = Diagnostics<CompileErrorType>;

fn io_error(error: std::io::Error, file: PathBuf, line: usize) -> CompileError {
    CompileError {
        location: Location {
            file,
            line
        },
        kind: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;

#[derive(PartialEq, Debug)]
pub struct Rule {
    pub symbol: String,
    pub production: Production
}

// A grammar along with everything that went wrong while loading it
#[derive(Debug)]
pub struct Loaded {
    pub grammar: Grammar,
    pub errors: CompileErrors
}

impl Loaded {
    // Makes `name` the start symbol. An undefined name is reported against
    // the whole file and the first head stays the start symbol.
    pub fn override_start(&mut self, name: &str, file: PathBuf) {
        if self.grammar.set_start_symbol(name) {
            return;
        }

        self.errors.push(CompileError {
            location: Location::whole_file(file),
            kind: CompileErrorType::UndefinedStartSymbol(name.to_string())
        });
        self.errors.sort_by_key(|error| error.location.line);
    }
}

fn parse_production(tokens: &[Token]) -> Result<Vec<Symbol>> {
    tokens.iter().map(|t| match t {
        Token::Arrow => Err(CompileErrorType::UnexpectedArrow),
        Token::Period => Err(CompileErrorType::UnexpectedPeriod),
        Token::Nonterminal(s) => Ok(Symbol::Nonterminal(s.clone())),
        Token::Terminal(s) => Ok(Symbol::Terminal(s.clone()))
    }).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    // Try to get the token the rule is for. The match returns a result which
    // is then unwrapped with the ? operator
    let symbol = match tokens.get(0) {
        Some(Token::Nonterminal(s)) => Ok(s.clone()),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Arrow) {
        return Err(CompileErrorType::MissingArrow)
    }

    let body = match tokens[2..].split_last() {
        Some((Token::Period, body)) => body,
        _ => return Err(CompileErrorType::MissingPeriod)
    };

    let production = Production::new(parse_production(body)?, location);

    return Ok(Rule {
        symbol,
        production
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|kind| CompileError { location, kind })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with(';')
}

// Returns an iterator over the lines of a source, with the io errors wrapped
// in CompileError and enumerated
fn source_line_nums<'a>(reader: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .enumerate()
        .map(move |(num, line)| (num + 1, line.map_err(|e| io_error(e, path.to_path_buf(), num + 1))))
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
}

// Builds a grammar out of parsed rules. Left-recursive productions are
// dropped and undefined nonterminals are reported, but loading always goes on.
pub fn load(rules: Vec<Rule>) -> Loaded {
    let (rules, mut errors) = verifier::reject_left_recursion(rules);

    let mut grammar = Grammar::new();
    for rule in rules {
        grammar.add_production(rule.symbol, rule.production);
    }

    errors.extend(verifier::get_undefined_symbols(&grammar));
    errors.sort_by_key(|error| error.location.line);

    return Loaded {
        grammar,
        errors
    };
}

pub fn parse_reader<'a>(reader: impl BufRead + 'a, path: &'a Path) -> Loaded {
    let parsed_lines = source_line_nums(reader, path).map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.to_path_buf(),
            line: num
        }))
    });

    let (rules, mut errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    let rule_count = rules.len();

    let loaded = load(rules);
    errors.extend(loaded.errors);
    errors.sort_by_key(|error| error.location.line);

    info!(
        "loaded {} of {} productions for {} nonterminals from {}",
        loaded.grammar.all_productions().count(),
        rule_count,
        loaded.grammar.heads().count(),
        path.display()
    );

    return Loaded {
        grammar: loaded.grammar,
        errors
    };
}

// Only failing to open the file is fatal, everything else ends up in `errors`
pub fn parse_file(path: &Path) -> LineResult<Loaded> {
    let file = File::open(path).map_err(|e| io_error(e, path.to_path_buf(), 0))?;
    Ok(parse_reader(std::io::BufReader::new(file), path))
}
