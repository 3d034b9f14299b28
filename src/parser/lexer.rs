use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Period,
    Nonterminal(String),
    Terminal(String)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let token_text = line.peeking_take_while(|&c| c != '\"').collect();

    // Check if there is a close quote and consume it if there is
    if line.next() != Some('\"') {
        return Err(CompileErrorType::UnmatchedQuote);
    }

    Ok(Token::Terminal(token_text))
}

// Stops before the first character that can't be part of a name, so that a
// period directly after a name is still seen
pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    Ok(Token::Nonterminal(line.peeking_take_while(|&c| is_name_char(c)).collect()))
}

pub fn lex_arrow(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next(); // Consume dash
    match line.next() {
        Some('>') => Ok(Token::Arrow),
        _ => Err(CompileErrorType::UnexpectedCharacter('-'))
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == '.' {
            line_chars.next();
            tokens.push(Token::Period);
        } else if c == '-' {
            tokens.push(lex_arrow(&mut line_chars)?);
        } else if c == '\"' {
            tokens.push(lex_terminal(&mut line_chars)?);
        } else if is_name_char(c) {
            tokens.push(lex_nonterminal(&mut line_chars)?);
        } else if c.is_whitespace() {
            line_chars.next();
        } else {
            return Err(CompileErrorType::UnexpectedCharacter(c));
        }
    }

    return Ok(tokens);
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"begin\" block \"end\"",
            "\".\"",
            "\"a\"\"b\"",
            "\"two words\" ."
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("begin".to_string()), " block \"end\""),
            (Token::Terminal(".".to_string()), ""),
            (Token::Terminal("a".to_string()), "\"b\""),
            (Token::Terminal("two words".to_string()), " .")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_mismatched_terminal() {
        for line in ["\"epsilon", "\"x -> y ."] {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }
    }

    #[test]
    fn lex_normal_nonterminal() {
        let lines = vec![
            "expr_tail -> term",
            "block.",
            "x1"
        ];
        let answers = vec![
            (Token::Nonterminal("expr_tail".to_string()), " -> term"),
            (Token::Nonterminal("block".to_string()), "."),
            (Token::Nonterminal("x1".to_string()), "")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "funcdef -> \"func\" typename identifier parmblk .",
            "S -> \"a\" S.",
            "tail->\"epsilon\"."
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("funcdef".to_string()),
                Token::Arrow,
                Token::Terminal("func".to_string()),
                Token::Nonterminal("typename".to_string()),
                Token::Nonterminal("identifier".to_string()),
                Token::Nonterminal("parmblk".to_string()),
                Token::Period
            ],
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Arrow,
                Token::Terminal("a".to_string()),
                Token::Nonterminal("S".to_string()),
                Token::Period
            ],
            vec![
                Token::Nonterminal("tail".to_string()),
                Token::Arrow,
                Token::Terminal("epsilon".to_string()),
                Token::Period
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }

    #[test]
    fn lex_malformed_line() {
        assert_eq!(lex_line("a = b ."), Err(CompileErrorType::UnexpectedCharacter('=')));
        assert_eq!(lex_line("a - b ."), Err(CompileErrorType::UnexpectedCharacter('-')));
        assert_eq!(lex_line("a -> [b] ."), Err(CompileErrorType::UnexpectedCharacter('[')));
    }
}
