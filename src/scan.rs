//! Token scanner for Python-like source.
//!
//! A lightweight, line-tracking pass that understands exactly what the
//! splitter needs: `#` comments, string literals in all their quoted and
//! prefixed forms, and everything else as opaque words and punctuation.
//! Every token carries 1-based line numbers so the docstring's end row can
//! be read straight off its token.
//!
//! The scanner is also the syntax gate: an unterminated string literal is
//! the class of error a token-level pass can detect, and it is reported as
//! a [`ScanError`] rather than a panic so callers can degrade gracefully.

use std::fmt;

/// Scan failure, with the 1-based line where scanning stopped.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScanError {}

/// A string literal token.
#[derive(Debug, Clone, PartialEq)]
pub struct StrToken {
    /// Text between the quotes, before escape decoding.
    pub body: String,
    /// `r`/`R` prefix present.
    pub raw: bool,
    /// `b`/`B` prefix present.
    pub bytes: bool,
    /// `f`/`F` prefix present.
    pub fstring: bool,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Str(StrToken),
    /// Identifier, keyword, or number — opaque to the scanner.
    Word { line: usize, text: String },
    Punct { line: usize, ch: char },
    /// A newline outside any string literal.
    Newline { line: usize },
}

/// Tokenize normalized (LF-only) source text.
pub fn scan(content: &str) -> Result<Vec<Token>, ScanError> {
    Scanner {
        chars: content.chars().collect(),
        pos: 0,
        line: 1,
    }
    .run()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Scanner {
    fn run(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\x0c' | '\r' => self.pos += 1,
                '\n' => {
                    tokens.push(Token::Newline { line: self.line });
                    self.pos += 1;
                    self.line += 1;
                }
                '\\' if self.chars.get(self.pos + 1) == Some(&'\n') => {
                    // explicit line continuation
                    self.pos += 2;
                    self.line += 1;
                }
                '#' => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.pos += 1;
                    }
                }
                '\'' | '"' => tokens.push(Token::Str(self.string("")?)),
                c if c.is_alphanumeric() || c == '_' => {
                    let start = self.pos;
                    while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                        self.pos += 1;
                    }
                    let word: String = self.chars[start..self.pos].iter().collect();
                    if word.len() <= 2
                        && word.chars().all(|c| "rRbBuUfF".contains(c))
                        && matches!(self.peek(), Some('\'') | Some('"'))
                    {
                        tokens.push(Token::Str(self.string(&word)?));
                    } else {
                        tokens.push(Token::Word {
                            line: self.line,
                            text: word,
                        });
                    }
                }
                c => {
                    tokens.push(Token::Punct {
                        line: self.line,
                        ch: c,
                    });
                    self.pos += 1;
                }
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consume a string literal. `prefix` is the already-consumed prefix
    /// letters; the cursor sits on the opening quote.
    fn string(&mut self, prefix: &str) -> Result<StrToken, ScanError> {
        let start_line = self.line;
        let quote = self.chars[self.pos];
        self.pos += 1;
        let triple = self.peek() == Some(quote) && self.chars.get(self.pos + 1) == Some(&quote);
        if triple {
            self.pos += 2;
        }
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(ScanError {
                        line: self.line,
                        message: "unterminated string literal".into(),
                    })
                }
                Some('\\') => {
                    if self.chars.get(self.pos + 1) == Some(&'\n') {
                        self.line += 1;
                    }
                    self.pos += 2.min(self.chars.len() - self.pos);
                }
                Some('\n') => {
                    if !triple {
                        return Err(ScanError {
                            line: self.line,
                            message: "newline in single-quoted string literal".into(),
                        });
                    }
                    self.line += 1;
                    self.pos += 1;
                }
                Some(c) if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.chars.get(self.pos + 1) == Some(&quote)
                        && self.chars.get(self.pos + 2) == Some(&quote)
                    {
                        break;
                    }
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        let body: String = self.chars[start..self.pos].iter().collect();
        self.pos += if triple { 3 } else { 1 };
        Ok(StrToken {
            body,
            raw: prefix.chars().any(|c| matches!(c, 'r' | 'R')),
            bytes: prefix.chars().any(|c| matches!(c, 'b' | 'B')),
            fstring: prefix.chars().any(|c| matches!(c, 'f' | 'F')),
            start_line,
            end_line: self.line,
        })
    }
}
