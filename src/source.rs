//! Source loading and structural parsing.
//!
//! Loading normalizes CRLF to LF so all downstream line accounting works on
//! a single convention. Parsing is deliberately forgiving: a file that fails
//! to scan is not an error but a [`Source::Unparsable`] result, and the rest
//! of the pipeline proceeds on the raw text with a placeholder docstring.

use crate::literal;
use crate::scan::{self, StrToken, Token};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Result of structurally parsing one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Module(Module),
    /// The file did not scan (e.g. unterminated string literal).
    Unparsable,
}

/// Token-level structure of a successfully scanned file.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub tokens: Vec<Token>,
}

/// Read a source file and parse its structure.
///
/// Returns the structure (or [`Source::Unparsable`] on a syntax error)
/// together with the normalized content. Only I/O and decoding failures
/// propagate as errors.
pub fn parse(file: &Path) -> Result<(Source, String)> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    // change from Windows format to UNIX for uniformity
    let content = content.replace("\r\n", "\n");

    match scan::scan(&content) {
        Ok(tokens) => Ok((Source::Module(Module { tokens }), content)),
        Err(_) => Ok((Source::Unparsable, content)),
    }
}

impl Module {
    /// Cooked value of the leading docstring expression, if the first
    /// top-level statement is a bare string literal (adjacent literals
    /// concatenate; f-strings and bytes literals do not qualify).
    pub fn docstring_expr(&self) -> Option<String> {
        let mut iter = self.tokens.iter();
        let mut value = match iter.find(|t| !matches!(t, Token::Newline { .. }))? {
            Token::Str(s) => cooked(s)?,
            _ => return None,
        };
        // The statement must consist solely of string literals; a newline
        // or semicolon ends it.
        for token in iter {
            match token {
                Token::Str(s) => value.push_str(&cooked(s)?),
                Token::Newline { .. } | Token::Punct { ch: ';', .. } => break,
                _ => return None,
            }
        }
        Some(value)
    }

    /// End row of the first string token, the line the docstring literal
    /// closes on.
    pub fn first_string_end_line(&self) -> Option<usize> {
        self.tokens.iter().find_map(|t| match t {
            Token::Str(s) => Some(s.end_line),
            _ => None,
        })
    }
}

/// Decoded value of a plain string literal; `None` for tokens that are not
/// string constants in the docstring sense.
fn cooked(token: &StrToken) -> Option<String> {
    if token.bytes || token.fstring {
        return None;
    }
    Some(if token.raw {
        token.body.clone()
    } else {
        literal::unescape(&token.body)
    })
}
