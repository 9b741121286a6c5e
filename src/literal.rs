//! Safe decoding of Python literal expressions.
//!
//! Directive values are written as Python literals (`2`, `'title'`,
//! `[1, 2]`, `{'a': True}`). This module evaluates exactly that grammar —
//! numbers, strings, booleans, `None`, and nested literal collections —
//! and nothing else. Names, calls, operators and f-strings are rejected,
//! so a hostile comment can never execute anything.

use anyhow::{bail, Result};

/// A decoded literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Dict(Vec<(Value, Value)>),
}

/// Decode a literal expression, tolerating surrounding whitespace.
///
/// Fails on anything that is not a pure literal.
pub fn parse_literal(input: &str) -> Result<Value> {
    let mut p = Parser {
        chars: input.chars().collect(),
        pos: 0,
    };
    p.skip_ws();
    let value = p.value()?;
    p.skip_ws();
    if p.pos < p.chars.len() {
        bail!("unexpected trailing characters in literal: {:?}", input);
    }
    Ok(value)
}

/// Decode backslash escape sequences in a (non-raw) string literal body.
///
/// Handles the standard single-character escapes, octal, `\xNN`, `\uXXXX`,
/// `\UXXXXXXXX`, and escaped-newline line continuation. Unrecognized or
/// malformed escapes are kept verbatim, backslash included.
pub fn unescape(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '\\' || i + 1 >= chars.len() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let esc = chars[i + 1];
        i += 2;
        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            '\n' => {} // line continuation
            '0'..='7' => {
                let mut code = esc as u32 - '0' as u32;
                let mut taken = 1;
                while taken < 3 && i < chars.len() && ('0'..='7').contains(&chars[i]) {
                    code = code * 8 + (chars[i] as u32 - '0' as u32);
                    i += 1;
                    taken += 1;
                }
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            'x' | 'u' | 'U' => {
                let width = match esc {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars[i..].iter().take(width).collect();
                match (digits.len() == width)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                {
                    Some(c) => {
                        out.push(c);
                        i += width;
                    }
                    None => {
                        // malformed escape, keep verbatim
                        out.push('\\');
                        out.push(esc);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Result<Value> {
        match self.peek() {
            None => bail!("empty literal"),
            Some('[') => self.list(),
            Some('(') => self.tuple(),
            Some('{') => self.dict_or_set(),
            Some('\'') | Some('"') => self.string(),
            Some('+') | Some('-') => {
                let negative = self.bump() == Some('-');
                self.skip_ws();
                match self.number()? {
                    Value::Int(n) if negative => Ok(Value::Int(-n)),
                    Value::Float(f) if negative => Ok(Value::Float(-f)),
                    v => Ok(v),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.word(),
            Some(c) => bail!("unexpected character {:?} in literal", c),
        }
    }

    /// Keyword constant or string prefix. Any other name is rejected.
    fn word(&mut self) -> Result<Value> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        // A short prefix directly followed by a quote is a string literal.
        if word.len() <= 2 && matches!(self.peek(), Some('\'') | Some('"')) {
            if word.chars().any(|c| matches!(c, 'f' | 'F')) {
                bail!("f-strings are not literals");
            }
            if word.chars().any(|c| matches!(c, 'b' | 'B')) {
                bail!("bytes literals are not supported");
            }
            if word.chars().all(|c| matches!(c, 'r' | 'R' | 'u' | 'U')) {
                let raw = word.chars().any(|c| matches!(c, 'r' | 'R'));
                return self.string_with(raw);
            }
        }

        match word.as_str() {
            "None" => Ok(Value::None),
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            _ => bail!("name {:?} is not a literal", word),
        }
    }

    fn string(&mut self) -> Result<Value> {
        self.string_with(false)
    }

    fn string_with(&mut self, raw: bool) -> Result<Value> {
        let mut text = self.string_body(raw)?;
        // Adjacent string literals concatenate, as in Python.
        loop {
            self.skip_ws();
            match self.peek() {
                Some('\'') | Some('"') => text.push_str(&self.string_body(false)?),
                Some(c) if c.is_alphabetic() => {
                    let save = self.pos;
                    match self.word() {
                        Ok(Value::Str(s)) => text.push_str(&s),
                        Ok(_) | Err(_) => {
                            self.pos = save;
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(Value::Str(text))
    }

    /// Consume one quoted string and return its decoded body.
    fn string_body(&mut self, raw: bool) -> Result<String> {
        let quote = self.bump().unwrap();
        let triple = self.peek() == Some(quote) && self.chars.get(self.pos + 1) == Some(&quote);
        if triple {
            self.pos += 2;
        }
        let start = self.pos;
        loop {
            match self.peek() {
                None => bail!("unterminated string literal"),
                Some('\\') => {
                    self.pos += 2.min(self.chars.len() - self.pos);
                }
                Some('\n') if !triple => bail!("unterminated string literal"),
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
        Ok(if raw { body } else { unescape(&body) })
    }

    fn number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some('0')
            && matches!(
                self.chars.get(self.pos + 1),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            )
        {
            let radix = match self.chars[self.pos + 1] {
                'x' | 'X' => 16,
                'o' | 'O' => 8,
                _ => 2,
            };
            self.pos += 2;
            let dstart = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                self.pos += 1;
            }
            let digits: String = self.chars[dstart..self.pos]
                .iter()
                .filter(|&&c| c != '_')
                .collect();
            match i64::from_str_radix(&digits, radix) {
                Ok(n) => return Ok(Value::Int(n)),
                Err(_) => bail!("invalid integer literal"),
            }
        }

        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => self.pos += 1,
                '.' => {
                    is_float = true;
                    self.pos += 1;
                }
                'e' | 'E' => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.peek(), Some('+') | Some('-')) {
                        self.pos += 1;
                    }
                }
                'j' | 'J' => bail!("complex literals are not supported"),
                _ => break,
            }
        }
        let text: String = self.chars[start..self.pos]
            .iter()
            .filter(|&&c| c != '_')
            .collect();
        if text.is_empty() || text == "." {
            bail!("invalid number literal");
        }
        if is_float {
            match text.parse::<f64>() {
                Ok(f) => Ok(Value::Float(f)),
                Err(_) => bail!("invalid float literal {:?}", text),
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => Ok(Value::Int(n)),
                Err(_) => bail!("invalid integer literal {:?}", text),
            }
        }
    }

    fn list(&mut self) -> Result<Value> {
        self.pos += 1; // [
        let (items, _) = self.elements(']')?;
        Ok(Value::List(items))
    }

    fn tuple(&mut self) -> Result<Value> {
        self.pos += 1; // (
        let (mut items, saw_comma) = self.elements(')')?;
        // A parenthesized single value without a comma is grouping.
        if items.len() == 1 && !saw_comma {
            return Ok(items.pop().unwrap());
        }
        Ok(Value::Tuple(items))
    }

    fn dict_or_set(&mut self) -> Result<Value> {
        self.pos += 1; // {
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Value::Dict(Vec::new())); // {} is an empty dict
        }
        let first = self.value()?;
        self.skip_ws();
        if self.peek() == Some(':') {
            self.pos += 1;
            self.skip_ws();
            let mut entries = vec![(first, self.value()?)];
            loop {
                self.skip_ws();
                match self.bump() {
                    Some('}') => return Ok(Value::Dict(entries)),
                    Some(',') => {
                        self.skip_ws();
                        if self.peek() == Some('}') {
                            self.pos += 1;
                            return Ok(Value::Dict(entries));
                        }
                        let key = self.value()?;
                        self.skip_ws();
                        if self.bump() != Some(':') {
                            bail!("expected ':' in dict literal");
                        }
                        self.skip_ws();
                        entries.push((key, self.value()?));
                    }
                    _ => bail!("expected ',' or '}}' in dict literal"),
                }
            }
        }
        let mut items = vec![first];
        loop {
            self.skip_ws();
            match self.bump() {
                Some('}') => return Ok(Value::Set(items)),
                Some(',') => {
                    self.skip_ws();
                    if self.peek() == Some('}') {
                        self.pos += 1;
                        return Ok(Value::Set(items));
                    }
                    items.push(self.value()?);
                }
                _ => bail!("expected ',' or '}}' in set literal"),
            }
        }
    }

    /// Comma-separated values up to `close`. Returns the items and whether
    /// any comma was seen (needed to distinguish `(1)` from `(1,)`).
    fn elements(&mut self, close: char) -> Result<(Vec<Value>, bool)> {
        let mut items = Vec::new();
        let mut saw_comma = false;
        loop {
            self.skip_ws();
            match self.peek() {
                None => bail!("unterminated {:?} literal", close),
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok((items, saw_comma));
                }
                Some(_) => {
                    items.push(self.value()?);
                    self.skip_ws();
                    match self.peek() {
                        Some(',') => {
                            saw_comma = true;
                            self.pos += 1;
                        }
                        Some(c) if c == close => {}
                        _ => bail!("expected ',' or {:?} in literal", close),
                    }
                }
            }
        }
    }
}
