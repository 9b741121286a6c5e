//! Docstring extraction — separate a file into docstring and remainder.

use crate::source::{self, Source};
use anyhow::{bail, Result};
use std::path::Path;

/// Placeholder substituted when a file fails to parse, so the rest of the
/// pipeline can proceed uniformly on the raw text.
pub const SYNTAX_ERROR_DOCSTRING: &str =
    "\nSyntaxError\n===========\n\nExample script with invalid Python syntax\n";

/// Separate a file's content into docstring and the rest.
///
/// Returns `(docstring, rest, lineno, source)` where `lineno` is the
/// 1-based line at which `rest` begins in the original file. For unparsable
/// files the docstring is [`SYNTAX_ERROR_DOCSTRING`], `rest` is the whole
/// content and `lineno` is 1. A parsable file without a leading docstring
/// is an error: the gallery contract requires one.
pub fn docstring_and_rest(file: &Path) -> Result<(String, String, usize, Source)> {
    let (source, content) = source::parse(file)?;

    let module = match &source {
        Source::Unparsable => {
            return Ok((SYNTAX_ERROR_DOCSTRING.to_string(), content, 1, source))
        }
        Source::Module(module) => module,
    };

    let value = match module.docstring_expr() {
        Some(value) => value,
        None => bail!(
            "Could not find docstring in file \"{}\". A docstring is required \
             by mkdocs-gallery unless the file is ignored by \"ignore_pattern\"",
            file.display()
        ),
    };

    let mut docstring = cleandoc(&value);
    // Strict backward compat: the historical line-counting scheme kept one
    // leading newline when the literal opened with one, even though cleandoc
    // strips it.
    if value.starts_with('\n') {
        docstring.insert(0, '\n');
    }

    // The docstring literal's token tells us the line it closes on; content
    // after that line is the rest of the file.
    let lineno = module.first_string_end_line().unwrap_or(0);
    let rest = content
        .split('\n')
        .skip(lineno)
        .collect::<Vec<_>>()
        .join("\n");

    Ok((docstring, rest, lineno + 1, source))
}

/// Clean up indentation from a docstring, following `inspect.cleandoc`:
/// expand tabs, lstrip the first line, remove the common leading margin of
/// the later lines, and drop leading/trailing empty lines.
pub fn cleandoc(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let mut lines: Vec<String> = expanded.split('\n').map(str::to_string).collect();

    let mut margin = usize::MAX;
    for line in &lines[1..] {
        let stripped = line.trim_start();
        if !stripped.is_empty() {
            margin = margin.min(line.chars().count() - stripped.chars().count());
        }
    }

    lines[0] = lines[0].trim_start().to_string();
    if margin < usize::MAX {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    lines.join("\n")
}

/// Expand tabs to 8-column stops, resetting at newlines.
fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = 8 - col % 8;
                out.extend(std::iter::repeat(' ').take(pad));
                col += pad;
            }
            '\n' => {
                out.push('\n');
                col = 0;
            }
            c => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}
