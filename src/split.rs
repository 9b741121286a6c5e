//! Block splitting — partition a source file into text and code blocks.
//!
//! Section delimiters are comment lines of 20-or-more `#` characters or
//! `# %%` cell markers, each followed by zero or more comment lines forming
//! the narrative body. A running line counter is threaded through the walk
//! so every emitted block carries the 1-based line at which it starts in
//! the original file, including across segments that are dropped for being
//! empty.

use crate::config;
use crate::docstring;
use crate::model::{Block, FileConfig};
use crate::source::Source;
use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static BLOCK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?P<header_line>^#{20,}.*|^# ?%%.*)\s(?P<text_content>(?:^#.*\s?)*)").unwrap()
});

static HASH_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#").unwrap());

/// Split a source file into its file config and ordered block sequence.
///
/// The sequence always starts with the docstring as a text block at line 1.
pub fn split(file: &Path) -> Result<(FileConfig, Vec<Block>)> {
    let (file_conf, blocks, _) = split_with_source(file)?;
    Ok((file_conf, blocks))
}

/// Like [`split`], additionally returning the parsed [`Source`].
pub fn split_with_source(file: &Path) -> Result<(FileConfig, Vec<Block>, Source)> {
    let (docstring, rest_of_content, mut lineno, source) = docstring::docstring_and_rest(file)?;
    let mut blocks = vec![Block::text(docstring, 1)];

    let file_conf = config::extract_config(&rest_of_content);

    let mut pos_so_far = 0;
    for caps in BLOCK_PATTERN.captures_iter(&rest_of_content) {
        let m = caps.get(0).unwrap();

        let code_block_content = &rest_of_content[pos_so_far..m.start()];
        if !code_block_content.trim().is_empty() {
            blocks.push(Block::code(code_block_content, lineno));
        }
        lineno += code_block_content.matches('\n').count();

        lineno += 1; // ignored header line of hashes
        let text_content = caps.name("text_content").map_or("", |c| c.as_str());
        let text_block_content = dedent(&HASH_PREFIX.replace_all(text_content, ""))
            .trim_start()
            .to_string();
        if !text_block_content.trim().is_empty() {
            blocks.push(Block::text(text_block_content, lineno));
        }
        lineno += text_content.matches('\n').count();

        pos_so_far = m.end();
    }

    let remaining_content = &rest_of_content[pos_so_far..];
    if !remaining_content.trim().is_empty() {
        blocks.push(Block::code(remaining_content, lineno));
    }

    Ok((file_conf, blocks, source))
}

/// Remove the common leading whitespace margin from all lines, following
/// `textwrap.dedent`: whitespace-only lines are normalized to empty and do
/// not count toward the margin.
fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| {
            if line.chars().all(|c| c == ' ' || c == '\t') {
                ""
            } else {
                line
            }
        })
        .collect();

    let mut margin: Option<&str> = None;
    for line in &lines {
        if line.is_empty() {
            continue;
        }
        let stripped = line.trim_start_matches([' ', '\t']);
        let indent = &line[..line.len() - stripped.len()];
        margin = Some(match margin {
            None => indent,
            Some(m) => common_prefix(m, indent),
        });
    }

    let margin = margin.unwrap_or("");
    lines
        .iter()
        .map(|line| line.strip_prefix(margin).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedent_removes_common_margin() {
        assert_eq!(dedent("  a\n  b\n"), "a\nb\n");
        assert_eq!(dedent("  a\n    b\n"), "a\n  b\n");
    }

    #[test]
    fn dedent_ignores_blank_lines() {
        assert_eq!(dedent("  a\n\n  b\n"), "a\n\nb\n");
        assert_eq!(dedent("  a\n \n  b\n"), "a\n\nb\n");
    }

    #[test]
    fn dedent_mixed_indent_keeps_remainder() {
        assert_eq!(dedent("\ta\n\t\tb"), "a\n\tb");
    }

    #[test]
    fn dedent_no_margin() {
        assert_eq!(dedent("a\n  b\n"), "a\n  b\n");
    }

    #[test]
    fn header_pattern_shapes() {
        assert!(BLOCK_PATTERN.is_match("####################\n"));
        assert!(BLOCK_PATTERN.is_match("# %%\n"));
        assert!(BLOCK_PATTERN.is_match("# %% With a title\n"));
        assert!(BLOCK_PATTERN.is_match("#%% Terse marker\n"));
        assert!(!BLOCK_PATTERN.is_match("### short run\n"));
        assert!(!BLOCK_PATTERN.is_match("x = 1  # %% not at line start\n"));
    }
}
