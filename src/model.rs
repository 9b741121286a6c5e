//! Data model for split results — format-agnostic.

use crate::literal::Value;
use std::collections::HashMap;

/// Per-file settings collected from `# mkdocs_gallery_<name> = <value>`
/// comments. Later directives with the same name overwrite earlier ones.
pub type FileConfig = HashMap<String, Value>;

/// Classification of a source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Narrative content (docstring or delimiter-comment body).
    Text,
    /// Executable source code.
    Code,
}

/// A contiguous span of the source file, tagged with the 1-based line at
/// which it starts in the original document.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub content: String,
    pub line: usize,
}

impl Block {
    pub fn text(content: impl Into<String>, line: usize) -> Self {
        Block {
            kind: BlockKind::Text,
            content: content.into(),
            line,
        }
    }

    pub fn code(content: impl Into<String>, line: usize) -> Self {
        Block {
            kind: BlockKind::Code,
            content: content.into(),
            line,
        }
    }
}
