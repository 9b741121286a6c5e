//! pysplit — split annotated Python example scripts into documentation blocks.
//!
//! Given a gallery example script, this crate extracts the pieces a
//! documentation generator needs to render it as interleaved narrative and
//! code:
//!
//! 1. **Load** — read the file as UTF-8 and normalize CRLF to LF
//! 2. **Parse** — scan the source structure; syntax errors degrade to a
//!    placeholder docstring instead of failing the pipeline
//! 3. **Docstring** — isolate the leading string literal and the exact line
//!    where the remaining content resumes
//! 4. **Config** — collect `# mkdocs_gallery_<name> = <literal>` directives
//! 5. **Split** — partition the remainder into text and code blocks on
//!    section-delimiter comment lines, preserving original line numbers
//!
//! The main entry point is [`split`]; the intermediate stages are public
//! for callers that need only part of the pipeline.

pub mod config;
pub mod docstring;
pub mod literal;
pub mod model;
pub mod scan;
pub mod source;
pub mod split;

pub use config::{extract_config, strip_config_comments};
pub use docstring::SYNTAX_ERROR_DOCSTRING;
pub use literal::Value;
pub use model::{Block, BlockKind, FileConfig};
pub use source::{parse, Module, Source};
pub use split::{split, split_with_source};
