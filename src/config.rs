//! In-file configuration comments.
//!
//! The pattern for in-file config comments is designed to not greedily
//! match newlines at the start and end, except for one newline at the end.
//! This ensures that the matched pattern can be removed from the code
//! without changing the block structure; i.e. empty newlines are
//! preserved, e.g. in
//!
//! ```text
//! a = 1
//!
//! # mkdocs_gallery_thumbnail_number = 2
//!
//! b = 2
//! ```

use crate::literal;
use crate::model::FileConfig;
use regex::Regex;
use std::sync::LazyLock;

static INFILE_CONFIG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#\s*mkdocs_gallery_([A-Za-z0-9_]+)(\s*=\s*(.+))?[ \t]*\n?").unwrap()
});

/// Pull out the file-specific config specified in source comments as
/// `# mkdocs_gallery_<name> = <value>`.
///
/// A bare `# mkdocs_gallery_<name>` is a flag, not a setting, and is
/// skipped. Values that fail to decode as literals are skipped with a
/// warning. Later directives overwrite earlier ones of the same name.
pub fn extract_config(content: &str) -> FileConfig {
    let mut file_conf = FileConfig::new();
    for caps in INFILE_CONFIG_PATTERN.captures_iter(content) {
        let name = &caps[1];
        let value = match caps.get(3) {
            Some(m) => m.as_str(),
            None => continue, // a flag rather than a config setting
        };
        match literal::parse_literal(value) {
            Ok(decoded) => {
                file_conf.insert(name.to_string(), decoded);
            }
            Err(_) => eprintln!(
                "warning: mkdocs-gallery option {} was passed invalid value {}",
                name, value
            ),
        }
    }
    file_conf
}

/// Return `block` with in-file config comments removed.
///
/// Comment lines of the pattern `# mkdocs_gallery_[option] = [val]` are
/// removed, but surrounding empty lines are preserved.
pub fn strip_config_comments(block: &str) -> String {
    INFILE_CONFIG_PATTERN.replace_all(block, "").into_owned()
}
