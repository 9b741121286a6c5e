use pysplit::{
    split, split_with_source, strip_config_comments, Block, BlockKind, Source, Value,
    SYNTAX_ERROR_DOCSTRING,
};
use std::path::PathBuf;
use tempfile::TempDir;

/// Write an example script into `dir` and return its path.
fn script(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("example.py");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn first_block_is_the_docstring_at_line_one() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "\"\"\"Demo.\"\"\"\nx = 1\n");

    let (conf, blocks) = split(&path).unwrap();
    assert!(conf.is_empty());
    assert_eq!(blocks[0], Block::text("Demo.", 1));
}

#[test]
fn file_without_delimiters_gives_two_blocks() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "\"\"\"Demo.\"\"\"\nx = 1\ny = 2\n");

    let (_, blocks) = split(&path).unwrap();
    assert_eq!(
        blocks,
        vec![Block::text("Demo.", 1), Block::code("x = 1\ny = 2\n", 2)]
    );
}

#[test]
fn whitespace_only_remainder_gives_one_block() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "\"\"\"Demo.\"\"\"\n\n   \n");

    let (_, blocks) = split(&path).unwrap();
    assert_eq!(blocks, vec![Block::text("Demo.", 1)]);
}

#[test]
fn hash_header_splits_with_correct_lines() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "\"\"\"Demo.\"\"\"\n\
         \n\
         #########################\n\
         # First line.\n\
         # Second line.\n\
         \n\
         x = 1\n",
    );

    let (_, blocks) = split(&path).unwrap();
    assert_eq!(
        blocks,
        vec![
            Block::text("Demo.", 1),
            Block::text("First line.\nSecond line.\n", 4),
            Block::code("\nx = 1\n", 6),
        ]
    );
}

#[test]
fn percent_marker_splits_like_hash_header() {
    let dir = TempDir::new().unwrap();
    let hashes = script(
        &dir,
        "\"\"\"Demo.\"\"\"\n\n#########################\n# Narrative.\n\nx = 1\n",
    );
    let (_, expected) = split(&hashes).unwrap();

    let path = dir.path().join("percent.py");
    std::fs::write(
        &path,
        "\"\"\"Demo.\"\"\"\n\n# %%\n# Narrative.\n\nx = 1\n",
    )
    .unwrap();
    let (_, blocks) = split(&path).unwrap();

    assert_eq!(blocks, expected);
}

#[test]
fn percent_marker_with_title() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "\"\"\"Demo.\"\"\"\na = 1\n# %% This title is ignored\n# Narrative.\nb = 2\n",
    );

    let (_, blocks) = split(&path).unwrap();
    assert_eq!(
        blocks,
        vec![
            Block::text("Demo.", 1),
            Block::code("a = 1\n", 2),
            Block::text("Narrative.\n", 4),
            Block::code("b = 2\n", 5),
        ]
    );
}

#[test]
fn multiline_docstring_shifts_following_lines() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "\"\"\"\nTitle.\n\nBody text.\n\"\"\"\nimport x\n");

    let (_, blocks) = split(&path).unwrap();
    // Backward-compat: the literal opens with a newline, so the cleaned
    // docstring keeps one.
    assert_eq!(
        blocks,
        vec![
            Block::text("\nTitle.\n\nBody text.", 1),
            Block::code("import x\n", 6),
        ]
    );
}

#[test]
fn line_numbers_are_non_decreasing() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "\"\"\"Demo.\"\"\"\n\
         a = 1\n\
         ####################\n\
         # One.\n\
         b = 2\n\
         \n\
         # %%\n\
         # Two.\n\
         \n\
         c = 3\n",
    );

    let (_, blocks) = split(&path).unwrap();
    assert!(blocks.len() >= 5);
    for pair in blocks.windows(2) {
        assert!(pair[0].line <= pair[1].line, "line numbers went backwards");
    }
}

#[test]
fn consecutive_headers_emit_no_empty_block() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "\"\"\"Demo.\"\"\"\n\
         ####################\n\
         ####################\n\
         # Narrative.\n\
         z = 3\n",
    );

    let (_, blocks) = split(&path).unwrap();
    assert!(blocks.iter().all(|b| !b.content.trim().is_empty()));
    assert_eq!(blocks.last().unwrap(), &Block::code("z = 3\n", 5));
}

#[test]
fn syntax_error_falls_back_to_placeholder() {
    let dir = TempDir::new().unwrap();
    let raw = "x = 'unclosed\ny = 1\n";
    let path = script(&dir, raw);

    let (conf, blocks, source) = split_with_source(&path).unwrap();
    assert!(conf.is_empty());
    assert_eq!(source, Source::Unparsable);
    assert_eq!(
        blocks,
        vec![
            Block::text(SYNTAX_ERROR_DOCSTRING, 1),
            Block::code(raw, 1),
        ]
    );
}

#[test]
fn missing_docstring_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "x = 1\n");

    let err = split(&path).unwrap_err();
    assert!(err.to_string().contains("Could not find docstring"));
}

#[test]
fn missing_file_is_an_error() {
    let err = split(std::path::Path::new("/no/such/example.py")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn crlf_input_is_normalized() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "\"\"\"Demo.\"\"\"\r\nx = 1\r\n");

    let (_, blocks) = split(&path).unwrap();
    assert_eq!(
        blocks,
        vec![Block::text("Demo.", 1), Block::code("x = 1\n", 2)]
    );
}

#[test]
fn returns_module_source_for_valid_files() {
    let dir = TempDir::new().unwrap();
    let path = script(&dir, "\"\"\"Demo.\"\"\"\nx = 1\n");

    let (_, _, source) = split_with_source(&path).unwrap();
    assert!(matches!(source, Source::Module(_)));
}

#[test]
fn config_directives_are_collected_and_strippable() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "\"\"\"Demo.\"\"\"\n\
         a = 1\n\
         \n\
         # mkdocs_gallery_thumbnail_number = 2\n\
         \n\
         # mkdocs_gallery_skip\n\
         b = 2\n",
    );

    let (conf, blocks) = split(&path).unwrap();
    assert_eq!(conf.len(), 1, "flag-only directive must not be stored");
    assert_eq!(conf["thumbnail_number"], Value::Int(2));

    // Stripping removes directive lines (flags included) but keeps the
    // blank lines on either side of them.
    let code = &blocks[1];
    assert_eq!(code.kind, BlockKind::Code);
    assert_eq!(
        strip_config_comments(&code.content),
        "a = 1\n\n\nb = 2\n"
    );
}

#[test]
fn invalid_directive_value_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = script(
        &dir,
        "\"\"\"Demo.\"\"\"\n# mkdocs_gallery_foo = {unclosed\nx = 1\n",
    );

    let (conf, _) = split(&path).unwrap();
    assert!(!conf.contains_key("foo"));
}
