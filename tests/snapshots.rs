//! Snapshot tests for the wikispan listing output.
//!
//! Scans inline text with the builtin registry and compares the listing
//! against inline snapshots. Run with `cargo insta review` to update them.

use wikispan_registry::Registry;
use wikispan_scanner::{format_segments, Scanner};

/// Helper to scan one span and render the listing.
fn listing(input: &str, tokens_only: bool) -> String {
    let scanner = Scanner::new(Registry::with_builtins().freeze());
    let scan = scanner.scan(input);
    format_segments(scan.segments(), tokens_only).trim_end().to_string()
}

// =============================================================================
// Links
// =============================================================================

#[test]
fn test_snapshot_single_link() {
    insta::assert_snapshot!(listing("see [[ Home | home ]] page", false), @r#"
    text  "see "
    token wiki_link display="Home" target="home"
      text  "Home"
    text  " page"
    "#);
}

#[test]
fn test_snapshot_image_and_adjacent_links() {
    insta::assert_snapshot!(listing("![[ cat | cat.png ]] and [[a|b]][[c|d]]", false), @r#"
    token wiki_image alt="cat" target="cat.png"
    text  " and "
    token wiki_link display="a" target="b"
      text  "a"
    token wiki_link display="c" target="d"
      text  "c"
    "#);
}

#[test]
fn test_snapshot_unclosed_link() {
    insta::assert_snapshot!(listing("[[ broken | link", false), @r#"text  "[[ broken | link""#);
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn test_snapshot_comment_nested_in_link() {
    insta::assert_snapshot!(listing("[[ see %%todo%% | page ]] %% hidden %%", false), @r#"
    token wiki_link display="see %%todo%%" target="page"
      text  "see "
      token wiki_comment text="todo"
    text  " "
    token wiki_comment text=" hidden "
    "#);
}

#[test]
fn test_snapshot_tokens_only() {
    insta::assert_snapshot!(listing("a [[x|y]] b %%c%%", true), @r#"
    token wiki_link display="x" target="y"
    token wiki_comment text="c"
    "#);
}
