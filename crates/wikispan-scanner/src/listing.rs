//! Plain-text listing of scan output.
//!
//! One line per segment; children are indented by two spaces per level.
//!
//! ```text
//! text  "see "
//! token wiki_link display="Home" target="home"
//!   text  "Home"
//! text  " page"
//! ```

use crate::segment::{Segment, TokenNode};
use std::fmt::Write;

/// Render segments as a listing.
///
/// With `tokens_only`, plain text runs are left out.
pub fn format_segments(segments: &[Segment], tokens_only: bool) -> String {
    let mut out = String::new();
    write_segments(&mut out, segments, tokens_only, 0);
    out
}

fn write_segments(out: &mut String, segments: &[Segment], tokens_only: bool, depth: usize) {
    for segment in segments {
        match segment {
            Segment::Text(run) => {
                if !tokens_only {
                    let _ = writeln!(out, "{}text  {:?}", indent(depth), run.text());
                }
            }
            Segment::Token(node) => {
                let _ = writeln!(out, "{}{}", indent(depth), token_line(node));
                write_segments(out, node.children(), tokens_only, depth + 1);
            }
        }
    }
}

fn token_line(node: &TokenNode) -> String {
    let mut line = format!("token {}", node.kind());
    for (name, value) in node.fields() {
        let _ = write!(line, " {}={:?}", name, value);
    }
    line
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
