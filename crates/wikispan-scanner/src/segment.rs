//! Scan output types.
//!
//! A scan splits a text span into [`Segment`]s: plain [`TextRun`]s and
//! [`TokenNode`]s. Every segment records the byte range it covers, so the
//! original text can always be rebuilt from the output.

use wikispan_core::{MalformedMatchError, Span};
use wikispan_registry::Fields;

/// A run of plain text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    span: Span,
    text: String,
}

impl TextRun {
    /// Create a text run covering `span`.
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Byte range in the scanned text.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The text itself.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The structured result of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNode {
    kind: String,
    span: Span,
    source: String,
    fields: Fields,
    children: Vec<Segment>,
}

impl TokenNode {
    /// Create a token node.
    pub fn new(
        kind: impl Into<String>,
        span: Span,
        source: impl Into<String>,
        fields: Fields,
        children: Vec<Segment>,
    ) -> Self {
        Self {
            kind: kind.into(),
            span,
            source: source.into(),
            fields,
            children,
        }
    }

    /// Name of the definition that produced this node.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Byte range in the scanned text.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The matched text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All extracted fields, in definition order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Value of a field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Segments scanned from the definition's inner group.
    pub fn children(&self) -> &[Segment] {
        &self.children
    }
}

/// One piece of scan output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text
    Text(TextRun),
    /// A recognized construct
    Token(TokenNode),
}

impl Segment {
    /// Byte range in the scanned text.
    pub fn span(&self) -> Span {
        match self {
            Segment::Text(run) => run.span(),
            Segment::Token(node) => node.span(),
        }
    }

    /// The source text this segment covers.
    pub fn source(&self) -> &str {
        match self {
            Segment::Text(run) => run.text(),
            Segment::Token(node) => node.source(),
        }
    }

    /// The token node, if this is one.
    pub fn as_token(&self) -> Option<&TokenNode> {
        match self {
            Segment::Token(node) => Some(node),
            Segment::Text(_) => None,
        }
    }

    /// The text run, if this is one.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Segment::Text(run) => Some(run),
            Segment::Token(_) => None,
        }
    }
}

/// Result of scanning one text span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    segments: Vec<Segment>,
    diagnostics: Vec<MalformedMatchError>,
}

impl Scan {
    pub(crate) fn new(segments: Vec<Segment>, diagnostics: Vec<MalformedMatchError>) -> Self {
        Self {
            segments,
            diagnostics,
        }
    }

    /// Top-level segments in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Take the segments, dropping diagnostics.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Matches that were demoted to plain text.
    pub fn diagnostics(&self) -> &[MalformedMatchError] {
        &self.diagnostics
    }

    /// Every token node, depth-first, children after their parent.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenNode> {
        fn walk<'a>(segments: &'a [Segment], out: &mut Vec<&'a TokenNode>) {
            for node in segments.iter().filter_map(Segment::as_token) {
                out.push(node);
                walk(node.children(), out);
            }
        }

        let mut out = Vec::new();
        walk(&self.segments, &mut out);
        out.into_iter()
    }

    /// Rebuild the scanned text from the top-level segments.
    pub fn source(&self) -> String {
        self.segments.iter().map(Segment::source).collect()
    }
}
