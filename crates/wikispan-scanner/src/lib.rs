//! Wikispan Scanner
//!
//! Splits a raw inline text span into plain text runs and token nodes,
//! using the definitions of a [`FrozenRegistry`].
//!
//! # Matching rules
//!
//! - At each cursor every definition contributes its leftmost match at or
//!   after the cursor; the match with the smallest start offset wins
//! - Equal starts go to the lower priority rank, then the earlier registration
//! - Text between the cursor and the winning match becomes a [`TextRun`];
//!   empty runs are never emitted
//! - A match whose fields cannot be extracted is kept as plain text and
//!   reported in [`Scan::diagnostics`]; the scan continues after it
//!
//! Concatenating the sources of all top-level segments always yields the
//! scanned text.
//!
//! # Example
//!
//! ```
//! use wikispan_registry::{Registry, TokenDefinition};
//! use wikispan_scanner::{scan, Segment};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         TokenDefinition::new("WikiLink", r"\[\[ *(.+?) *\| *(.+?) *\]\]")
//!             .field("display", 1)
//!             .field("target", 2),
//!     )
//!     .unwrap();
//! let registry = registry.freeze();
//!
//! let result = scan("see [[ Home | home ]] page", &registry);
//! let segments = result.segments();
//! assert_eq!(segments.len(), 3);
//! assert_eq!(segments[0].source(), "see ");
//! match &segments[1] {
//!     Segment::Token(node) => {
//!         assert_eq!(node.kind(), "WikiLink");
//!         assert_eq!(node.field("display"), Some("Home"));
//!         assert_eq!(node.field("target"), Some("home"));
//!     }
//!     other => panic!("expected a token, got {:?}", other),
//! }
//! assert_eq!(segments[2].source(), " page");
//! ```

pub mod listing;
pub mod segment;
pub mod state;

pub use listing::format_segments;
pub use segment::{Scan, Segment, TextRun, TokenNode};
pub use state::{ScanPhase, ScanState};

use log::{debug, trace, warn};
use wikispan_config::{Config, ScanConfig};
use wikispan_core::{MalformedMatchError, Position, Span};
use wikispan_registry::{capture, CompiledDefinition, FrozenRegistry, Registry};

/// Scan options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum nesting depth for inner groups (0 disables nesting)
    pub max_depth: usize,
    /// Whether inner groups are scanned at all
    pub nested: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for ScanOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            max_depth: config.max_depth(),
            nested: config.nested(),
        }
    }
}

/// Scanner bound to a frozen registry.
#[derive(Debug, Clone)]
pub struct Scanner {
    registry: FrozenRegistry,
    options: ScanOptions,
}

impl Scanner {
    /// Create a scanner with default options.
    pub fn new(registry: FrozenRegistry) -> Self {
        Self::with_options(registry, ScanOptions::default())
    }

    /// Create a scanner with explicit options.
    pub fn with_options(registry: FrozenRegistry, options: ScanOptions) -> Self {
        Self { registry, options }
    }

    /// Build the registry and options from configuration.
    pub fn from_config(config: &Config) -> wikispan_core::Result<Self> {
        let registry = Registry::from_config(config)?.freeze();
        Ok(Self::with_options(registry, ScanOptions::from(&config.scan)))
    }

    /// The registry this scanner consults.
    pub fn registry(&self) -> &FrozenRegistry {
        &self.registry
    }

    /// Scan options.
    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Scan one text span.
    pub fn scan(&self, text: &str) -> Scan {
        let mut run = ScanRun {
            root: text,
            definitions: self.registry.definitions(),
            options: self.options,
            diagnostics: Vec::new(),
        };
        let segments = run.scan_span(text, 0, 0);

        debug!(
            "scanned {} bytes into {} segments ({} malformed)",
            text.len(),
            segments.len(),
            run.diagnostics.len()
        );
        Scan::new(segments, run.diagnostics)
    }
}

/// Scan `text` with default options.
pub fn scan(text: &str, registry: &FrozenRegistry) -> Scan {
    Scanner::new(registry.clone()).scan(text)
}

/// State shared by the top-level scan and its nested inner scans.
struct ScanRun<'a> {
    root: &'a str,
    definitions: &'a [CompiledDefinition],
    options: ScanOptions,
    diagnostics: Vec<MalformedMatchError>,
}

impl ScanRun<'_> {
    /// Scan `text`, which starts at byte `base` of the root text.
    fn scan_span(&mut self, text: &str, base: usize, depth: usize) -> Vec<Segment> {
        let definitions = self.definitions;
        let mut state = ScanState::new(definitions.len());
        let mut segments = Vec::new();
        // Start of plain text not yet emitted
        let mut text_start = 0;

        while let Some((idx, span)) = state.next_match(text, definitions) {
            let definition = &definitions[idx];
            match self.build_token(definition, text, span, base, depth) {
                Ok(node) => {
                    trace!("matched `{}` at {}", definition.name(), node.span());
                    push_text(&mut segments, text, text_start, span.start, base);
                    segments.push(Segment::Token(node));
                    text_start = span.end;
                }
                Err(diagnostic) => {
                    warn!("{}", diagnostic);
                    self.diagnostics.push(diagnostic);
                }
            }
            state.advance(span.end);
        }

        push_text(&mut segments, text, text_start, text.len(), base);
        segments
    }

    fn build_token(
        &mut self,
        definition: &CompiledDefinition,
        text: &str,
        span: Span,
        base: usize,
        depth: usize,
    ) -> Result<TokenNode, MalformedMatchError> {
        let absolute = span.shift(base);
        let malformed = |reason: String| MalformedMatchError {
            definition: definition.name().to_string(),
            span: absolute,
            position: Position::locate(self.root, absolute.start),
            reason,
        };

        let caps = definition
            .regex()
            .captures_at(text, span.start)
            .filter(|caps| caps.get(0).is_some_and(|m| m.range() == span.range()))
            .ok_or_else(|| malformed("match could not be captured again".to_string()))?;
        let fields = definition.construct(&caps).map_err(malformed)?;

        let mut children = Vec::new();
        if self.options.nested && depth < self.options.max_depth {
            if let Some(group) = definition.inner() {
                if let Some(m) = capture(&caps, group) {
                    // A group spanning the whole match would rescan the same text forever
                    if !m.is_empty() && m.len() < span.len() {
                        children = self.scan_span(m.as_str(), base + m.start(), depth + 1);
                    }
                }
            }
        }

        Ok(TokenNode::new(
            definition.name(),
            absolute,
            &text[span.range()],
            fields,
            children,
        ))
    }
}

fn push_text(segments: &mut Vec<Segment>, text: &str, start: usize, end: usize, base: usize) {
    if end > start {
        segments.push(Segment::Text(TextRun::new(
            Span::new(start, end).shift(base),
            &text[start..end],
        )));
    }
}
