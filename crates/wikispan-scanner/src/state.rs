//! Per-scan cursor state.
//!
//! [`ScanState`] owns the cursor of one scan over one text span and caches,
//! per definition, the next match found at or after the cursor. A cached
//! match stays valid as long as it starts at or after the cursor, so each
//! definition is only searched again once the cursor has moved past its
//! candidate.

use log::warn;
use regex::Regex;
use wikispan_core::Span;
use wikispan_registry::CompiledDefinition;

/// Phase of the cursor-advance loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Looking for the next match
    Scanning,
    /// A match was selected; the cursor has not moved past it yet
    Matched,
    /// No definition matches in the remaining text
    Exhausted,
}

/// Cached search result for one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    /// Not searched since the cursor last moved past the cached match
    Stale,
    /// Leftmost match at or after the cursor
    At(Span),
    /// No match anywhere in the rest of the text
    Exhausted,
}

/// Cursor state for scanning one text span.
#[derive(Debug, Clone)]
pub struct ScanState {
    cursor: usize,
    phase: ScanPhase,
    candidates: Vec<Candidate>,
}

impl ScanState {
    /// Create state for a registry of `definitions` entries.
    pub fn new(definitions: usize) -> Self {
        Self {
            cursor: 0,
            phase: ScanPhase::Scanning,
            candidates: vec![Candidate::Stale; definitions],
        }
    }

    /// Current cursor (byte offset).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current phase.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    /// Select the next match at or after the cursor.
    ///
    /// The winner has the smallest start offset. `definitions` is in
    /// priority order, so among equal starts the first one seen wins.
    /// Returns the index of the winning definition and the match span.
    pub fn next_match(
        &mut self,
        text: &str,
        definitions: &[CompiledDefinition],
    ) -> Option<(usize, Span)> {
        let mut best: Option<(usize, Span)> = None;

        for (idx, definition) in definitions.iter().enumerate() {
            let candidate = match self.candidates[idx] {
                Candidate::At(span) if span.start >= self.cursor => Candidate::At(span),
                Candidate::Exhausted => Candidate::Exhausted,
                _ => search(definition, text, self.cursor),
            };
            self.candidates[idx] = candidate;

            if let Candidate::At(span) = candidate {
                if best.map_or(true, |(_, b)| span.start < b.start) {
                    best = Some((idx, span));
                }
            }
        }

        self.phase = if best.is_some() {
            ScanPhase::Matched
        } else {
            ScanPhase::Exhausted
        };
        best
    }

    /// Move the cursor to `offset` and resume scanning.
    pub fn advance(&mut self, offset: usize) {
        debug_assert!(offset > self.cursor || self.phase != ScanPhase::Matched);
        self.cursor = offset;
        self.phase = ScanPhase::Scanning;
    }
}

/// Find the leftmost non-empty match of `definition` at or after `from`.
///
/// Empty matches cannot survive registration; any that appear anyway are
/// stepped over one character at a time so the scan always terminates.
fn search(definition: &CompiledDefinition, text: &str, from: usize) -> Candidate {
    let regex: &Regex = definition.regex();
    let mut from = from;

    while from <= text.len() {
        let Some(m) = regex.find_at(text, from) else {
            return Candidate::Exhausted;
        };
        if !m.is_empty() {
            return Candidate::At(Span::new(m.start(), m.end()));
        }

        warn!(
            "`{}` produced an empty match at {}; skipping",
            definition.name(),
            m.start()
        );
        from = match text[m.start()..].chars().next() {
            Some(c) => m.start() + c.len_utf8(),
            None => return Candidate::Exhausted,
        };
    }

    Candidate::Exhausted
}
