//! The parser-engine capability.
//!
//! Finding symbol occurrences in document text is delegated to an opaque external engine. This
//! module defines the narrow contract that engine must satisfy; the synchronizer never looks
//! inside the text itself.
//!
//! Implementations must be deterministic: identical input text yields identical occurrence
//! lists. An empty list is a valid steady state (no symbols in the document), not an error.

use crate::overlay::ColorClass;
use thiserror::Error;

/// A half-open byte-offset span `[start, end)` into the parsed snapshot text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    /// Span start offset (inclusive).
    pub start: usize,
    /// Span end offset (exclusive).
    pub end: usize,
}

impl ByteSpan {
    /// Create a new byte span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One symbol found by the parser engine, possibly at several places in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolOccurrence {
    /// Raw textual content of the matched symbol. Unique per document; the overlay store keys
    /// its style cache on this.
    pub identity: String,
    /// Short rendered label to paint over the raw markup. May be empty for pure-hiding spans.
    pub display_label: String,
    /// Theme color class the engine assigns to this symbol kind.
    pub color: ColorClass,
    /// Extra CSS the engine wants attached to the decoration, e.g. a font override for glyphs
    /// outside the editor font. Empty for most symbols.
    pub css_hint: String,
    /// Every byte-offset span where this symbol occurs in the snapshot text.
    pub spans: Vec<ByteSpan>,
}

impl SymbolOccurrence {
    /// Create an occurrence with default render hints.
    pub fn new(
        identity: impl Into<String>,
        display_label: impl Into<String>,
        spans: Vec<ByteSpan>,
    ) -> Self {
        Self {
            identity: identity.into(),
            display_label: display_label.into(),
            color: ColorClass::default(),
            css_hint: String::new(),
            spans,
        }
    }

    /// Attach the engine's render hints.
    pub fn with_render_hints(mut self, color: ColorClass, css_hint: impl Into<String>) -> Self {
        self.color = color;
        self.css_hint = css_hint.into();
        self
    }
}

/// Errors surfaced by a parser engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The engine is not initialized yet. A resync hitting this quietly waits for a later
    /// pass; it is "not ready", not a failure.
    #[error("parser engine is not ready")]
    NotReady,
    /// The engine failed outright. The current overlays are left untouched.
    #[error("parser engine failed: {0}")]
    Engine(String),
}

/// An opaque engine that finds symbol occurrences in document text.
pub trait SymbolParser {
    /// Parse the full snapshot text into symbol occurrences.
    fn parse(&self, text: &str) -> Result<Vec<SymbolOccurrence>, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::NotReady.to_string(),
            "parser engine is not ready"
        );
        assert_eq!(
            ParseError::Engine("bad input".into()).to_string(),
            "parser engine failed: bad input"
        );
    }
}
