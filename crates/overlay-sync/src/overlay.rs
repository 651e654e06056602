//! First-class overlay data model.
//!
//! Overlays are UI-facing "rendered symbol" annotations anchored to document positions, without
//! modifying the document text. A host renderer paints the rendered label over the raw markup
//! (e.g. `α` over `alpha`) everywhere except the lines the cursor is on, where the raw source
//! stays visible for editing.
//!
//! The types here are plain data; the bookkeeping lives in
//! [`OverlayStore`](crate::store::OverlayStore).

/// A zero-based line/column position in the document.
///
/// `column` counts bytes from the start of the line, matching the byte offsets the parser
/// engine reports. Hosts with different column units convert at their boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column within the line.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open position range `[start, end)` in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRange {
    /// Range start (inclusive).
    pub start: Position,
    /// Range end (exclusive).
    pub end: Position,
}

impl PositionRange {
    /// Create a new position range.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// The line span of the primary selection, both bounds inclusive.
///
/// This is the "Reveal State": the lines whose raw markup should stay visible. A caret without
/// a selection is a span with `start_line == end_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// First selected line.
    pub start_line: usize,
    /// Last selected line.
    pub end_line: usize,
}

impl LineSpan {
    /// Create a new line span.
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }

    /// The line span of a caret sitting on a single line.
    pub fn caret(line: usize) -> Self {
        Self::new(line, line)
    }

    /// Whether `range` intersects the line-aligned reveal window of this span.
    ///
    /// The window covers column 0 of `start_line` up to (exclusively) column 0 of the line
    /// past `end_line`, so a range that merely touches the window boundary does not count.
    pub fn intersects(&self, range: &PositionRange) -> bool {
        // `range.start < (end_line + 1, 0)` reduces to a line comparison, which also keeps
        // `end_line == usize::MAX` from overflowing.
        let window_start = Position::new(self.start_line, 0);
        range.start.line <= self.end_line && range.end > window_start
    }
}

/// Theme color class for a rendered symbol.
///
/// The parser engine assigns one per symbol kind; hosts map each class to a concrete theme
/// color when building their decoration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorClass {
    /// A general rendered symbol.
    #[default]
    Symbol,
    /// An arithmetic operator.
    Operator,
    /// A comparison operator.
    Comparison,
    /// Set or bracket notation.
    Set,
    /// A numeric literal or attachment text.
    Number,
}

/// The render style for one symbol identity.
///
/// Derived exactly once per identity from the parser's display label and render hints, then
/// cached in the store for the lifetime of the session. Hosts map this to a concrete
/// decoration type; the host is expected to visually collapse the raw source under each
/// painted range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStyle {
    content_text: String,
    color: ColorClass,
    css_hint: String,
}

impl DisplayStyle {
    /// Derive the style for a display label with default render hints.
    pub fn for_label(label: &str) -> Self {
        Self::with_hints(label, ColorClass::default(), "")
    }

    /// Derive the style for a display label with the parser's render hints.
    pub fn with_hints(label: &str, color: ColorClass, css_hint: &str) -> Self {
        Self {
            content_text: label.to_string(),
            color,
            css_hint: css_hint.to_string(),
        }
    }

    /// The rendered text painted in place of the raw markup.
    pub fn content_text(&self) -> &str {
        &self.content_text
    }

    /// The theme color class the host should paint the label in.
    pub fn color(&self) -> ColorClass {
        self.color
    }

    /// Extra CSS the host should attach to the decoration, e.g. a font override. Empty when
    /// the label needs nothing beyond the color class.
    pub fn css_hint(&self) -> &str {
        &self.css_hint
    }

    /// Whether this style hides the source without rendering a replacement.
    ///
    /// Parsers emit empty labels for pure-hiding spans, e.g. the parentheses around an
    /// attachment group.
    pub fn is_void(&self) -> bool {
        self.content_text.is_empty()
    }
}

/// One identity's cached style and its current occurrence ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    style: DisplayStyle,
    ranges: Vec<PositionRange>,
}

impl OverlayEntry {
    pub(crate) fn new(style: DisplayStyle) -> Self {
        Self {
            style,
            ranges: Vec::new(),
        }
    }

    /// The cached display style. Immutable after the entry is created.
    pub fn style(&self) -> &DisplayStyle {
        &self.style
    }

    /// The ranges where this identity currently occurs. Fully replaced on each resync; empty
    /// when the identity no longer appears in the document.
    pub fn ranges(&self) -> &[PositionRange] {
        &self.ranges
    }

    pub(crate) fn clear_ranges(&mut self) {
        self.ranges.clear();
    }

    pub(crate) fn set_ranges(&mut self, ranges: Vec<PositionRange>) {
        self.ranges = ranges;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: (usize, usize), end: (usize, usize)) -> PositionRange {
        PositionRange::new(
            Position::new(start.0, start.1),
            Position::new(end.0, end.1),
        )
    }

    #[test]
    fn test_span_intersects_range_on_selected_line() {
        let span = LineSpan::new(4, 6);

        assert!(span.intersects(&range((5, 0), (5, 3))));
        assert!(span.intersects(&range((4, 10), (4, 12))));
        assert!(span.intersects(&range((6, 0), (6, 1))));
    }

    #[test]
    fn test_span_misses_range_on_other_lines() {
        let span = LineSpan::new(4, 6);

        assert!(!span.intersects(&range((2, 0), (2, 3))));
        assert!(!span.intersects(&range((9, 0), (9, 1))));
    }

    #[test]
    fn test_range_spanning_the_window_intersects() {
        let span = LineSpan::caret(5);

        // The range covers lines 3..=8, so line 5 sits inside it.
        assert!(span.intersects(&range((3, 0), (8, 2))));
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let span = LineSpan::caret(5);

        // Ends exactly at column 0 of line 5: touches the boundary only.
        assert!(!span.intersects(&range((4, 0), (5, 0))));
        // Starts exactly at column 0 of line 6: past the window.
        assert!(!span.intersects(&range((6, 0), (6, 4))));
    }

    #[test]
    fn test_span_to_document_end_does_not_overflow() {
        let span = LineSpan::new(3, usize::MAX);

        assert!(span.intersects(&range((usize::MAX, 0), (usize::MAX, 2))));
        assert!(!span.intersects(&range((1, 0), (2, 0))));
    }

    #[test]
    fn test_style_for_label_is_stable() {
        let a = DisplayStyle::for_label("α");
        let b = DisplayStyle::for_label("α");

        assert_eq!(a, b);
        assert_eq!(a.content_text(), "α");
        assert_eq!(a.color(), ColorClass::Symbol);
        assert_eq!(a.css_hint(), "");
        assert!(!a.is_void());
        assert!(DisplayStyle::for_label("").is_void());
    }

    #[test]
    fn test_style_carries_render_hints() {
        let style = DisplayStyle::with_hints("≡", ColorClass::Comparison, "font-weight: bold;");

        assert_eq!(style.color(), ColorClass::Comparison);
        assert_eq!(style.css_hint(), "font-weight: bold;");
        assert_ne!(style, DisplayStyle::for_label("≡"));
    }
}
