//! End-to-end event-flow scenarios: a scripted parser engine, an in-memory host, and a fake
//! clock built from a base `Instant` plus offsets. Nothing here sleeps.

use overlay_sync::{
    ByteSpan, ColorClass, DisplayStyle, EditorHost, EditorId, LineMap, LineSpan, NullSink,
    OverlaySession, ParseError, Position, PositionRange, REVEAL_DELAY, RESYNC_DELAY,
    SymbolOccurrence, SymbolParser,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const ED: EditorId = EditorId(1);

/// In-memory host: one document, and the last painted style and range list per rendered label.
struct MemoryHost {
    text: String,
    painted: HashMap<String, Vec<PositionRange>>,
    styles: HashMap<String, DisplayStyle>,
}

impl MemoryHost {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            painted: HashMap::new(),
            styles: HashMap::new(),
        }
    }

    fn shown(&self, label: &str) -> &[PositionRange] {
        self.painted.get(label).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl EditorHost for MemoryHost {
    fn document_text(&self, _editor: EditorId) -> Option<String> {
        Some(self.text.clone())
    }

    fn offset_to_position(&self, _editor: EditorId, offset: usize) -> Option<Position> {
        LineMap::from_text(&self.text).offset_to_position(offset)
    }

    fn set_overlays(&mut self, _editor: EditorId, style: &DisplayStyle, ranges: &[PositionRange]) {
        self.painted
            .insert(style.content_text().to_string(), ranges.to_vec());
        self.styles
            .insert(style.content_text().to_string(), style.clone());
    }
}

/// Scripted engine: returns a fixed occurrence list and counts invocations.
struct ScriptedParser {
    occurrences: Vec<SymbolOccurrence>,
    calls: Cell<usize>,
}

impl ScriptedParser {
    fn new(occurrences: Vec<SymbolOccurrence>) -> Self {
        Self {
            occurrences,
            calls: Cell::new(0),
        }
    }
}

impl SymbolParser for ScriptedParser {
    fn parse(&self, _text: &str) -> Result<Vec<SymbolOccurrence>, ParseError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.occurrences.clone())
    }
}

fn occurrence(identity: &str, label: &str, spans: &[(usize, usize)]) -> SymbolOccurrence {
    SymbolOccurrence::new(
        identity,
        label,
        spans.iter().map(|&(s, e)| ByteSpan::new(s, e)).collect(),
    )
}

fn focused_session(parser: Arc<ScriptedParser>, host: &mut MemoryHost) -> OverlaySession {
    let mut session = OverlaySession::with_sink(Box::new(NullSink));
    session.set_parser(parser);
    session.on_active_editor_changed(Some(ED), host);
    session
}

#[test]
fn end_to_end_equals_document() {
    // "a=1, b=2": one identity "=" with a span for each equals sign.
    let mut host = MemoryHost::new("a=1, b=2");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence(
        "=",
        "≡",
        &[(1, 2), (6, 7)],
    )]));
    let mut session = focused_session(parser.clone(), &mut host);

    // Focusing resynced immediately: one entry, two ranges, both painted.
    assert_eq!(parser.calls.get(), 1);
    assert_eq!(session.store().len(), 1);
    assert_eq!(session.store().entry("=").unwrap().ranges().len(), 2);
    assert_eq!(host.shown("≡").len(), 2);

    // Cursor lands on the line holding both occurrences: render shows neither.
    let t0 = Instant::now();
    session.on_selection_changed(ED, LineSpan::caret(0), t0);
    let due = session.next_deadline().expect("reveal update armed");
    assert_eq!(due, t0 + REVEAL_DELAY);
    session.on_timer(due, &mut host);
    assert_eq!(host.shown("≡").len(), 0);

    // The store still holds both ranges; only the projection changed.
    assert_eq!(session.store().entry("=").unwrap().ranges().len(), 2);
}

#[test]
fn render_hints_reach_the_host_renderer() {
    let mut host = MemoryHost::new("a=1");
    let parser = Arc::new(ScriptedParser::new(vec![
        occurrence("=", "≡", &[(1, 2)])
            .with_render_hints(ColorClass::Comparison, "font-weight: bold;"),
    ]));
    focused_session(parser, &mut host);

    let style = &host.styles["≡"];
    assert_eq!(style.color(), ColorClass::Comparison);
    assert_eq!(style.css_hint(), "font-weight: bold;");
}

#[test]
fn debounce_only_the_last_burst_member_fires() {
    let mut host = MemoryHost::new("x=1\ny=2\nz=3");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence("=", "≡", &[(1, 2)])]));
    let mut session = focused_session(parser.clone(), &mut host);
    let after_focus = parser.calls.get();

    // Two typed bursts 10ms apart, each moving the cursor to a new line.
    let t0 = Instant::now();
    session.on_document_changed(ED, 1);
    session.on_selection_changed(ED, LineSpan::caret(1), t0);
    session.on_document_changed(ED, 1);
    session.on_selection_changed(ED, LineSpan::caret(2), t0 + Duration::from_millis(10));

    // The first deadline was replaced; a timer callback for it is stale and must no-op.
    session.on_timer(t0 + RESYNC_DELAY, &mut host);
    assert_eq!(parser.calls.get(), after_focus);

    // The surviving deadline fires exactly one resync.
    let due = session.next_deadline().expect("second resync still pending");
    assert_eq!(due, t0 + Duration::from_millis(10) + RESYNC_DELAY);
    session.on_timer(due, &mut host);
    assert_eq!(parser.calls.get(), after_focus + 1);

    // Nothing left pending afterwards.
    assert_eq!(session.next_deadline(), None);
}

#[test]
fn classification_same_line_edit_does_not_schedule() {
    let mut host = MemoryHost::new("x=1\ny=2");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence("=", "≡", &[(1, 2)])]));
    let mut session = focused_session(parser.clone(), &mut host);

    let t0 = Instant::now();
    session.on_selection_changed(ED, LineSpan::caret(0), t0);
    let due = session.next_deadline().expect("line change armed");
    session.on_timer(due, &mut host);
    assert_eq!(session.next_deadline(), None);

    // Typing that keeps the caret on its line: document change + same-line selection.
    session.on_document_changed(ED, 1);
    session.on_selection_changed(ED, LineSpan::caret(0), due + Duration::from_millis(5));
    assert_eq!(session.next_deadline(), None);

    // Once the caret leaves the line, the stored editing flag forces a full resync.
    session.on_selection_changed(ED, LineSpan::caret(1), due + Duration::from_millis(20));
    assert_eq!(
        session.next_deadline(),
        Some(due + Duration::from_millis(20) + RESYNC_DELAY)
    );
}

#[test]
fn empty_parse_clears_every_known_style() {
    let mut host = MemoryHost::new("a=1");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence("=", "≡", &[(1, 2)])]));
    let mut session = focused_session(parser, &mut host);
    assert_eq!(host.shown("≡").len(), 1);

    // The symbols vanish from the document; the parser now reports nothing.
    session.set_parser(Arc::new(ScriptedParser::new(Vec::new())));
    let t0 = Instant::now();
    session.on_document_changed(ED, 1);
    session.on_selection_changed(ED, LineSpan::caret(0), t0);
    session.on_timer(t0 + RESYNC_DELAY, &mut host);

    // The entry survives with zero ranges, and the renderer was told to clear its style.
    let entry = session.store().entry("=").expect("style cache retained");
    assert!(entry.ranges().is_empty());
    assert_eq!(host.shown("≡").len(), 0);
}

#[test]
fn style_objects_are_reused_across_resyncs() {
    let mut host = MemoryHost::new("alpha + alpha");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence(
        "alpha",
        "α",
        &[(0, 5)],
    )]));
    let mut session = focused_session(parser, &mut host);
    let first = session.store().entry("alpha").unwrap().style().clone();

    let t0 = Instant::now();
    session.on_document_changed(ED, 1);
    session.on_selection_changed(ED, LineSpan::caret(0), t0);
    session.on_timer(t0 + RESYNC_DELAY, &mut host);

    let second = session.store().entry("alpha").unwrap().style();
    assert_eq!(&first, second);
}

#[test]
fn reveal_projection_is_idempotent_across_renders() {
    let mut host = MemoryHost::new("...\n...\nsym\n...\n...\nsym\n...\n...\n...\nsym");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence(
        "sym",
        "σ",
        &[(8, 11), (20, 23), (36, 39)],
    )]));
    let mut session = focused_session(parser, &mut host);

    let t0 = Instant::now();
    session.on_selection_changed(ED, LineSpan::new(4, 6), t0);
    session.on_timer(t0 + REVEAL_DELAY, &mut host);
    let first = host.shown("σ").to_vec();

    // Force another render with identical state via a selection bounce.
    session.on_selection_changed(ED, LineSpan::caret(0), t0 + Duration::from_millis(100));
    session.on_selection_changed(ED, LineSpan::new(4, 6), t0 + Duration::from_millis(200));
    session.on_timer(t0 + Duration::from_millis(200) + REVEAL_DELAY, &mut host);

    assert_eq!(host.shown("σ"), first.as_slice());
    // Lines 2 and 9 stay visible; line 5 is hidden under the selection.
    let mut lines: Vec<usize> = first.iter().map(|r| r.start.line).collect();
    lines.sort_unstable();
    assert_eq!(lines, vec![2, 9]);
}

#[test]
fn unfocused_session_ignores_everything() {
    let mut host = MemoryHost::new("a=1");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence("=", "≡", &[(1, 2)])]));
    let mut session = OverlaySession::with_sink(Box::new(NullSink));
    session.set_parser(parser.clone());

    let t0 = Instant::now();
    session.on_document_changed(ED, 1);
    session.on_selection_changed(ED, LineSpan::caret(0), t0);
    session.on_timer(t0 + RESYNC_DELAY, &mut host);

    assert_eq!(parser.calls.get(), 0);
    assert!(host.painted.is_empty());
}

#[test]
fn switching_editors_rebuilds_from_the_new_document() {
    let mut first_host = MemoryHost::new("a=1");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence("=", "≡", &[(1, 2)])]));
    let mut session = focused_session(parser.clone(), &mut first_host);
    assert_eq!(session.store().len(), 1);

    // Switch to a second editor: fresh store, immediate resync against the new text.
    let mut second_host = MemoryHost::new("b=2, c=3");
    session.on_active_editor_changed(Some(EditorId(2)), &mut second_host);

    assert_eq!(parser.calls.get(), 2);
    assert_eq!(session.active_editor(), Some(EditorId(2)));
    assert_eq!(session.store().len(), 1);
    assert_eq!(second_host.shown("≡").len(), 1);
}

#[test]
fn stale_spans_from_a_shrunken_document_are_dropped() {
    // The parser saw a longer snapshot than the host now holds.
    let mut host = MemoryHost::new("ab");
    let parser = Arc::new(ScriptedParser::new(vec![occurrence(
        "=",
        "≡",
        &[(0, 1), (40, 41)],
    )]));
    let session = focused_session(parser, &mut host);

    assert_eq!(session.store().entry("=").unwrap().ranges().len(), 1);
    assert_eq!(host.shown("≡").len(), 1);
}
