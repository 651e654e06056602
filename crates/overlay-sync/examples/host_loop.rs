//! Host integration example
//!
//! Wires an `OverlaySession` to an in-memory document and walks through the event protocol a
//! real host would drive: focus, cursor movement, typing, and the debounce timer.

use overlay_sync::{
    ByteSpan, ColorClass, DisplayStyle, EditorHost, EditorId, LineMap, LineSpan, OverlaySession,
    ParseError, Position, PositionRange, SymbolOccurrence, SymbolParser,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Stands in for the real symbol engine: every `=` renders as `≡`, every `alpha` as `α`.
struct DemoParser;

impl SymbolParser for DemoParser {
    fn parse(&self, text: &str) -> Result<Vec<SymbolOccurrence>, ParseError> {
        let mut out = Vec::new();
        for (needle, label, color) in [
            ("=", "≡", ColorClass::Comparison),
            ("alpha", "α", ColorClass::Symbol),
        ] {
            let spans: Vec<ByteSpan> = text
                .match_indices(needle)
                .map(|(i, _)| ByteSpan::new(i, i + needle.len()))
                .collect();
            if !spans.is_empty() {
                out.push(SymbolOccurrence::new(needle, label, spans).with_render_hints(color, ""));
            }
        }
        Ok(out)
    }
}

/// One in-memory document plus a record of what is currently painted.
struct DemoHost {
    text: String,
    painted: BTreeMap<String, (ColorClass, Vec<PositionRange>)>,
}

impl DemoHost {
    fn print_overlays(&self, heading: &str) {
        println!("{heading}");
        for (label, (color, ranges)) in &self.painted {
            let spots: Vec<String> = ranges
                .iter()
                .map(|r| format!("{}:{}", r.start.line, r.start.column))
                .collect();
            println!("  '{label}' ({color:?}) shown at [{}]", spots.join(", "));
        }
        println!();
    }
}

impl EditorHost for DemoHost {
    fn document_text(&self, _editor: EditorId) -> Option<String> {
        Some(self.text.clone())
    }

    fn offset_to_position(&self, _editor: EditorId, offset: usize) -> Option<Position> {
        LineMap::from_text(&self.text).offset_to_position(offset)
    }

    fn set_overlays(&mut self, _editor: EditorId, style: &DisplayStyle, ranges: &[PositionRange]) {
        self.painted
            .insert(style.content_text().to_string(), (style.color(), ranges.to_vec()));
    }
}

fn main() {
    let editor = EditorId(1);
    let mut host = DemoHost {
        text: "alpha = 1\nbeta = 2\ngamma = alpha".to_string(),
        painted: BTreeMap::new(),
    };

    let mut session = OverlaySession::new();
    session.set_parser(Arc::new(DemoParser));

    // Focusing an editor resyncs immediately.
    session.on_active_editor_changed(Some(editor), &mut host);
    host.print_overlays("After focus (no selection, everything rendered):");

    // The cursor moves onto line 0: the reveal update hides that line's overlays.
    let now = Instant::now();
    session.on_selection_changed(editor, LineSpan::caret(0), now);
    let due = session.next_deadline().expect("reveal update pending");
    session.on_timer(due, &mut host);
    host.print_overlays("Cursor on line 0 (its overlays hidden, source revealed):");

    // Typing on line 1, then the caret moves to line 2: a full resync is debounced.
    host.text = host.text.replace("beta = 2", "beta = alpha");
    session.on_document_changed(editor, 1);
    session.on_selection_changed(editor, LineSpan::caret(2), due);
    let due = session.next_deadline().expect("resync pending");
    session.on_timer(due, &mut host);
    host.print_overlays("After edit + resync (cursor on line 2):");
}
