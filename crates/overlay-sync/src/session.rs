//! The Overlay Session: event gate, debounce wiring, and host integration.
//!
//! One [`OverlaySession`] tracks one active editor at a time and owns everything mutable: the
//! overlay store, the Reveal State, the "was editing" flag, and the single pending action.
//! Hosts construct a session per document lifetime, feed it raw lifecycle events, and drive
//! its timer:
//!
//! 1. Deliver `on_document_changed` / `on_selection_changed` / `on_active_editor_changed` as
//!    the editor fires them (document-change arrives before selection-change on typing).
//! 2. After each event, read [`OverlaySession::next_deadline`] and arm a timer.
//! 3. When the timer fires, call [`OverlaySession::on_timer`].
//!
//! Everything runs on the host's single logical thread; a resync is atomic from the
//! scheduler's perspective and no locking exists anywhere.

use std::sync::Arc;
use std::time::Instant;

use crate::observe::{OverlaySink, TracingSink};
use crate::overlay::{DisplayStyle, LineSpan, Position, PositionRange};
use crate::parser::{ParseError, SymbolParser};
use crate::schedule::{DueAction, Pending};
use crate::store::OverlayStore;

/// Host-assigned identifier for an editor pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(pub u64);

/// The narrow surface this crate needs from the host editor.
///
/// Every method degrades gracefully: `None` from the accessors means the editor (or the
/// offset) is gone, and the caller treats that as "show nothing" rather than an error.
pub trait EditorHost {
    /// Full text of the document shown in `editor`, or `None` if the editor is gone.
    fn document_text(&self, editor: EditorId) -> Option<String>;

    /// Convert a byte offset in `editor`'s document to a line/column position.
    fn offset_to_position(&self, editor: EditorId, offset: usize) -> Option<Position>;

    /// Paint `ranges` with `style`. An empty list means nothing of this style is shown.
    fn set_overlays(&mut self, editor: EditorId, style: &DisplayStyle, ranges: &[PositionRange]);
}

/// Synchronizes a set of symbol overlays with one editor's document.
///
/// See the [module docs](self) for the event protocol. The session is never persisted;
/// drop it when the document closes.
pub struct OverlaySession {
    parser: Option<Arc<dyn SymbolParser>>,
    sink: Box<dyn OverlaySink>,
    store: OverlayStore,
    active_editor: Option<EditorId>,
    /// Last known cursor line range; `None` until the first selection event.
    reveal: Option<LineSpan>,
    pending: Pending,
    was_editing: bool,
}

impl OverlaySession {
    /// Create a session with no parser yet, reporting through [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(Box::new(TracingSink))
    }

    /// Create a session reporting through `sink`.
    pub fn with_sink(sink: Box<dyn OverlaySink>) -> Self {
        Self {
            parser: None,
            sink,
            store: OverlayStore::new(),
            active_editor: None,
            reveal: None,
            pending: Pending::Idle,
            was_editing: false,
        }
    }

    /// Install (or replace) the parser engine.
    ///
    /// Engines often finish loading after the session exists; until one is installed, every
    /// resync silently no-ops.
    pub fn set_parser(&mut self, parser: Arc<dyn SymbolParser>) {
        self.parser = Some(parser);
    }

    /// Whether a parser engine is installed.
    pub fn parser_ready(&self) -> bool {
        self.parser.is_some()
    }

    /// The editor this session currently tracks.
    pub fn active_editor(&self) -> Option<EditorId> {
        self.active_editor
    }

    /// The overlay store for the tracked document.
    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    /// The last recorded selection line span.
    pub fn reveal_state(&self) -> Option<LineSpan> {
        self.reveal
    }

    /// The instant the host should next call [`OverlaySession::on_timer`] at, if anything is
    /// pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    /// The primary selection moved.
    ///
    /// Ignored for editors other than the tracked one. A selection still on the recorded
    /// lines is a pure no-op (intra-line caret moves do not even cancel a pending action).
    /// Otherwise the Reveal State is updated and one debounced action is armed: a full
    /// resync if typing occurred since the last arm, a reveal update if not.
    pub fn on_selection_changed(&mut self, editor: EditorId, span: LineSpan, now: Instant) {
        if self.active_editor != Some(editor) {
            return;
        }
        if self.reveal == Some(span) {
            return;
        }

        self.reveal = Some(span);
        // Arming replaces any pending action: last write wins.
        self.pending.arm(self.was_editing, now);
        self.was_editing = false;
    }

    /// The document changed.
    ///
    /// Ignored for documents other than the tracked one and for no-op notifications
    /// (`change_count == 0`, e.g. formatting events with no edits). Otherwise records that
    /// typing occurred, which the next selection event consumes.
    pub fn on_document_changed(&mut self, editor: EditorId, change_count: usize) {
        if self.active_editor != Some(editor) {
            return;
        }
        if change_count == 0 {
            return;
        }
        self.was_editing = true;
    }

    /// The focused editor changed.
    ///
    /// The store and Reveal State belong to the old document and are discarded; any pending
    /// action is cancelled with them. If an editor is now focused, a full resync runs
    /// immediately, without debouncing.
    pub fn on_active_editor_changed(&mut self, editor: Option<EditorId>, host: &mut dyn EditorHost) {
        self.active_editor = editor;
        self.store = OverlayStore::new();
        self.reveal = None;
        self.pending.cancel();
        self.was_editing = false;

        if editor.is_some() {
            self.resync_now(host);
        }
    }

    /// Host timer callback.
    ///
    /// Fires the pending action if its deadline has passed. A stale callback, armed for a
    /// deadline that has since been replaced, takes nothing and leaves the newer action
    /// pending; the host re-arms from [`OverlaySession::next_deadline`].
    pub fn on_timer(&mut self, now: Instant, host: &mut dyn EditorHost) {
        match self.pending.take_due(now) {
            Some(DueAction::Resync) => self.resync_now(host),
            Some(DueAction::Reveal) => self.render(host),
            None => {}
        }
    }

    /// Re-parse the tracked document and rebuild the store, then render.
    ///
    /// No-ops when there is no tracked editor, no parser engine yet, or the document is gone.
    /// An engine failure is reported to the sink and leaves the current overlays untouched.
    pub fn resync_now(&mut self, host: &mut dyn EditorHost) {
        let Some(editor) = self.active_editor else {
            return;
        };
        let Some(parser) = self.parser.clone() else {
            return;
        };
        let Some(text) = host.document_text(editor) else {
            return;
        };

        let started = Instant::now();
        let occurrences = match parser.parse(&text) {
            Ok(occurrences) => occurrences,
            Err(ParseError::NotReady) => return,
            Err(err) => {
                self.sink.info(&format!("overlay resync abandoned: {err}"));
                return;
            }
        };

        self.store
            .rebuild(&occurrences, |offset| host.offset_to_position(editor, offset));
        self.sink.resynced(occurrences.len(), started.elapsed());
        self.render(host);
    }

    /// Project the store onto the display through the current Reveal State.
    ///
    /// Paints every known style, with an empty range list where nothing of that style is
    /// visible. Does not mutate the store.
    fn render(&self, host: &mut dyn EditorHost) {
        let Some(editor) = self.active_editor else {
            return;
        };

        let started = Instant::now();
        let visible = self.store.visible(self.reveal);
        let style_count = visible.len();
        for (style, ranges) in visible {
            host.set_overlays(editor, style, &ranges);
        }
        self.sink.rendered(style_count, self.reveal, started.elapsed());
    }
}

impl Default for OverlaySession {
    fn default() -> Self {
        Self::new()
    }
}
