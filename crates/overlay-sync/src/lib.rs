#![warn(missing_docs)]
//! Overlay Sync - Headless Overlay Synchronizer for Symbol-Rendering Plugins
//!
//! # Overview
//!
//! `overlay-sync` is the decoration-rendering core of an editor plugin that paints rendered
//! math symbols over markup source text (e.g. `α` over `alpha`). It owns none of the hard
//! parts: parsing is delegated to an opaque [`SymbolParser`] engine, and painting to the host
//! editor behind [`EditorHost`]. What it does own is the scheduling/consistency problem in
//! between:
//!
//! - **Event Gate**: classifies the latest editor event as "typed" vs "cursor moved" and
//!   drops same-line caret noise.
//! - **Debounce Scheduler**: coalesces event bursts into at most one pending action - an
//!   expensive full resync (200ms) or a cheap reveal update (50ms) - with last-write-wins
//!   replacement.
//! - **Overlay Store**: identity-keyed display styles (cached for the document's lifetime)
//!   plus the ranges where each symbol currently occurs (replaced wholesale per resync).
//!
//! The lines the cursor is on are always "revealed": overlays intersecting the selection's
//! line span are hidden so the raw markup stays editable there.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  OverlaySession (event gate + host wiring)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Pending (debounce state machine)           │  ← Scheduling
//! ├─────────────────────────────────────────────┤
//! │  OverlayStore (styles + ranges + reveal)    │  ← Bookkeeping
//! ├─────────────────────────────────────────────┤
//! │  SymbolParser / EditorHost / OverlaySink    │  ← Collaborators
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use overlay_sync::{
//!     ByteSpan, DisplayStyle, EditorHost, EditorId, LineMap, LineSpan, OverlaySession,
//!     ParseError, Position, PositionRange, SymbolOccurrence, SymbolParser,
//! };
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! // A scripted engine standing in for the real parser.
//! struct Equals;
//! impl SymbolParser for Equals {
//!     fn parse(&self, text: &str) -> Result<Vec<SymbolOccurrence>, ParseError> {
//!         let spans = text.match_indices('=').map(|(i, _)| ByteSpan::new(i, i + 1)).collect();
//!         Ok(vec![SymbolOccurrence::new("=", "≡", spans)])
//!     }
//! }
//!
//! // An in-memory host document.
//! struct Host {
//!     text: String,
//!     shown: usize,
//! }
//! impl EditorHost for Host {
//!     fn document_text(&self, _: EditorId) -> Option<String> {
//!         Some(self.text.clone())
//!     }
//!     fn offset_to_position(&self, _: EditorId, offset: usize) -> Option<Position> {
//!         LineMap::from_text(&self.text).offset_to_position(offset)
//!     }
//!     fn set_overlays(&mut self, _: EditorId, _: &DisplayStyle, ranges: &[PositionRange]) {
//!         self.shown = ranges.len();
//!     }
//! }
//!
//! let mut host = Host { text: "a=1, b=2".into(), shown: 0 };
//! let mut session = OverlaySession::new();
//! session.set_parser(Arc::new(Equals));
//!
//! // Focusing an editor resyncs immediately; both `=` occurrences are painted.
//! session.on_active_editor_changed(Some(EditorId(1)), &mut host);
//! assert_eq!(host.shown, 2);
//!
//! // The cursor lands on the symbols' line: a reveal update hides them there.
//! let now = Instant::now();
//! session.on_selection_changed(EditorId(1), LineSpan::caret(0), now);
//! let due = session.next_deadline().unwrap();
//! session.on_timer(due, &mut host);
//! assert_eq!(host.shown, 0);
//! ```
//!
//! # Module Description
//!
//! - [`session`] - event gate and host-facing entry points
//! - [`schedule`] - the debounce state machine and its delays
//! - [`store`] - the overlay store: resync rebuild and reveal projection
//! - [`overlay`] - positions, line spans, display styles, entries
//! - [`parser`] - the parser-engine capability and occurrence types
//! - [`line_map`] - rope-backed byte-offset to position conversion
//! - [`observe`] - observability sink (tracing-backed by default)
//!
//! # Concurrency Model
//!
//! Single-threaded and cooperative. The host delivers events and timer callbacks on one
//! logical thread; the only suspension points are the debounce deadlines, which the host's
//! timer owns. Nothing here locks, and a replaced pending action provably never runs.

pub mod line_map;
pub mod observe;
pub mod overlay;
pub mod parser;
pub mod schedule;
pub mod session;
pub mod store;

pub use line_map::LineMap;
pub use observe::{NullSink, OverlaySink, TracingSink};
pub use overlay::{ColorClass, DisplayStyle, LineSpan, OverlayEntry, Position, PositionRange};
pub use parser::{ByteSpan, ParseError, SymbolOccurrence, SymbolParser};
pub use schedule::{DueAction, Pending, RESYNC_DELAY, REVEAL_DELAY};
pub use session::{EditorHost, EditorId, OverlaySession};
pub use store::OverlayStore;
