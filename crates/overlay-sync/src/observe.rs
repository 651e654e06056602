//! Observability for resync and render activity.
//!
//! The synchronizer reports what it does through an [`OverlaySink`]; the sink must never be
//! able to affect overlay behavior, so every method takes `&self` and returns nothing.
//! [`TracingSink`] is the default, emitting `tracing` events; [`NullSink`] discards
//! everything.

use std::time::Duration;

use crate::overlay::LineSpan;

/// Receives informational records around resync and render.
pub trait OverlaySink {
    /// A full resync completed, loading `symbol_count` occurrences.
    fn resynced(&self, symbol_count: usize, elapsed: Duration);

    /// A reveal update painted `style_count` styles, hiding ranges inside `hidden` if a
    /// selection exists.
    fn rendered(&self, style_count: usize, hidden: Option<LineSpan>, elapsed: Duration);

    /// A free-form informational line.
    fn info(&self, message: &str);
}

/// Emits sink records as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OverlaySink for TracingSink {
    fn resynced(&self, symbol_count: usize, elapsed: Duration) {
        tracing::info!(
            symbol_count,
            elapsed_us = elapsed.as_micros() as u64,
            "overlay resync complete"
        );
    }

    fn rendered(&self, style_count: usize, hidden: Option<LineSpan>, elapsed: Duration) {
        tracing::debug!(
            style_count,
            ?hidden,
            elapsed_us = elapsed.as_micros() as u64,
            "overlay render"
        );
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OverlaySink for NullSink {
    fn resynced(&self, _symbol_count: usize, _elapsed: Duration) {}

    fn rendered(&self, _style_count: usize, _hidden: Option<LineSpan>, _elapsed: Duration) {}

    fn info(&self, _message: &str) {}
}
