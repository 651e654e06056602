//! The Overlay Store: identity-keyed styles and their current ranges.
//!
//! The store is the single source of truth for what *could* be shown: every symbol identity
//! ever seen in the active document, its cached display style, and the ranges where it
//! currently occurs. A full resync replaces every range list wholesale; the reveal projection
//! ([`OverlayStore::visible`]) filters what is actually painted without mutating anything.
//!
//! Styles are cached, not evicted: an identity that disappears from the document keeps its
//! entry with an empty range list, so the style is not re-derived when the content reappears.

use std::collections::HashMap;

use crate::overlay::{DisplayStyle, LineSpan, OverlayEntry, Position, PositionRange};
use crate::parser::SymbolOccurrence;

/// Mapping from symbol identity to its cached style and current ranges.
#[derive(Debug, Default)]
pub struct OverlayStore {
    entries: HashMap<String, OverlayEntry>,
}

impl OverlayStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities ever seen for this document.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no identity has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the entry for an identity.
    pub fn entry(&self, identity: &str) -> Option<&OverlayEntry> {
        self.entries.get(identity)
    }

    /// Iterate over all `(identity, entry)` pairs, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &OverlayEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rebuild all range lists from a fresh parse.
    ///
    /// Styles are reused for known identities and derived once for new ones. Identities
    /// missing from `occurrences` keep an empty range list. If the parser reports the same
    /// identity more than once, the last occurrence wins; ranges never accumulate across
    /// calls.
    ///
    /// `convert` maps a byte offset in the parsed snapshot to a document position. A span
    /// whose endpoints no longer convert (the document moved under the snapshot) is dropped
    /// from the entry, as are inverted spans; conversion trouble never aborts the rebuild.
    pub fn rebuild<F>(&mut self, occurrences: &[SymbolOccurrence], mut convert: F)
    where
        F: FnMut(usize) -> Option<Position>,
    {
        for entry in self.entries.values_mut() {
            entry.clear_ranges();
        }

        for occurrence in occurrences {
            let entry = self
                .entries
                .entry(occurrence.identity.clone())
                .or_insert_with(|| {
                    OverlayEntry::new(DisplayStyle::with_hints(
                        &occurrence.display_label,
                        occurrence.color,
                        &occurrence.css_hint,
                    ))
                });

            let mut ranges = Vec::with_capacity(occurrence.spans.len());
            for span in &occurrence.spans {
                if span.end < span.start {
                    continue;
                }
                let (Some(start), Some(end)) = (convert(span.start), convert(span.end)) else {
                    continue;
                };
                ranges.push(PositionRange::new(start, end));
            }
            entry.set_ranges(ranges);
        }
    }

    /// Project the store onto the display.
    ///
    /// With a reveal span, each style gets only the ranges that do not intersect the span's
    /// line-aligned window; without one, every range is shown. Known styles always appear in
    /// the result, with an empty range list when nothing of that style is visible, so the
    /// renderer can clear them. Pure: the store is not mutated.
    pub fn visible(&self, reveal: Option<LineSpan>) -> Vec<(&DisplayStyle, Vec<PositionRange>)> {
        self.entries
            .values()
            .map(|entry| {
                let ranges = match reveal {
                    Some(span) => entry
                        .ranges()
                        .iter()
                        .copied()
                        .filter(|range| !span.intersects(range))
                        .collect(),
                    None => entry.ranges().to_vec(),
                };
                (entry.style(), ranges)
            })
            .collect()
    }
}
