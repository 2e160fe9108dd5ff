//! Process-lifetime memo of composed floor documents.

use bytes::Bytes;
use dashmap::DashMap;

/// Composed SVG documents keyed by floor number.
///
/// Entries are never evicted or expired. Concurrent writers for the same
/// floor store identical bytes, so last-write-wins is harmless.
#[derive(Debug, Default)]
pub struct SvgCache {
    entries: DashMap<i32, Bytes>,
}

impl SvgCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached document for `floor_number`, if any.
    pub fn get(&self, floor_number: i32) -> Option<Bytes> {
        self.entries
            .get(&floor_number)
            .map(|entry| entry.value().clone())
    }

    /// Stores the document for `floor_number`.
    pub fn put(&self, floor_number: i32, svg: Bytes) {
        self.entries.insert(floor_number, svg);
    }

    /// Number of cached floors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
