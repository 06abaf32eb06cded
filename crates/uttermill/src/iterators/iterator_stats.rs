//! # Iterator Statistics

use serde::Serialize;

/// Counters for one pass of a [`crate::DialogueIterator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IteratorStats {
    /// Records discarded by the skip count.
    pub records_skipped: usize,

    /// Records read after skipping.
    pub records_read: usize,

    /// Records that produced no exchanges (or utterances), and were dropped.
    pub malformed_dialogues: usize,

    /// Dialogues windowed and bucketed.
    pub dialogues_windowed: usize,

    /// Windows emitted in batches (placeholders excluded).
    pub windows_emitted: usize,

    /// Batches emitted.
    pub batches_emitted: usize,

    /// Dialogues left in partial buckets when the stream ran out.
    pub dialogues_dropped: usize,
}
