//! # Batches

use serde::Serialize;

use crate::{
    batching::{Tensor2, Tensor3},
    types::TokenType,
};

/// Where a batch slot's window came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotInfo {
    /// The index of the originating record in the source stream.
    pub dialogue_index: usize,

    /// The position of the window within its dialogue.
    pub window_index: usize,

    /// The number of windows of the dialogue still to come.
    pub remaining: usize,
}

/// A dense, fully padded batch.
///
/// Rank-3 tensors are laid out ``[window_position, batch_index, token]``,
/// rank-2 lengths ``[window_position, batch_index]``, and rank-1 vectors
/// have one entry per batch slot. Every pad entry holds the ``eos`` id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T: TokenType> {
    /// Source tokens.
    pub source: Tensor3<T>,

    /// Decoder input tokens (``sos``-prefixed); training only.
    pub target_input: Option<Tensor3<T>>,

    /// Decoder output tokens (``eos``-suffixed); training only.
    pub target_output: Option<Tensor3<T>>,

    /// Per slot: the longest true source length in its window.
    pub source_sequence_length: Vec<usize>,

    /// Per slot: the longest true target length in its window; training only.
    pub target_sequence_length: Option<Vec<usize>>,

    /// Per slot: the true number of exchanges (or utterances) in its window.
    pub dialogue_length: Vec<usize>,

    /// The true source length of every exchange; `0` for padded positions.
    pub source_token_lengths: Tensor2<usize>,

    /// The true target length of every exchange; training only.
    pub target_token_lengths: Option<Tensor2<usize>>,

    /// Per slot: the window origin, or `None` for placeholder slots.
    pub slots: Vec<Option<SlotInfo>>,
}

impl<T: TokenType> Batch<T> {
    /// The number of slots.
    pub fn batch_size(&self) -> usize {
        self.dialogue_length.len()
    }

    /// The padded window length.
    pub fn window_len(&self) -> usize {
        self.source.dims()[0]
    }

    /// Does the batch carry target tensors?
    pub fn has_targets(&self) -> bool {
        self.target_input.is_some()
    }

    /// The source tensor as ``[batch_index, window_position, token]``.
    pub fn source_batch_major(&self) -> Tensor3<T> {
        self.source.swap_outer_axes()
    }
}
