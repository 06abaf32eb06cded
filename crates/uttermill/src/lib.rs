//! # `uttermill` Dialogue Batch Iterators
//!
//! This turns a stream of raw multi-turn dialogue records into padded,
//! bucketed, windowed batches for hierarchical sequence-to-sequence models.
//!
//! Each record is a single line of whitespace separated tokens, with an
//! end-of-utterance marker (``eou`` by default) between utterances.
//! Consecutive utterance pairs become (source, target) exchanges; long
//! dialogues are split into windows of at most ``dialogue_max_len`` exchanges
//! and carried across consecutive batches.
//!
//! See:
//! * [`vocab`] to build a token table and resolve the special tokens.
//! * [`dialogue`] for utterance segmentation, exchange pairing, and length normalization.
//! * [`batching`] for windowing, length bucketing, and padded batch assembly.
//! * [`iterators`] for the re-initializable [`TrainIterator`] and [`InferIterator`].
//! * [`options`] for the serde-backed iterator configuration.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps the vocabulary `HashMap` for ``ahash``.
//!
//! This is done by the [`types::UMHashMap`] type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! Uses ``foldhash`` when ``ahash`` is not enabled.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points
//! on the iterator lifecycle.
//!
//! ## Iterating Training Batches
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use uttermill::{TrainIterator, TrainOptions};
//! use uttermill::iterators::LineFileSource;
//! use uttermill::vocab::load_vocab_path;
//!
//! type T = i32;
//!
//! let vocab = Arc::new(load_vocab_path::<T, _>("vocab.txt")?);
//! let options = TrainOptions::load_json_path("train.json")?;
//!
//! let mut iterator = TrainIterator::new(vocab, LineFileSource::new("train.txt"), options)?;
//! iterator.initialize(None)?;
//! while let Some(batch) = iterator.next_batch()? {
//!     let [windows, batch_size, tokens] = batch.source.dims();
//!     // ...
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod batching;
pub mod dialogue;
pub mod errors;
pub mod iterators;
pub mod options;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use batching::Batch;
#[doc(inline)]
pub use errors::{UMResult, UttermillError};
#[doc(inline)]
pub use iterators::{
    DialogueIterator,
    InferIterator,
    IteratorState,
    LineFileSource,
    RecordSource,
    TrainIterator,
};
#[doc(inline)]
pub use options::{BatchingOptions, InferOptions, TrainOptions};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::{SpecialTokens, VocabLookup, VocabTable};
