//! # Dialogue Iterators
//!
//! [`TrainIterator`] and [`InferIterator`] are the two instantiations of
//! [`DialogueIterator`]; they differ only in their [`crate::dialogue::DialogueMode`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use uttermill::{TrainIterator, TrainOptions, VocabTable};
//!
//! let vocab = Arc::new(VocabTable::<i32>::from_tokens(["a", "b", "sos", "eos", "eou"])?);
//! let records = vec!["a b eou b a", "a eou b"];
//!
//! let mut iterator = TrainIterator::new(vocab, records, TrainOptions::default())?;
//! iterator.initialize(None)?;
//! while let Some(batch) = iterator.next_batch()? {
//!     // feed batch.source, batch.target_input, ...
//! }
//! ```
pub mod dialogue_iterator;
pub mod iterator_stats;
pub mod record_source;
pub mod shuffle_buffer;

#[doc(inline)]
pub use dialogue_iterator::{DialogueIterator, InferIterator, IteratorState, TrainIterator};
#[doc(inline)]
pub use iterator_stats::IteratorStats;
#[doc(inline)]
pub use record_source::{LineFileSource, RecordSource, RecordStream};
#[doc(inline)]
pub use shuffle_buffer::ShuffleBuffer;
