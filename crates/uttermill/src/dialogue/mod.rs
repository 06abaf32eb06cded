//! # Dialogue Preparation
//!
//! Turns one raw record into length-normalized [`Example`]s:
//! * [`UtteranceSegmenter`] - tokenize and split on the ``eou`` marker,
//! * [`pair_exchanges`] - pair utterances ``(2k, 2k + 1)`` (training only),
//! * [`LengthNormalizer`] - truncate, reverse, and inject ``sos``/``eos``,
//! * [`DialogueMode`] - the training / inference capability seam.
pub mod dialogue_mode;
pub mod exchange;
pub mod length_normalizer;
pub mod segmenter;

#[doc(inline)]
pub use dialogue_mode::{DialogueMode, InferMode, TrainMode};
#[doc(inline)]
pub use exchange::{Exchange, pair_exchanges};
#[doc(inline)]
pub use length_normalizer::{Example, LengthNormalizer, TargetPair};
#[doc(inline)]
pub use segmenter::{UtteranceSegmenter, split_utterances, tokenize_record};
