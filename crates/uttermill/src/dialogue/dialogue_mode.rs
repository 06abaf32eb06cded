//! # Dialogue Modes
//!
//! Training and inference share every stage after normalization;
//! they differ only in how utterances become examples.

use crate::{
    dialogue::{Example, LengthNormalizer, pair_exchanges},
    errors::{UMResult, UttermillError},
    options::{InferOptions, TrainOptions},
    types::{TokenType, Utterance},
    vocab::SpecialTokens,
};

/// The capability seam between the training and inference pipelines.
pub trait DialogueMode<T: TokenType> {
    /// Do examples carry target framings?
    fn produces_targets(&self) -> bool;

    /// Turn one dialogue's utterances into ordered examples.
    fn to_examples(
        &self,
        utterances: Vec<Utterance<T>>,
    ) -> Vec<Example<T>>;

    /// The largest length key an example can have; sizes the buckets.
    fn max_length_key(&self) -> usize;

    /// Check the mode's token caps.
    fn validate(&self) -> UMResult<()>;
}

/// Training: pair utterances into exchanges, then normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainMode<T: TokenType> {
    normalizer: LengthNormalizer<T>,
}

impl<T: TokenType> TrainMode<T> {
    /// Build a training mode from options and resolved specials.
    ///
    /// Fails if `specials` were resolved without a ``sos`` id.
    pub fn from_options(
        options: &TrainOptions,
        specials: &SpecialTokens<T>,
    ) -> UMResult<Self> {
        let sos = specials.sos.ok_or(UttermillError::MissingSpecialToken {
            role: "sos",
            token: options.sos.clone(),
        })?;

        Ok(Self::new(LengthNormalizer::for_training(
            options.src_max_len,
            options.tgt_max_len,
            options.batching.src_reverse,
            sos,
            specials.eos,
        )))
    }

    /// Wrap a training normalizer.
    pub fn new(normalizer: LengthNormalizer<T>) -> Self {
        Self { normalizer }
    }

    /// The normalizer.
    pub fn normalizer(&self) -> &LengthNormalizer<T> {
        &self.normalizer
    }
}

impl<T: TokenType> DialogueMode<T> for TrainMode<T> {
    fn produces_targets(&self) -> bool {
        true
    }

    fn to_examples(
        &self,
        utterances: Vec<Utterance<T>>,
    ) -> Vec<Example<T>> {
        pair_exchanges(utterances)
            .iter()
            .map(|exchange| self.normalizer.normalize_exchange(exchange))
            .collect()
    }

    fn max_length_key(&self) -> usize {
        self.normalizer.max_length_key()
    }

    fn validate(&self) -> UMResult<()> {
        self.normalizer.validate()
    }
}

/// Inference: every utterance is a source example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferMode<T: TokenType> {
    normalizer: LengthNormalizer<T>,
}

impl<T: TokenType> InferMode<T> {
    /// Build an inference mode from options.
    pub fn from_options(options: &InferOptions) -> Self {
        Self::new(LengthNormalizer::for_inference(
            options.utt_max_len,
            options.batching.src_reverse,
        ))
    }

    /// Wrap an inference normalizer.
    pub fn new(normalizer: LengthNormalizer<T>) -> Self {
        Self { normalizer }
    }

    /// The normalizer.
    pub fn normalizer(&self) -> &LengthNormalizer<T> {
        &self.normalizer
    }
}

impl<T: TokenType> DialogueMode<T> for InferMode<T> {
    fn produces_targets(&self) -> bool {
        false
    }

    fn to_examples(
        &self,
        utterances: Vec<Utterance<T>>,
    ) -> Vec<Example<T>> {
        utterances
            .iter()
            .map(|utterance| self.normalizer.normalize_utterance(utterance))
            .collect()
    }

    fn max_length_key(&self) -> usize {
        self.normalizer.max_length_key()
    }

    fn validate(&self) -> UMResult<()> {
        self.normalizer.validate()
    }
}
