//! # Length Normalizer
//!
//! Sources keep their first `src_max_len` tokens, optionally reversed.
//! Targets keep their first `tgt_max_len` tokens and are framed twice:
//! * ``input  = [sos] + target``
//! * ``output = target + [eos]``
//!
//! so `input[i + 1] == output[i]` for every kept token.

use crate::{
    dialogue::Exchange,
    errors::{UMResult, UttermillError},
    types::TokenType,
};

/// The two framings of one target utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPair<T: TokenType> {
    /// ``[sos] + target``; the decoder input.
    pub input: Vec<T>,

    /// ``target + [eos]``; the decoder output.
    pub output: Vec<T>,
}

/// A normalized exchange (training) or utterance (inference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example<T: TokenType> {
    /// The truncated (and possibly reversed) source tokens.
    pub source: Vec<T>,

    /// The framed target; `None` for inference examples.
    pub target: Option<TargetPair<T>>,
}

impl<T: TokenType> Example<T> {
    /// The true source length.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// The true target length (``sos`` included), or `0` without a target.
    pub fn target_len(&self) -> usize {
        self.target.as_ref().map_or(0, |t| t.input.len())
    }

    /// The bucketing key: the longer of the source and target lengths.
    pub fn length_key(&self) -> usize {
        self.source_len().max(self.target_len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TargetFraming<T: TokenType> {
    max_len: usize,
    sos: T,
    eos: T,
}

/// Per-utterance truncation and special token injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthNormalizer<T: TokenType> {
    src_max_len: usize,
    src_reverse: bool,
    target: Option<TargetFraming<T>>,
}

impl<T: TokenType> LengthNormalizer<T> {
    /// A normalizer for training exchanges.
    ///
    /// ## Arguments
    /// * `src_max_len` - the source token cap.
    /// * `tgt_max_len` - the target token cap, before framing.
    /// * `src_reverse` - reverse sources after truncation.
    /// * `sos` - the start-of-sequence id.
    /// * `eos` - the end-of-sequence id.
    pub fn for_training(
        src_max_len: usize,
        tgt_max_len: usize,
        src_reverse: bool,
        sos: T,
        eos: T,
    ) -> Self {
        Self {
            src_max_len,
            src_reverse,
            target: Some(TargetFraming {
                max_len: tgt_max_len,
                sos,
                eos,
            }),
        }
    }

    /// A normalizer for inference utterances; no special tokens are injected.
    pub fn for_inference(
        utt_max_len: usize,
        src_reverse: bool,
    ) -> Self {
        Self {
            src_max_len: utt_max_len,
            src_reverse,
            target: None,
        }
    }

    /// The source token cap.
    pub fn src_max_len(&self) -> usize {
        self.src_max_len
    }

    /// The target token cap, if this normalizer frames targets.
    pub fn tgt_max_len(&self) -> Option<usize> {
        self.target.map(|t| t.max_len)
    }

    /// Check the token caps.
    ///
    /// ## Returns
    /// An [`UttermillError::InvalidOption`] naming the first zero cap.
    pub fn validate(&self) -> UMResult<()> {
        let src_name = if self.target.is_some() {
            "src_max_len"
        } else {
            "utt_max_len"
        };
        if self.src_max_len == 0 {
            return Err(UttermillError::invalid_option(src_name, "must be positive"));
        }
        if let Some(target) = self.target
            && target.max_len == 0
        {
            return Err(UttermillError::invalid_option(
                "tgt_max_len",
                "must be positive",
            ));
        }
        Ok(())
    }

    /// The largest [`Example::length_key`] this normalizer can produce.
    pub fn max_length_key(&self) -> usize {
        match self.target {
            Some(t) => self.src_max_len.max(t.max_len + 1),
            None => self.src_max_len,
        }
    }

    /// Truncate (then optionally reverse) a source utterance.
    pub fn normalize_source(
        &self,
        utterance: &[T],
    ) -> Vec<T> {
        let keep = utterance.len().min(self.src_max_len);
        let mut source = utterance[..keep].to_vec();
        if self.src_reverse {
            source.reverse();
        }
        source
    }

    /// Truncate and frame a target utterance.
    ///
    /// Returns `None` for inference normalizers.
    pub fn normalize_target(
        &self,
        utterance: &[T],
    ) -> Option<TargetPair<T>> {
        let TargetFraming { max_len, sos, eos } = self.target?;
        let kept = &utterance[..utterance.len().min(max_len)];

        let mut input = Vec::with_capacity(kept.len() + 1);
        input.push(sos);
        input.extend_from_slice(kept);

        let mut output = Vec::with_capacity(kept.len() + 1);
        output.extend_from_slice(kept);
        output.push(eos);

        Some(TargetPair { input, output })
    }

    /// Normalize a training exchange.
    pub fn normalize_exchange(
        &self,
        exchange: &Exchange<T>,
    ) -> Example<T> {
        Example {
            source: self.normalize_source(&exchange.source),
            target: self.normalize_target(&exchange.target),
        }
    }

    /// Normalize an inference utterance.
    pub fn normalize_utterance(
        &self,
        utterance: &[T],
    ) -> Example<T> {
        Example {
            source: self.normalize_source(utterance),
            target: None,
        }
    }
}
