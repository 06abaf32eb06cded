//! # Iterator Options
//!
//! [`TrainOptions`] and [`InferOptions`] share a flattened [`BatchingOptions`]
//! block, so one JSON object configures an iterator:
//!
//! ```json
//! {"batch_size": 2, "num_buckets": 2, "dialogue_max_len": 4,
//!  "src_max_len": 3, "tgt_max_len": 2, "random_seed": 53}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{UMResult, UttermillError};

fn require_positive(
    name: &'static str,
    value: usize,
) -> UMResult<()> {
    if value == 0 {
        return Err(UttermillError::invalid_option(name, "must be positive"));
    }
    Ok(())
}

fn require_token(
    name: &'static str,
    value: &str,
) -> UMResult<()> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(UttermillError::invalid_option(
            name,
            format!("{value:?} is not a whitespace-free token"),
        ));
    }
    Ok(())
}

/// Options shared by training and inference iterators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchingOptions {
    /// The number of dialogue slots per batch.
    pub batch_size: usize,

    /// The end-of-sequence token; also the padding token.
    pub eos: String,

    /// The end-of-utterance marker token.
    pub eou: String,

    /// Reverse source token order (after truncation).
    pub src_reverse: bool,

    /// Seed for record shuffling; `None` seeds from the OS.
    pub random_seed: Option<u64>,

    /// The number of length buckets.
    pub num_buckets: usize,

    /// The maximum number of exchanges (or utterances) per window.
    pub dialogue_max_len: usize,

    /// The record shuffle buffer size; `0` or `1` disables shuffling.
    pub shuffle_buffer_size: usize,

    /// The number of records to discard from the head of the stream.
    pub skip_count: Option<usize>,
}

impl Default for BatchingOptions {
    fn default() -> Self {
        Self {
            batch_size: 128,
            eos: "eos".to_string(),
            eou: "eou".to_string(),
            src_reverse: false,
            random_seed: None,
            num_buckets: 1,
            dialogue_max_len: 10,
            shuffle_buffer_size: 0,
            skip_count: None,
        }
    }
}

impl BatchingOptions {
    /// Sets the batch size.
    pub fn with_batch_size(
        self,
        batch_size: usize,
    ) -> Self {
        Self { batch_size, ..self }
    }

    /// Sets the ``eos`` and ``eou`` token strings.
    pub fn with_markers(
        self,
        eos: impl Into<String>,
        eou: impl Into<String>,
    ) -> Self {
        Self {
            eos: eos.into(),
            eou: eou.into(),
            ..self
        }
    }

    /// Sets source reversal.
    pub fn with_src_reverse(
        self,
        src_reverse: bool,
    ) -> Self {
        Self {
            src_reverse,
            ..self
        }
    }

    /// Sets the shuffle seed.
    pub fn with_random_seed(
        self,
        random_seed: Option<u64>,
    ) -> Self {
        Self {
            random_seed,
            ..self
        }
    }

    /// Sets the number of length buckets.
    pub fn with_num_buckets(
        self,
        num_buckets: usize,
    ) -> Self {
        Self {
            num_buckets,
            ..self
        }
    }

    /// Sets the window length cap.
    pub fn with_dialogue_max_len(
        self,
        dialogue_max_len: usize,
    ) -> Self {
        Self {
            dialogue_max_len,
            ..self
        }
    }

    /// Sets the shuffle buffer size.
    pub fn with_shuffle_buffer_size(
        self,
        shuffle_buffer_size: usize,
    ) -> Self {
        Self {
            shuffle_buffer_size,
            ..self
        }
    }

    /// Sets the default skip count.
    pub fn with_skip_count(
        self,
        skip_count: Option<usize>,
    ) -> Self {
        Self { skip_count, ..self }
    }

    /// Check the options; fails on the first out-of-range value.
    pub fn validate(&self) -> UMResult<()> {
        require_positive("batch_size", self.batch_size)?;
        require_positive("num_buckets", self.num_buckets)?;
        require_positive("dialogue_max_len", self.dialogue_max_len)?;
        require_token("eos", &self.eos)?;
        require_token("eou", &self.eou)?;
        Ok(())
    }
}

/// Options for the training iterator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    /// The shared batching options.
    #[serde(flatten)]
    pub batching: BatchingOptions,

    /// The start-of-sequence token.
    pub sos: String,

    /// The source utterance token cap.
    pub src_max_len: usize,

    /// The target utterance token cap (before ``sos``/``eos`` are added).
    pub tgt_max_len: usize,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            batching: BatchingOptions::default(),
            sos: "sos".to_string(),
            src_max_len: 50,
            tgt_max_len: 50,
        }
    }
}

impl TrainOptions {
    /// Sets the shared batching options.
    pub fn with_batching(
        self,
        batching: BatchingOptions,
    ) -> Self {
        Self { batching, ..self }
    }

    /// Sets the ``sos`` token string.
    pub fn with_sos(
        self,
        sos: impl Into<String>,
    ) -> Self {
        Self {
            sos: sos.into(),
            ..self
        }
    }

    /// Sets the source and target token caps.
    pub fn with_max_lens(
        self,
        src_max_len: usize,
        tgt_max_len: usize,
    ) -> Self {
        Self {
            src_max_len,
            tgt_max_len,
            ..self
        }
    }

    /// Check the options; fails on the first out-of-range value.
    pub fn validate(&self) -> UMResult<()> {
        self.batching.validate()?;
        require_positive("src_max_len", self.src_max_len)?;
        require_positive("tgt_max_len", self.tgt_max_len)?;
        require_token("sos", &self.sos)?;
        Ok(())
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(json: &str) -> UMResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> UMResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

/// Options for the inference iterator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferOptions {
    /// The shared batching options.
    #[serde(flatten)]
    pub batching: BatchingOptions,

    /// The utterance token cap.
    pub utt_max_len: usize,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            batching: BatchingOptions::default(),
            utt_max_len: 50,
        }
    }
}

impl InferOptions {
    /// Sets the shared batching options.
    pub fn with_batching(
        self,
        batching: BatchingOptions,
    ) -> Self {
        Self { batching, ..self }
    }

    /// Sets the utterance token cap.
    pub fn with_utt_max_len(
        self,
        utt_max_len: usize,
    ) -> Self {
        Self {
            utt_max_len,
            ..self
        }
    }

    /// Check the options; fails on the first out-of-range value.
    pub fn validate(&self) -> UMResult<()> {
        self.batching.validate()?;
        require_positive("utt_max_len", self.utt_max_len)?;
        Ok(())
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(json: &str) -> UMResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn load_json_path<P: AsRef<Path>>(path: P) -> UMResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}
