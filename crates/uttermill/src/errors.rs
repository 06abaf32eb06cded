//! # Error Types

/// Errors from uttermill operations.
///
/// Running out of records is not an error; iterators report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum UttermillError {
    /// A configuration option is out of range.
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption {
        /// The option name.
        name: &'static str,

        /// Why the value was rejected.
        reason: String,
    },

    /// A configured special token is not present in the vocabulary.
    #[error("{role} token {token:?} is not in the vocabulary")]
    MissingSpecialToken {
        /// The role of the token (``sos``, ``eos``, ``eou``).
        role: &'static str,

        /// The configured token string.
        token: String,
    },

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// A batch was requested before the iterator was initialized.
    #[error("iterator has not been initialized")]
    Uninitialized,

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (configuration, vocabulary files, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

impl UttermillError {
    /// Build an [`UttermillError::InvalidOption`].
    pub fn invalid_option(
        name: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for UttermillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for uttermill operations.
pub type UMResult<T> = core::result::Result<T, UttermillError>;
