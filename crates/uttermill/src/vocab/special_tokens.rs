//! # Special Tokens

use crate::{
    errors::{UMResult, UttermillError},
    types::TokenType,
    vocab::VocabLookup,
};

/// Resolve a special token string, requiring it to be in the vocabulary.
fn resolve<T, V>(
    vocab: &V,
    role: &'static str,
    token: &str,
) -> UMResult<T>
where
    T: TokenType,
    V: VocabLookup<T> + ?Sized,
{
    if vocab.contains(token) {
        Ok(vocab.lookup(token))
    } else {
        Err(UttermillError::MissingSpecialToken {
            role,
            token: token.to_string(),
        })
    }
}

/// The special token ids used by the pipeline.
///
/// The ``eos`` id doubles as the padding id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTokens<T: TokenType> {
    /// Start-of-sequence; only resolved for training.
    pub sos: Option<T>,

    /// End-of-sequence, also used for padding.
    pub eos: T,

    /// End-of-utterance marker.
    pub eou: T,
}

impl<T: TokenType> SpecialTokens<T> {
    /// Resolve the training specials (``sos``, ``eos``, ``eou``).
    pub fn resolve_training<V>(
        vocab: &V,
        sos: &str,
        eos: &str,
        eou: &str,
    ) -> UMResult<Self>
    where
        V: VocabLookup<T> + ?Sized,
    {
        Ok(Self {
            sos: Some(resolve(vocab, "sos", sos)?),
            eos: resolve(vocab, "eos", eos)?,
            eou: resolve(vocab, "eou", eou)?,
        })
    }

    /// Resolve the inference specials (``eos``, ``eou``).
    pub fn resolve_inference<V>(
        vocab: &V,
        eos: &str,
        eou: &str,
    ) -> UMResult<Self>
    where
        V: VocabLookup<T> + ?Sized,
    {
        Ok(Self {
            sos: None,
            eos: resolve(vocab, "eos", eos)?,
            eou: resolve(vocab, "eou", eou)?,
        })
    }

    /// The padding id.
    pub fn pad(&self) -> T {
        self.eos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabTable;

    #[test]
    fn test_resolve() {
        let vocab: VocabTable<i32> =
            VocabTable::from_tokens(["a", "b", "c", "sos", "eos", "eou"]).unwrap();

        let specials: SpecialTokens<i32> =
            SpecialTokens::resolve_training(&vocab, "sos", "eos", "eou").unwrap();
        assert_eq!(specials.sos, Some(3));
        assert_eq!(specials.eos, 4);
        assert_eq!(specials.eou, 5);
        assert_eq!(specials.pad(), 4);

        let specials: SpecialTokens<i32> =
            SpecialTokens::resolve_inference(&vocab, "eos", "eou").unwrap();
        assert_eq!(specials.sos, None);
    }

    #[test]
    fn test_missing() {
        let vocab: VocabTable<i32> = VocabTable::from_tokens(["a", "eos", "eou"]).unwrap();

        let err =
            SpecialTokens::<i32>::resolve_training(&vocab, "<s>", "eos", "eou").unwrap_err();
        assert!(matches!(
            err,
            UttermillError::MissingSpecialToken { role: "sos", .. }
        ));
    }
}
