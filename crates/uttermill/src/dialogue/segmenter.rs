//! # Utterance Segmenter

use crate::{
    types::{TokenType, Utterance},
    vocab::VocabLookup,
};

/// Tokenize a record on whitespace and resolve each token through `vocab`.
pub fn tokenize_record<T, V>(
    record: &str,
    vocab: &V,
) -> Vec<T>
where
    T: TokenType,
    V: VocabLookup<T> + ?Sized,
{
    record
        .split_whitespace()
        .map(|token| vocab.lookup(token))
        .collect()
}

/// Split a token stream into utterances on `eou`.
///
/// The marker is not kept. A stream with no tokens has no utterances;
/// an empty tail after a final marker is dropped, but empty utterances
/// between consecutive markers are kept.
pub fn split_utterances<T: TokenType>(
    tokens: &[T],
    eou: T,
) -> Vec<Utterance<T>> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut utterances: Vec<Utterance<T>> = tokens
        .split(|&t| t == eou)
        .map(<[T]>::to_vec)
        .collect();

    if tokens.last() == Some(&eou) {
        utterances.pop();
    }

    utterances
}

/// Record-to-utterances segmentation for a fixed ``eou`` id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtteranceSegmenter<T: TokenType> {
    eou: T,
}

impl<T: TokenType> UtteranceSegmenter<T> {
    /// Create a segmenter splitting on `eou`.
    pub fn new(eou: T) -> Self {
        Self { eou }
    }

    /// The marker id.
    pub fn eou(&self) -> T {
        self.eou
    }

    /// Tokenize and segment one raw record.
    pub fn segment<V>(
        &self,
        record: &str,
        vocab: &V,
    ) -> Vec<Utterance<T>>
    where
        V: VocabLookup<T> + ?Sized,
    {
        split_utterances(&tokenize_record(record, vocab), self.eou)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::VocabTable;

    fn vocab() -> VocabTable<i32> {
        VocabTable::from_tokens(["a", "b", "c", "sos", "eos", "eou"]).unwrap()
    }

    #[test]
    fn test_tokenize_record() {
        let vocab = vocab();
        assert_eq!(
            tokenize_record("a  b\tf eou ", &vocab),
            vec![0, 1, -1, 5]
        );
        assert!(tokenize_record::<i32, _>("   ", &vocab).is_empty());
    }

    #[test]
    fn test_segment() {
        let segmenter = UtteranceSegmenter::new(5);
        let vocab = vocab();

        assert_eq!(
            segmenter.segment("a b b a eou c a b  eou a c c c eou a b c a", &vocab),
            vec![
                vec![0, 1, 1, 0],
                vec![2, 0, 1],
                vec![0, 2, 2, 2],
                vec![0, 1, 2, 0]
            ]
        );
        assert_eq!(segmenter.segment("a eou b ", &vocab), vec![vec![0], vec![1]]);
        assert_eq!(segmenter.segment("d", &vocab), vec![vec![-1]]);
    }

    #[test]
    fn test_degenerate_records() {
        let segmenter = UtteranceSegmenter::new(5);
        let vocab = vocab();

        assert!(segmenter.segment("", &vocab).is_empty());
        assert_eq!(segmenter.segment("eou", &vocab), vec![Vec::<i32>::new()]);
        assert_eq!(
            segmenter.segment("a eou eou b eou", &vocab),
            vec![vec![0], vec![], vec![1]]
        );
    }
}
