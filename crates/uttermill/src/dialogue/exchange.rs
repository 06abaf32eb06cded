//! # Exchange Builder

use crate::types::{TokenType, Utterance};

/// A (context, response) utterance pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange<T: TokenType> {
    /// The context utterance, at an even position.
    pub source: Utterance<T>,

    /// The response utterance, at the following odd position.
    pub target: Utterance<T>,
}

/// Pair utterances ``(0, 1), (2, 3), ...`` into exchanges.
///
/// A trailing unpaired utterance is dropped.
pub fn pair_exchanges<T: TokenType>(utterances: Vec<Utterance<T>>) -> Vec<Exchange<T>> {
    let mut exchanges = Vec::with_capacity(utterances.len() / 2);

    let mut iter = utterances.into_iter();
    while let Some(source) = iter.next() {
        let Some(target) = iter.next() else {
            break;
        };
        exchanges.push(Exchange { source, target });
    }

    exchanges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_exchanges() {
        let exchanges = pair_exchanges::<i32>(vec![vec![0, 1], vec![2], vec![3], vec![4]]);
        assert_eq!(
            exchanges,
            vec![
                Exchange {
                    source: vec![0, 1],
                    target: vec![2],
                },
                Exchange {
                    source: vec![3],
                    target: vec![4],
                },
            ]
        );
    }

    #[test]
    fn test_odd_tail_dropped() {
        let exchanges = pair_exchanges::<i32>(vec![vec![0], vec![1], vec![2]]);
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0].source, vec![0]);
        assert_eq!(exchanges[0].target, vec![1]);

        assert!(pair_exchanges::<i32>(vec![vec![0]]).is_empty());
        assert!(pair_exchanges::<i32>(vec![]).is_empty());
    }

    proptest::proptest! {
        /// Exchange k is always (utterance 2k, utterance 2k + 1).
        #[test]
        fn pairing_follows_positions(
            utterances in proptest::collection::vec(
                proptest::collection::vec(-1i32..8, 0..5),
                0..12,
            )
        ) {
            let exchanges = pair_exchanges(utterances.clone());
            proptest::prop_assert_eq!(exchanges.len(), utterances.len() / 2);
            for (k, exchange) in exchanges.iter().enumerate() {
                proptest::prop_assert_eq!(&exchange.source, &utterances[2 * k]);
                proptest::prop_assert_eq!(&exchange.target, &utterances[2 * k + 1]);
            }
        }
    }
}
