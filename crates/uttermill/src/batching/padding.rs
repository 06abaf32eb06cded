//! # Padding Assembler
//!
//! Pads one step of windows into a [`Batch`]:
//! * tokens to the longest source (resp. target) utterance in the step,
//! * windows to the longest window in the step, with all-pad exchanges.
//!
//! The pad id is the ``eos`` id for every stream; unknown-token sentinels
//! pass through untouched.

use crate::{
    batching::{Batch, SlotInfo, Tensor2, Tensor3, Window},
    dialogue::Example,
    types::TokenType,
};

/// Builds dense batches from windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingAssembler<T: TokenType> {
    pad: T,
    produces_targets: bool,
}

impl<T: TokenType> PaddingAssembler<T> {
    /// Create an assembler.
    ///
    /// ## Arguments
    /// * `pad` - the pad id (the ``eos`` id).
    /// * `produces_targets` - emit target tensors and lengths.
    pub fn new(
        pad: T,
        produces_targets: bool,
    ) -> Self {
        Self {
            pad,
            produces_targets,
        }
    }

    /// The pad id.
    pub fn pad(&self) -> T {
        self.pad
    }

    /// Pad a step of windows (one per slot) into a batch.
    pub fn assemble(
        &self,
        windows: &[Window<T>],
    ) -> Batch<T> {
        let batch_size = windows.len();
        let window_len = windows.iter().map(Window::len).max().unwrap_or(0);

        let examples = || windows.iter().flat_map(Window::examples);
        let source_width = examples().map(Example::source_len).max().unwrap_or(0);
        let target_width = examples().map(Example::target_len).max().unwrap_or(0);

        let mut source = Tensor3::filled([window_len, batch_size, source_width], self.pad);
        let mut source_token_lengths = Tensor2::filled([window_len, batch_size], 0);

        let mut targets = self.produces_targets.then(|| {
            (
                Tensor3::filled([window_len, batch_size, target_width], self.pad),
                Tensor3::filled([window_len, batch_size, target_width], self.pad),
                Tensor2::filled([window_len, batch_size], 0),
            )
        });

        for (b, window) in windows.iter().enumerate() {
            for (w, example) in window.examples().iter().enumerate() {
                source.row_mut(w, b)[..example.source_len()].copy_from_slice(&example.source);
                source_token_lengths.set(w, b, example.source_len());

                if let Some((input, output, lengths)) = targets.as_mut()
                    && let Some(pair) = &example.target
                {
                    input.row_mut(w, b)[..pair.input.len()].copy_from_slice(&pair.input);
                    output.row_mut(w, b)[..pair.output.len()].copy_from_slice(&pair.output);
                    lengths.set(w, b, pair.input.len());
                }
            }
        }

        let longest = |f: fn(&Example<T>) -> usize| -> Vec<usize> {
            windows
                .iter()
                .map(|window| window.examples().iter().map(f).max().unwrap_or(0))
                .collect()
        };

        let source_sequence_length = longest(Example::source_len);
        let target_sequence_length = self
            .produces_targets
            .then(|| longest(Example::target_len));

        let slots = windows
            .iter()
            .map(|window| match window {
                Window::Content(content) => Some(SlotInfo {
                    dialogue_index: content.dialogue_index,
                    window_index: content.window_index,
                    remaining: content.remaining,
                }),
                Window::Placeholder => None,
            })
            .collect();

        let (target_input, target_output, target_token_lengths) = match targets {
            Some((input, output, lengths)) => (Some(input), Some(output), Some(lengths)),
            None => (None, None, None),
        };

        Batch {
            source,
            target_input,
            target_output,
            source_sequence_length,
            target_sequence_length,
            dialogue_length: windows.iter().map(Window::len).collect(),
            source_token_lengths,
            target_token_lengths,
            slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        batching::WindowContent,
        dialogue::{Exchange, LengthNormalizer},
    };

    const EOS: i32 = 4;

    fn window(
        dialogue_index: usize,
        exchanges: &[(&[i32], &[i32])],
    ) -> Window<i32> {
        let normalizer = LengthNormalizer::for_training(3, 2, false, 3, EOS);
        Window::Content(WindowContent {
            dialogue_index,
            window_index: 0,
            remaining: 0,
            examples: exchanges
                .iter()
                .map(|(source, target)| {
                    normalizer.normalize_exchange(&Exchange {
                        source: source.to_vec(),
                        target: target.to_vec(),
                    })
                })
                .collect(),
        })
    }

    #[test]
    fn test_assemble_training() {
        let assembler = PaddingAssembler::new(EOS, true);

        // "a b b a eou c a b eou a c c c eou a b c a"
        // "a b eou f a eou b eou c eou a"
        let windows = vec![
            window(0, &[(&[0, 1, 1, 0], &[2, 0, 1]), (&[0, 2, 2, 2], &[0, 1, 2, 0])]),
            window(1, &[(&[0, 1], &[-1, 0]), (&[1], &[2])]),
        ];
        let batch = assembler.assemble(&windows);

        assert_eq!(batch.batch_size(), 2);
        assert_eq!(batch.window_len(), 2);
        assert_eq!(batch.source.dims(), [2, 2, 3]);

        assert_eq!(
            batch.source.to_nested(),
            vec![
                vec![vec![0, 1, 1], vec![0, 1, 4]],
                vec![vec![0, 2, 2], vec![1, 4, 4]],
            ]
        );
        assert_eq!(
            batch.target_input.as_ref().unwrap().to_nested(),
            vec![
                vec![vec![3, 2, 0], vec![3, -1, 0]],
                vec![vec![3, 0, 1], vec![3, 2, 4]],
            ]
        );
        assert_eq!(
            batch.target_output.as_ref().unwrap().to_nested(),
            vec![
                vec![vec![2, 0, 4], vec![-1, 0, 4]],
                vec![vec![0, 1, 4], vec![2, 4, 4]],
            ]
        );

        assert_eq!(batch.source_sequence_length, vec![3, 2]);
        assert_eq!(batch.target_sequence_length, Some(vec![3, 3]));
        assert_eq!(batch.dialogue_length, vec![2, 2]);
        assert_eq!(
            batch.source_token_lengths.to_nested(),
            vec![vec![3, 2], vec![3, 1]]
        );
        assert_eq!(
            batch.target_token_lengths.as_ref().unwrap().to_nested(),
            vec![vec![3, 3], vec![3, 2]]
        );
        assert_eq!(batch.slots[1].unwrap().dialogue_index, 1);
    }

    #[test]
    fn test_short_window_padded_with_pad_exchanges() {
        let assembler = PaddingAssembler::new(EOS, true);
        let windows = vec![
            window(0, &[(&[0, 2], &[1, -1, 0, 2])]),
            window(1, &[(&[0], &[1]), (&[2, 2], &[2])]),
        ];
        let batch = assembler.assemble(&windows);

        assert_eq!(batch.source.row(1, 0), &[4, 4]);
        assert_eq!(batch.target_input.as_ref().unwrap().row(1, 0), &[4, 4, 4]);
        assert_eq!(batch.target_output.as_ref().unwrap().row(1, 0), &[4, 4, 4]);
        assert_eq!(batch.target_input.as_ref().unwrap().row(0, 0), &[3, 1, -1]);
        assert_eq!(batch.dialogue_length, vec![1, 2]);
        assert_eq!(batch.source_token_lengths.get(1, 0), 0);
    }

    #[test]
    fn test_placeholder_slot() {
        let assembler = PaddingAssembler::new(EOS, true);
        let windows = vec![window(0, &[(&[0, 1, 2], &[1])]), Window::Placeholder];
        let batch = assembler.assemble(&windows);

        assert_eq!(batch.batch_size(), 2);
        assert_eq!(batch.source.row(0, 1), &[4, 4, 4]);
        assert_eq!(batch.target_input.as_ref().unwrap().row(0, 1), &[4, 4]);
        assert_eq!(batch.source_sequence_length, vec![3, 0]);
        assert_eq!(batch.target_sequence_length, Some(vec![2, 0]));
        assert_eq!(batch.dialogue_length, vec![1, 0]);
        assert!(batch.slots[0].is_some());
        assert!(batch.slots[1].is_none());
    }

    #[test]
    fn test_inference_has_no_targets() {
        let assembler = PaddingAssembler::new(3, false);
        let normalizer = LengthNormalizer::<i32>::for_inference(3, false);
        let windows = vec![Window::Content(WindowContent {
            dialogue_index: 0,
            window_index: 0,
            remaining: 0,
            examples: vec![
                normalizer.normalize_utterance(&[0, 1, 1, 0]),
                normalizer.normalize_utterance(&[2]),
            ],
        })];
        let batch = assembler.assemble(&windows);

        assert!(!batch.has_targets());
        assert!(batch.target_output.is_none());
        assert!(batch.target_sequence_length.is_none());
        assert!(batch.target_token_lengths.is_none());
        assert_eq!(
            batch.source.to_nested(),
            vec![vec![vec![0, 1, 1]], vec![vec![2, 3, 3]]]
        );
        assert_eq!(batch.source_sequence_length, vec![3]);
        assert_eq!(
            batch.source_batch_major().to_nested(),
            vec![vec![vec![0, 1, 1], vec![2, 3, 3]]]
        );
    }
}
