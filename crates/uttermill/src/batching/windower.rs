//! # Dialogue Windower
//!
//! A dialogue longer than `dialogue_max_len` is split into consecutive
//! windows. The [`DialogueCursor`] owns the not-yet-emitted windows, so a
//! dialogue is carried across iterator steps; once it runs dry it yields
//! [`Window::Placeholder`] until the rest of its [`DialogueGroup`] is done.

use std::collections::VecDeque;

use crate::{dialogue::Example, types::TokenType};

/// A window that carries content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowContent<T: TokenType> {
    /// The index of the originating record in the source stream.
    pub dialogue_index: usize,

    /// The position of this window within its dialogue.
    pub window_index: usize,

    /// The number of windows of the dialogue still to come after this one.
    pub remaining: usize,

    /// The ordered examples; `1..=dialogue_max_len` of them.
    pub examples: Vec<Example<T>>,
}

/// One batch slot's window for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Window<T: TokenType> {
    /// A slice of a dialogue.
    Content(WindowContent<T>),

    /// The slot's dialogue is exhausted; pads to an empty window.
    Placeholder,
}

impl<T: TokenType> Window<T> {
    /// The examples in the window; empty for placeholders.
    pub fn examples(&self) -> &[Example<T>] {
        match self {
            Window::Content(content) => &content.examples,
            Window::Placeholder => &[],
        }
    }

    /// The true (unpadded) number of examples.
    pub fn len(&self) -> usize {
        self.examples().len()
    }

    /// Is this window empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is this a placeholder window?
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Window::Placeholder)
    }
}

/// Per-dialogue windowing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueCursor<T: TokenType> {
    dialogue_index: usize,
    next_window: usize,
    windows: VecDeque<Vec<Example<T>>>,
    length_key: usize,
}

impl<T: TokenType> DialogueCursor<T> {
    /// The index of the originating record.
    pub fn dialogue_index(&self) -> usize {
        self.dialogue_index
    }

    /// The maximum example length key over the whole dialogue.
    pub fn length_key(&self) -> usize {
        self.length_key
    }

    /// The number of windows not yet emitted.
    pub fn remaining(&self) -> usize {
        self.windows.len()
    }

    /// Has every window been emitted?
    pub fn is_exhausted(&self) -> bool {
        self.windows.is_empty()
    }

    /// Emit the next window, or a placeholder once exhausted.
    pub fn advance(&mut self) -> Window<T> {
        match self.windows.pop_front() {
            None => Window::Placeholder,
            Some(examples) => {
                let window_index = self.next_window;
                self.next_window += 1;
                Window::Content(WindowContent {
                    dialogue_index: self.dialogue_index,
                    window_index,
                    remaining: self.windows.len(),
                    examples,
                })
            }
        }
    }
}

/// Splits dialogues into windows of at most `dialogue_max_len` examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windower {
    dialogue_max_len: usize,
}

impl Windower {
    /// Create a windower.
    ///
    /// ## Panics
    /// Panics if `dialogue_max_len` is zero.
    pub fn new(dialogue_max_len: usize) -> Self {
        assert!(dialogue_max_len > 0, "dialogue_max_len must be positive");
        Self { dialogue_max_len }
    }

    /// The window cap.
    pub fn dialogue_max_len(&self) -> usize {
        self.dialogue_max_len
    }

    /// Window one dialogue's examples.
    ///
    /// ## Returns
    /// `None` when there are no examples; such a dialogue contributes no windows.
    pub fn cursor<T: TokenType>(
        &self,
        dialogue_index: usize,
        examples: Vec<Example<T>>,
    ) -> Option<DialogueCursor<T>> {
        if examples.is_empty() {
            return None;
        }

        let length_key = examples.iter().map(Example::length_key).max().unwrap_or(0);

        let mut windows = VecDeque::with_capacity(examples.len().div_ceil(self.dialogue_max_len));
        let mut rest = examples;
        while !rest.is_empty() {
            let tail = rest.split_off(rest.len().min(self.dialogue_max_len));
            windows.push_back(rest);
            rest = tail;
        }

        Some(DialogueCursor {
            dialogue_index,
            next_window: 0,
            windows,
            length_key,
        })
    }
}

/// A released bucket of cursors, stepped together.
///
/// Slot `i` of every step belongs to cursor `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueGroup<T: TokenType> {
    cursors: Vec<DialogueCursor<T>>,
}

impl<T: TokenType> DialogueGroup<T> {
    /// Group cursors; their order fixes the slot order.
    pub fn new(cursors: Vec<DialogueCursor<T>>) -> Self {
        Self { cursors }
    }

    /// The number of slots.
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Is the group empty?
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Is every cursor exhausted?
    pub fn is_exhausted(&self) -> bool {
        self.cursors.iter().all(DialogueCursor::is_exhausted)
    }

    /// Advance every cursor one window.
    ///
    /// ## Returns
    /// `None` once every cursor is exhausted.
    pub fn next_step(&mut self) -> Option<Vec<Window<T>>> {
        if self.is_exhausted() {
            return None;
        }
        Some(self.cursors.iter_mut().map(DialogueCursor::advance).collect())
    }
}
