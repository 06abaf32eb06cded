//! # Shuffle Buffer
//!
//! A bounded, seeded shuffle over a (possibly infinite) stream: keep a
//! buffer of `capacity` items, emit a uniformly chosen one, refill.

use rand::{Rng, rngs::StdRng};

/// A seeded streaming shuffle.
pub struct ShuffleBuffer<I: Iterator> {
    source: I,
    buffer: Vec<I::Item>,
    capacity: usize,
    rng: StdRng,
}

impl<I: Iterator> ShuffleBuffer<I> {
    /// Wrap `source`; a `capacity` of `0` or `1` passes items through in order.
    pub fn new(
        source: I,
        capacity: usize,
        rng: StdRng,
    ) -> Self {
        Self {
            source,
            buffer: Vec::with_capacity(capacity),
            capacity,
            rng,
        }
    }

    /// The buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<I: Iterator> Iterator for ShuffleBuffer<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.capacity <= 1 {
            return self.source.next();
        }

        while self.buffer.len() < self.capacity {
            match self.source.next() {
                Some(item) => self.buffer.push(item),
                None => break,
            }
        }

        if self.buffer.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..self.buffer.len());
        Some(self.buffer.swap_remove(idx))
    }
}
