//! # Bucketing Batcher
//!
//! Items are keyed by length and routed to one of `num_buckets` FIFO
//! buckets of equal key width; a bucket is released as soon as it holds
//! `batch_size` items. Co-batching items of similar length keeps the
//! padding overhead down.

use std::collections::VecDeque;

/// Length-keyed FIFO buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketingBatcher<I> {
    buckets: Vec<VecDeque<I>>,
    batch_size: usize,
    bucket_width: usize,
}

impl<I> BucketingBatcher<I> {
    /// Create a batcher.
    ///
    /// ## Arguments
    /// * `num_buckets` - the number of buckets; `1` is a single FIFO queue.
    /// * `batch_size` - the number of items per release.
    /// * `max_key` - the largest expected key; keys above it share the last bucket.
    ///
    /// ## Panics
    /// Panics if `num_buckets` or `batch_size` is zero.
    pub fn new(
        num_buckets: usize,
        batch_size: usize,
        max_key: usize,
    ) -> Self {
        assert!(num_buckets > 0, "num_buckets must be positive");
        assert!(batch_size > 0, "batch_size must be positive");

        Self {
            buckets: (0..num_buckets).map(|_| VecDeque::new()).collect(),
            batch_size,
            bucket_width: max_key.div_ceil(num_buckets).max(1),
        }
    }

    /// The number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// The number of items per release.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The key span covered by each bucket.
    pub fn bucket_width(&self) -> usize {
        self.bucket_width
    }

    /// Map a length key to its bucket; monotonic in `key`.
    pub fn bucket_index(
        &self,
        key: usize,
    ) -> usize {
        (key / self.bucket_width).min(self.buckets.len() - 1)
    }

    /// Add an item.
    ///
    /// ## Returns
    /// The bucket's items, in arrival order, if this push filled it.
    pub fn push(
        &mut self,
        key: usize,
        item: I,
    ) -> Option<Vec<I>> {
        let batch_size = self.batch_size;
        let idx = self.bucket_index(key);
        let bucket = &mut self.buckets[idx];

        bucket.push_back(item);
        if bucket.len() >= batch_size {
            Some(bucket.drain(..batch_size).collect())
        } else {
            None
        }
    }

    /// The number of items waiting in partial buckets.
    pub fn pending(&self) -> usize {
        self.buckets.iter().map(VecDeque::len).sum()
    }

    /// Drop all partial buckets.
    ///
    /// ## Returns
    /// The number of dropped items.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending();
        self.buckets.iter_mut().for_each(VecDeque::clear);
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bucket_is_fifo() {
        let mut batcher = BucketingBatcher::new(1, 2, 50);
        assert_eq!(batcher.push(40, "a"), None);
        assert_eq!(batcher.push(1, "b"), Some(vec!["a", "b"]));
        assert_eq!(batcher.push(7, "c"), None);
        assert_eq!(batcher.pending(), 1);
        assert_eq!(batcher.clear(), 1);
        assert_eq!(batcher.pending(), 0);
    }

    #[test]
    fn test_bucket_index() {
        let batcher = BucketingBatcher::<()>::new(2, 2, 3);
        assert_eq!(batcher.bucket_width(), 2);
        assert_eq!(batcher.bucket_index(0), 0);
        assert_eq!(batcher.bucket_index(1), 0);
        assert_eq!(batcher.bucket_index(2), 1);
        assert_eq!(batcher.bucket_index(3), 1);
        assert_eq!(batcher.bucket_index(100), 1);

        let batcher = BucketingBatcher::<()>::new(5, 2, 2);
        assert_eq!(batcher.bucket_width(), 1);
        assert_eq!(batcher.bucket_index(4), 4);
    }

    #[test]
    fn test_buckets_release_independently() {
        let mut batcher = BucketingBatcher::new(2, 2, 10);

        assert_eq!(batcher.push(1, "short-1"), None);
        assert_eq!(batcher.push(9, "long-1"), None);
        assert_eq!(batcher.push(8, "long-2"), Some(vec!["long-1", "long-2"]));
        assert_eq!(batcher.push(2, "short-2"), Some(vec!["short-1", "short-2"]));
        assert_eq!(batcher.pending(), 0);
    }

    proptest::proptest! {
        /// Bucket assignment never decreases as the key grows.
        #[test]
        fn bucket_index_monotonic(
            num_buckets in 1usize..8,
            max_key in 0usize..100,
            a in 0usize..150,
            b in 0usize..150,
        ) {
            let batcher = BucketingBatcher::<()>::new(num_buckets, 1, max_key);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            proptest::prop_assert!(batcher.bucket_index(lo) <= batcher.bucket_index(hi));
            proptest::prop_assert!(batcher.bucket_index(hi) < num_buckets);
        }
    }
}
