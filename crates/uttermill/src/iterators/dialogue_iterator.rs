//! # Dialogue Iterator
//!
//! The iterator owns all per-pass state: the record stream, the bucket
//! buffers, and the active [`DialogueGroup`]. Its lifecycle is
//! ``Uninitialized -> Ready -> Exhausted``; [`DialogueIterator::initialize`]
//! (re)starts a pass from any state.
//!
//! Each pull steps the active group; when it runs dry, records are read
//! and windowed until some bucket fills and releases the next group.
//! Dialogues left in partial buckets at the end of the stream are dropped,
//! so every batch has exactly `batch_size` slots.

use std::{iter::Enumerate, sync::Arc};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    batching::{
        Batch,
        BucketingBatcher,
        DialogueCursor,
        DialogueGroup,
        PaddingAssembler,
        Windower,
    },
    dialogue::{DialogueMode, InferMode, TrainMode, UtteranceSegmenter},
    errors::{UMResult, UttermillError},
    iterators::{IteratorStats, RecordSource, RecordStream, ShuffleBuffer},
    options::{BatchingOptions, InferOptions, TrainOptions},
    types::TokenType,
    vocab::{SpecialTokens, VocabLookup},
};

/// The lifecycle state of a [`DialogueIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// No pass has been started.
    Uninitialized,

    /// A pass is in progress.
    Ready,

    /// The pass is complete; terminal until re-initialized.
    Exhausted,
}

/// A batching iterator over raw dialogue records.
pub struct DialogueIterator<T, V, S, M>
where
    T: TokenType,
    V: VocabLookup<T>,
    S: RecordSource,
    M: DialogueMode<T>,
{
    vocab: Arc<V>,
    source: S,
    mode: M,
    options: BatchingOptions,

    segmenter: UtteranceSegmenter<T>,
    windower: Windower,
    assembler: PaddingAssembler<T>,

    state: IteratorState,
    records: Option<ShuffleBuffer<Enumerate<RecordStream>>>,
    record_offset: usize,
    batcher: BucketingBatcher<DialogueCursor<T>>,
    active: Option<DialogueGroup<T>>,
    stats: IteratorStats,
}

/// Batches (source, target) exchanges.
pub type TrainIterator<T, V, S> = DialogueIterator<T, V, S, TrainMode<T>>;

/// Batches unpaired utterance windows.
pub type InferIterator<T, V, S> = DialogueIterator<T, V, S, InferMode<T>>;

impl<T, V, S> TrainIterator<T, V, S>
where
    T: TokenType,
    V: VocabLookup<T>,
    S: RecordSource,
{
    /// Build a training iterator.
    ///
    /// ## Arguments
    /// * `vocab` - the shared vocabulary.
    /// * `source` - the record source; opened on each initialization.
    /// * `options` - validated here; the special tokens must be in `vocab`.
    pub fn new(
        vocab: Arc<V>,
        source: S,
        options: TrainOptions,
    ) -> UMResult<Self> {
        options.validate()?;
        let specials = SpecialTokens::resolve_training(
            &*vocab,
            &options.sos,
            &options.batching.eos,
            &options.batching.eou,
        )?;
        let mode = TrainMode::from_options(&options, &specials)?;

        Self::with_mode(vocab, source, mode, specials, options.batching)
    }
}

impl<T, V, S> InferIterator<T, V, S>
where
    T: TokenType,
    V: VocabLookup<T>,
    S: RecordSource,
{
    /// Build an inference iterator.
    ///
    /// ## Arguments
    /// * `vocab` - the shared vocabulary.
    /// * `source` - the record source; opened on each initialization.
    /// * `options` - validated here; the special tokens must be in `vocab`.
    pub fn new(
        vocab: Arc<V>,
        source: S,
        options: InferOptions,
    ) -> UMResult<Self> {
        options.validate()?;
        let specials = SpecialTokens::resolve_inference(
            &*vocab,
            &options.batching.eos,
            &options.batching.eou,
        )?;
        let mode = InferMode::from_options(&options);

        Self::with_mode(vocab, source, mode, specials, options.batching)
    }
}

impl<T, V, S, M> DialogueIterator<T, V, S, M>
where
    T: TokenType,
    V: VocabLookup<T>,
    S: RecordSource,
    M: DialogueMode<T>,
{
    /// Build an iterator around an explicit mode.
    pub fn with_mode(
        vocab: Arc<V>,
        source: S,
        mode: M,
        specials: SpecialTokens<T>,
        options: BatchingOptions,
    ) -> UMResult<Self> {
        options.validate()?;
        mode.validate()?;

        let batcher = BucketingBatcher::new(
            options.num_buckets,
            options.batch_size,
            mode.max_length_key(),
        );

        Ok(Self {
            segmenter: UtteranceSegmenter::new(specials.eou),
            windower: Windower::new(options.dialogue_max_len),
            assembler: PaddingAssembler::new(specials.pad(), mode.produces_targets()),
            vocab,
            source,
            mode,
            options,
            state: IteratorState::Uninitialized,
            records: None,
            record_offset: 0,
            batcher,
            active: None,
            stats: IteratorStats::default(),
        })
    }

    /// The lifecycle state.
    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Counters for the current pass.
    pub fn stats(&self) -> &IteratorStats {
        &self.stats
    }

    /// The batching options.
    pub fn options(&self) -> &BatchingOptions {
        &self.options
    }

    /// The dialogue mode.
    pub fn mode(&self) -> &M {
        &self.mode
    }

    /// The shared vocabulary.
    pub fn vocab(&self) -> &Arc<V> {
        &self.vocab
    }

    /// Does this iterator emit target tensors?
    pub fn produces_targets(&self) -> bool {
        self.mode.produces_targets()
    }

    /// Start a pass with the configured seed.
    ///
    /// ## Arguments
    /// * `skip_count` - records to discard; falls back to the configured skip count.
    pub fn initialize(
        &mut self,
        skip_count: Option<usize>,
    ) -> UMResult<()> {
        self.initialize_with_seed(self.options.random_seed, skip_count)
    }

    /// Start a pass with an explicit seed.
    ///
    /// All cursors and bucket buffers from any previous pass are discarded.
    ///
    /// ## Arguments
    /// * `random_seed` - the shuffle seed; `None` seeds from the OS.
    /// * `skip_count` - records to discard; falls back to the configured skip count.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn initialize_with_seed(
        &mut self,
        random_seed: Option<u64>,
        skip_count: Option<usize>,
    ) -> UMResult<()> {
        self.state = IteratorState::Uninitialized;
        self.records = None;
        self.active = None;
        self.batcher.clear();
        self.stats = IteratorStats::default();

        let skip_count = skip_count.or(self.options.skip_count).unwrap_or(0);
        let rng = match random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut stream = self.source.open()?;
        for _ in 0..skip_count {
            match stream.next() {
                Some(record) => {
                    record?;
                    self.stats.records_skipped += 1;
                }
                None => break,
            }
        }

        log::info!(
            "initialized pass: seed={random_seed:?}, skipped={}",
            self.stats.records_skipped
        );

        self.record_offset = self.stats.records_skipped;
        self.records = Some(ShuffleBuffer::new(
            stream.enumerate(),
            self.options.shuffle_buffer_size,
            rng,
        ));
        self.state = IteratorState::Ready;
        Ok(())
    }

    /// Produce the next batch.
    ///
    /// ## Returns
    /// * `Ok(Some(batch))` - a complete batch of `batch_size` slots,
    /// * `Ok(None)` - the pass is exhausted,
    /// * `Err(_)` - the iterator is uninitialized, or a record failed to read.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn next_batch(&mut self) -> UMResult<Option<Batch<T>>> {
        match self.state {
            IteratorState::Uninitialized => return Err(UttermillError::Uninitialized),
            IteratorState::Exhausted => return Ok(None),
            IteratorState::Ready => {}
        }

        loop {
            if let Some(windows) = self.active.as_mut().and_then(DialogueGroup::next_step) {
                let batch = self.assembler.assemble(&windows);

                self.stats.batches_emitted += 1;
                self.stats.windows_emitted +=
                    windows.iter().filter(|w| !w.is_placeholder()).count();
                log::trace!(
                    "batch {}: source dims {:?}, dialogue lengths {:?}",
                    self.stats.batches_emitted,
                    batch.source.dims(),
                    batch.dialogue_length
                );

                return Ok(Some(batch));
            }
            self.active = None;

            match self.next_group()? {
                Some(group) => self.active = Some(group),
                None => {
                    self.finish();
                    return Ok(None);
                }
            }
        }
    }

    /// Read records until a bucket releases a group.
    fn next_group(&mut self) -> UMResult<Option<DialogueGroup<T>>> {
        loop {
            let Some((position, record)) = self.records.as_mut().and_then(Iterator::next) else {
                return Ok(None);
            };
            let record = record?;
            let dialogue_index = self.record_offset + position;
            self.stats.records_read += 1;

            let utterances = self.segmenter.segment(&record, &*self.vocab);
            let examples = self.mode.to_examples(utterances);

            let Some(cursor) = self.windower.cursor(dialogue_index, examples) else {
                self.stats.malformed_dialogues += 1;
                log::debug!("record {dialogue_index}: no usable turns; skipped");
                continue;
            };
            self.stats.dialogues_windowed += 1;

            if let Some(cursors) = self.batcher.push(cursor.length_key(), cursor) {
                return Ok(Some(DialogueGroup::new(cursors)));
            }
        }
    }

    fn finish(&mut self) {
        let dropped = self.batcher.clear();
        if dropped > 0 {
            log::debug!("dropping {dropped} dialogues left in partial buckets");
        }
        self.stats.dialogues_dropped += dropped;
        self.records = None;
        self.state = IteratorState::Exhausted;

        log::info!("pass exhausted: {:?}", self.stats);
    }
}

impl<T, V, S, M> Iterator for DialogueIterator<T, V, S, M>
where
    T: TokenType,
    V: VocabLookup<T>,
    S: RecordSource,
    M: DialogueMode<T>,
{
    type Item = UMResult<Batch<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dialogue::LengthNormalizer, vocab::VocabTable};

    type T = i32;

    const RECORDS: &[&str] = &[
        "a b b a eou c a b  eou a c c c eou a b c a",
        "a b eou f a eou b eou c eou a",
        "a c eou b f a f eou c a a a",
        "a eou b ",
    ];

    fn vocab() -> Arc<VocabTable<T>> {
        Arc::new(VocabTable::from_tokens(["a", "b", "c", "sos", "eos", "eou"]).unwrap())
    }

    fn options() -> TrainOptions {
        TrainOptions::default()
            .with_max_lens(3, 2)
            .with_batching(
                BatchingOptions::default()
                    .with_batch_size(2)
                    .with_num_buckets(2)
                    .with_dialogue_max_len(4)
                    .with_random_seed(Some(53)),
            )
    }

    fn train_iterator(
        records: Vec<&'static str>
    ) -> TrainIterator<T, VocabTable<T>, Vec<&'static str>> {
        TrainIterator::new(vocab(), records, options()).unwrap()
    }

    /// Infinite source cycling over a fixed list.
    struct Cycle(Vec<&'static str>);

    impl RecordSource for Cycle {
        fn open(&self) -> UMResult<RecordStream> {
            let records: Vec<String> = self.0.iter().map(|r| r.to_string()).collect();
            Ok(Box::new(records.into_iter().cycle().map(Ok)))
        }
    }

    #[test]
    fn test_uninitialized() {
        let mut iterator = train_iterator(RECORDS.to_vec());
        assert_eq!(iterator.state(), IteratorState::Uninitialized);
        assert!(matches!(iterator.next_batch(), Err(UttermillError::Uninitialized)));
    }

    #[test]
    fn test_exhaustion_is_terminal_until_reinitialized() {
        let mut iterator = train_iterator(RECORDS.to_vec());
        iterator.initialize(None).unwrap();
        assert_eq!(iterator.state(), IteratorState::Ready);

        let first: Vec<_> = iterator.by_ref().map(Result::unwrap).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(iterator.state(), IteratorState::Exhausted);
        assert!(iterator.next_batch().unwrap().is_none());
        assert!(iterator.next_batch().unwrap().is_none());

        iterator.initialize(None).unwrap();
        let second: Vec<_> = iterator.by_ref().map(Result::unwrap).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partial_tail_dropped() {
        let mut iterator = train_iterator(RECORDS[..3].to_vec());
        iterator.initialize(None).unwrap();

        let batches: Vec<_> = iterator.by_ref().map(Result::unwrap).collect();
        assert_eq!(batches.len(), 1);
        assert!(batches.iter().all(|b| b.batch_size() == 2));
        assert_eq!(iterator.stats().dialogues_dropped, 1);
    }

    #[test]
    fn test_skip_count() {
        let mut iterator = train_iterator(RECORDS.to_vec());
        iterator.initialize(Some(2)).unwrap();

        let batch = iterator.next_batch().unwrap().unwrap();
        let indices: Vec<_> = batch.slots.iter().map(|s| s.unwrap().dialogue_index).collect();
        assert_eq!(indices, vec![2, 3]);
        assert_eq!(iterator.stats().records_skipped, 2);
        assert!(iterator.next_batch().unwrap().is_none());

        let options = options().with_batching(options().batching.with_skip_count(Some(2)));
        let mut iterator = TrainIterator::new(vocab(), RECORDS.to_vec(), options).unwrap();
        iterator.initialize(None).unwrap();
        assert_eq!(iterator.by_ref().count(), 1);

        // Skipping past the end is not an error.
        let mut iterator = train_iterator(RECORDS.to_vec());
        iterator.initialize(Some(10)).unwrap();
        assert!(iterator.next_batch().unwrap().is_none());
    }

    #[test]
    fn test_malformed_records_skipped() {
        let mut iterator = train_iterator(vec!["", "a", "eou", "a eou b", "c", "b eou a"]);
        iterator.initialize(None).unwrap();

        let batch = iterator.next_batch().unwrap().unwrap();
        let indices: Vec<_> = batch.slots.iter().map(|s| s.unwrap().dialogue_index).collect();
        assert_eq!(indices, vec![3, 5]);
        assert!(iterator.next_batch().unwrap().is_none());
        assert_eq!(iterator.stats().malformed_dialogues, 4);
        assert_eq!(iterator.stats().records_read, 6);
    }

    #[test]
    fn test_missing_special_token() {
        let vocab = Arc::new(VocabTable::<T>::from_tokens(["a", "b", "eos", "eou"]).unwrap());
        let result = TrainIterator::new(vocab, RECORDS.to_vec(), options());
        assert!(matches!(
            result,
            Err(UttermillError::MissingSpecialToken { role: "sos", .. })
        ));
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let options = options().with_max_lens(0, 2);
        let result = TrainIterator::new(vocab(), RECORDS.to_vec(), options);
        assert!(matches!(result, Err(UttermillError::InvalidOption { .. })));
    }

    #[test]
    fn test_with_mode_rejects_zero_caps() {
        let specials =
            SpecialTokens::resolve_training(&*vocab(), "sos", "eos", "eou").unwrap();
        let mode = TrainMode::new(LengthNormalizer::for_training(0, 0, false, 3, 4));

        let result = TrainIterator::with_mode(
            vocab(),
            RECORDS.to_vec(),
            mode,
            specials,
            options().batching,
        );
        assert!(matches!(
            result,
            Err(UttermillError::InvalidOption {
                name: "src_max_len",
                ..
            })
        ));

        let mode = InferMode::new(LengthNormalizer::for_inference(0, false));
        let result = InferIterator::with_mode(
            vocab(),
            RECORDS.to_vec(),
            mode,
            specials,
            options().batching,
        );
        assert!(matches!(
            result,
            Err(UttermillError::InvalidOption {
                name: "utt_max_len",
                ..
            })
        ));
    }

    #[test]
    fn test_infinite_source() {
        let mut iterator =
            TrainIterator::new(vocab(), Cycle(RECORDS.to_vec()), options()).unwrap();
        iterator.initialize(None).unwrap();

        for _ in 0..25 {
            let batch = iterator.next_batch().unwrap().unwrap();
            assert_eq!(batch.batch_size(), 2);
        }
        assert_eq!(iterator.state(), IteratorState::Ready);
    }

    #[test]
    fn test_reinitialize_discards_partial_buckets() {
        let mut iterator = train_iterator(RECORDS.to_vec());
        iterator.initialize(None).unwrap();
        iterator.next_batch().unwrap().unwrap();

        // Restart mid-pass, skipping the records already batched.
        iterator.initialize(Some(2)).unwrap();
        assert_eq!(iterator.stats().batches_emitted, 0);
        let batch = iterator.next_batch().unwrap().unwrap();
        assert_eq!(batch.slots[0].unwrap().dialogue_index, 2);
    }

    #[test]
    fn test_shared_vocab() {
        let vocab = vocab();
        let mut train =
            TrainIterator::new(vocab.clone(), RECORDS.to_vec(), options()).unwrap();
        let mut infer = InferIterator::new(
            vocab.clone(),
            RECORDS.to_vec(),
            InferOptions::default().with_batching(options().batching),
        )
        .unwrap();

        train.initialize(None).unwrap();
        infer.initialize(None).unwrap();
        assert!(train.next_batch().unwrap().unwrap().has_targets());
        assert!(!infer.next_batch().unwrap().unwrap().has_targets());
        assert_eq!(Arc::strong_count(&vocab), 3);
    }
}
