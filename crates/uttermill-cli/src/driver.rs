use std::{io::Write, sync::Arc};

use serde::Serialize;
use uttermill::{
    Batch,
    DialogueIterator,
    LineFileSource,
    VocabTable,
    batching::SlotInfo,
    dialogue::DialogueMode,
    iterators::IteratorStats,
    vocab::load_vocab_path,
};

use crate::input_output::OutputArgs;

/// Token id type used by the command line tools.
pub type T = i32;

/// Corpus, vocabulary, and pass control args shared by every command.
#[derive(clap::Args, Debug)]
pub struct CorpusArgs {
    /// Corpus file; one dialogue per line.
    corpus: String,

    /// Vocabulary file; one token per line, ids assigned by line order.
    #[arg(long)]
    vocab: String,

    /// JSON options file; missing fields take their defaults.
    #[arg(long, default_value = None)]
    pub config: Option<String>,

    /// Records to skip; overrides the configured skip count.
    #[arg(long, default_value = None)]
    skip: Option<usize>,

    /// Shuffle seed; overrides the configured seed.
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    /// Stop after this many batches.
    #[arg(long, default_value = None)]
    max_batches: Option<usize>,

    /// Print full tensors, not just shapes and lengths.
    #[arg(long)]
    dump: bool,

    #[command(flatten)]
    output: OutputArgs,
}

impl CorpusArgs {
    /// Load the vocabulary.
    pub fn load_vocab(&self) -> Result<Arc<VocabTable<T>>, Box<dyn std::error::Error>> {
        let vocab = load_vocab_path(&self.vocab)?;
        log::info!("vocab: {} ({} tokens)", self.vocab, vocab.len());
        Ok(Arc::new(vocab))
    }

    /// The corpus as a record source.
    pub fn source(&self) -> LineFileSource {
        log::info!("corpus: {}", self.corpus);
        LineFileSource::new(&self.corpus)
    }

    /// Run one pass of `iterator`, writing a JSON line per batch and a final stats line.
    pub fn drive<M>(
        &self,
        iterator: &mut DialogueIterator<T, VocabTable<T>, LineFileSource, M>,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        M: DialogueMode<T>,
    {
        match self.seed {
            Some(seed) => iterator.initialize_with_seed(Some(seed), self.skip)?,
            None => iterator.initialize(self.skip)?,
        }

        let mut writer = self.output.open_writer()?;
        let limit = self.max_batches.unwrap_or(usize::MAX);

        let mut count = 0;
        while count < limit
            && let Some(batch) = iterator.next_batch()?
        {
            let report = BatchReport::new(count, &batch, self.dump);
            serde_json::to_writer(&mut writer, &report)?;
            writeln!(writer)?;
            count += 1;
        }

        serde_json::to_writer(&mut writer, &StatsReport {
            stats: iterator.stats(),
        })?;
        writeln!(writer)?;
        writer.flush()?;

        log::info!("wrote {count} batches");
        Ok(())
    }
}

#[derive(Serialize)]
struct StatsReport<'a> {
    stats: &'a IteratorStats,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    batch: usize,
    dims: [usize; 3],
    dialogue_length: &'a [usize],
    source_sequence_length: &'a [usize],
    #[serde(skip_serializing_if = "Option::is_none")]
    target_sequence_length: Option<&'a [usize]>,
    slots: &'a [Option<SlotInfo>],
    #[serde(skip_serializing_if = "Option::is_none")]
    tensors: Option<TensorDump>,
}

#[derive(Serialize)]
struct TensorDump {
    source: Vec<Vec<Vec<T>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_input: Option<Vec<Vec<Vec<T>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_output: Option<Vec<Vec<Vec<T>>>>,
}

impl<'a> BatchReport<'a> {
    fn new(
        index: usize,
        batch: &'a Batch<T>,
        dump: bool,
    ) -> Self {
        let tensors = dump.then(|| TensorDump {
            source: batch.source.to_nested(),
            target_input: batch.target_input.as_ref().map(|t| t.to_nested()),
            target_output: batch.target_output.as_ref().map(|t| t.to_nested()),
        });

        Self {
            batch: index,
            dims: batch.source.dims(),
            dialogue_length: &batch.dialogue_length,
            source_sequence_length: &batch.source_sequence_length,
            target_sequence_length: batch.target_sequence_length.as_deref(),
            slots: &batch.slots,
            tensors,
        }
    }
}
