use log::LevelFilter;
use uttermill::{InferIterator, InferOptions};

use crate::{LogArgs, driver::CorpusArgs};

/// Args for the infer command.
#[derive(clap::Args, Debug)]
pub struct InferArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl InferArgs {
    /// Run the infer command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(LevelFilter::Warn)?;

        let options = match &self.corpus.config {
            Some(path) => InferOptions::load_json_path(path)?,
            None => InferOptions::default(),
        };
        log::debug!("options: {options:?}");

        let mut iterator =
            InferIterator::new(self.corpus.load_vocab()?, self.corpus.source(), options)?;
        self.corpus.drive(&mut iterator)
    }
}
