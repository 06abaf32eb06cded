use log::LevelFilter;
use uttermill::{TrainIterator, TrainOptions};

use crate::{LogArgs, driver::CorpusArgs};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl TrainArgs {
    /// Run the train command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(LevelFilter::Info)?;

        let options = match &self.corpus.config {
            Some(path) => TrainOptions::load_json_path(path)?,
            None => TrainOptions::default(),
        };
        log::debug!("options: {options:?}");

        let mut iterator =
            TrainIterator::new(self.corpus.load_vocab()?, self.corpus.source(), options)?;
        self.corpus.drive(&mut iterator)
    }
}
