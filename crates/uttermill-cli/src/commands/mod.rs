use crate::commands::{infer::InferArgs, train::TrainArgs};

pub mod infer;
pub mod train;

/// Subcommands for uttermill.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Emit training batches (source, target input, target output).
    Train(TrainArgs),

    /// Emit inference batches (source only).
    Infer(InferArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Infer(cmd) => cmd.run(),
        }
    }
}
