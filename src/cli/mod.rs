// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`     — trains the model on a reviews CSV
//   2. `summarize` — loads a checkpoint and summarizes a review
//
// Reference: Rust Book §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, SummarizeArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive.
#[derive(Parser, Debug)]
#[command(
    name = "review-summarizer",
    version = "0.1.0",
    about = "Train an LSTM seq2seq summarizer on product reviews, then generate summaries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the right use
    /// case. The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)     => Self::run_train(args),
            Commands::Summarize(args) => Self::run_summarize(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on corpus: {}", args.corpus_path);

        // Convert CLI args → application config
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    fn run_summarize(args: SummarizeArgs) -> Result<()> {
        use crate::application::summarize_use_case::SummarizeUseCase;

        let use_case = SummarizeUseCase::new(args.checkpoint_dir.clone())?;
        let summary  = use_case.summarize(&args.review)?;

        println!("\nPredicted summary: {}", summary);
        Ok(())
    }
}
