// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `summarize`, and
// all their configurable flags. clap's derive macros generate
// the help text, error messages, and type conversions.

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the summarization model on a reviews CSV
    Train(TrainArgs),

    /// Summarize one review using a trained checkpoint
    Summarize(SummarizeArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the reviews CSV (must have Text and Summary columns)
    #[arg(long, default_value = "data/Reviews.csv")]
    pub corpus_path: String,

    /// Directory to save checkpoints, config, and vocabularies
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Maximum number of CSV rows to read
    #[arg(long, default_value_t = 100_000)]
    pub max_rows: usize,

    /// Hidden width shared by every LSTM layer and the decoder
    #[arg(long, default_value_t = 500)]
    pub latent_dim: usize,

    /// Number of samples processed together in one forward pass
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Learning rate — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Proportion of samples kept for training (rest validates)
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus_path:    a.corpus_path,
            checkpoint_dir: a.checkpoint_dir,
            max_rows:       a.max_rows,
            latent_dim:     a.latent_dim,
            batch_size:     a.batch_size,
            epochs:         a.epochs,
            lr:             a.lr,
            train_fraction: a.train_fraction,
        }
    }
}

/// All arguments for the `summarize` command
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// The review text to summarize
    #[arg(long)]
    pub review: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
