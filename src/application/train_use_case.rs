// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the reviews CSV        (Layer 4 - data)
//   Step 2: Clean both sides            (Layer 4 - data)
//   Step 3: Split train/validation      (Layer 4 - data)
//   Step 4: Build vocabularies + modal  (Layer 4 - data)
//           lengths from the train split
//   Step 5: Encode teacher-forced       (Layer 4 - data)
//           samples under the frozen vocabularies
//   Step 6: Persist vocab + config      (Layer 6 - infra)
//   Step 7: Run the training loop       (Layer 5 - ml)
//
// The vocabularies are built once here and passed by value
// into the codec and the stores — no global tokenizer state.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{build_samples, SummaryDataset},
    loader::CsvReviewLoader,
    preprocessor::Preprocessor,
    splitter::split_train_val,
    vocab::build_vocabulary,
};
use crate::domain::traits::ReviewSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    vocab_store::{VocabBundle, VocabStore},
};
use crate::ml::model::Seq2SeqConfig;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so it
// can be saved next to the checkpoints and reloaded to rebuild
// the same architecture at inference time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus_path:    String,
    pub checkpoint_dir: String,
    pub max_rows:       usize,
    pub latent_dim:     usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub train_fraction: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_path:    "data/Reviews.csv".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            max_rows:       100_000,
            latent_dim:     500,
            batch_size:     64,
            epochs:         10,
            lr:             1e-3,
            train_fraction: 0.8,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        tracing::info!("Loading reviews from '{}'", cfg.corpus_path);
        let loader  = CsvReviewLoader::new(&cfg.corpus_path, cfg.max_rows);
        let reviews = loader.load_all()?;
        ensure!(!reviews.is_empty(), "Corpus '{}' produced no usable review pairs", cfg.corpus_path);

        // ── Step 2: Clean both sides ──────────────────────────────────────────
        // Source reviews are stemmed; target summaries keep real
        // words and get sos/eos framing.
        let preprocessor = Preprocessor::new();
        let pairs: Vec<(Vec<String>, Vec<String>)> = reviews
            .iter()
            .map(|r| {
                (
                    preprocessor.clean_source(&r.text),
                    preprocessor.clean_target(&r.summary),
                )
            })
            .collect();

        // ── Step 3: Train/validation split ────────────────────────────────────
        let (train_pairs, val_pairs) = split_train_val(pairs, cfg.train_fraction);
        ensure!(!train_pairs.is_empty(), "Training split is empty");
        tracing::info!(
            "Split: {} train, {} validation",
            train_pairs.len(),
            val_pairs.len(),
        );

        // ── Step 4: Vocabularies + modal lengths from the train split ─────────
        let train_inputs:  Vec<Vec<String>> =
            train_pairs.iter().map(|(i, _)| i.clone()).collect();
        let train_targets: Vec<Vec<String>> =
            train_pairs.iter().map(|(_, t)| t.clone()).collect();

        let (src_vocab, max_in_len) = build_vocabulary(&train_inputs)?;
        let (tgt_vocab, max_tr_len) = build_vocabulary(&train_targets)?;

        ensure!(max_in_len >= 1, "Modal review length is zero — cleaning removed everything");
        ensure!(max_tr_len >= 2, "Modal summary length must cover at least sos and eos");

        tracing::info!(
            "Vocabularies: {} source / {} target tokens; modal lengths {} / {}",
            src_vocab.size(),
            tgt_vocab.size(),
            max_in_len,
            max_tr_len,
        );

        // ── Step 5: Encode teacher-forced samples ─────────────────────────────
        let train_samples =
            build_samples(&train_pairs, &src_vocab, &tgt_vocab, max_in_len, max_tr_len);
        let val_samples =
            build_samples(&val_pairs, &src_vocab, &tgt_vocab, max_in_len, max_tr_len);

        let train_dataset = SummaryDataset::new(train_samples);
        let val_dataset   = SummaryDataset::new(val_samples);
        tracing::info!("Built {} training samples", train_dataset.sample_count());

        // ── Step 6: Persist the shared contracts ──────────────────────────────
        let model_cfg = Seq2SeqConfig::new(src_vocab.size(), tgt_vocab.size(), cfg.latent_dim);

        let vocab_store = VocabStore::new(&cfg.checkpoint_dir);
        vocab_store.save(&VocabBundle {
            source: src_vocab,
            target: tgt_vocab,
            max_in_len,
            max_tr_len,
        })?;

        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 7: Run the training loop (Layer 5) ───────────────────────────
        run_training(cfg, &model_cfg, train_dataset, val_dataset, ckpt_manager)?;

        Ok(())
    }
}
