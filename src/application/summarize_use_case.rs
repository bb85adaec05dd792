// ============================================================
// Layer 2 — Summarize Use Case
// ============================================================
// One review string in, one summary line out:
//   1. Load the persisted vocabulary bundle and checkpoint
//   2. Clean the review exactly like the training source side
//   3. Encode to a fixed-length padded index sequence
//   4. Run the greedy autoregressive decoder
//
// This is deliberately a pure request/response function — the
// interactive read-loop lives with whoever calls the CLI.

use anyhow::Result;

use crate::data::codec;
use crate::data::preprocessor::Preprocessor;
use crate::infra::{
    checkpoint::CheckpointManager,
    vocab_store::{VocabBundle, VocabStore},
};
use crate::ml::summarizer::Summarizer;

pub struct SummarizeUseCase {
    vocabs:       VocabBundle,
    preprocessor: Preprocessor,
    summarizer:   Summarizer,
}

impl SummarizeUseCase {
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let vocabs     = VocabStore::new(&checkpoint_dir).load()?;
        let ckpt       = CheckpointManager::new(&checkpoint_dir);
        let summarizer = Summarizer::from_checkpoint(&ckpt, &vocabs)?;
        Ok(Self {
            vocabs,
            preprocessor: Preprocessor::new(),
            summarizer,
        })
    }

    /// Clean, encode, and summarize one raw review.
    pub fn summarize(&self, review: &str) -> Result<String> {
        let words = self.preprocessor.clean_source(review);

        // Vacuous input still flows through (it encodes to an
        // all-padding sequence), but the caller deserves a hint
        if words.iter().all(|w| !self.vocabs.source.contains(w)) {
            tracing::warn!(
                "Review contains no in-vocabulary tokens — the summary will be empty or meaningless"
            );
        }

        let input_ids = codec::encode(&words, &self.vocabs.source, self.vocabs.max_in_len);
        self.summarizer.summarize(&input_ids)
    }
}
