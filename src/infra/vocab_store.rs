// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists both closed vocabularies and the modal padding
// lengths as a single JSON document next to the checkpoints.
//
// The summarizer MUST encode input with exactly the same
// token-to-index mapping training used — an off-by-one in the
// vocabulary silently scrambles every embedding lookup — so
// the bundle is written once at training time and reloaded
// verbatim at inference time.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::vocab::Vocabulary;

/// Everything the codec layer needs on both sides of the
/// train/infer boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabBundle {
    /// Source-side (review text) vocabulary
    pub source: Vocabulary,

    /// Target-side (summary) vocabulary, with sos/eos included
    pub target: Vocabulary,

    /// Modal review length — encoder input padding target
    pub max_in_len: usize,

    /// Modal framed-summary length — generation step bound
    pub max_tr_len: usize,
}

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    pub fn save(&self, bundle: &VocabBundle) -> Result<()> {
        let path = self.dir.join("vocab.json");
        let json = serde_json::to_string(bundle)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::info!(
            "Saved vocabularies: {} source tokens, {} target tokens",
            bundle.source.size(),
            bundle.target.size(),
        );
        Ok(())
    }

    pub fn load(&self) -> Result<VocabBundle> {
        let path = self.dir.join("vocab.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read vocabulary from '{}'. \
                     Make sure you have run 'train' before 'summarize'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::build_vocabulary;

    #[test]
    fn test_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();

        let corpus: Vec<Vec<String>> = vec![
            ["sos", "good", "movie", "eos"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        ];
        let (vocab, modal) = build_vocabulary(&corpus).unwrap();

        let bundle = VocabBundle {
            source:     vocab.clone(),
            target:     vocab,
            max_in_len: modal,
            max_tr_len: modal,
        };

        let store = VocabStore::new(dir.path().to_str().unwrap());
        store.save(&bundle).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.max_in_len, 4);
        assert_eq!(loaded.source.index("movie"), bundle.source.index("movie"));
        assert_eq!(loaded.target.token(0), "");
    }

    #[test]
    fn test_missing_file_mentions_training() {
        let dir   = tempfile::tempdir().unwrap();
        let store = VocabStore::new(dir.path().to_str().unwrap());
        let err   = store.load().unwrap_err();
        assert!(format!("{err:#}").contains("train"));
    }
}
