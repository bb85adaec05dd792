// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads (review, summary) pairs from a CSV file using the
// `csv` crate with serde row deserialisation.
//
// The expected format is the Amazon fine-food reviews export:
// a header row containing at least `Text` and `Summary`
// columns; any other columns are ignored.
//
// Hygiene applied while loading:
//   - rows with an empty text or summary are dropped
//   - duplicate review texts are dropped (first one wins)
//   - reading stops after `max_rows` rows
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::review::Review;
use crate::domain::traits::ReviewSource;

/// One CSV row, addressed by header name.
/// Extra columns in the file are ignored by serde.
#[derive(Debug, Deserialize)]
struct ReviewRow {
    #[serde(rename = "Text")]
    text: String,

    #[serde(rename = "Summary")]
    summary: String,
}

/// Loads review pairs from a single CSV file.
/// Implements the ReviewSource trait from Layer 3.
pub struct CsvReviewLoader {
    path:     PathBuf,
    max_rows: usize,
}

impl CsvReviewLoader {
    pub fn new(path: impl AsRef<Path>, max_rows: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_rows,
        }
    }
}

impl ReviewSource for CsvReviewLoader {
    fn load_all(&self) -> Result<Vec<Review>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Cannot open corpus '{}'", self.path.display()))?;

        let mut reviews    = Vec::new();
        let mut seen_texts = HashSet::new();
        let mut skipped    = 0usize;

        for (row_idx, row) in reader.deserialize::<ReviewRow>().enumerate() {
            if row_idx >= self.max_rows {
                break;
            }

            // Log malformed rows but keep going — one bad row
            // should not abort a 100k-row corpus load.
            let row = match row {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Skipping row {}: {}", row_idx + 1, e);
                    skipped += 1;
                    continue;
                }
            };

            let text    = row.text.trim();
            let summary = row.summary.trim();

            // Drop rows with nothing to learn from
            if text.is_empty() || summary.is_empty() {
                skipped += 1;
                continue;
            }

            // Deduplicate by review text, keeping the first occurrence
            if !seen_texts.insert(text.to_string()) {
                skipped += 1;
                continue;
            }

            reviews.push(Review::new(text, summary));
        }

        tracing::info!(
            "Loaded {} review pairs from '{}' ({} rows skipped)",
            reviews.len(),
            self.path.display(),
            skipped,
        );
        Ok(reviews)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_corpus(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_rows_by_header_name() {
        let file = write_corpus(
            "Id,Summary,Text\n1,Great taffy,This taffy was great\n2,Nice,Pretty good stuff\n",
        );
        let loader  = CsvReviewLoader::new(file.path(), 100);
        let reviews = loader.load_all().unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].summary, "Great taffy");
        assert_eq!(reviews[0].text, "This taffy was great");
    }

    #[test]
    fn test_drops_duplicates_and_empties() {
        let file = write_corpus(
            "Summary,Text\nfirst,same review\nsecond,same review\n,no summary here\n",
        );
        let loader  = CsvReviewLoader::new(file.path(), 100);
        let reviews = loader.load_all().unwrap();
        // Duplicate text and empty summary are both dropped
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].summary, "first");
    }

    #[test]
    fn test_respects_row_cap() {
        let file = write_corpus(
            "Summary,Text\na,one\nb,two\nc,three\n",
        );
        let loader  = CsvReviewLoader::new(file.path(), 2);
        let reviews = loader.load_all().unwrap();
        assert_eq!(reviews.len(), 2);
    }
}
