// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Builds the closed token ↔ index mapping for one side of the
// model (source or target) from cleaned token sequences, plus
// the modal sequence length used as the padding target.
//
// Index contract (shared by training and inference):
//   - index 0 is the padding/unknown sentinel, never a token
//   - real tokens occupy the dense range [1, V]
//   - tokens are ordered by descending corpus frequency,
//     ties broken by first occurrence — deterministic for a
//     given input order
//
// The padding length is the MODAL (most frequent) sequence
// length, not the maximum: longer sequences get truncated and
// shorter ones padded. Ties break to the length seen first in
// corpus order. This is the stated padding policy, not a bug.
//
// Reference: Rust Book §8 (HashMaps)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable, closed token ↔ index mapping for one side.
/// Built once from the training split and frozen; both the
/// trainer and the summarizer hold references to the same
/// instance (or a deserialised copy of it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// token → index; indices start at 1
    index_of: HashMap<String, usize>,

    /// index → token; slot 0 holds the empty-string sentinel
    token_of: Vec<String>,
}

impl Vocabulary {
    /// Number of real tokens (the sentinel is not counted).
    /// Embedding tables and the output projection are sized
    /// `size() + 1` to cover index 0.
    pub fn size(&self) -> usize {
        self.token_of.len() - 1
    }

    /// Index of a token, or 0 for out-of-vocabulary tokens.
    pub fn index(&self, token: &str) -> usize {
        self.index_of.get(token).copied().unwrap_or(0)
    }

    /// Token at an index; index 0 and out-of-range indices map
    /// to the empty string.
    pub fn token(&self, index: usize) -> &str {
        self.token_of.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index_of.contains_key(token)
    }
}

/// Build a Vocabulary and the modal sequence length from a
/// collection of cleaned token sequences.
///
/// Fails on an empty collection — without sequences there is
/// no modal length, which is a configuration error (wrong
/// corpus path, over-aggressive cleaning, empty split).
pub fn build_vocabulary(sequences: &[Vec<String>]) -> Result<(Vocabulary, usize)> {
    if sequences.is_empty() {
        bail!("Cannot build a vocabulary from an empty corpus slice");
    }

    // ── Count token frequencies, remembering first-seen order ─────────────────
    let mut frequency:  HashMap<&str, usize> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for sequence in sequences {
        for token in sequence {
            *frequency.entry(token).or_insert(0) += 1;
            let order = first_seen.len();
            first_seen.entry(token).or_insert(order);
        }
    }

    // ── Assign dense indices: frequency desc, first-seen asc ──────────────────
    let mut ordered: Vec<&str> = frequency.keys().copied().collect();
    ordered.sort_by_key(|t| (std::cmp::Reverse(frequency[t]), first_seen[t]));

    let mut token_of = Vec::with_capacity(ordered.len() + 1);
    token_of.push(String::new()); // slot 0: padding/unknown sentinel

    let mut index_of = HashMap::with_capacity(ordered.len());
    for (i, token) in ordered.iter().enumerate() {
        index_of.insert(token.to_string(), i + 1);
        token_of.push(token.to_string());
    }

    let modal_len = modal_length(sequences);

    tracing::debug!(
        "Vocabulary built: {} tokens, modal length {}",
        index_of.len(),
        modal_len,
    );

    Ok((Vocabulary { index_of, token_of }, modal_len))
}

/// Most frequent sequence length; ties break to the length
/// encountered first in corpus order.
fn modal_length(sequences: &[Vec<String>]) -> usize {
    let mut count:      HashMap<usize, usize> = HashMap::new();
    let mut first_seen: HashMap<usize, usize> = HashMap::new();

    for (i, sequence) in sequences.iter().enumerate() {
        *count.entry(sequence.len()).or_insert(0) += 1;
        first_seen.entry(sequence.len()).or_insert(i);
    }

    count
        .keys()
        .copied()
        .min_by_key(|len| (std::cmp::Reverse(count[len]), first_seen[len]))
        .unwrap_or(0)
}
