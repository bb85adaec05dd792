// ============================================================
// Layer 3 — Review Domain Type
// ============================================================
// One corpus record: the full review text and the short
// human-written summary it should be compressed into.
// Plain data, no behaviour — by the time a Review exists the
// CSV parsing has already happened.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A raw (review, summary) pair from the corpus,
/// before any cleaning or tokenisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// The full free-form review text (model input side)
    pub text: String,

    /// The reference summary (model target side)
    pub summary: String,
}

impl Review {
    pub fn new(text: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            text:    text.into(),
            summary: summary.into(),
        }
    }
}
