// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits instead
// of concrete types, so implementations can be swapped without
// touching the code that uses them:
//   - CsvReviewLoader implements ReviewSource
//   - a future JsonLoader could also implement ReviewSource
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::review::Review;

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can load (review, summary) pairs.
///
/// Implementations:
///   - CsvReviewLoader → loads from a reviews CSV file
pub trait ReviewSource {
    /// Load all available review pairs from this source.
    fn load_all(&self) -> Result<Vec<Review>>;
}
