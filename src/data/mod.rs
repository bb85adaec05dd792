// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw reviews CSV to GPU-ready tensor
// batches, flowing in this order:
//
//   Reviews.csv
//       │
//       ▼
//   CsvReviewLoader   → reads rows, drops empties and duplicates
//       │
//       ▼
//   Preprocessor      → cleans text, stems, frames targets with
//       │               sos/eos
//       ▼
//   Vocabulary        → token ↔ index maps + modal lengths
//       │
//       ▼
//   codec             → fixed-length padded index sequences
//       │
//       ▼
//   SummaryDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   SummaryBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads (review, summary) pairs from a CSV corpus
pub mod loader;

/// Cleans and tokenises raw review text
pub mod preprocessor;

/// Closed token ↔ index vocabularies and modal lengths
pub mod vocab;

/// Encode/decode between token sequences and padded index arrays
pub mod codec;

/// Implements Burn's Dataset trait for teacher-forced samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
