// ============================================================
// Layer 2 — Application Layer (Use Cases)
// ============================================================
// Each use case orchestrates one end-to-end flow by wiring
// together the data, ml, and infra layers. The CLI layer
// delegates here; nothing below this layer knows about clap.
//
//   train_use_case.rs     — corpus → vocabularies → samples →
//                           training loop → checkpoints
//   summarize_use_case.rs — checkpoint + vocab → clean/encode
//                           one review → greedy summary

/// Full training pipeline orchestration
pub mod train_use_case;

/// One-shot summary generation from a trained checkpoint
pub mod summarize_use_case;
