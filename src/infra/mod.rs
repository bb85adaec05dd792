// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by several layers:
//
//   checkpoint.rs  — model weights via Burn's CompactRecorder,
//                    plus the training config JSON so inference
//                    can rebuild the exact architecture
//
//   vocab_store.rs — both vocabularies and the modal lengths as
//                    one JSON document, so training and
//                    inference share the same token-to-index
//                    contract
//
//   metrics.rs     — per-epoch training metrics appended to a
//                    CSV file for later analysis
//
// Reference: Burn Book §5 (Checkpointing)
//            Rust Book §9 (Error Handling with anyhow)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary and padding-length persistence
pub mod vocab_store;

/// Training metrics CSV logger
pub mod metrics;
