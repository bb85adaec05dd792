// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly except the data
// pipeline's Dataset/Batcher impls.
//
// What's in this layer:
//
//   model.rs      — The seq2seq architecture:
//                   • source/target token embeddings
//                   • three stacked encoder LSTMs
//                   • one decoder LSTM seeded from the
//                     encoder's final (cell, hidden) state
//                   • bilinear attention over encoder outputs
//                   • concat + dense projection to the target
//                     vocabulary
//                   One parameter set, two call shapes:
//                   forward_train (all steps in parallel) and
//                   forward_step (one step, explicit state).
//
//   trainer.rs    — Teacher-forced training loop: forward,
//                   cross-entropy, backward, Adam step,
//                   per-epoch validation and checkpointing
//
//   summarizer.rs — Greedy autoregressive inference: encode
//                   once, step the decoder feeding its own
//                   output back until eos or the step bound
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Bahdanau et al. (2015), Luong et al. (2015)

/// The encoder/attention-decoder architecture
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Greedy decoding inference engine
pub mod summarizer;
