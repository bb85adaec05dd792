// ============================================================
// Layer 4 — Summary Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// SummarySamples into tensor batches for the forward pass.
//
// All sequences are already padded to a fixed length per
// field, so batching is a flatten-then-reshape:
//
//   [s1_t1, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::SummarySample;

// ─── SummaryBatch ─────────────────────────────────────────────────────────────
/// A batch of teacher-forced samples ready for the model.
/// All tensors have batch_size as their first dimension.
#[derive(Debug, Clone)]
pub struct SummaryBatch<B: Backend> {
    /// Encoder input sequences — shape: [batch_size, max_in_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// Decoder input sequences — shape: [batch_size, max_tr_len - 1]
    pub decoder_input_ids: Tensor<B, 2, Int>,

    /// True next-token labels — shape: [batch_size, max_tr_len - 1]
    pub label_ids: Tensor<B, 2, Int>,
}

// ─── SummaryBatcher ───────────────────────────────────────────────────────────
/// Holds the target device so tensors land on the right
/// backend; generic over B so the same batcher serves the
/// autodiff training backend and the plain validation backend.
#[derive(Clone, Debug)]
pub struct SummaryBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SummaryBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<SummarySample, SummaryBatch<B>> for SummaryBatcher<B> {
    fn batch(&self, items: Vec<SummarySample>) -> SummaryBatch<B> {
        let batch_size = items.len();
        // All samples are pre-padded to identical lengths
        let in_len = items[0].input_ids.len();
        let tr_len = items[0].decoder_input_ids.len();

        let stack = |select: fn(&SummarySample) -> &Vec<u32>, len: usize| {
            let flat: Vec<i32> = items
                .iter()
                .flat_map(|s| select(s).iter().map(|&x| x as i32))
                .collect();
            Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
                .reshape([batch_size, len])
        };

        SummaryBatch {
            input_ids:         stack(|s| &s.input_ids, in_len),
            decoder_input_ids: stack(|s| &s.decoder_input_ids, tr_len),
            label_ids:         stack(|s| &s.label_ids, tr_len),
        }
    }
}
