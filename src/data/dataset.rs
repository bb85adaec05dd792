// ============================================================
// Layer 4 — Teacher-Forced Dataset
// ============================================================
// Builds the (input, decoder-input) → decoder-label triples the
// trainer consumes and wraps them in Burn's Dataset trait.
//
// Teacher forcing: the decoder is fed the TRUE previous target
// token at every step and must predict the next one. Given the
// padded target sequence t[0..max_tr_len]:
//
//   decoder input = t[0 .. max_tr_len-1]   (drop trailing)
//   decoder label = t[1 .. max_tr_len]     (drop leading)
//
// so label[i] predicts "token after decoder_input[i]". Both
// rows have length max_tr_len - 1; a raw target longer than
// max_tr_len is truncated by the codec BEFORE the shift, so
// the pair can never fall out of alignment.
//
// Reference: Burn Book §4 (Datasets)

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::codec;
use crate::data::vocab::Vocabulary;

/// One fully encoded and padded training sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySample {
    /// Encoder input, length max_in_len
    pub input_ids: Vec<u32>,

    /// Decoder input (target without its trailing position),
    /// length max_tr_len - 1
    pub decoder_input_ids: Vec<u32>,

    /// Decoder label (target without its leading position),
    /// length max_tr_len - 1
    pub label_ids: Vec<u32>,
}

/// Encode cleaned (input, target) token-sequence pairs into
/// teacher-forced samples under the two frozen vocabularies.
pub fn build_samples(
    pairs:      &[(Vec<String>, Vec<String>)],
    src_vocab:  &Vocabulary,
    tgt_vocab:  &Vocabulary,
    max_in_len: usize,
    max_tr_len: usize,
) -> Vec<SummarySample> {
    pairs
        .iter()
        .map(|(input, target)| {
            let input_ids = codec::encode(input, src_vocab, max_in_len);
            let target_ids = codec::encode(target, tgt_vocab, max_tr_len);

            // The shift drops one position from each end
            let decoder_input_ids = target_ids[..max_tr_len - 1].to_vec();
            let label_ids = target_ids[1..].to_vec();

            SummarySample {
                input_ids,
                decoder_input_ids,
                label_ids,
            }
        })
        .collect()
}

pub struct SummaryDataset {
    samples: Vec<SummarySample>,
}

impl SummaryDataset {
    pub fn new(samples: Vec<SummarySample>) -> Self {
        Self { samples }
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Dataset<SummarySample> for SummaryDataset {
    fn get(&self, index: usize) -> Option<SummarySample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::build_vocabulary;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|w| w.to_string()).collect()
    }

    fn vocabs() -> (Vocabulary, Vocabulary) {
        let src = build_vocabulary(&[words(&["good", "movie", "fun"])]).unwrap().0;
        let tgt = build_vocabulary(&[words(&["sos", "good", "movie", "eos"])])
            .unwrap()
            .0;
        (src, tgt)
    }

    #[test]
    fn test_label_is_decoder_input_shifted_left() {
        let (src, tgt) = vocabs();
        let pairs = vec![(words(&["good", "movie"]), words(&["sos", "good", "eos"]))];
        let samples = build_samples(&pairs, &src, &tgt, 4, 4);

        let s = &samples[0];
        assert_eq!(s.decoder_input_ids.len(), 3);
        assert_eq!(s.label_ids.len(), 3);
        // label[i] == decoder_input[i + 1] for every overlapping position
        for i in 0..s.decoder_input_ids.len() - 1 {
            assert_eq!(s.label_ids[i], s.decoder_input_ids[i + 1]);
        }
    }

    #[test]
    fn test_decoder_input_starts_with_sos_label_ends_with_padding() {
        let (src, tgt) = vocabs();
        let pairs = vec![(words(&["good"]), words(&["sos", "good", "eos"]))];
        let samples = build_samples(&pairs, &src, &tgt, 4, 5);

        let s = &samples[0];
        assert_eq!(s.decoder_input_ids[0], tgt.index("sos") as u32);
        // target padded to 5: [sos, good, eos, 0, 0] → label [good, eos, 0, 0]
        assert_eq!(*s.label_ids.last().unwrap(), 0);
    }

    #[test]
    fn test_overlong_target_truncates_consistently() {
        let (src, tgt) = vocabs();
        // Raw target length 4 > max_tr_len 3
        let pairs = vec![(
            words(&["good"]),
            words(&["sos", "good", "movie", "eos"]),
        )];
        let samples = build_samples(&pairs, &src, &tgt, 2, 3);

        let s = &samples[0];
        // Truncated target is [sos, good, movie]; shift stays aligned
        assert_eq!(s.decoder_input_ids.len(), 2);
        assert_eq!(s.label_ids.len(), 2);
        assert_eq!(s.decoder_input_ids[0], tgt.index("sos") as u32);
        assert_eq!(s.decoder_input_ids[1], tgt.index("good") as u32);
        assert_eq!(s.label_ids[0], tgt.index("good") as u32);
        assert_eq!(s.label_ids[1], tgt.index("movie") as u32);
    }

    #[test]
    fn test_input_padded_to_max_in_len() {
        let (src, tgt) = vocabs();
        let pairs = vec![(words(&["good"]), words(&["sos", "eos"]))];
        let samples = build_samples(&pairs, &src, &tgt, 6, 2);
        assert_eq!(samples[0].input_ids.len(), 6);
        assert_eq!(samples[0].input_ids[1..], [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_dataset_trait_access() {
        let (src, tgt) = vocabs();
        let pairs = vec![
            (words(&["good"]), words(&["sos", "eos"])),
            (words(&["movie"]), words(&["sos", "eos"])),
        ];
        let dataset = SummaryDataset::new(build_samples(&pairs, &src, &tgt, 3, 2));
        assert_eq!(dataset.len(), 2);
        assert!(dataset.get(1).is_some());
        assert!(dataset.get(2).is_none());
    }
}
