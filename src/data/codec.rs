// ============================================================
// Layer 4 — Sequence Codec
// ============================================================
// Converts between token sequences and fixed-length integer
// index arrays under a Vocabulary's mapping. Both the trainer
// and the summarizer go through these two functions, so the
// token-to-index contract cannot drift between the two modes.
//
// encode: token → index (out-of-vocabulary → sentinel 0),
//         then right-pad with 0 / truncate to `len`
// decode: index → token (0 → empty string)
//
// Round-trip invariant: for sequences of in-vocabulary tokens
// with length <= `len`, decode(encode(x)) == x once trailing
// padding is dropped.

use crate::data::vocab::Vocabulary;

/// Index value used for padding and unknown tokens.
pub const PAD: u32 = 0;

/// Encode a token sequence to a fixed-length index array.
/// Out-of-vocabulary tokens map silently to the sentinel.
pub fn encode(tokens: &[String], vocab: &Vocabulary, len: usize) -> Vec<u32> {
    let mut ids: Vec<u32> = tokens
        .iter()
        .take(len)
        .map(|t| vocab.index(t) as u32)
        .collect();
    ids.resize(len, PAD);
    ids
}

/// Decode an index array back to tokens.
/// The sentinel (and any out-of-range index) becomes the empty
/// string so padded positions vanish on detokenisation.
pub fn decode(ids: &[u32], vocab: &Vocabulary) -> Vec<String> {
    ids.iter()
        .map(|&i| vocab.token(i as usize).to_string())
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::build_vocabulary;

    fn vocab() -> Vocabulary {
        let corpus: Vec<Vec<String>> = vec![
            ["sos", "good", "movie", "eos"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        ];
        build_vocabulary(&corpus).unwrap().0
    }

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_round_trip_with_trailing_padding_removed() {
        let v   = vocab();
        let seq = words(&["good", "movie"]);
        let ids = encode(&seq, &v, 5);
        assert_eq!(ids.len(), 5);

        let decoded: Vec<String> = decode(&ids, &v)
            .into_iter()
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(decoded, seq);
    }

    #[test]
    fn test_out_of_vocabulary_maps_to_sentinel() {
        let v   = vocab();
        let ids = encode(&words(&["good", "unseen", "movie"]), &v, 3);
        assert_eq!(ids[1], PAD);
        assert_ne!(ids[0], PAD);
        assert_ne!(ids[2], PAD);
    }

    #[test]
    fn test_truncates_on_the_right() {
        let v   = vocab();
        let ids = encode(&words(&["sos", "good", "movie", "eos"]), &v, 2);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], v.index("sos") as u32);
        assert_eq!(ids[1], v.index("good") as u32);
    }

    #[test]
    fn test_all_oov_input_encodes_to_zeros() {
        let v   = vocab();
        let ids = encode(&words(&["zzz", "qqq"]), &v, 4);
        assert_eq!(ids, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_input_encodes_to_all_padding() {
        let v   = vocab();
        let ids = encode(&[], &v, 3);
        assert_eq!(ids, vec![0, 0, 0]);

        let decoded = decode(&ids, &v);
        assert!(decoded.iter().all(String::is_empty));
    }
}
