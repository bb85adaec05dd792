// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Turns raw review text into the clean token streams the
// vocabulary builder and codec consume.
//
// Cleaning steps (applied in order):
//   1. Strip angle-bracket markup (reviews contain stray
//      <br /> tags and similar)
//   2. Lowercase and split into words
//   3. Keep purely alphabetic words of length >= 3
//   4. Expand common English contractions
//   5. Drop English stop words
//   6. Source side only: stem each word (Snowball English)
//
// Target summaries are additionally framed with the `sos` and
// `eos` boundary tokens so the decoder has an explicit start
// input and a learnable stop symbol.
//
// Reference: rust-stemmers crate documentation
//            Rust Book §8 (Strings), §13 (Iterators)

use rust_stemmers::{Algorithm, Stemmer};

/// Decoder start-of-sequence boundary token.
pub const SOS: &str = "sos";
/// Decoder end-of-sequence boundary token.
pub const EOS: &str = "eos";

// Contractions whose expansions survive the alphabetic filter.
// Keyed on the apostrophe-free spelling since apostrophes are
// gone by the time the table is consulted.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("aint",     "is not"),
    ("arent",    "are not"),
    ("cant",     "can not"),
    ("couldnt",  "could not"),
    ("didnt",    "did not"),
    ("doesnt",   "does not"),
    ("dont",     "do not"),
    ("gonna",    "going to"),
    ("gotta",    "got to"),
    ("hadnt",    "had not"),
    ("hasnt",    "has not"),
    ("havent",   "have not"),
    ("hes",      "he is"),
    ("isnt",     "is not"),
    ("its",      "it is"),
    ("ive",      "i have"),
    ("lets",     "let us"),
    ("shes",     "she is"),
    ("shouldnt", "should not"),
    ("thats",    "that is"),
    ("theres",   "there is"),
    ("theyre",   "they are"),
    ("wanna",    "want to"),
    ("wasnt",    "was not"),
    ("werent",   "were not"),
    ("weve",     "we have"),
    ("whats",    "what is"),
    ("wont",     "will not"),
    ("wouldnt",  "would not"),
    ("youll",    "you will"),
    ("youre",    "you are"),
    ("youve",    "you have"),
];

// Standard English stop-word list (NLTK's set, minus words
// shorter than 3 letters — those never pass the length filter).
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "and", "any",
    "are", "because", "been", "before", "being", "below", "between",
    "both", "but", "can", "did", "does", "doing", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "her", "here", "hers", "herself", "him", "himself", "his",
    "how", "into", "its", "itself", "just", "more", "most", "myself",
    "nor", "not", "now", "off", "once", "only", "other", "our", "ours",
    "ourselves", "out", "over", "own", "same", "she", "should", "some",
    "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those",
    "through", "too", "under", "until", "very", "was", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "you", "your", "yours", "yourself", "yourselves",
];

pub struct Preprocessor {
    stemmer: Stemmer,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Clean review text for the source (encoder) side.
    /// Stop words are removed and every word is stemmed.
    pub fn clean_source(&self, text: &str) -> Vec<String> {
        self.base_words(text)
            .into_iter()
            .filter(|w| !is_stop_word(w))
            .map(|w| self.stemmer.stem(&w).to_string())
            .collect()
    }

    /// Clean summary text for the target (decoder) side and
    /// frame it with the sos/eos boundary tokens.
    /// Stop words are removed but words are NOT stemmed —
    /// the generated summary must read as real words.
    pub fn clean_target(&self, text: &str) -> Vec<String> {
        let mut words = vec![SOS.to_string()];
        words.extend(
            self.base_words(text)
                .into_iter()
                .filter(|w| !is_stop_word(w)),
        );
        words.push(EOS.to_string());
        words
    }

    /// Shared first stage: markup strip, lowercase, word split,
    /// alphabetic/length filter, contraction expansion.
    fn base_words(&self, text: &str) -> Vec<String> {
        let stripped = strip_markup(text);

        let mut words = Vec::new();
        for raw in stripped.to_lowercase().split(|c: char| !c.is_alphabetic()) {
            if raw.len() < 3 {
                continue;
            }
            match lookup_contraction(raw) {
                Some(expansion) => words.extend(
                    expansion
                        .split_whitespace()
                        .filter(|w| w.len() >= 3)
                        .map(str::to_string),
                ),
                None => words.push(raw.to_string()),
            }
        }
        words
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove `<...>` markup spans. An unclosed `<` drops the rest
/// of the text, which matches how the tags appear in practice
/// (always well-formed `<br />`-style fragments).
fn strip_markup(text: &str) -> String {
    let mut out    = String::with_capacity(text.len());
    let mut in_tag = false;

    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // A tag acts as a word boundary
                out.push(' ');
            }
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

fn lookup_contraction(word: &str) -> Option<&'static str> {
    CONTRACTIONS
        .binary_search_by_key(&word, |&(k, _)| k)
        .ok()
        .map(|i| CONTRACTIONS[i].1)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_filters_short_words() {
        let p = Preprocessor::new();
        // "a" and "is" are too short, "GOOD" is lowercased
        let words = p.clean_target("It a GOOD thing");
        assert_eq!(words, vec!["sos", "good", "thing", "eos"]);
    }

    #[test]
    fn test_strips_markup() {
        let p = Preprocessor::new();
        let words = p.clean_target("good<br />movie");
        assert_eq!(words, vec!["sos", "good", "movie", "eos"]);
    }

    #[test]
    fn test_drops_non_alphabetic() {
        let p = Preprocessor::new();
        let words = p.clean_target("rated 10/10 wonderful!!!");
        assert_eq!(words, vec!["sos", "rated", "wonderful", "eos"]);
    }

    #[test]
    fn test_removes_stop_words() {
        let p = Preprocessor::new();
        let words = p.clean_target("this movie was wonderful");
        assert_eq!(words, vec!["sos", "movie", "wonderful", "eos"]);
    }

    #[test]
    fn test_expands_contractions() {
        let p = Preprocessor::new();
        // "dont" → "do not"; "do" is then dropped (too short)
        // and "not" is a stop word, so only real words remain
        let words = p.clean_target("dont buy product");
        assert_eq!(words, vec!["sos", "buy", "product", "eos"]);
    }

    #[test]
    fn test_source_side_is_stemmed() {
        let p = Preprocessor::new();
        let words = p.clean_source("absolutely delicious cookies");
        // Snowball English: "cookies" → "cooki", "delicious" → "delici"
        assert!(words.iter().any(|w| w.starts_with("cooki")));
        assert!(!words.contains(&"cookies".to_string()));
    }

    #[test]
    fn test_target_side_is_not_stemmed() {
        let p = Preprocessor::new();
        let words = p.clean_target("delicious cookies");
        assert_eq!(words, vec!["sos", "delicious", "cookies", "eos"]);
    }

    #[test]
    fn test_empty_input_still_framed() {
        let p = Preprocessor::new();
        assert_eq!(p.clean_target(""), vec!["sos", "eos"]);
        assert!(p.clean_source("").is_empty());
    }

    #[test]
    fn test_lookup_tables_are_sorted() {
        // binary_search requires sorted tables
        for pair in CONTRACTIONS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
        for pair in STOP_WORDS.windows(2) {
            assert!(pair[0] < pair[1], "{} >= {}", pair[0], pair[1]);
        }
    }
}
