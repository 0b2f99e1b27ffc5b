use ndarray::ArrayView1;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::embeddings::EmbeddingTable;

// Characters deleted from every token before lookup. Everything else
// (apostrophes, digits, non-ascii letters) passes through untouched.
static STRIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[",.:!?()]"#).expect("strip pattern is valid"));

/// Turns one corpus line into the ordered sequence of embedding vectors
/// for its in-vocabulary subwords. Tokens split on single spaces, are
/// lowercased and stripped of punctuation, and hyphenated tokens break
/// into independently looked-up subwords. Anything the table does not
/// know is dropped without a trace, so the result may be empty.
pub fn sentence_vectors<'t>(line: &str, table: &'t EmbeddingTable) -> Vec<ArrayView1<'t, f64>> {
    let mut vectors = Vec::new();
    for token in line.trim().split(' ') {
        let lowered = token.to_lowercase();
        let token = STRIP_PATTERN.replace_all(&lowered, "");
        // A token with no hyphen is its own single subword; "a-" yields
        // an empty second subword that fails lookup like any OOV.
        for subword in token.split('-') {
            if let Some(vector) = table.lookup(subword) {
                vectors.push(vector);
            }
        }
    }
    vectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixture_table() -> EmbeddingTable {
        let text = "5 2\n\
            hello 1.0 0.0\n\
            world 0.0 1.0\n\
            wide 0.5 0.5\n\
            cat 0.25 0.75\n\
            dog 0.75 0.25\n";
        EmbeddingTable::load(Cursor::new(text.as_bytes()), 50).unwrap()
    }

    #[test]
    fn test_punctuation_stripped_and_hyphens_split() {
        let table = fixture_table();
        let vectors = sentence_vectors("Hello, world-wide!", &table);
        // comma and bang are deleted, "world-wide" looks up both halves
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0], table.lookup("hello").unwrap());
        assert_eq!(vectors[1], table.lookup("world").unwrap());
        assert_eq!(vectors[2], table.lookup("wide").unwrap());
    }

    #[test]
    fn test_all_oov_yields_empty() {
        let table = fixture_table();
        let vectors = sentence_vectors("completely unknown words", &table);
        assert!(vectors.is_empty());
    }

    #[test]
    fn test_empty_and_blank_lines_yield_empty() {
        let table = fixture_table();
        assert!(sentence_vectors("", &table).is_empty());
        assert!(sentence_vectors("   ", &table).is_empty());
    }

    #[test]
    fn test_order_follows_the_sentence() {
        let table = fixture_table();
        let vectors = sentence_vectors("dog cat", &table);
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0], table.lookup("dog").unwrap());
        assert_eq!(vectors[1], table.lookup("cat").unwrap());
    }

    #[test]
    fn test_uppercase_input_is_folded() {
        let table = fixture_table();
        let vectors = sentence_vectors("HELLO World", &table);
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_consecutive_spaces_add_nothing() {
        let table = fixture_table();
        let vectors = sentence_vectors("hello  world", &table);
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_punctuation_only_tokens_vanish() {
        let table = fixture_table();
        let vectors = sentence_vectors("hello ?! ( ) world", &table);
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_bare_hyphen_contributes_nothing() {
        let table = fixture_table();
        let vectors = sentence_vectors("hello - world", &table);
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_trailing_hyphen_keeps_the_known_half() {
        let table = fixture_table();
        let vectors = sentence_vectors("wide-", &table);
        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0], table.lookup("wide").unwrap());
    }

    #[test]
    fn test_colon_and_quotes_are_stripped() {
        let table = fixture_table();
        let vectors = sentence_vectors("\"hello\": (world)", &table);
        assert_eq!(vectors.len(), 2);
    }
}
