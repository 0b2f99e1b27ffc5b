use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// Malformed embedding line: bad numeric field, a word with no vector
    /// after it, or a file too short to contain any data rows.
    #[error("bad embedding data at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The same word appeared twice in one embedding file. The file is
    /// corrupt and no partial table is returned.
    #[error("word {word:?} appears twice in the embedding file (line {line})")]
    DuplicateWord { word: String, line: usize },

    #[error("vector for {word:?} has {actual} components, expected {expected}")]
    DimensionMismatch {
        word: String,
        expected: usize,
        actual: usize,
    },

    #[error("parallel corpora differ in length: {src_lines} source lines, {tgt_lines} target lines")]
    CorpusLength { src_lines: usize, tgt_lines: usize },

    #[error("failed to read embedding data: {0}")]
    Io(#[from] std::io::Error),
}
