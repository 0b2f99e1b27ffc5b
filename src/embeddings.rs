use std::collections::HashMap;
use std::io::BufRead;

use ndarray::{Array2, ArrayView1};

use crate::error::ScoreError;

const PROGRESS_INTERVAL: usize = 10_000;

/// A word-vector store loaded from the common pretrained text format:
/// one header line, then `word v1 v2 ... vd` per line. Immutable once
/// built; lookups hand out row views into the dense matrix.
#[derive(Debug)]
pub struct EmbeddingTable {
    vectors: Array2<f64>,
    word_to_index: HashMap<String, usize>,
    index_to_word: Vec<String>,
}

impl EmbeddingTable {
    /// Loads at most `cap` words, keeping a strict prefix of the file in
    /// its original order. The vector width is fixed by the first data
    /// row; rows that disagree are rejected when the matrix is assembled.
    pub fn load(mut reader: impl BufRead, cap: usize) -> Result<Self, ScoreError> {
        let mut buf = Vec::new();

        // The header carries count/dimension metadata we never need; the
        // width comes from the first data row instead.
        if read_line(&mut reader, &mut buf)?.is_none() {
            return Err(ScoreError::Parse {
                line: 1,
                reason: "empty embedding file".to_string(),
            });
        }

        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut word_to_index: HashMap<String, usize> = HashMap::new();
        let mut index_to_word: Vec<String> = Vec::new();
        let mut line_no = 1;

        while word_to_index.len() < cap {
            let Some(line) = read_line(&mut reader, &mut buf)? else {
                break;
            };
            line_no += 1;

            let Some((word, rest)) = line.split_once(' ') else {
                return Err(ScoreError::Parse {
                    line: line_no,
                    reason: format!("no vector after {:?}", line),
                });
            };

            let mut components = Vec::new();
            for field in rest.split_whitespace() {
                let value: f64 = field.parse().map_err(|_| ScoreError::Parse {
                    line: line_no,
                    reason: format!("bad numeric field {:?}", field),
                })?;
                components.push(value);
            }

            if word_to_index.contains_key(word) {
                return Err(ScoreError::DuplicateWord {
                    word: word.to_string(),
                    line: line_no,
                });
            }
            word_to_index.insert(word.to_string(), index_to_word.len());
            index_to_word.push(word.to_string());
            rows.push(components);

            if word_to_index.len() % PROGRESS_INTERVAL == 0 {
                tracing::debug!(words = word_to_index.len(), "loading embeddings");
            }
        }

        if rows.is_empty() {
            return Err(ScoreError::Parse {
                line: line_no,
                reason: "no vectors in embedding file".to_string(),
            });
        }

        // Stack the rows into one dense matrix. This is where a ragged
        // row surfaces, not during line parsing.
        let dim = rows[0].len();
        let mut flat = Vec::with_capacity(rows.len() * dim);
        for (row, word) in rows.iter().zip(&index_to_word) {
            if row.len() != dim {
                return Err(ScoreError::DimensionMismatch {
                    word: word.clone(),
                    expected: dim,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let vectors = Array2::from_shape_vec((rows.len(), dim), flat)
            .expect("rows form a rectangular matrix");

        tracing::info!(words = index_to_word.len(), dim, "embedding table loaded");

        Ok(EmbeddingTable {
            vectors,
            word_to_index,
            index_to_word,
        })
    }

    pub fn len(&self) -> usize {
        self.index_to_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_word.is_empty()
    }

    /// Width of every vector in the table.
    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    /// The common out-of-vocabulary path: absent words are `None`, never
    /// an error.
    pub fn lookup(&self, word: &str) -> Option<ArrayView1<'_, f64>> {
        self.word_to_index.get(word).map(|&i| self.vectors.row(i))
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.index_to_word.get(index).map(String::as_str)
    }
}

// Reads one raw line and decodes it lossily, for vector files that
// declare utf-8 but carry stray bytes.
fn read_line(
    reader: &mut impl BufRead,
    buf: &mut Vec<u8>,
) -> Result<Option<String>, std::io::Error> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).trim_end().to_string()))
}
