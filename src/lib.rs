pub mod align;
pub mod corpus;
pub mod embeddings;
pub mod error;
pub mod vectorize;

// TODO: table loading could shard the .vec file across readers, but the
//       cap keeps a strict prefix of the file, which makes the cutoff
//       order-sensitive. Sequential loading stays the default until that
//       is worked out.

pub use align::{alignment_score, sentence_score, AlignmentResult, EMPTY_SENTENCE_FALLBACK};
pub use corpus::{score_corpus, score_corpus_blocking, SentencePair};
pub use embeddings::EmbeddingTable;
pub use error::ScoreError;
pub use vectorize::sentence_vectors;
