//! Resume screening core: normalize extracted text, build a TF-IDF space over
//! a job query and its candidates, and score candidates by cosine similarity.

pub mod config;
pub mod contact;
pub mod error;
#[cfg(feature = "pdf")]
pub mod extract;
pub mod job;
pub mod normalize;
pub mod ranker;
pub mod report;
pub mod similarity;
pub mod tokenizer;
pub mod vectorizer;

pub use config::{RankerConfig, TokenizerConfig};
pub use contact::CandidateDetails;
pub use error::{RankError, Result};
pub use job::JobCriteria;
pub use normalize::{normalize, normalize_bytes, NO_READABLE_TEXT};
pub use ranker::{rank, Ranker, Ranking, Score};
pub use report::{rank_order, Report, ReportRow};
pub use vectorizer::{TermId, TermSpace, TermVector, Vectorizer};
