use crate::config::RankerConfig;
use crate::error::{RankError, Result};
use crate::similarity::cosine_similarity;
use crate::vectorizer::{TermId, TermSpace, Vectorizer};
use serde::Serialize;

/// Similarity of one candidate to the query, keyed by its input position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub index: usize,
    pub score: f32,
}

/// Result of one ranking call: per-candidate scores in input order and the
/// term space they were computed in. Corpus index 0 is the query.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub scores: Vec<Score>,
    pub space: TermSpace,
}

impl Ranking {
    pub fn values(&self) -> Vec<f32> {
        self.scores.iter().map(|s| s.score).collect()
    }

    /// Terms the candidate shares with the query, strongest contribution first.
    pub fn matched_terms(&self, candidate: usize) -> Vec<&str> {
        let (Some(query), Some(doc)) = (self.space.vector(0), self.space.vector(candidate + 1)) else {
            return Vec::new();
        };
        let mut shared: Vec<(TermId, f32)> = query
            .entries()
            .iter()
            .filter_map(|(t, qw)| {
                let cw = doc.weight(*t);
                (cw > 0.0).then_some((*t, qw * cw))
            })
            .collect();
        shared.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        shared.into_iter().filter_map(|(t, _)| self.space.term(t)).collect()
    }
}

/// Scores candidates against a query in a TF-IDF space built fresh per call.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    vectorizer: Vectorizer,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { vectorizer: Vectorizer::new(config) })
    }

    pub fn config(&self) -> &RankerConfig { self.vectorizer.config() }

    /// One score per candidate, in candidate order. Sorting is left to the caller.
    pub fn rank<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<f32> {
        self.score(query, candidates).values()
    }

    pub fn score<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Ranking {
        let mut corpus: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
        corpus.push(query);
        corpus.extend(candidates.iter().map(|c| c.as_ref()));

        let space = self.vectorizer.fit_transform(&corpus);
        let scores = match space.vectors().split_first() {
            Some((query_vector, docs)) => docs
                .iter()
                .enumerate()
                .map(|(index, v)| Score { index, score: cosine_similarity(query_vector, v) })
                .collect(),
            None => Vec::new(),
        };
        tracing::debug!(candidates = candidates.len(), vocabulary = space.vocabulary().len(), "ranked candidates");
        Ranking { scores, space }
    }

    /// Like [`Ranker::rank`] for undecoded documents. Non-UTF-8 input is rejected.
    pub fn rank_bytes<B: AsRef<[u8]>>(&self, query: &[u8], candidates: &[B]) -> Result<Vec<f32>> {
        let query = decode(query, "query")?;
        let docs = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| decode(c.as_ref(), &format!("candidate {i}")))
            .collect::<Result<Vec<&str>>>()?;
        Ok(self.rank(query, &docs))
    }
}

fn decode<'a>(bytes: &'a [u8], what: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| RankError::InvalidInput(format!("{what} is not valid UTF-8: {e}")))
}

/// Rank with the default configuration.
pub fn rank<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<f32> {
    Ranker::default().rank(query, candidates)
}
