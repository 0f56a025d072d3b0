use crate::config::RankerConfig;
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type TermId = u32;

/// One document's TF-IDF weights, stored sparsely and sorted by term id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermVector {
    dim: usize,
    entries: Vec<(TermId, f32)>,
}

impl TermVector {
    pub fn new(dim: usize, mut entries: Vec<(TermId, f32)>) -> Self {
        entries.retain(|(_, w)| *w != 0.0);
        entries.sort_by_key(|(t, _)| *t);
        Self { dim, entries }
    }

    /// Vocabulary size; every vector in a space has the same one.
    pub fn dim(&self) -> usize { self.dim }

    /// Non-zero `(term, weight)` pairs in term order.
    pub fn entries(&self) -> &[(TermId, f32)] { &self.entries }

    pub fn weight(&self, term: TermId) -> f32 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn to_dense(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.dim];
        for (t, w) in &self.entries {
            out[*t as usize] = *w;
        }
        out
    }
}

/// The vector space built for one corpus. Nothing here is reused across calls.
#[derive(Debug, Clone, Serialize)]
pub struct TermSpace {
    vocabulary: Vec<String>,
    df: Vec<u32>,
    idf: Vec<f32>,
    vectors: Vec<TermVector>,
}

impl TermSpace {
    /// Terms in id order (lexicographic).
    pub fn vocabulary(&self) -> &[String] { &self.vocabulary }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.binary_search_by(|t| t.as_str().cmp(term)).ok().map(|i| i as TermId)
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.vocabulary.get(id as usize).map(String::as_str)
    }

    pub fn df(&self, id: TermId) -> u32 { self.df.get(id as usize).copied().unwrap_or(0) }

    pub fn idf(&self, id: TermId) -> f32 { self.idf.get(id as usize).copied().unwrap_or(0.0) }

    pub fn vectors(&self) -> &[TermVector] { &self.vectors }

    pub fn vector(&self, doc: usize) -> Option<&TermVector> { self.vectors.get(doc) }

    pub fn num_docs(&self) -> usize { self.vectors.len() }

    /// The `k` highest-weighted terms of a document, heaviest first.
    pub fn top_terms(&self, doc: usize, k: usize) -> Vec<(&str, f32)> {
        let Some(vector) = self.vectors.get(doc) else { return Vec::new() };
        let mut entries: Vec<(TermId, f32)> = vector.entries().to_vec();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
            .into_iter()
            .take(k)
            .filter_map(|(t, w)| self.term(t).map(|s| (s, w)))
            .collect()
    }
}

/// Builds an L2-normalized TF-IDF space over an ordered document set.
#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    config: RankerConfig,
}

impl Vectorizer {
    pub fn new(config: RankerConfig) -> Self { Self { config } }

    pub fn config(&self) -> &RankerConfig { &self.config }

    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TermSpace {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| tokenize(d.as_ref(), &self.config.tokenizer))
            .collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        let dictionary: HashMap<&str, TermId> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i as TermId))
            .collect();

        // Raw counts per document, plus document frequency per term
        let mut df: Vec<u32> = vec![0; vocabulary.len()];
        let mut counts: Vec<BTreeMap<TermId, u32>> = Vec::with_capacity(tokenized.len());
        for tokens in &tokenized {
            let mut tf_counts: BTreeMap<TermId, u32> = BTreeMap::new();
            for token in tokens {
                let tid = dictionary[token.as_str()];
                *tf_counts.entry(tid).or_insert(0) += 1;
            }
            for tid in tf_counts.keys() {
                df[*tid as usize] += 1;
            }
            counts.push(tf_counts);
        }

        let n = documents.len() as f32;
        let idf: Vec<f32> = df
            .iter()
            .map(|&df_t| {
                let df_t = df_t.max(1) as f32;
                if self.config.smooth_idf { ((1.0 + n) / (1.0 + df_t)).ln() + 1.0 } else { (n / df_t).ln() + 1.0 }
            })
            .collect();

        let dim = vocabulary.len();
        let vectors: Vec<TermVector> = counts
            .into_iter()
            .map(|tf_counts| {
                let mut weights: Vec<(TermId, f32)> = tf_counts
                    .into_iter()
                    .map(|(tid, tf_raw)| {
                        let tf = if self.config.sublinear_tf { 1.0 + (tf_raw as f32).ln() } else { tf_raw as f32 };
                        (tid, tf * idf[tid as usize])
                    })
                    .collect();
                let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for (_, w) in weights.iter_mut() { *w /= norm; }
                }
                TermVector::new(dim, weights)
            })
            .collect();

        tracing::debug!(num_docs = documents.len(), num_terms = dim, "built term space");
        TermSpace { vocabulary, df, idf, vectors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_sorted_and_shared() {
        let space = Vectorizer::default().fit_transform(&["b a", "c a", ""]);
        assert_eq!(space.vocabulary(), &["a", "b", "c"]);
        assert!(space.vectors().iter().all(|v| v.dim() == 3));
        assert!(space.vector(2).unwrap().is_zero());
        assert_eq!(space.df(space.term_id("a").unwrap()), 2);
    }

    #[test]
    fn smooth_idf_matches_formula() {
        let space = Vectorizer::default().fit_transform(&["a b", "a"]);
        let a = space.term_id("a").unwrap();
        let b = space.term_id("b").unwrap();
        assert!((space.idf(a) - 1.0).abs() < 1e-6);
        assert!((space.idf(b) - ((3.0f32 / 2.0).ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn plain_idf_matches_formula() {
        let cfg = RankerConfig { smooth_idf: false, ..RankerConfig::default() };
        let space = Vectorizer::new(cfg).fit_transform(&["a b", "a"]);
        let b = space.term_id("b").unwrap();
        assert!((space.idf(b) - (2.0f32.ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn vectors_are_unit_length() {
        let space = Vectorizer::default().fit_transform(&["rust rust go", "go python"]);
        for v in space.vectors() {
            assert!((v.norm() - 1.0).abs() < 1e-5);
            assert_eq!(v.to_dense().len(), 3);
        }
    }

    #[test]
    fn top_terms_prefers_repeated_terms() {
        let space = Vectorizer::default().fit_transform(&["rust rust rust go"]);
        let top = space.top_terms(0, 1);
        assert_eq!(top[0].0, "rust");
        assert!(space.top_terms(7, 3).is_empty());
    }
}
