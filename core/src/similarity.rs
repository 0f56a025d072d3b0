use crate::vectorizer::TermVector;

/// Sparse dot product over two term-sorted vectors.
pub fn dot(a: &TermVector, b: &TermVector) -> f32 {
    let (xs, ys) = (a.entries(), b.entries());
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0f32;
    while i < xs.len() && j < ys.len() {
        match xs[i].0.cmp(&ys[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += xs[i].1 * ys[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Cosine similarity clamped to [0, 1]. Zero-magnitude input scores 0 rather than NaN.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f32 {
    debug_assert_eq!(a.dim(), b.dim(), "vectors from different term spaces");
    let norm = a.norm() * b.norm();
    if norm == 0.0 {
        return 0.0;
    }
    (dot(a, b) / norm).clamp(0.0, 1.0)
}
