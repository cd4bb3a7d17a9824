//! Vector similarity utilities.
//!
//! Pure-Rust cosine similarity and top-k ranking over an embedding table.

/// Compute cosine similarity between two vectors.
///
/// Returns a value in [-1, 1] where 1 = identical, 0 = orthogonal, -1 = opposite.
/// Returns 0.0 if either vector is zero-length or empty.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-10 {
        return 0.0;
    }

    (dot / denom) as f32
}

/// Rank rows of `table` by cosine similarity to `query`.
///
/// Returns `(row, score)` pairs, best first, at most `limit` of them.
/// Every row is a candidate regardless of score. The sort is stable, so
/// rows with equal scores keep table order and repeated calls agree.
pub fn top_k(table: &[Vec<f32>], query: &[f32], limit: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = table
        .iter()
        .enumerate()
        .map(|(i, row)| (i, cosine_similarity(row, query)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical_vectors() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn cosine_empty_vectors() {
        let sim = cosine_similarity(&[], &[]);
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn cosine_mismatched_lengths() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn cosine_zero_vector() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn cosine_known_value() {
        // [1,1] · [1,0] = 1, |[1,1]| = sqrt(2), |[1,0]| = 1
        let a = vec![1.0, 1.0];
        let b = vec![1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim - 0.7071).abs() < 0.001);
    }

    #[test]
    fn top_k_ranks_by_similarity() {
        let query = vec![1.0, 0.0, 0.0];
        let table = vec![
            vec![0.0, 1.0, 0.0], // orthogonal = 0
            vec![1.0, 0.0, 0.0], // identical = 1
            vec![0.5, 0.5, 0.0], // partial = ~0.707
        ];

        let ranked = top_k(&table, &query, 10);
        let rows: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(rows, vec![1, 2, 0]);
    }

    #[test]
    fn top_k_keeps_zero_scores() {
        let table = vec![vec![0.0, 1.0]];
        let ranked = top_k(&table, &[1.0, 0.0], 5);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn top_k_respects_limit() {
        let table: Vec<_> = (0..10).map(|i| vec![1.0, i as f32 * 0.1]).collect();
        assert_eq!(top_k(&table, &[1.0, 0.0], 3).len(), 3);
    }

    #[test]
    fn ties_keep_table_order() {
        let table = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]];
        let rows: Vec<usize> = top_k(&table, &[1.0, 0.0], 3).iter().map(|(i, _)| *i).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }
}
