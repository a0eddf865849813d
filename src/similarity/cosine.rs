// Cosine similarity and the all-pairs similarity matrix.

use super::vectorize::TermVector;

/// Cosine similarity between two vectors, clamped to [0, 1].
///
/// A zero vector has no direction, so its similarity to anything is 0.0.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    if a.norm() == 0.0 || b.norm() == 0.0 {
        return 0.0;
    }

    (a.dot(b) / (a.norm() * b.norm())).clamp(0.0, 1.0)
}

/// Square, symmetric matrix of pairwise cosine similarities.
///
/// Stored row-major. The diagonal is always 1.0 and is never used in
/// aggregates.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute every pair once and mirror it across the diagonal.
    pub fn from_vectors(vectors: &[TermVector]) -> Self {
        let size = vectors.len();
        let mut cells = vec![0.0; size * size];

        for i in 0..size {
            cells[i * size + i] = 1.0;
            for j in (i + 1)..size {
                let sim = cosine_similarity(&vectors[i], &vectors[j]);
                cells[i * size + j] = sim;
                cells[j * size + i] = sim;
            }
        }

        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.size + j]
    }

    /// Iterate over the upper triangle as `(i, j, similarity)` with `i < j`,
    /// ordered by `i` then `j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.size)
            .flat_map(move |i| ((i + 1)..self.size).map(move |j| (i, j, self.get(i, j))))
    }

    /// Number of unordered off-diagonal pairs: n(n-1)/2.
    pub fn pair_count(&self) -> usize {
        self.size * self.size.saturating_sub(1) / 2
    }
}
