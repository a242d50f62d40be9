//! Count-vector cosine similarity over the catalog's combined features

use std::collections::{BTreeMap, HashMap};

use ndarray::{Array2, ArrayView1};

use super::catalog::Catalog;

/// Symmetric all-pairs cosine similarity, indexed by catalog row
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

/// Sparse term-count vector, sorted by vocabulary column
struct TermCounts {
    entries: Vec<(usize, f64)>,
    norm: f64,
}

impl SimilarityMatrix {
    /// Builds the full matrix for `catalog`.
    ///
    /// Terms are whitespace-separated and lowercased. Cost is quadratic in
    /// the catalog size; nothing is reused between builds.
    pub fn build(catalog: &Catalog) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let vectors: Vec<TermCounts> = catalog
            .records()
            .iter()
            .map(|record| count_terms(&record.combined_features, &mut vocabulary))
            .collect();

        let n = vectors.len();
        let mut scores = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            if vectors[i].norm > 0.0 {
                scores[[i, i]] = 1.0;
            }
            for j in (i + 1)..n {
                let score = cosine(&vectors[i], &vectors[j]);
                scores[[i, j]] = score;
                scores[[j, i]] = score;
            }
        }

        tracing::debug!(
            movies = n,
            vocabulary = vocabulary.len(),
            "Similarity matrix built"
        );

        Self { scores }
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.scores.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[[i, j]]
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.scores.row(i)
    }
}

fn count_terms(text: &str, vocabulary: &mut HashMap<String, usize>) -> TermCounts {
    let mut counts: BTreeMap<usize, f64> = BTreeMap::new();

    for term in text.split_whitespace() {
        let term = term.to_lowercase();
        let next = vocabulary.len();
        let column = *vocabulary.entry(term).or_insert(next);
        *counts.entry(column).or_insert(0.0) += 1.0;
    }

    let norm = counts.values().map(|c| c * c).sum::<f64>().sqrt();

    TermCounts {
        entries: counts.into_iter().collect(),
        norm,
    }
}

fn cosine(a: &TermCounts, b: &TermCounts) -> f64 {
    if a.norm == 0.0 || b.norm == 0.0 {
        return 0.0;
    }

    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.entries.len() && j < b.entries.len() {
        let (col_a, count_a) = a.entries[i];
        let (col_b, count_b) = b.entries[j];
        if col_a == col_b {
            dot += count_a * count_b;
            i += 1;
            j += 1;
        } else if col_a < col_b {
            i += 1;
        } else {
            j += 1;
        }
    }

    (dot / (a.norm * b.norm)).clamp(0.0, 1.0)
}
