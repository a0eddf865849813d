// Term-frequency vector space over a small set of texts.
//
// The vocabulary is built from the texts being compared and nothing else:
// there is no reference corpus, and nothing survives between calls. Each text
// becomes a sparse vector over that vocabulary, weighted either by raw counts
// or by counts times a smoothed inverse document frequency.
//
// A line uses a handful of terms out of a vocabulary that grows with the
// document, so vectors store only their non-zero dimensions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tokenize::Tokenizer;

/// How token counts are turned into vector weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Raw token counts
    #[serde(rename = "tf")]
    TermFrequency,
    /// Counts scaled by `ln((1 + n) / (1 + df)) + 1`
    #[default]
    TfIdf,
}

impl FromStr for Weighting {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tf" | "term-frequency" => Ok(Self::TermFrequency),
            "tfidf" | "tf-idf" => Ok(Self::TfIdf),
            other => anyhow::bail!("Unknown weighting '{other}' (expected 'tfidf' or 'tf')"),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TermFrequency => f.write_str("tf"),
            Self::TfIdf => f.write_str("tfidf"),
        }
    }
}

/// A sparse weighted vector with its Euclidean norm precomputed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TermVector {
    /// `(dimension, weight)` pairs, sorted by dimension, weights non-zero
    terms: Vec<(usize, f64)>,
    norm: f64,
}

impl TermVector {
    /// Build from `(dimension, weight)` pairs; zero weights are dropped and
    /// repeated dimensions summed.
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (dim, weight) in terms {
            *merged.entry(dim).or_insert(0.0) += weight;
        }
        let terms: Vec<(usize, f64)> = merged.into_iter().filter(|&(_, w)| w != 0.0).collect();
        let norm = terms.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { terms, norm }
    }

    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Weight at `dim`, or 0.0 if the term is absent.
    pub fn weight(&self, dim: usize) -> f64 {
        self.terms
            .binary_search_by_key(&dim, |&(d, _)| d)
            .map(|i| self.terms[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product by merge-join over the two sorted term lists.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.terms.len() && j < other.terms.len() {
            let (da, wa) = self.terms[i];
            let (db, wb) = other.terms[j];
            match da.cmp(&db) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Vectors for a set of texts over their shared vocabulary.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// Vocabulary terms in sorted order; position = vector dimension
    pub vocabulary: Vec<String>,
    /// One vector per input text, in input order
    pub vectors: Vec<TermVector>,
}

impl VectorSpace {
    /// Tokenize `texts`, build their vocabulary and weight each text's counts.
    pub fn build<S: AsRef<str>>(texts: &[S], tokenizer: &Tokenizer, weighting: Weighting) -> Self {
        let tokenized: Vec<Vec<String>> = texts
            .iter()
            .map(|t| tokenizer.tokenize(t.as_ref()))
            .collect();

        // BTreeMap keeps dimension order stable across runs
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let index: HashMap<&str, usize> = doc_freq
            .keys()
            .enumerate()
            .map(|(i, term)| (*term, i))
            .collect();

        let n = texts.len() as f64;
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| match weighting {
                Weighting::TermFrequency => 1.0,
                Weighting::TfIdf => ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0,
            })
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                TermVector::from_terms(tokens.iter().map(|token| {
                    let dim = index[token.as_str()];
                    (dim, idf[dim])
                }))
            })
            .collect();

        Self {
            vocabulary: doc_freq.keys().map(|t| t.to_string()).collect(),
            vectors,
        }
    }
}
