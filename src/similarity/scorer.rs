// Intrinsic similarity scorer.
//
// Compares every line of a document against every other line of the same
// document. Lines that say nearly the same thing twice are flagged as pairs,
// and the mean similarity across all pairs becomes the document's score.
//
// The whole computation is O(n²) in the number of retained lines, holds no
// state between calls and never fails on string input.

use tracing::debug;

use super::cosine::SimilarityMatrix;
use super::report::{SimilarPair, SimilarityReport};
use super::round2;
use super::tokenize::Tokenizer;
use super::traits::DocumentScorer;
use super::units::{extract_units, DEFAULT_MIN_UNIT_CHARS};
use super::vectorize::{VectorSpace, Weighting};

/// Pairs strictly above this similarity are reported.
pub const DEFAULT_PAIR_THRESHOLD: f64 = 0.7;

/// Line-against-line scorer for a single document.
#[derive(Debug, Clone)]
pub struct IntrinsicScorer {
    /// Similarity a pair must exceed to be reported (default 0.7)
    pub pair_threshold: f64,
    /// Lines this short or shorter after trimming are ignored (default 20)
    pub min_unit_chars: usize,
    /// Vector weighting scheme (default TF-IDF)
    pub weighting: Weighting,
}

impl Default for IntrinsicScorer {
    fn default() -> Self {
        Self {
            pair_threshold: DEFAULT_PAIR_THRESHOLD,
            min_unit_chars: DEFAULT_MIN_UNIT_CHARS,
            weighting: Weighting::default(),
        }
    }
}

impl DocumentScorer for IntrinsicScorer {
    fn score(&self, document: &str) -> SimilarityReport {
        let units = extract_units(document, self.min_unit_chars);
        if units.len() < 2 {
            debug!(units = units.len(), "Too few units to compare");
            return SimilarityReport::empty();
        }

        let texts: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
        let space = VectorSpace::build(&texts, &Tokenizer::new(), self.weighting);
        let matrix = SimilarityMatrix::from_vectors(&space.vectors);

        let mut total = 0.0;
        let mut similar_pairs = Vec::new();
        for (i, j, sim) in matrix.pairs() {
            total += sim;
            if sim > self.pair_threshold {
                similar_pairs.push(SimilarPair {
                    sentence_1: units[i].text.clone(),
                    sentence_2: units[j].text.clone(),
                    similarity: round2(sim),
                });
            }
        }

        let similarity_score = round2(total / matrix.pair_count() as f64 * 100.0);

        debug!(
            units = units.len(),
            vocabulary = space.vocabulary.len(),
            pairs_flagged = similar_pairs.len(),
            similarity_score,
            "Scored document"
        );

        SimilarityReport {
            similarity_score,
            similar_pairs,
        }
    }
}

/// Score a document with the default settings.
pub fn score(document: &str) -> SimilarityReport {
    IntrinsicScorer::default().score(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_short_line() {
        let report = score("fifteen chars!!");
        assert_eq!(report, SimilarityReport::empty());
    }

    #[test]
    fn test_identical_lines_score_100() {
        let line = "Academic integrity matters in every research paper.";
        let report = score(&format!("{line}\n{line}"));
        assert_eq!(report.similarity_score, 100.0);
        assert_eq!(report.similar_pairs.len(), 1);
        assert_eq!(report.similar_pairs[0].similarity, 1.0);
        assert_eq!(report.similar_pairs[0].sentence_1, line);
        assert_eq!(report.similar_pairs[0].sentence_2, line);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let doc = "Photosynthesis converts sunlight into chemical energy.\n\
                   Medieval castles relied upon thick stone walls.";
        let report = score(doc);
        assert_eq!(report.similarity_score, 0.0);
        assert!(report.similar_pairs.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        // Identical lines score exactly 1.0, which never exceeds 1.0
        let scorer = IntrinsicScorer {
            pair_threshold: 1.0,
            ..IntrinsicScorer::default()
        };
        let line = "Exactly the same sentence written down twice.";
        let report = scorer.score(&format!("{line}\n{line}"));
        assert!(report.similar_pairs.is_empty());
        assert_eq!(report.similarity_score, 100.0);
    }

    /// Two TF lines of `shared + unique` distinct words each: cosine is
    /// `shared / (shared + unique)`.
    fn overlapping_lines(shared: usize, unique: usize) -> String {
        let common: Vec<String> = (0..shared).map(|i| format!("common{i}")).collect();
        let line = |tag: &str| {
            let own = (0..unique).map(|i| format!("{tag}{i}"));
            common.iter().cloned().chain(own).collect::<Vec<_>>().join(" ")
        };
        format!("{}\n{}", line("left"), line("right"))
    }

    #[test]
    fn test_pair_just_above_threshold_rounds_down_to_it() {
        let scorer = IntrinsicScorer {
            weighting: Weighting::TermFrequency,
            ..IntrinsicScorer::default()
        };
        // 19 / 27 = 0.7037: above 0.7, reported as 0.70
        let report = scorer.score(&overlapping_lines(19, 8));
        assert_eq!(report.similar_pairs.len(), 1);
        assert_eq!(report.similar_pairs[0].similarity, 0.7);
        assert_eq!(report.similarity_score, 70.37);
    }

    #[test]
    fn test_pair_at_threshold_not_reported() {
        let scorer = IntrinsicScorer {
            weighting: Weighting::TermFrequency,
            ..IntrinsicScorer::default()
        };
        // 7 / 10 = 0.7: not strictly above
        let report = scorer.score(&overlapping_lines(7, 3));
        assert!(report.similar_pairs.is_empty());
        assert_eq!(report.similarity_score, 70.0);
    }

    #[test]
    fn test_term_frequency_weighting() {
        let scorer = IntrinsicScorer {
            weighting: Weighting::TermFrequency,
            ..IntrinsicScorer::default()
        };
        // 4 of 5 terms shared on each side: cosine = 4 / (√5 · √5) = 0.8
        let report = scorer.score("alpha beta gamma words here\nalpha beta delta words here");
        assert_eq!(report.similar_pairs.len(), 1);
        assert_eq!(report.similar_pairs[0].similarity, 0.8);
        assert_eq!(report.similarity_score, 80.0);
    }

    #[test]
    fn test_custom_min_unit_chars() {
        let scorer = IntrinsicScorer {
            min_unit_chars: 5,
            ..IntrinsicScorer::default()
        };
        let report = scorer.score("short words\nshort words");
        assert_eq!(report.similarity_score, 100.0);
    }
}
