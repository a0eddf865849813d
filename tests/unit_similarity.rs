// Unit tests for the intrinsic similarity scorer.
//
// Exercises the public scoring contract: degenerate inputs, the threshold and
// ordering guarantees on reported pairs, symmetry, idempotence, and the
// concrete near-duplicate scenarios.

use scrivener::similarity::cosine::SimilarityMatrix;
use scrivener::similarity::scorer::{score, IntrinsicScorer};
use scrivener::similarity::tokenize::Tokenizer;
use scrivener::similarity::traits::DocumentScorer;
use scrivener::similarity::vectorize::{VectorSpace, Weighting};
use scrivener::SimilarityReport;

const NEAR_A: &str = "The quick brown fox jumps over the lazy dog near the river bank";
const NEAR_B: &str = "The quick brown fox jumps over the lazy dog near the river";
const UNRELATED: &str = "Quantum chromodynamics describes interactions between quarks and gluons";

// ============================================================
// Degenerate inputs
// ============================================================

#[test]
fn empty_document_scores_zero() {
    assert_eq!(score(""), SimilarityReport::empty());
}

#[test]
fn single_short_line_scores_zero() {
    // 15 characters: filtered out before comparison
    let report = score("Too short here.");
    assert_eq!(report.similarity_score, 0.0);
    assert!(report.similar_pairs.is_empty());
}

#[test]
fn single_long_line_scores_zero() {
    let report = score(NEAR_A);
    assert_eq!(report, SimilarityReport::empty());
}

#[test]
fn only_one_line_survives_filtering() {
    let doc = format!("Heading\n\n{NEAR_A}\n  tiny  \n");
    assert_eq!(score(&doc), SimilarityReport::empty());
}

#[test]
fn blank_and_whitespace_only_document() {
    assert_eq!(score("   \n\t\n\r\n      "), SimilarityReport::empty());
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn unrelated_lines_score_zero() {
    let doc = "Photosynthesis converts sunlight into chemical energy\n\
               Medieval castles relied upon thick stone walls";
    let report = score(doc);
    assert!(report.similarity_score.abs() < 0.001);
    assert!(report.similar_pairs.is_empty());
}

#[test]
fn identical_lines_score_100() {
    let doc = format!("{NEAR_A}\n{NEAR_A}");
    let report = score(&doc);
    assert_eq!(report.similarity_score, 100.0);
    assert_eq!(report.similar_pairs.len(), 1);
    assert_eq!(report.similar_pairs[0].similarity, 1.0);
}

#[test]
fn near_duplicates_around_unrelated_line() {
    let doc = format!("{NEAR_A}\n{UNRELATED}\n{NEAR_B}");
    let report = score(&doc);

    assert_eq!(report.similar_pairs.len(), 1, "Only lines 1 and 3 should pair");
    let pair = &report.similar_pairs[0];
    assert_eq!(pair.sentence_1, NEAR_A);
    assert_eq!(pair.sentence_2, NEAR_B);
    assert!(pair.similarity > 0.7 && pair.similarity <= 1.0);

    // The unrelated line shares no vocabulary, so the mean over three pairs
    // is the near-duplicate similarity divided by three.
    let expected = pair.similarity * 100.0 / 3.0;
    assert!(
        (report.similarity_score - expected).abs() < 0.5,
        "Expected ~{expected}, got {}",
        report.similarity_score
    );
}

#[test]
fn near_duplicates_under_term_frequency() {
    let scorer = IntrinsicScorer {
        weighting: Weighting::TermFrequency,
        ..IntrinsicScorer::default()
    };
    let report = scorer.score(&format!("{NEAR_A}\n{UNRELATED}\n{NEAR_B}"));
    assert_eq!(report.similar_pairs.len(), 1);
    assert_eq!(report.similar_pairs[0].sentence_1, NEAR_A);
}

#[test]
fn wordless_separator_line_counts_as_zero_similarity() {
    // The separator is long enough to be a unit but has no word tokens, so it
    // is 0.0 against both copies and still sits in the denominator.
    let separator = "------------------------";
    let doc = format!("{NEAR_A}\n{separator}\n{NEAR_A}");
    let report = score(&doc);

    assert_eq!(report.similar_pairs.len(), 1);
    assert_eq!(report.similar_pairs[0].sentence_1, NEAR_A);
    assert_eq!(report.similar_pairs[0].sentence_2, NEAR_A);
    assert_eq!(report.similarity_score, 33.33);
}

// ============================================================
// Pair invariants
// ============================================================

fn essay() -> String {
    [
        "Renewable energy adoption has accelerated across many developing economies.",
        "Solar panel costs fell sharply over the past decade in most markets.",
        "Renewable energy adoption has accelerated across many developing nations.",
        "Historians still debate the economic causes of the late Roman decline.",
        "Solar panel costs fell sharply over the past decade in most regions.",
        "Short line",
        "Renewable energy adoption accelerated across many developing economies.",
    ]
    .join("\n")
}

#[test]
fn pairs_exceed_threshold_and_stay_in_range() {
    let report = score(&essay());
    assert!(!report.similar_pairs.is_empty());
    for pair in &report.similar_pairs {
        assert!(pair.similarity > 0.7, "Pair below threshold: {pair:?}");
        assert!(pair.similarity <= 1.0, "Pair above 1.0: {pair:?}");
    }
    assert!(report.similarity_score >= 0.0 && report.similarity_score <= 100.0);
}

#[test]
fn pairs_follow_document_order_without_duplicates() {
    let doc = essay();
    let report = score(&doc);
    let lines: Vec<&str> = doc.lines().collect();
    let position = |text: &str| lines.iter().position(|l| *l == text).unwrap();

    let indices: Vec<(usize, usize)> = report
        .similar_pairs
        .iter()
        .map(|p| (position(&p.sentence_1), position(&p.sentence_2)))
        .collect();

    for &(i, j) in &indices {
        assert!(i < j, "Pair reported in reverse order: ({i}, {j})");
    }
    let mut sorted = indices.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(indices, sorted, "Pairs must be ordered by (i, j) and unique");
}

#[test]
fn higher_threshold_reports_subset() {
    let doc = essay();
    let loose = score(&doc);
    let strict = IntrinsicScorer {
        pair_threshold: 0.95,
        ..IntrinsicScorer::default()
    }
    .score(&doc);

    assert!(strict.similar_pairs.len() <= loose.similar_pairs.len());
    for pair in &strict.similar_pairs {
        assert!(loose.similar_pairs.contains(pair));
    }
    // The threshold never changes the aggregate
    assert_eq!(strict.similarity_score, loose.similarity_score);
}

#[test]
fn similarity_matrix_is_symmetric() {
    let doc = essay();
    let units = scrivener::similarity::units::extract_units(&doc, 20);
    let texts: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
    let space = VectorSpace::build(&texts, &Tokenizer::new(), Weighting::TfIdf);
    let matrix = SimilarityMatrix::from_vectors(&space.vectors);

    for i in 0..matrix.size() {
        assert_eq!(matrix.get(i, i), 1.0);
        for j in 0..matrix.size() {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
}

#[test]
fn scoring_is_idempotent() {
    let doc = essay();
    let scorer = IntrinsicScorer::default();
    assert_eq!(scorer.score(&doc), scorer.score(&doc));
}

#[test]
fn report_round_trips_through_json() {
    let report = score(&essay());
    let json = serde_json::to_string(&report).unwrap();
    let back: SimilarityReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, back);
}
