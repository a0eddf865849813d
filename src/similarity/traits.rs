// Document scorer trait — the seam the batch pipeline and CLI depend on.
//
// The default implementation is the TF-IDF intrinsic scorer. Anything else
// that can turn a document into a SimilarityReport (an embedding-based
// scorer, say) plugs in here without touching the pipeline.

use super::report::SimilarityReport;

/// Scores one document for internal similarity.
///
/// Implementations must be pure: the same document always yields the same
/// report, and no state is shared between calls.
pub trait DocumentScorer: Send + Sync {
    fn score(&self, document: &str) -> SimilarityReport;
}
