// Scrivener: similarity checks for academic writing
//
// This is the library root. Each module corresponds to a major subsystem:
// the similarity engine itself, the multi-document pipeline, output
// formatting and configuration.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod similarity;

pub use similarity::report::{SimilarPair, SimilarityReport};
pub use similarity::scorer::{score, IntrinsicScorer};
