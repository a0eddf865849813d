// Pipelines — multi-document workflows built on the single-document scorer.

pub mod batch;
