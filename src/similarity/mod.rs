// Similarity scoring — unit extraction, vectorization and cosine comparison.

pub mod cosine;
pub mod reference;
pub mod report;
pub mod scorer;
pub mod tokenize;
pub mod traits;
pub mod units;
pub mod vectorize;

/// Round to two decimal places, the precision every reported number uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
