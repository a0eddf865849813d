use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::similarity::reference::{ReferenceChecker, DEFAULT_REFERENCE_THRESHOLD};
use crate::similarity::scorer::{IntrinsicScorer, DEFAULT_PAIR_THRESHOLD};
use crate::similarity::units::DEFAULT_MIN_UNIT_CHARS;
use crate::similarity::vectorize::Weighting;

/// Default number of documents scored at once in batch mode.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment is valid. The .env
/// file is loaded at startup via dotenvy; CLI flags override what's here.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Pairs of lines above this similarity are flagged (SCRIVENER_PAIR_THRESHOLD)
    pub pair_threshold: f64,
    /// Texts above this similarity to a reference are flagged (SCRIVENER_REFERENCE_THRESHOLD)
    pub reference_threshold: f64,
    /// Lines this short after trimming are ignored (SCRIVENER_MIN_UNIT_CHARS)
    pub min_unit_chars: usize,
    /// Vector weighting, "tfidf" or "tf" (SCRIVENER_WEIGHTING)
    pub weighting: Weighting,
    /// Documents scored in parallel in batch mode (SCRIVENER_CONCURRENCY)
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pair_threshold: DEFAULT_PAIR_THRESHOLD,
            reference_threshold: DEFAULT_REFERENCE_THRESHOLD,
            min_unit_chars: DEFAULT_MIN_UNIT_CHARS,
            weighting: Weighting::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::load_with(&[])
    }

    /// Load configuration with command-line values layered over the
    /// environment. An override replaces its variable before parsing, so a
    /// bad value in `.env` doesn't matter once the flag supersedes it.
    pub fn load_with(overrides: &[(&str, String)]) -> Result<Self> {
        Self::from_layers(overrides, |key| env::var(key).ok())
    }

    /// Build a config from `overrides` first, then `fallback`.
    pub fn from_layers<F>(overrides: &[(&str, String)], fallback: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| {
            overrides
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .or_else(|| fallback(key))
        })
    }

    /// Build a config from any key lookup. `load` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            pair_threshold: parse_or(&lookup, "SCRIVENER_PAIR_THRESHOLD", defaults.pair_threshold)?,
            reference_threshold: parse_or(
                &lookup,
                "SCRIVENER_REFERENCE_THRESHOLD",
                defaults.reference_threshold,
            )?,
            min_unit_chars: parse_or(&lookup, "SCRIVENER_MIN_UNIT_CHARS", defaults.min_unit_chars)?,
            weighting: parse_or(&lookup, "SCRIVENER_WEIGHTING", defaults.weighting)?,
            concurrency: parse_or(&lookup, "SCRIVENER_CONCURRENCY", defaults.concurrency)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds are probabilities and concurrency is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pair threshold", self.pair_threshold),
            ("reference threshold", self.reference_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("The {name} must be between 0.0 and 1.0, got {value}");
            }
        }
        if self.concurrency == 0 {
            anyhow::bail!("Concurrency must be at least 1");
        }
        Ok(())
    }

    /// Build the intrinsic scorer these settings describe.
    pub fn scorer(&self) -> IntrinsicScorer {
        IntrinsicScorer {
            pair_threshold: self.pair_threshold,
            min_unit_chars: self.min_unit_chars,
            weighting: self.weighting,
        }
    }

    /// Build the reference checker these settings describe.
    pub fn reference_checker(&self) -> ReferenceChecker {
        ReferenceChecker::new(self.reference_threshold)
    }
}

/// Parse `key` if set and non-empty, otherwise fall back to `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: '{raw}'")),
        _ => Ok(default),
    }
}
