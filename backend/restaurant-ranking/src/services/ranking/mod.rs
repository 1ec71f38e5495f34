/// Ranking Module
///
/// Orders a restaurant catalog for one user with a fixed, table-driven
/// waterfall of filter stages.
///
/// # Architecture
/// - **Policy**: rating cutoffs, spotlight cap and freshness window
/// - **Stages**: the waterfall as a declarative `StageSpec` table
/// - **Waterfall**: `RankingLayer`, which evaluates the table against a catalog
///
/// # Workflow
/// 1. Resolve primary/secondary/tertiary preferences (fails fast when missing)
/// 2. Evaluate every stage against the catalog in table order
/// 3. Concatenate stage matches, duplicates included
pub mod policy;
pub mod stages;
pub mod waterfall;

pub use policy::{RankingPolicy, RatingCutoff};
pub use stages::{standard_stages, PreferenceSlots, Selector, StageSpec};
pub use waterfall::{RankingBreakdown, RankingLayer, StageOutcome};

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    Cuisine,
    PriceTier,
}

impl fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceKind::Cuisine => write!(f, "cuisine"),
            PreferenceKind::PriceTier => write!(f, "price tier"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("Insufficient preference data: need {required} {kind} preferences, found {found}")]
    InsufficientPreferences {
        kind: PreferenceKind,
        required: usize,
        found: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RankingError>;
