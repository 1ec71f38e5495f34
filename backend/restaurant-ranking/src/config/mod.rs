use crate::services::filters::FRESHNESS_WINDOW_HOURS;
use crate::services::ranking::policy::{
    RankingPolicy, PRIMARY_MIN_RATING, SECONDARY_MIN_RATING, SPOTLIGHT_LIMIT,
    SPOTLIGHT_MIN_RATING,
};
use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

const POLICY_ENV_PREFIX: &str = "RANKING_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid ranking policy: {0}")]
    InvalidPolicy(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub policy: PolicyConfig,
    pub snapshot: SnapshotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

/// Ranking thresholds, read from `RANKING_*` variables.
/// Unset variables fall back to the production policy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_primary_min_rating")]
    pub primary_min_rating: f32,
    #[serde(default = "default_secondary_min_rating")]
    pub secondary_min_rating: f32,
    #[serde(default = "default_spotlight_min_rating")]
    pub spotlight_min_rating: f32,
    #[serde(default = "default_spotlight_limit")]
    pub spotlight_limit: usize,
    #[serde(default = "default_freshness_window_hours")]
    pub freshness_window_hours: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotConfig {
    /// `RANKING_SNAPSHOT_PATH`; the built-in demo snapshot is used when unset
    pub snapshot_path: Option<PathBuf>,
}

fn default_service_name() -> String {
    "restaurant-ranking".to_string()
}

fn default_primary_min_rating() -> f32 {
    PRIMARY_MIN_RATING
}

fn default_secondary_min_rating() -> f32 {
    SECONDARY_MIN_RATING
}

fn default_spotlight_min_rating() -> f32 {
    SPOTLIGHT_MIN_RATING
}

fn default_spotlight_limit() -> usize {
    SPOTLIGHT_LIMIT
}

fn default_freshness_window_hours() -> i64 {
    FRESHNESS_WINDOW_HOURS
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            primary_min_rating: PRIMARY_MIN_RATING,
            secondary_min_rating: SECONDARY_MIN_RATING,
            spotlight_min_rating: SPOTLIGHT_MIN_RATING,
            spotlight_limit: SPOTLIGHT_LIMIT,
            freshness_window_hours: FRESHNESS_WINDOW_HOURS,
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cutoffs = [
            ("primary_min_rating", self.primary_min_rating),
            ("secondary_min_rating", self.secondary_min_rating),
            ("spotlight_min_rating", self.spotlight_min_rating),
        ];
        for (name, value) in cutoffs {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::InvalidPolicy(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        self.freshness_window().map(|_| ())
    }

    /// Validated policy for the ranking layer.
    pub fn to_policy(&self) -> Result<RankingPolicy, ConfigError> {
        self.validate()?;

        Ok(RankingPolicy {
            primary_min_rating: self.primary_min_rating,
            secondary_min_rating: self.secondary_min_rating,
            spotlight_min_rating: self.spotlight_min_rating,
            spotlight_limit: self.spotlight_limit,
            freshness_window: self.freshness_window()?,
        })
    }

    fn freshness_window(&self) -> Result<Duration, ConfigError> {
        if self.freshness_window_hours <= 0 {
            return Err(ConfigError::InvalidPolicy(format!(
                "freshness_window_hours must be positive, got {}",
                self.freshness_window_hours
            )));
        }

        Duration::try_hours(self.freshness_window_hours).ok_or_else(|| {
            ConfigError::InvalidPolicy(format!(
                "freshness_window_hours out of range, got {}",
                self.freshness_window_hours
            ))
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build from an explicit set of variables instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let service: ServiceConfig = envy::from_iter(vars.iter().cloned())?;
        let policy: PolicyConfig = envy::prefixed(POLICY_ENV_PREFIX).from_iter(vars.iter().cloned())?;
        let snapshot: SnapshotConfig = envy::prefixed(POLICY_ENV_PREFIX).from_iter(vars)?;

        policy.validate()?;

        Ok(Config {
            service,
            policy,
            snapshot,
        })
    }
}
