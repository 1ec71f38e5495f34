use crate::services::filters::FRESHNESS_WINDOW_HOURS;
use chrono::Duration;

/// Minimum rating for the primary segment stages.
pub const PRIMARY_MIN_RATING: f32 = 4.0;
/// Minimum rating for the secondary and tertiary segment stages.
pub const SECONDARY_MIN_RATING: f32 = 4.5;
/// Minimum rating for the spotlight stage (admits every match).
pub const SPOTLIGHT_MIN_RATING: f32 = 0.0;
/// Maximum entries contributed by the spotlight stage.
pub const SPOTLIGHT_LIMIT: usize = 4;

/// Rating cutoffs referenced by the waterfall table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingCutoff {
    Primary,
    Secondary,
    Spotlight,
}

/// Thresholds the waterfall is evaluated with.
///
/// `Default` is the production policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingPolicy {
    pub primary_min_rating: f32,
    pub secondary_min_rating: f32,
    pub spotlight_min_rating: f32,
    pub spotlight_limit: usize,
    pub freshness_window: Duration,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            primary_min_rating: PRIMARY_MIN_RATING,
            secondary_min_rating: SECONDARY_MIN_RATING,
            spotlight_min_rating: SPOTLIGHT_MIN_RATING,
            spotlight_limit: SPOTLIGHT_LIMIT,
            freshness_window: Duration::hours(FRESHNESS_WINDOW_HOURS),
        }
    }
}

impl RankingPolicy {
    pub fn cutoff(&self, cutoff: RatingCutoff) -> f32 {
        match cutoff {
            RatingCutoff::Primary => self.primary_min_rating,
            RatingCutoff::Secondary => self.secondary_min_rating,
            RatingCutoff::Spotlight => self.spotlight_min_rating,
        }
    }
}
