use super::policy::RankingPolicy;
use super::stages::{standard_stages, PreferenceSlots, Selector, StageSpec};
use super::{RankingError, Result};
use crate::models::{RankedIds, Restaurant, RestaurantCatalog, UserProfile};
use crate::services::filters::{
    filter_exact, filter_min_rating, is_editorially_recommended, is_fresh_within, top_by_rating,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Ids selected by a single waterfall stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// 1-based position in the stage table
    pub position: usize,
    pub name: &'static str,
    pub pass: usize,
    pub ids: Vec<String>,
}

/// Final ranking together with what each stage contributed.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingBreakdown {
    pub ids: RankedIds,
    pub stages: Vec<StageOutcome>,
}

/// Ranking Layer - 瀑布式餐廳排序
///
/// Stages never see each other's output, so a restaurant matched by several
/// stages is listed once per stage.
pub struct RankingLayer {
    policy: RankingPolicy,
    stages: Vec<StageSpec>,
}

impl Default for RankingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingLayer {
    pub fn new() -> Self {
        Self::with_policy(RankingPolicy::default())
    }

    /// Standard waterfall evaluated with custom thresholds
    pub fn with_policy(policy: RankingPolicy) -> Self {
        Self::with_stages(policy, standard_stages())
    }

    /// Custom stage table
    pub fn with_stages(policy: RankingPolicy, stages: Vec<StageSpec>) -> Self {
        Self { policy, stages }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Rank `catalog` for `user`, judging freshness relative to `now`.
    pub fn rank(
        &self,
        user: &UserProfile,
        catalog: &RestaurantCatalog,
        now: DateTime<Utc>,
    ) -> Result<RankedIds> {
        Ok(self.rank_with_breakdown(user, catalog, now)?.ids)
    }

    pub fn rank_with_breakdown(
        &self,
        user: &UserProfile,
        catalog: &RestaurantCatalog,
        now: DateTime<Utc>,
    ) -> Result<RankingBreakdown> {
        let slots = self.resolve_slots(user)?;

        let mut ids = Vec::new();
        let mut outcomes = Vec::with_capacity(self.stages.len());

        for (i, stage) in self.stages.iter().enumerate() {
            let outcome = self.run_stage(i + 1, stage, &slots, catalog, now);
            ids.extend(outcome.ids.iter().cloned());
            outcomes.push(outcome);
        }

        info!(
            catalog_size = catalog.len(),
            ranked_count = ids.len(),
            "Restaurant ranking completed"
        );

        Ok(RankingBreakdown {
            ids: RankedIds(ids),
            stages: outcomes,
        })
    }

    /// Evaluate one stage (1-based `position`) in isolation.
    pub fn evaluate_stage(
        &self,
        position: usize,
        user: &UserProfile,
        catalog: &RestaurantCatalog,
        now: DateTime<Utc>,
    ) -> Result<StageOutcome> {
        let stage = position
            .checked_sub(1)
            .and_then(|i| self.stages.get(i))
            .ok_or_else(|| {
                RankingError::InvalidInput(format!(
                    "stage position {} outside 1..={}",
                    position,
                    self.stages.len()
                ))
            })?;

        let slots = self.resolve_slots(user)?;
        Ok(self.run_stage(position, stage, &slots, catalog, now))
    }

    fn resolve_slots(&self, user: &UserProfile) -> Result<PreferenceSlots> {
        PreferenceSlots::resolve(user).map_err(|e| {
            warn!(error = %e, "Rejected ranking request");
            e
        })
    }

    fn run_stage(
        &self,
        position: usize,
        stage: &StageSpec,
        slots: &PreferenceSlots,
        catalog: &RestaurantCatalog,
        now: DateTime<Utc>,
    ) -> StageOutcome {
        let ids: Vec<String> = self
            .select(&stage.selector, slots, catalog, now)
            .into_iter()
            .map(|r| r.id.clone())
            .collect();

        debug!(
            stage = stage.name,
            position = position,
            pass = stage.pass,
            matched = ids.len(),
            "Stage evaluated"
        );

        StageOutcome {
            position,
            name: stage.name,
            pass: stage.pass,
            ids,
        }
    }

    fn select<'a>(
        &self,
        selector: &Selector,
        slots: &PreferenceSlots,
        catalog: &'a [Restaurant],
        now: DateTime<Utc>,
    ) -> Vec<&'a Restaurant> {
        match selector {
            Selector::FirstNonEmpty(segments) => segments
                .iter()
                .map(|segment| {
                    let (cuisine, price_tier) = segment.resolve(slots);
                    filter_exact(catalog, cuisine, price_tier)
                })
                .find(|matched| !matched.is_empty())
                .unwrap_or_default(),
            Selector::MinRating { segment, cutoff } => {
                let (cuisine, price_tier) = segment.resolve(slots);
                filter_min_rating(catalog, cuisine, price_tier, self.policy.cutoff(*cutoff))
            }
            Selector::TopRated { segment, cutoff } => {
                let (cuisine, price_tier) = segment.resolve(slots);
                let matched =
                    filter_min_rating(catalog, cuisine, price_tier, self.policy.cutoff(*cutoff));
                top_by_rating(&matched, self.policy.spotlight_limit)
            }
            Selector::CatchAll => catalog
                .iter()
                .filter(|r| {
                    !is_editorially_recommended(r)
                        && !is_fresh_within(r, now, self.policy.freshness_window)
                })
                .collect(),
        }
    }
}
