// ============================================
// Waterfall Stage Table
// ============================================
//
// The ranking policy as data. Each entry selects restaurants from the
// catalog; the ranker appends every selection in table order.
//
// Standard table:
//   1. primary_with_fallback           (first non-empty segment)
//   2. primary_high_rating             (reinforced, pass 1)
//   3. secondary_cuisine_high_rating   (reinforced, pass 1)
//   4. tertiary_cuisine_high_rating    (reinforced, pass 1)
//   5. spotlight                       (top rated primary segment)
//   6-8. stages 2-4 again              (reinforced, pass 2)
//   9. catch_all                       (not recommended and not fresh)

use super::policy::RatingCutoff;
use super::{PreferenceKind, RankingError, Result};
use crate::models::{Cuisine, PreferenceRank, UserProfile};

pub const REQUIRED_CUISINE_PREFERENCES: usize = 3;
pub const REQUIRED_PRICE_TIER_PREFERENCES: usize = 1;

/// Number of times the reinforced block appears in the standard table.
pub const REINFORCEMENT_PASSES: usize = 2;

/// User preferences a stage can refer to, resolved once per ranking call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceSlots {
    pub primary_cuisine: Cuisine,
    pub secondary_cuisine: Cuisine,
    pub tertiary_cuisine: Cuisine,
    pub primary_price_tier: i32,
}

impl PreferenceSlots {
    pub fn resolve(user: &UserProfile) -> Result<Self> {
        let cuisine = |rank| {
            user.cuisine_at(rank)
                .ok_or(RankingError::InsufficientPreferences {
                    kind: PreferenceKind::Cuisine,
                    required: REQUIRED_CUISINE_PREFERENCES,
                    found: user.cuisines.len(),
                })
        };

        let primary_cuisine = cuisine(PreferenceRank::Primary)?;
        let secondary_cuisine = cuisine(PreferenceRank::Secondary)?;
        let tertiary_cuisine = cuisine(PreferenceRank::Tertiary)?;
        let primary_price_tier = user.price_tier_at(PreferenceRank::Primary).ok_or(
            RankingError::InsufficientPreferences {
                kind: PreferenceKind::PriceTier,
                required: REQUIRED_PRICE_TIER_PREFERENCES,
                found: user.price_tiers.len(),
            },
        )?;

        Ok(Self {
            primary_cuisine,
            secondary_cuisine,
            tertiary_cuisine,
            primary_price_tier,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuisineSlot {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSlot {
    Primary,
    /// The secondary cuisine's ordinal read as a price tier.
    SecondaryCuisineValue,
}

/// A (cuisine, price tier) pair expressed in terms of user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub cuisine: CuisineSlot,
    pub price: PriceSlot,
}

impl Segment {
    pub const fn new(cuisine: CuisineSlot, price: PriceSlot) -> Self {
        Self { cuisine, price }
    }

    pub fn resolve(&self, slots: &PreferenceSlots) -> (Cuisine, i32) {
        let cuisine = match self.cuisine {
            CuisineSlot::Primary => slots.primary_cuisine,
            CuisineSlot::Secondary => slots.secondary_cuisine,
            CuisineSlot::Tertiary => slots.tertiary_cuisine,
        };
        let price_tier = match self.price {
            PriceSlot::Primary => slots.primary_price_tier,
            PriceSlot::SecondaryCuisineValue => slots.secondary_cuisine.as_price_tier(),
        };
        (cuisine, price_tier)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Exact matches of the first segment that yields any restaurant.
    FirstNonEmpty(Vec<Segment>),
    /// Segment matches rated at or above the cutoff.
    MinRating { segment: Segment, cutoff: RatingCutoff },
    /// Best rated segment matches above the cutoff, capped by the spotlight limit.
    TopRated { segment: Segment, cutoff: RatingCutoff },
    /// Every restaurant that is neither editorially recommended nor fresh.
    CatchAll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageSpec {
    pub name: &'static str,
    pub selector: Selector,
    /// 1 for the first occurrence of a stage, 2+ for reinforcement repeats.
    pub pass: usize,
}

impl StageSpec {
    fn new(name: &'static str, selector: Selector) -> Self {
        Self {
            name,
            selector,
            pass: 1,
        }
    }

    fn on_pass(mut self, pass: usize) -> Self {
        self.pass = pass;
        self
    }
}

const PRIMARY: Segment = Segment::new(CuisineSlot::Primary, PriceSlot::Primary);
const PRIMARY_BY_SECONDARY_VALUE: Segment =
    Segment::new(CuisineSlot::Primary, PriceSlot::SecondaryCuisineValue);
const SECONDARY: Segment = Segment::new(CuisineSlot::Secondary, PriceSlot::Primary);
const TERTIARY: Segment = Segment::new(CuisineSlot::Tertiary, PriceSlot::Primary);

fn reinforced_block() -> Vec<StageSpec> {
    vec![
        StageSpec::new(
            "primary_high_rating",
            Selector::MinRating {
                segment: PRIMARY,
                cutoff: RatingCutoff::Primary,
            },
        ),
        StageSpec::new(
            "secondary_cuisine_high_rating",
            Selector::MinRating {
                segment: PRIMARY_BY_SECONDARY_VALUE,
                cutoff: RatingCutoff::Secondary,
            },
        ),
        StageSpec::new(
            "tertiary_cuisine_high_rating",
            Selector::MinRating {
                segment: TERTIARY,
                cutoff: RatingCutoff::Secondary,
            },
        ),
    ]
}

/// The production waterfall.
pub fn standard_stages() -> Vec<StageSpec> {
    let mut stages = vec![StageSpec::new(
        "primary_with_fallback",
        Selector::FirstNonEmpty(vec![PRIMARY, PRIMARY_BY_SECONDARY_VALUE, SECONDARY]),
    )];

    for pass in 1..=REINFORCEMENT_PASSES {
        stages.extend(reinforced_block().into_iter().map(|s| s.on_pass(pass)));
        if pass == 1 {
            stages.push(StageSpec::new(
                "spotlight",
                Selector::TopRated {
                    segment: PRIMARY,
                    cutoff: RatingCutoff::Spotlight,
                },
            ));
        }
    }

    stages.push(StageSpec::new("catch_all", Selector::CatchAll));
    stages
}
