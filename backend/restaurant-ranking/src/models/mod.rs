use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cuisine category of a restaurant.
///
/// Discriminants are stable: the ranking policy reads them back as price
/// tiers in a few stages (see [`Cuisine::as_price_tier`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    SouthIndian = 0,
    NorthIndian = 1,
    Chinese = 2,
}

impl Cuisine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::SouthIndian => "south_indian",
            Cuisine::NorthIndian => "north_indian",
            Cuisine::Chinese => "chinese",
        }
    }

    /// Reinterprets the cuisine ordinal as a price tier.
    ///
    /// Legacy ranking output depends on this coupling (stage 1 fallback and
    /// the secondary-cuisine stages). Every use goes through here so the
    /// policy can be corrected in one place.
    pub fn as_price_tier(&self) -> i32 {
        *self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuisinePreference {
    pub cuisine: Cuisine,
    pub order_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTierPreference {
    pub price_tier: i32,
    pub order_count: u32,
}

/// Position of a preference in a user's ranked preference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceRank {
    Primary,
    Secondary,
    Tertiary,
}

impl PreferenceRank {
    pub fn index(&self) -> usize {
        match self {
            PreferenceRank::Primary => 0,
            PreferenceRank::Secondary => 1,
            PreferenceRank::Tertiary => 2,
        }
    }
}

/// Ranked cuisine and price tier preferences of a single user.
///
/// Both lists are ordered most-preferred first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub cuisines: Vec<CuisinePreference>,
    pub price_tiers: Vec<PriceTierPreference>,
}

impl UserProfile {
    pub fn new(cuisines: Vec<CuisinePreference>, price_tiers: Vec<PriceTierPreference>) -> Self {
        Self {
            cuisines,
            price_tiers,
        }
    }

    pub fn cuisine_at(&self, rank: PreferenceRank) -> Option<Cuisine> {
        self.cuisines.get(rank.index()).map(|p| p.cuisine)
    }

    pub fn price_tier_at(&self, rank: PreferenceRank) -> Option<i32> {
        self.price_tiers.get(rank.index()).map(|p| p.price_tier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub cuisine: Cuisine,
    pub price_tier: i32,
    pub rating: f32,
    #[serde(default)]
    pub is_recommended: bool,
    pub onboarded_at: DateTime<Utc>,
}

/// Snapshot of restaurants available to rank, in caller order.
///
/// Ids are not checked for uniqueness.
pub type RestaurantCatalog = [Restaurant];

/// Restaurant ids in display order. The same id may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedIds(pub Vec<String>);

impl RankedIds {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Number of times `id` occurs in the ranking.
    pub fn occurrences(&self, id: &str) -> usize {
        self.0.iter().filter(|r| r.as_str() == id).count()
    }
}

impl From<Vec<String>> for RankedIds {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl<'a> IntoIterator for &'a RankedIds {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
