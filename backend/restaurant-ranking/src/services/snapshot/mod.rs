// ============================================
// Ranking Snapshot
// ============================================
//
// A user profile plus the restaurants available to them, as handed to the
// ranker. Loaded from JSON:
//
// {
//   "user": {
//     "cuisines": [{ "cuisine": "south_indian", "order_count": 3 }, ...],
//     "price_tiers": [{ "price_tier": 3, "order_count": 5 }, ...]
//   },
//   "restaurants": [
//     { "id": "1", "cuisine": "chinese", "price_tier": 2, "rating": 4.8,
//       "is_recommended": true, "onboarded_at": "2024-06-15T09:30:00Z" }
//   ]
// }

use crate::models::{Cuisine, CuisinePreference, PriceTierPreference, Restaurant, UserProfile};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub user: UserProfile,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&json)?;
        snapshot.log_loaded(path);
        Ok(snapshot)
    }

    pub async fn load_async(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot = Self::from_json(&json)?;
        snapshot.log_loaded(path);
        Ok(snapshot)
    }

    /// Built-in sample: three ranked cuisines, seven restaurants onboarded
    /// between 5 and 72 hours before `now`.
    pub fn demo(now: DateTime<Utc>) -> Self {
        let cuisine = |cuisine, order_count| CuisinePreference {
            cuisine,
            order_count,
        };
        let tier = |price_tier, order_count| PriceTierPreference {
            price_tier,
            order_count,
        };
        let restaurant = |id: &str, cuisine, price_tier, rating, is_recommended, age_hours| {
            Restaurant {
                id: id.to_string(),
                cuisine,
                price_tier,
                rating,
                is_recommended,
                onboarded_at: now - Duration::hours(age_hours),
            }
        };

        Self {
            user: UserProfile::new(
                vec![
                    cuisine(Cuisine::SouthIndian, 3),
                    cuisine(Cuisine::NorthIndian, 2),
                    cuisine(Cuisine::Chinese, 1),
                ],
                vec![tier(3, 5), tier(2, 4), tier(1, 3)],
            ),
            restaurants: vec![
                restaurant("1", Cuisine::SouthIndian, 3, 4.2, true, 72),
                restaurant("2", Cuisine::NorthIndian, 1, 4.5, true, 24),
                restaurant("3", Cuisine::Chinese, 3, 3.8, false, 60),
                restaurant("4", Cuisine::Chinese, 2, 4.8, true, 30),
                restaurant("5", Cuisine::SouthIndian, 3, 3.9, false, 10),
                restaurant("6", Cuisine::NorthIndian, 1, 4.3, true, 15),
                restaurant("7", Cuisine::SouthIndian, 3, 4.2, false, 5),
            ],
        }
    }

    fn log_loaded(&self, path: &Path) {
        info!(
            path = %path.display(),
            restaurants = self.restaurants.len(),
            cuisine_preferences = self.user.cuisines.len(),
            price_tier_preferences = self.user.price_tiers.len(),
            "Loaded ranking snapshot"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SNAPSHOT_JSON: &str = r#"{
        "user": {
            "cuisines": [
                { "cuisine": "chinese", "order_count": 9 },
                { "cuisine": "south_indian", "order_count": 4 },
                { "cuisine": "north_indian", "order_count": 1 }
            ],
            "price_tiers": [{ "price_tier": 2, "order_count": 6 }]
        },
        "restaurants": [
            {
                "id": "wok-1",
                "cuisine": "chinese",
                "price_tier": 2,
                "rating": 4.6,
                "onboarded_at": "2024-06-10T08:00:00Z"
            },
            {
                "id": "dosa-2",
                "cuisine": "south_indian",
                "price_tier": 1,
                "rating": 4.1,
                "is_recommended": true,
                "onboarded_at": "2024-06-14T20:15:00Z"
            }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();

        assert_eq!(snapshot.user.cuisines.len(), 3);
        assert_eq!(snapshot.user.cuisines[0].cuisine, Cuisine::Chinese);
        assert_eq!(snapshot.user.price_tiers[0].price_tier, 2);
        assert_eq!(snapshot.restaurants.len(), 2);

        let wok = &snapshot.restaurants[0];
        assert_eq!(wok.id, "wok-1");
        assert!(!wok.is_recommended); // defaulted
        assert_eq!(
            wok.onboarded_at,
            Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap()
        );
        assert!(snapshot.restaurants[1].is_recommended);
    }

    #[test]
    fn test_from_json_rejects_unknown_cuisine() {
        let json = r#"{
            "user": { "cuisines": [], "price_tiers": [] },
            "restaurants": [{
                "id": "pad-1",
                "cuisine": "thai",
                "price_tier": 2,
                "rating": 4.0,
                "onboarded_at": "2024-06-10T08:00:00Z"
            }]
        }"#;

        let err = Snapshot::from_json(json).unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Snapshot::load(Path::new("/nonexistent/ranking-snapshot.json")).unwrap_err();

        match err {
            SnapshotError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/ranking-snapshot.json"));
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_async_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!(
            "restaurant-ranking-snapshot-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, SNAPSHOT_JSON).unwrap();

        let loaded = tokio_test::block_on(Snapshot::load_async(&path)).unwrap();
        let expected = Snapshot::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, expected);
        assert_eq!(loaded.restaurants[1].id, "dosa-2");
    }

    #[test]
    fn test_demo_snapshot() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap();
        let demo = Snapshot::demo(now);

        assert_eq!(demo.user.cuisines.len(), 3);
        assert_eq!(demo.restaurants.len(), 7);
        assert_eq!(demo.restaurants[6].onboarded_at, now - Duration::hours(5));
    }
}
