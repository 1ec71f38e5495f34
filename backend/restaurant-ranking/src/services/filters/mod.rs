// ============================================
// Catalog Filters
// ============================================
//
// Side-effect free building blocks of the ranking waterfall.
// Every filter borrows from the catalog and keeps catalog order.

use crate::models::{Cuisine, Restaurant};
use chrono::{DateTime, Duration, Utc};

/// Restaurants onboarded less than this long ago are considered fresh.
pub const FRESHNESS_WINDOW_HOURS: i64 = 48;

/// Restaurants with exactly this cuisine and price tier.
pub fn filter_exact(catalog: &[Restaurant], cuisine: Cuisine, price_tier: i32) -> Vec<&Restaurant> {
    catalog
        .iter()
        .filter(|r| r.cuisine == cuisine && r.price_tier == price_tier)
        .collect()
}

/// Like [`filter_exact`], additionally requiring `rating >= min_rating`.
pub fn filter_min_rating(
    catalog: &[Restaurant],
    cuisine: Cuisine,
    price_tier: i32,
    min_rating: f32,
) -> Vec<&Restaurant> {
    catalog
        .iter()
        .filter(|r| r.cuisine == cuisine && r.price_tier == price_tier && r.rating >= min_rating)
        .collect()
}

/// Highest rated `n` restaurants, best first.
///
/// The sort is stable: equal ratings keep their input order.
pub fn top_by_rating<'a>(restaurants: &[&'a Restaurant], n: usize) -> Vec<&'a Restaurant> {
    let mut sorted = restaurants.to_vec();
    sorted.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a)));
    sorted.truncate(n);
    sorted
}

/// Total order over ratings: NaN ranks below every number, -0.0 equals 0.0.
fn rating_key(restaurant: &Restaurant) -> f32 {
    if restaurant.rating.is_nan() {
        f32::NEG_INFINITY
    } else if restaurant.rating == 0.0 {
        0.0
    } else {
        restaurant.rating
    }
}

pub fn is_fresh(restaurant: &Restaurant, now: DateTime<Utc>) -> bool {
    is_fresh_within(restaurant, now, Duration::hours(FRESHNESS_WINDOW_HOURS))
}

/// True when the restaurant was onboarded less than `window` before `now`.
/// Onboarding times after `now` count as fresh.
pub fn is_fresh_within(restaurant: &Restaurant, now: DateTime<Utc>, window: Duration) -> bool {
    now.signed_duration_since(restaurant.onboarded_at) < window
}

pub fn is_editorially_recommended(restaurant: &Restaurant) -> bool {
    restaurant.is_recommended
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn restaurant(id: &str, cuisine: Cuisine, price_tier: i32, rating: f32) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            cuisine,
            price_tier,
            rating,
            is_recommended: false,
            onboarded_at: now() - Duration::hours(100),
        }
    }

    fn ids(restaurants: &[&Restaurant]) -> Vec<String> {
        restaurants.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_filter_exact_keeps_catalog_order() {
        let catalog = vec![
            restaurant("a", Cuisine::Chinese, 2, 3.0),
            restaurant("b", Cuisine::SouthIndian, 2, 4.0),
            restaurant("c", Cuisine::Chinese, 1, 5.0),
            restaurant("d", Cuisine::Chinese, 2, 1.0),
        ];

        let matched = filter_exact(&catalog, Cuisine::Chinese, 2);
        assert_eq!(ids(&matched), vec!["a", "d"]);
    }

    #[test]
    fn test_filter_min_rating_is_inclusive() {
        let catalog = vec![
            restaurant("a", Cuisine::NorthIndian, 3, 4.0),
            restaurant("b", Cuisine::NorthIndian, 3, 3.99),
            restaurant("c", Cuisine::NorthIndian, 3, 4.5),
        ];

        let matched = filter_min_rating(&catalog, Cuisine::NorthIndian, 3, 4.0);
        assert_eq!(ids(&matched), vec!["a", "c"]);
    }

    #[test]
    fn test_unknown_price_tier_matches_nothing() {
        let catalog = vec![restaurant("a", Cuisine::NorthIndian, 3, 4.0)];

        assert!(filter_exact(&catalog, Cuisine::NorthIndian, -7).is_empty());
        assert!(filter_min_rating(&catalog, Cuisine::NorthIndian, 99, 0.0).is_empty());
    }

    #[test]
    fn test_top_by_rating_is_stable() {
        let catalog = vec![
            restaurant("a", Cuisine::Chinese, 1, 4.0),
            restaurant("b", Cuisine::Chinese, 1, 4.8),
            restaurant("c", Cuisine::Chinese, 1, 4.0),
            restaurant("d", Cuisine::Chinese, 1, 4.8),
            restaurant("e", Cuisine::Chinese, 1, 2.0),
        ];
        let all: Vec<&Restaurant> = catalog.iter().collect();

        let top = top_by_rating(&all, 4);
        assert_eq!(ids(&top), vec!["b", "d", "a", "c"]);

        // Input untouched
        assert_eq!(ids(&all), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_top_by_rating_orders_nan_last() {
        let catalog = vec![
            restaurant("nan-a", Cuisine::Chinese, 1, f32::NAN),
            restaurant("b", Cuisine::Chinese, 1, 3.5),
            restaurant("zero", Cuisine::Chinese, 1, -0.0),
            restaurant("nan-b", Cuisine::Chinese, 1, f32::NAN),
            restaurant("c", Cuisine::Chinese, 1, 4.5),
            restaurant("d", Cuisine::Chinese, 1, 0.0),
        ];
        let all: Vec<&Restaurant> = catalog.iter().collect();

        let top = top_by_rating(&all, 6);
        assert_eq!(ids(&top), vec!["c", "b", "zero", "d", "nan-a", "nan-b"]);
    }

    #[test]
    fn test_top_by_rating_caps_at_len() {
        let catalog = vec![restaurant("a", Cuisine::Chinese, 1, 4.0)];
        let all: Vec<&Restaurant> = catalog.iter().collect();

        assert_eq!(top_by_rating(&all, 4).len(), 1);
        assert!(top_by_rating(&all, 0).is_empty());
        assert!(top_by_rating(&[], 4).is_empty());
    }

    #[test]
    fn test_freshness_window_boundary() {
        let mut r = restaurant("a", Cuisine::Chinese, 1, 4.0);

        r.onboarded_at = now() - Duration::hours(1);
        assert!(is_fresh(&r, now()));

        r.onboarded_at = now() - Duration::hours(48) + Duration::seconds(1);
        assert!(is_fresh(&r, now()));

        // Exactly 48 hours is no longer fresh
        r.onboarded_at = now() - Duration::hours(48);
        assert!(!is_fresh(&r, now()));

        r.onboarded_at = now() - Duration::hours(72);
        assert!(!is_fresh(&r, now()));

        r.onboarded_at = now() + Duration::hours(2);
        assert!(is_fresh(&r, now()));
    }

    #[test]
    fn test_custom_freshness_window() {
        let mut r = restaurant("a", Cuisine::Chinese, 1, 4.0);
        r.onboarded_at = now() - Duration::hours(30);

        assert!(is_fresh_within(&r, now(), Duration::hours(48)));
        assert!(!is_fresh_within(&r, now(), Duration::hours(24)));
    }

    #[test]
    fn test_editorial_flag() {
        let mut r = restaurant("a", Cuisine::Chinese, 1, 4.0);
        assert!(!is_editorially_recommended(&r));

        r.is_recommended = true;
        assert!(is_editorially_recommended(&r));
    }
}
