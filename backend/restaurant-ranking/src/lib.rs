pub mod config;
pub mod models;
pub mod services;

pub use config::Config;
pub use models::{
    Cuisine, CuisinePreference, PriceTierPreference, RankedIds, Restaurant, RestaurantCatalog,
    UserProfile,
};
pub use services::ranking::{RankingError, RankingPolicy};
pub use services::{DedupLayer, RankingLayer, Snapshot};
