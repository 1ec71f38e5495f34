pub mod dedup;
pub mod filters;
pub mod ranking;
pub mod snapshot;

pub use dedup::DedupLayer;
pub use ranking::RankingLayer;
pub use snapshot::Snapshot;
