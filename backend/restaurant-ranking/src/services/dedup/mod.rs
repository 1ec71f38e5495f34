use crate::models::RankedIds;
use std::collections::HashSet;
use tracing::debug;

/// Dedup Layer - 去重後處理
///
/// Optional pass over a finished ranking. The waterfall itself keeps
/// duplicates; callers that want each restaurant once run this afterwards.
#[derive(Debug, Default)]
pub struct DedupLayer;

impl DedupLayer {
    pub fn new() -> Self {
        Self
    }

    /// Keep the first occurrence of every id, which is its earliest stage.
    pub fn first_seen(&self, ranked: &RankedIds) -> RankedIds {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut unique: Vec<String> = Vec::new();

        for id in ranked {
            if seen.insert(id.as_str()) {
                unique.push(id.clone());
            }
        }

        debug!(
            input_count = ranked.len(),
            output_count = unique.len(),
            "Deduplicated ranking"
        );

        RankedIds(unique)
    }
}
