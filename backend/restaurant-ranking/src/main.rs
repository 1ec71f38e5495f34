use anyhow::Context;
use restaurant_ranking::{Config, RankingLayer, Snapshot};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Load config
    let config = Config::from_env().context("Failed to load config")?;

    info!(
        service = %config.service.service_name,
        primary_min_rating = config.policy.primary_min_rating,
        secondary_min_rating = config.policy.secondary_min_rating,
        spotlight_limit = config.policy.spotlight_limit,
        freshness_window_hours = config.policy.freshness_window_hours,
        "Starting restaurant ranking"
    );

    // Reference time is captured once so every stage sees the same clock
    let now = chrono::Utc::now();

    let snapshot = match &config.snapshot.snapshot_path {
        Some(path) => Snapshot::load_async(path)
            .await
            .with_context(|| format!("Failed to load snapshot from {}", path.display()))?,
        None => {
            info!("RANKING_SNAPSHOT_PATH not set, using demo snapshot");
            Snapshot::demo(now)
        }
    };

    let ranking_layer = RankingLayer::with_policy(config.policy.to_policy()?);
    let breakdown = ranking_layer
        .rank_with_breakdown(&snapshot.user, &snapshot.restaurants, now)
        .context("Ranking failed")?;

    for stage in &breakdown.stages {
        debug!(
            position = stage.position,
            stage = stage.name,
            pass = stage.pass,
            ids = ?stage.ids,
            "Stage contribution"
        );
    }

    println!("{}", serde_json::to_string(&breakdown.ids.into_inner())?);

    Ok(())
}
