use chrono::{Duration, SecondsFormat, Utc};
use halo_issues::{HaloConfig, HaloIssues};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "halo_issues=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = HaloConfig::from_env()?;

    // Cutoff from the first argument, defaulting to the last 24 hours.
    let since = std::env::args().nth(1).unwrap_or_else(|| {
        (Utc::now() - Duration::hours(24)).to_rfc3339_opts(SecondsFormat::Secs, true)
    });
    tracing::info!(%since, critical_only = config.critical_only, "Aggregating Halo issues");

    let halo = HaloIssues::connect(&config).await?;
    let issues = halo.describe_all_issues(&since, config.critical_only).await?;

    tracing::info!(count = issues.len(), "Issue aggregation complete");
    println!("{}", serde_json::to_string_pretty(&issues)?);

    Ok(())
}
