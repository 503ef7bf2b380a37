use std::env;
use std::path::PathBuf;

use anyhow::Context;
use chatcbi::clients::ChatCbiClient;
use chatcbi::core::config::CbiConfig;
use chatcbi::trends::{DEFAULT_TRENDS_OUTPUT, DEFAULT_TRENDS_QUERY, fetch_snapshot, write_snapshot};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    chatcbi::setup_logging();

    let config = CbiConfig::from_env().context("loading ChatCBI configuration")?;
    let query = env::var("CBI_TOP_TRENDS_QUERY")
        .ok()
        .filter(|q| !q.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TRENDS_QUERY.to_string());
    let output = env::var("CBI_TRENDS_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_TRENDS_OUTPUT));

    let client = ChatCbiClient::new(config)?;
    let snapshot = fetch_snapshot(&client, &query)
        .await
        .context("fetching trends from ChatCBI")?;
    write_snapshot(&snapshot, &output)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    let summary = snapshot
        .trends
        .iter()
        .map(|t| format!("{}. {}", t.priority, t.name))
        .collect::<Vec<_>>()
        .join(", ");
    info!(count = snapshot.trends.len(), trends = %summary, "CBI top trends updated");
    Ok(())
}
