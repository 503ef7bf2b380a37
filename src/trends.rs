//! Ranked tech-trend snapshots built from a ChatCBI answer.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::clients::ChatCbiClient;
use crate::errors::TrendsError;

pub const DEFAULT_TRENDS_QUERY: &str = "Get an ordered list of the latest top tech trends from the World Economic forum. \
     Show the output in the format: <output>trend priority. name of the trend</output>. \
     Do not display any other characters in the response, not even citations.";

pub const DEFAULT_TRENDS_OUTPUT: &str = "public/data/cbi-trends.json";

static TREND_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)[.\s]+(.+)$").expect("trend line regex is valid"));

static OUTPUT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?output>").expect("output tag regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub priority: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsSnapshot {
    pub last_update: DateTime<Utc>,
    pub query: String,
    pub trends: Vec<Trend>,
    pub raw_response: String,
    pub sources: Vec<Value>,
}

/// Parses lines shaped like `1. Name` or `1 Name`; everything else is skipped.
#[must_use]
pub fn parse_trends(text: &str) -> Vec<Trend> {
    let cleaned = OUTPUT_TAG.replace_all(text, "\n");
    cleaned
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let caps = TREND_LINE.captures(line)?;
            let priority = caps.get(1)?.as_str().parse().ok()?;
            let name = caps.get(2)?.as_str().trim();
            (!name.is_empty()).then(|| Trend {
                priority,
                name: name.to_string(),
            })
        })
        .collect()
}

/// # Errors
///
/// Returns an error if the ChatCBI request fails.
pub async fn fetch_snapshot(
    client: &ChatCbiClient,
    query: &str,
) -> Result<TrendsSnapshot, TrendsError> {
    let payload = client.try_ask(query).await?;

    let raw_response = ["message", "answer"]
        .iter()
        .filter_map(|k| payload.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string();
    let trends = parse_trends(&raw_response);
    info!(count = trends.len(), "Parsed trends from ChatCBI answer");

    let sources = payload
        .get("sources")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(TrendsSnapshot {
        last_update: Utc::now(),
        query: query.to_string(),
        trends,
        raw_response,
        sources,
    })
}

/// Writes the snapshot as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub async fn write_snapshot(snapshot: &TrendsSnapshot, path: &Path) -> Result<(), TrendsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(path, json).await?;
    info!(path = %path.display(), "Trends snapshot written");
    Ok(())
}
