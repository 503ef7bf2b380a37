use std::env;
use std::process::ExitCode;

use anyhow::{Context, bail};
use chatcbi::clients::ChatCbiClient;
use chatcbi::core::config::CbiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    chatcbi::setup_logging();

    let question = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        bail!("usage: chatcbi-ask <question>");
    }

    let config = CbiConfig::from_env().context("loading ChatCBI configuration")?;
    let client = ChatCbiClient::new(config)?;

    let result = client.ask(&question).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
