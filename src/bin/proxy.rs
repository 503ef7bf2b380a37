use std::sync::Arc;

use chatcbi::api::handler;
use chatcbi::clients::ChatCbiClient;
use chatcbi::core::config::CbiConfig;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // .env.local wins over .env for local runs; Lambda supplies real env vars.
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    chatcbi::setup_logging();

    let config = CbiConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;

    // One client per execution environment so the token cache survives warm invocations.
    let client = Arc::new(ChatCbiClient::new(config)?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let client = Arc::clone(&client);
        async move { handler(&client, event).await }
    }))
    .await
}
