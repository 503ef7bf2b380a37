//! ChatCBI - a small client for the CB Insights conversational API.
//!
//! The crate exchanges client credentials for a bearer token, caches it in
//! memory, and relays questions to the ChatCBI endpoint, returning either the
//! upstream JSON or a normalized error.
//!
//! # Architecture
//!
//! - `clients::TokenProvider` owns the token cache and refresh policy
//! - `clients::ChatCbiClient` relays questions and never fails the caller
//! - `api` wraps the relay in an AWS Lambda proxy with CORS
//! - `trends` turns a ranked-list answer into a JSON snapshot
//!
//! # Example
//!
//! ```no_run
//! use chatcbi::clients::ChatCbiClient;
//! use chatcbi::core::config::CbiConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     chatcbi::setup_logging();
//!
//!     let config = CbiConfig::from_env()?;
//!     let client = ChatCbiClient::new(config)?;
//!
//!     let result = client.ask("What are the latest AI trends in fintech?").await;
//!     if let Some(answer) = result.answer() {
//!         println!("{}", answer.answer);
//!         for citation in answer.citations {
//!             println!("- {} ({})", citation.title, citation.url);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod trends;

pub use crate::clients::{ChatCbiClient, TokenProvider, TokenSource};
pub use crate::core::{CbiConfig, ChatResult};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to stderr and honours `RUST_LOG` (default `info`). Calling it
/// more than once is harmless; later calls keep the first subscriber.
///
/// # Example
///
/// ```
/// chatcbi::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
