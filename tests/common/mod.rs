#![allow(dead_code)]

use std::sync::Arc;

use chatcbi::clients::{ChatCbiClient, TokenProvider};
use chatcbi::core::clock::ManualClock;
use chatcbi::core::config::CbiConfig;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

pub fn config_for(server: &MockServer) -> CbiConfig {
    CbiConfig::new(CLIENT_ID, CLIENT_SECRET)
        .unwrap()
        .with_base_url(&format!("{}/v2", server.uri()))
        .unwrap()
}

/// A relay plus handles on its token cache and clock.
pub struct Harness {
    pub client: ChatCbiClient,
    pub tokens: Arc<TokenProvider>,
    pub clock: Arc<ManualClock>,
}

pub fn harness(server: &MockServer) -> Harness {
    harness_with_config(config_for(server))
}

pub fn harness_with_config(config: CbiConfig) -> Harness {
    let config = Arc::new(config);
    let http = reqwest::Client::new();
    let clock = Arc::new(ManualClock::new(start_time()));
    let tokens = Arc::new(TokenProvider::with_clock(
        http.clone(),
        Arc::clone(&config),
        clock.clone(),
    ));
    let client = ChatCbiClient::with_token_source(http, config, tokens.clone());
    Harness {
        client,
        tokens,
        clock,
    }
}

pub fn authorize_ok(token: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/v2/authorize"))
        .and(body_json(json!({
            "clientId": CLIENT_ID,
            "clientSecret": CLIENT_SECRET
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
}

pub fn authorize_status(status: u16, body: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/v2/authorize"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
}

pub fn chat_json(status: u16, body: Value) -> Mock {
    Mock::given(method("POST"))
        .and(path("/v2/chatcbi"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
}
