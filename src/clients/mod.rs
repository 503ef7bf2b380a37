//! Client modules for the ChatCBI API

pub mod chat_client;
pub mod token_provider;

pub use chat_client::ChatCbiClient;
pub use token_provider::{TokenProvider, TokenSource};
