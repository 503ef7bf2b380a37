//! Configuration, time source and wire/result types

pub mod clock;
pub mod config;
pub mod models;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CbiConfig, Region};
pub use models::{ChatAnswer, ChatResult};
pub use token::CachedToken;
