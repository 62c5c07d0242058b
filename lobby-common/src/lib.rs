//! # ProductLobby Common Library
//!
//! Shared code for the ProductLobby backend including:
//! - Database initialization and models
//! - Domain event types (LobbyEvent enum)
//! - Configuration and data folder resolution
//! - Pure scoring calculators (signal score, sentiment, retention, weather)

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod scoring;

pub use error::{Error, Result};
