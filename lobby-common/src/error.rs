//! Errors shared by the ProductLobby crates
//!
//! Covers the failures the library layer can actually produce: database
//! access, filesystem access, and configuration. HTTP-facing errors live in
//! the service crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data folder creation or other filesystem failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing config file, unreadable setting, or bad setting value
    #[error("Configuration error: {0}")]
    Config(String),
}
