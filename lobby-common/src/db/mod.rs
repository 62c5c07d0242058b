//! Database access layer

pub mod init;
pub mod models;

pub use init::init_database;

/// Guid of the seeded Anonymous user
pub const ANONYMOUS_USER_GUID: &str = "00000000-0000-0000-0000-000000000001";
