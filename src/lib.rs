/// portfolio-term library
///
/// A portfolio presented as a simulated terminal session.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod payload;
pub mod remote;

// Re-exports for convenience
pub use config::{Profile, Settings};
pub use db::Database;
pub use error::{PortfolioError, Result};
