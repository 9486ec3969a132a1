//! Client configuration
//!
//! Each group is a `clap` [`Args`](clap::Args) block with environment variable
//! fallbacks, flattened into the command line of the `gryadka` binary.

pub mod api;
pub mod logging;
pub mod storage;

pub use api::ApiConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;
