//! Configuration for petaldoc runs.
//!
//! [`Config`] is read from TOML or JSON, layered across several files and
//! adjusted with `KEY=VALUE` overrides. The built-in [`catalog`] tables
//! describe the Flowery control gallery and serve as defaults.

pub mod catalog;
pub mod config;
pub mod error;
pub mod limits;
pub mod templates;

pub use config::Config;
pub use error::ConfigError;
pub use limits::LimitsConfig;
