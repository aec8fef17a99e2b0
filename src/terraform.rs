//! Loading of Terraform JSON configuration documents (`*.tf.json`).

mod config;
mod error;

pub use config::{Configuration, DEFAULT_CONFIG_PATH, ProviderRequirement};
pub use error::ConfigError;
