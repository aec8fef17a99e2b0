use std::path::PathBuf;

use thiserror::Error;

use crate::resource::DeclarationError;

/// Errors raised while loading a configuration document.
///
/// Any of these aborts the load: no partially-populated configuration is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be read from disk
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid Terraform JSON
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider '{provider}' is missing a version constraint")]
    MissingVersion { provider: String },

    #[error("provider '{provider}' is required more than once")]
    DuplicateProvider { provider: String },

    #[error("resource {address}: {message}")]
    InvalidResource { address: String, message: String },

    /// Attribute value is not a string, integer, bool or string map
    #[error("resource {address}: unsupported value for attribute '{attribute}'")]
    UnsupportedAttribute { address: String, attribute: String },

    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}
