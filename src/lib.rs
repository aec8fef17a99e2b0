//! tfdemo - declarative resource loading and variable resolution
//!
//! Loads Terraform JSON configuration into a declaration set keyed by
//! `(kind, name)`, and resolves named variables from positional arguments
//! with an injected environment as fallback.

pub mod output;
pub mod providers;
pub mod resolver;
pub mod resource;
pub mod template;
pub mod terraform;

mod error;

pub use error::TfError;
pub use resolver::{EnvLookup, VariableBinding, VariableSpec, resolve, resolve_all};
pub use resource::{AttributeValue, Attributes, DeclarationError, DeclarationSet, ResourceSpec};
pub use template::{render, render_strict};
pub use terraform::{ConfigError, Configuration};
