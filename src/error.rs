use thiserror::Error;

#[derive(Debug, Error)]
pub enum TfError {
    #[error(transparent)]
    Config(#[from] crate::terraform::ConfigError),

    #[error(transparent)]
    Declaration(#[from] crate::resource::DeclarationError),

    #[error(transparent)]
    Template(#[from] crate::template::TemplateError),

    #[error(transparent)]
    Provider(#[from] crate::providers::ProviderError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
