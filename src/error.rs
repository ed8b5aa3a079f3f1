use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldboardError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl From<&str> for FieldboardError {
    fn from(error: &str) -> Self {
        FieldboardError::RuntimeError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FieldboardError>;
