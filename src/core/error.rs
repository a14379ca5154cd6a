use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Trait fetch error: {0}")]
    FetchError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
