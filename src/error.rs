use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<&str> for ClockError {
    fn from(error: &str) -> Self {
        ClockError::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClockError>;
