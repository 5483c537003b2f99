use thiserror::Error;

#[derive(Error, Debug)]
pub enum RapportError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} environment variable is required")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
