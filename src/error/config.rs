use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires this environment variable to be defined. Check the
    /// `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but could not be parsed.
    ///
    /// # Fields
    /// - Name of the variable
    /// - Raw value that failed to parse
    #[error("Invalid value for environment variable {0}: {1:?}")]
    InvalidEnvVar(String, String),
}
