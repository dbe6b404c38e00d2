use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value could not be interpreted.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// Why the value was rejected
        reason: String,
    },
}
