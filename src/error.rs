//! Error types for the tootbot daemon.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Fetch errors
    #[error("Response code was {status} from url {url}")]
    Fetch { status: u16, url: String },

    #[error("API error: {0}")]
    Api(String),

    // Publish errors
    #[error("Media upload failed: {0}")]
    Upload(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    // Dedup store errors
    #[error("Dedup store unavailable: {0}")]
    StoreUnavailable(#[from] redis::RedisError),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Short class name used in recorded failure outcomes.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                "ConfigError"
            }
            Error::Fetch { .. } | Error::Http(_) => "FetchError",
            Error::Api(_) => "ApiError",
            Error::Upload(_) => "UploadError",
            Error::Publish(_) => "PublishError",
            Error::StoreUnavailable(_) => "StoreUnavailable",
            Error::InvalidFilename(_) => "InvalidFilename",
            Error::Io(_) => "IoError",
            Error::Json(_) => "JsonError",
            Error::TomlParse(_) => "TomlParseError",
            Error::UrlParse(_) => "UrlParseError",
        }
    }

    /// Whether this error came from the configuration layer.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
