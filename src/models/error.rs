#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {code}: {message}")]
    ApiError { code: String, message: String },

    #[error("Not logged in: no session token available")]
    MissingToken,

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Export error: {0}")]
    ExportError(String),
}
