use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ra_config::ConfigError),

    #[error("QR codec error: {0}")]
    Qr(#[from] ra_qr::QrError),

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to initialize logger: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
