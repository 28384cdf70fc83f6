mod config;
mod error;
mod log_level;
mod logging_config;
mod qr_config;
mod server_config;
mod tenancy_config;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use qr_config::QrConfig;
pub use server_config::ServerConfig;
pub use tenancy_config::TenancyConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "RA_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".roomapp";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const MIN_PORT: u16 = 1024;

const DEFAULT_BASE_DOMAIN: &str = "localhost";

const DEFAULT_QR_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_QR_MAX_AGE_SECS: u64 = 86_400;
const DEFAULT_QR_MAX_CLOCK_SKEW_SECS: u64 = 300;
const MAX_QR_MAX_AGE_SECS: u64 = 30 * 86_400;
const MIN_SIGNING_SECRET_LEN: usize = 32;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
