use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    LoggingConfig, QrConfig, ServerConfig, TenancyConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub tenancy: TenancyConfig,
    pub qr: QrConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. RA_CONFIG_DIR env var, else ./.roomapp/
    /// 2. Create the config directory if it doesn't exist
    /// 3. config.toml if present, else defaults
    /// 4. RA_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: RA_CONFIG_DIR env var > ./.roomapp/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Call after load() so every problem surfaces at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.tenancy.validate()?;
        self.qr.validate()?;

        if let Some(file) = &self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::config(
                "logging.file must be a relative file name and cannot contain '..'",
            ));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Absolute log file path, or None for stdout.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file))),
            None => Ok(None),
        }
    }

    /// Log configuration summary (never logs the signing secret).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  tenancy: base_domain={}, extra reserved={:?}",
            self.tenancy.base_domain, self.tenancy.reserved_subdomains
        );
        info!(
            "  qr: base_url={}, max_age={}s, skew={}s, signing={}{}",
            self.qr.base_url,
            self.qr.max_age_secs,
            self.qr.max_clock_skew_secs,
            if self.qr.signing_secret.is_some() {
                "on"
            } else {
                "off"
            },
            if self.qr.require_signature {
                " (required)"
            } else {
                ""
            }
        );
        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RA_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RA_SERVER_PORT", &mut self.server.port);

        // Tenancy
        Self::apply_env_string("RA_TENANCY_BASE_DOMAIN", &mut self.tenancy.base_domain);
        Self::apply_env_list(
            "RA_TENANCY_RESERVED_SUBDOMAINS",
            &mut self.tenancy.reserved_subdomains,
        );

        // QR
        Self::apply_env_string("RA_QR_BASE_URL", &mut self.qr.base_url);
        Self::apply_env_parse("RA_QR_MAX_AGE_SECS", &mut self.qr.max_age_secs);
        Self::apply_env_parse(
            "RA_QR_MAX_CLOCK_SKEW_SECS",
            &mut self.qr.max_clock_skew_secs,
        );
        Self::apply_env_option_string("RA_QR_SIGNING_SECRET", &mut self.qr.signing_secret);
        Self::apply_env_bool("RA_QR_REQUIRE_SIGNATURE", &mut self.qr.require_signature);

        // Logging
        Self::apply_env_parse("RA_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RA_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RA_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored and the previous value kept.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Comma-separated, blanks dropped
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}
