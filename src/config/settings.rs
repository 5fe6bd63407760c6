use crate::config::toml_config::TomlConfig;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const TOKEN_ENV: &str = "PELANOR_API_TOKEN";
pub const BASE_URL_ENV: &str = "PELANOR_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.pelanor.io";
pub const DEFAULT_CSV_PATH: &str = "example_tenants.csv";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Bearer token. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Values given explicitly on the command line. They win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub csv_path: Option<String>,
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub env_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub dry_run: bool,
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub csv_path: String,
    pub base_url: String,
    pub api_token: ApiToken,
    pub timeout: Duration,
    pub dry_run: bool,
}

impl Settings {
    /// Loads the `.env` file and the TOML file, then resolves against the process environment.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        load_env_file(overrides.env_file.as_deref())?;

        let file = match &overrides.config_file {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        Self::resolve(overrides, file, |key| std::env::var(key).ok())
    }

    /// Precedence, highest first: overrides, environment, config file, defaults.
    /// Empty values count as unset.
    pub fn resolve(
        overrides: &Overrides,
        file: TomlConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_token = first_non_empty([
            overrides.api_token.clone(),
            env(TOKEN_ENV),
            file.api.token,
        ])
        .map(ApiToken::new)
        .ok_or_else(|| AppError::MissingCredential {
            variable: TOKEN_ENV.to_string(),
        })?;

        let base_url = first_non_empty([
            overrides.base_url.clone(),
            env(BASE_URL_ENV),
            file.api.base_url,
        ])
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let csv_path = first_non_empty([overrides.csv_path.clone(), file.input.csv_path])
            .unwrap_or_else(|| DEFAULT_CSV_PATH.to_string());

        let timeout_seconds = overrides
            .timeout_seconds
            .or(file.api.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(Self {
            csv_path,
            base_url,
            api_token,
            timeout: Duration::from_secs(timeout_seconds),
            dry_run: overrides.dry_run,
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_path("csv_path", &self.csv_path)?;
        validation::validate_range(
            "timeout_seconds",
            self.timeout.as_secs(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validation::validate_non_empty_string("api_token", self.api_token.expose())?;
        Ok(())
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// An explicit `--env-file` must exist; the default `.env` is optional.
/// Variables already set in the environment are never overwritten.
fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| AppError::ConfigError {
                message: format!("cannot load env file {}: {}", path.display(), e),
            })?;
            tracing::debug!("Loaded environment from {}", path.display());
        }
        None => match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => {
                return Err(AppError::ConfigError {
                    message: format!("cannot load .env file: {}", e),
                })
            }
        },
    }
    Ok(())
}
