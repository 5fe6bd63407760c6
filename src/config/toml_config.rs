use crate::utils::error::{AppError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `--config` file. Every key may be omitted.
///
/// ```toml
/// [api]
/// base_url = "https://api.pelanor.io"
/// token = "${PELANOR_API_TOKEN}"
/// timeout_seconds = 30
///
/// [input]
/// csv_path = "tenants.csv"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub input: InputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSection {
    pub csv_path: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            message: format!("cannot read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable, or with
    /// an empty string when it is unset.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Config references unset environment variable {}", var_name);
                String::new()
            })
        });

        Ok(result.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://billing.example.com"
token = "abc"
timeout_seconds = 10

[input]
csv_path = "tenants.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.base_url.as_deref(), Some("https://billing.example.com"));
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.api.timeout_seconds, Some(10));
        assert_eq!(config.input.csv_path.as_deref(), Some("tenants.csv"));
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(config.api.base_url.is_none());
        assert!(config.api.token.is_none());
        assert!(config.input.csv_path.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TOML_CONFIG_TEST_TOKEN", "from-env");

        let config = TomlConfig::from_toml_str(
            r#"
[api]
token = "${TOML_CONFIG_TEST_TOKEN}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.token.as_deref(), Some("from-env"));

        std::env::remove_var("TOML_CONFIG_TEST_TOKEN");
    }

    #[test]
    fn test_unset_env_var_becomes_empty() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
token = "${TOML_CONFIG_TEST_SURELY_UNSET}"
"#,
        )
        .unwrap();

        assert_eq!(config.api.token.as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
[api]
base_uri = "https://typo.example.com"
"#,
        );

        assert!(matches!(result, Err(AppError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\ncsv_path = \"from-file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input.csv_path.as_deref(), Some("from-file.csv"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = TomlConfig::from_file("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(AppError::ConfigError { .. })));
    }
}
