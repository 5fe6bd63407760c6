pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::Overrides;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "tenant-upsert")]
#[command(about = "Create or update tenant cost groups from a CSV of tenant names")]
pub struct CliConfig {
    /// CSV file with a `name` column [default: example_tenants.csv]
    #[arg(long)]
    pub csv: Option<String>,

    /// API base URL; also read from PELANOR_BASE_URL [default: https://api.pelanor.io]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Bearer token; also read from PELANOR_API_TOKEN
    #[arg(long)]
    pub api_token: Option<String>,

    /// .env file to load before reading the environment [default: ./.env if present]
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Build and log the payloads without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            csv_path: self.csv.clone(),
            base_url: self.base_url.clone(),
            api_token: self.api_token.clone(),
            timeout_seconds: self.timeout_seconds,
            env_file: self.env_file.clone(),
            config_file: self.config.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = CliConfig::parse_from(["tenant-upsert"]);
        let overrides = cli.overrides();

        assert!(overrides.csv_path.is_none());
        assert!(overrides.api_token.is_none());
        assert!(!overrides.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = CliConfig::parse_from([
            "tenant-upsert",
            "--csv",
            "tenants.csv",
            "--base-url",
            "http://localhost:8080",
            "--api-token",
            "tok",
            "--env-file",
            "secrets.env",
            "-c",
            "upsert.toml",
            "--timeout-seconds",
            "5",
            "--dry-run",
            "-v",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.csv_path.as_deref(), Some("tenants.csv"));
        assert_eq!(overrides.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(overrides.api_token.as_deref(), Some("tok"));
        assert_eq!(overrides.env_file, Some(PathBuf::from("secrets.env")));
        assert_eq!(overrides.config_file, Some(PathBuf::from("upsert.toml")));
        assert_eq!(overrides.timeout_seconds, Some(5));
        assert!(overrides.dry_run);
        assert!(cli.verbose);
    }
}
