pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpGroupsClient;
pub use config::settings::{ApiToken, Overrides, Settings};
pub use core::upserter::{RowOutcome, RunSummary, TenantUpserter};
pub use domain::payload::build_payload;
pub use utils::error::{AppError, Result, UpsertError};
