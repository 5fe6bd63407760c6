use crate::core::source::TenantReader;
use crate::domain::model::TenantRecord;
use crate::domain::payload::build_payload;
use crate::domain::ports::GroupsApi;
use crate::utils::error::{Result, UpsertError};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// What happened to one CSV row.
#[derive(Debug)]
pub enum RowOutcome {
    Upserted { tenant: String },
    Failed { tenant: String, error: UpsertError },
    Skipped { line: u64 },
    DryRun { tenant: String },
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowOutcome::Upserted { tenant } => write!(f, "✔  Upserted tenant '{}'", tenant),
            RowOutcome::Failed { tenant, error } => {
                write!(f, "✖  Failed for '{}': {}", tenant, error)
            }
            RowOutcome::Skipped { line } => {
                write!(f, "•  Skipping row with empty tenant name (line {})", line)
            }
            RowOutcome::DryRun { tenant } => write!(f, "○  Would upsert tenant '{}'", tenant),
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub outcomes: Vec<RowOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn upserted(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Upserted { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::DryRun { .. }))
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(*o)).count()
    }
}

/// Creates or updates one tenant group per CSV row, one row at a time.
pub struct TenantUpserter<A: GroupsApi> {
    api: A,
    dry_run: bool,
}

impl<A: GroupsApi> TenantUpserter<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sends a single upsert. `name` must already be trimmed and non-empty.
    pub async fn upsert_tenant(&self, name: &str) -> std::result::Result<(), UpsertError> {
        let group = build_payload(name);
        tracing::debug!("PUT {} for tenant '{}'", self.api.endpoint(), name);
        self.api.put_group(&group).await
    }

    pub async fn run<P: AsRef<Path>>(&self, csv_path: P) -> Result<RunSummary> {
        let csv_path = csv_path.as_ref();
        tracing::info!("📁 Reading tenants from {}", csv_path.display());
        let reader = TenantReader::from_path(csv_path)?;
        self.run_records(reader).await
    }

    /// Same as [`run`](Self::run) over an already opened CSV source.
    pub async fn run_reader<R: Read>(&self, reader: R, source: &str) -> Result<RunSummary> {
        let reader = TenantReader::from_reader(reader, source)?;
        self.run_records(reader).await
    }

    async fn run_records<R: Read>(&self, reader: TenantReader<R>) -> Result<RunSummary> {
        let started_at = Utc::now();
        let mut outcomes = Vec::new();

        if self.dry_run {
            tracing::info!("🔍 DRY RUN MODE - no requests will be sent");
        }

        for record in reader {
            let outcome = self.process(record?).await?;
            println!("{}", outcome);
            outcomes.push(outcome);
        }

        let summary = RunSummary {
            outcomes,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Processed {} rows: {} upserted, {} failed, {} skipped, {} planned in {}ms",
            summary.outcomes.len(),
            summary.upserted(),
            summary.failed(),
            summary.skipped(),
            summary.planned(),
            summary.elapsed().num_milliseconds()
        );

        Ok(summary)
    }

    async fn process(&self, record: TenantRecord) -> Result<RowOutcome> {
        let Some(tenant) = record.tenant_name() else {
            tracing::warn!("Row at line {} has an empty tenant name", record.line);
            return Ok(RowOutcome::Skipped { line: record.line });
        };
        let tenant = tenant.to_string();

        if self.dry_run {
            let body = serde_json::to_string(&build_payload(&tenant))?;
            tracing::info!("Would PUT {} {}", self.api.endpoint(), body);
            return Ok(RowOutcome::DryRun { tenant });
        }

        match self.upsert_tenant(&tenant).await {
            Ok(()) => {
                tracing::debug!("Tenant '{}' upserted", tenant);
                Ok(RowOutcome::Upserted { tenant })
            }
            Err(error) => {
                tracing::warn!(
                    "Upsert failed for '{}' (status: {:?}, timeout: {}): {}",
                    tenant,
                    error.status(),
                    error.is_timeout(),
                    error
                );
                Ok(RowOutcome::Failed { tenant, error })
            }
        }
    }
}
