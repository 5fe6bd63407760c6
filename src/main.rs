use clap::Parser;
use tenant_upsert::core::GroupsApi;
use tenant_upsert::utils::{error::AppError, logger, validation::Validate};
use tenant_upsert::{CliConfig, HttpGroupsClient, Settings, TenantUpserter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting tenant-upsert");

    let settings = match Settings::load(&config.overrides()) {
        Ok(settings) => settings,
        Err(e) => fail(e),
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        fail(e);
    }

    let client = match HttpGroupsClient::from_settings(&settings) {
        Ok(client) => client,
        Err(e) => fail(e),
    };
    tracing::info!("🚀 Upserting tenant groups at {}", client.endpoint());

    let upserter = TenantUpserter::new(client).with_dry_run(settings.dry_run);

    match upserter.run(&settings.csv_path).await {
        Ok(summary) => {
            tracing::info!(
                "✅ Done: {} upserted, {} failed, {} skipped",
                summary.upserted(),
                summary.failed(),
                summary.skipped()
            );
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: AppError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
