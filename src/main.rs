use chrono::Local;
use clap::Parser;
use trello_weekly::utils::{logger, validation::Validate};
use trello_weekly::{
    CardProvisioner, CardsConfig, CliConfig, ProvisionSummary, Result, ScheduleResolver,
    TrelloClient, TrelloCredentials,
};

async fn run(config: &CliConfig) -> Result<ProvisionSummary> {
    let credentials = TrelloCredentials::from_env()?;

    let cards_config = CardsConfig::from_file(config.cards_path())?;
    cards_config.validate()?;
    tracing::info!("Loaded {} card templates", cards_config.cards.len());

    let start_day = config.resolve_start_day()?;
    let resolver = ScheduleResolver::new(config.week, start_day);
    let ctx = resolver.resolve(Local::now().date_naive(), config.position, config.dry_run)?;

    let client = TrelloClient::new(credentials)?;
    let provisioner = CardProvisioner::new(client, ctx);
    provisioner.run(&cards_config.cards).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting Trello weekly list creator");
    if config.dry_run {
        tracing::info!("Running in DRY-RUN mode - no changes will be made");
    }

    // 驗證 CLI 參數
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    match run(&config).await {
        Ok(summary) if summary.skipped_existing => {
            println!(
                "⚠️ List '{}' already exists, nothing created",
                summary.list_name
            );
        }
        Ok(summary) if config.dry_run => {
            println!("✅ Dry-run complete for list '{}'", summary.list_name);
        }
        Ok(summary) => {
            tracing::info!("Weekly list creation completed successfully");
            println!(
                "✅ Created list '{}' with {} cards",
                summary.list_name, summary.cards_created
            );
        }
        Err(e) => {
            tracing::error!("❌ Weekly list creation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
