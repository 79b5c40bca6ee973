use std::sync::Arc;

use migration::MigratorTrait;
use piggy_bank_bot::{ Config, Result };
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "piggy_bank_bot=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| piggy_bank_bot::AppError::Config(e.to_string()))?;

    // Initialize database connection
    let db = sea_orm::Database::connect(&config.database_url).await?;

    tracing::info!("Database connected successfully");

    // Run migrations
    migration::Migrator::up(&db, None).await?;

    tracing::info!("Migrations completed successfully");

    // Initialize storage and the quote client
    let store: Arc<dyn piggy_bank_bot::db::WalletStore> = Arc::new(
        piggy_bank_bot::db::WalletRepository::new(db)
    );

    let quotes: Arc<dyn piggy_bank_bot::providers::QuoteProvider> = Arc::new(
        piggy_bank_bot::chains::ton::TonProvider::new(
            &config.ton_api_base,
            config.ton_api_key.as_deref()
        )
    );

    let balance_service = Arc::new(
        piggy_bank_bot::services::BalanceService::new(store.clone(), quotes)
    );

    piggy_bank_bot::bot::run_bot(config.telegram_bot_token, store, balance_service).await;

    Ok(())
}
