//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_TITLE, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::{Dataset, ReadingsStore};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub store: Arc<ReadingsStore>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config).await?;

        match command {
            Some(Commands::Check) => app.check().await,
            Some(Commands::Start) | None => Self::start_server(app).await,
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let store = Arc::new(
            ReadingsStore::init(&config.datasets)
                .await
                .context("Failed to open dataset databases")?,
        );
        let shutdown = ShutdownService::new(store.clone());

        Ok(Self {
            shutdown,
            config,
            store,
        })
    }

    /// Count rows in every dataset to prove the files are readable
    async fn check(self) -> Result<()> {
        for dataset in Dataset::ALL {
            let (count,): (i64,) =
                sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", dataset.table()))
                    .fetch_one(self.store.pool(dataset))
                    .await
                    .with_context(|| format!("Failed to read {} table", dataset.table()))?;
            println!(
                "{:<12} {:<10} {:>8} rows  {}",
                dataset.slug(),
                dataset.table(),
                count,
                self.config.datasets.path(dataset).display()
            );
        }
        self.store.close().await;
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", env!("CARGO_CRATE_NAME"));

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        app.shutdown.install_signal_handlers();

        tracing::info!(
            host = %app.config.server.host,
            port = app.config.server.port,
            "{} listening",
            APP_TITLE
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }
}
