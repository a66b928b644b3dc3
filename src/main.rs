//! BizTime server binary
//!
//! Reads configuration (see `biztime::config`), initializes logging, opens
//! the storage backend and serves until Ctrl+C or SIGTERM.

use biztime::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (companies, invoices) = open_services(&config).await?;

    ServerBuilder::new()
        .with_services(companies, invoices)
        .with_cors(config.server.cors)
        .serve(&config.server.address())
        .await
}

async fn open_services(
    config: &AppConfig,
) -> Result<(Arc<dyn CompanyService>, Arc<dyn InvoiceService>)> {
    match config.database.backend {
        #[cfg(feature = "postgres")]
        Backend::Postgres => {
            let store = Arc::new(
                PostgresStore::connect(&config.database.url, config.database.max_connections)
                    .await?,
            );
            tracing::info!(
                max_connections = config.database.max_connections,
                "connected to PostgreSQL"
            );
            Ok(split(store))
        }
        #[cfg(not(feature = "postgres"))]
        Backend::Postgres => {
            anyhow::bail!("the postgres backend requires the `postgres` feature")
        }
        Backend::InMemory => {
            tracing::warn!("using the in-memory backend; data is lost on shutdown");
            let store = Arc::new(InMemoryStore::new());
            Ok(split(store))
        }
    }
}

/// One store serves both resources
fn split<S>(store: Arc<S>) -> (Arc<dyn CompanyService>, Arc<dyn InvoiceService>)
where
    S: CompanyService + InvoiceService + 'static,
{
    let companies: Arc<dyn CompanyService> = store.clone();
    let invoices: Arc<dyn InvoiceService> = store;
    (companies, invoices)
}
