//! ServerBuilder for fluent API to build HTTP servers

use crate::core::{ApiError, CompanyService, InvoiceService};
use crate::entities::{CompanyDescriptor, InvoiceDescriptor};
use anyhow::Result;
use axum::{Json, Router, http::Uri, routing::get};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// let app = ServerBuilder::new()
///     .with_services(store.clone(), store)
///     .build()?;
/// ```
pub struct ServerBuilder {
    resources: Option<(CompanyDescriptor, InvoiceDescriptor)>,
    cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            resources: None,
            cors: false,
        }
    }

    /// Register the company and invoice resources over the given services
    pub fn with_services(
        mut self,
        companies: Arc<dyn CompanyService>,
        invoices: Arc<dyn InvoiceService>,
    ) -> Self {
        self.resources = Some((
            CompanyDescriptor::new(companies, invoices.clone()),
            InvoiceDescriptor::new(invoices),
        ));
        self
    }

    /// Allow cross-origin requests from any origin
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - CRUD routes for companies and invoices
    /// - A JSON 404 for any other path
    pub fn build(self) -> Result<Router> {
        let Some((companies, invoices)) = self.resources else {
            anyhow::bail!("No services registered. Call .with_services() first");
        };

        let resources = [CompanyDescriptor::PLURAL, InvoiceDescriptor::PLURAL];
        tracing::debug!(?resources, "building routes");

        let mut app = Self::health_routes(&resources)
            .merge(companies.build_routes())
            .merge(invoices.build_routes())
            .fallback(route_not_found)
            .layer(TraceLayer::new_for_http());

        if self.cors {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app)
    }

    /// Build health check routes
    fn health_routes(resources: &[&str]) -> Router {
        let body = Arc::new(json!({
            "status": "ok",
            "service": "biztime",
            "resources": resources,
        }));
        let health = move || {
            let body = body.clone();
            async move { Json((*body).clone()) }
        };

        Router::new()
            .route("/health", get(health.clone()))
            .route("/healthz", get(health))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("route", uri.path())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
