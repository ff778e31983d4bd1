pub mod action;
pub mod page;
pub mod session;

use std::path::PathBuf;
use std::sync::Arc;

use advising_application::{AppContext, PageError, PageResult, build_context, file_storage};
use advising_infrastructure::ConfigService;
use anyhow::{Context, Result};

/// A loaded configuration and the context every command runs against.
pub struct Client {
    ctx: Arc<AppContext>,
}

impl Client {
    pub fn open(config: Option<PathBuf>, storage: Option<PathBuf>) -> Result<Self> {
        let service = match config {
            Some(path) => ConfigService::new(path),
            None => ConfigService::with_default_location()?,
        };
        let config = service
            .get_config()
            .with_context(|| format!("Failed to load {}", service.path().display()))?;

        tracing::debug!(
            "Using backend {} (document database: {})",
            config.backend_base_url,
            config.document_db.is_some()
        );
        let storage = file_storage(storage)?;
        let ctx = build_context(config, storage).context("Failed to set up the client")?;
        Ok(Self { ctx: Arc::new(ctx) })
    }

    pub fn ctx(&self) -> Arc<AppContext> {
        self.ctx.clone()
    }

    /// Prints the page as rendered so far.
    pub async fn print_surface(&self) {
        print!("{}", self.ctx.surface_snapshot().await.dump());
    }

    /// Prints the surface after a page operation. A refused page entry is
    /// not a CLI failure: the surface shows where the page navigated.
    pub async fn finish(&self, result: PageResult<()>) -> Result<()> {
        match result {
            Ok(()) => {
                self.print_surface().await;
                Ok(())
            }
            Err(PageError::Rejected(reason)) => {
                println!("🔒 {reason}");
                self.print_surface().await;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
