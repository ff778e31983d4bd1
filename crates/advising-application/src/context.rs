//! Application context handed to every page controller.
//!
//! Holds everything a page reads or writes: configuration, the session
//! store, both data sources, the page surface, the request epochs and the
//! renderer. Nothing is read from ambient state.

use std::future::Future;
use std::sync::Arc;

use advising_core::config::AppConfig;
use advising_core::document::DocumentStore;
use advising_core::epoch::EpochRegistry;
use advising_core::fetch::{FetchError, RestFetcher, Transport};
use advising_core::session::{Session, SessionGuard, SessionStore};
use advising_core::storage::ClientStorage;
use advising_core::theme::{DARK_MODE_CLASS, ThemeMode};
use tokio::sync::Mutex;

use crate::error::{PageError, PageResult};
use crate::render::Renderer;
use crate::surface::PageSurface;

pub const THEME_TOGGLE_BUTTON: &str = "theme-toggle-button";

/// Where a fetch result ended up.
#[derive(Debug)]
pub enum Landing<T> {
    /// Current response; render it.
    Fresh(T),
    /// Current failure; render its inline message.
    Failed(FetchError),
    /// A newer request for the same container started meanwhile; drop it.
    Stale,
}

pub struct AppContext {
    config: AppConfig,
    sessions: SessionStore,
    rest: RestFetcher,
    documents: Option<Arc<dyn DocumentStore>>,
    surface: Arc<Mutex<PageSurface>>,
    epochs: EpochRegistry,
    renderer: Renderer,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn ClientStorage>,
        transport: Arc<dyn Transport>,
    ) -> PageResult<Self> {
        Ok(Self {
            config,
            sessions: SessionStore::new(storage),
            rest: RestFetcher::new(transport),
            documents: None,
            surface: Arc::new(Mutex::new(PageSurface::default())),
            epochs: EpochRegistry::new(),
            renderer: Renderer::new()?,
        })
    }

    pub fn with_document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.documents = Some(store);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn rest(&self) -> &RestFetcher {
        &self.rest
    }

    pub fn documents(&self) -> PageResult<Arc<dyn DocumentStore>> {
        self.documents.clone().ok_or(PageError::DocumentStoreMissing)
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn surface(&self) -> Arc<Mutex<PageSurface>> {
        self.surface.clone()
    }

    /// Runs `f` with the surface locked. Never hold this across a fetch.
    pub async fn with_surface<R>(&self, f: impl FnOnce(&mut PageSurface) -> R) -> R {
        let mut surface = self.surface.lock().await;
        f(&mut surface)
    }

    /// A copy of the surface as it is now.
    pub async fn surface_snapshot(&self) -> PageSurface {
        self.surface.lock().await.clone()
    }

    pub async fn apply_theme(&self) -> PageResult<ThemeMode> {
        let mode = self.sessions.theme()?;
        self.with_surface(|s| paint_theme(s, mode)).await;
        Ok(mode)
    }

    pub async fn toggle_theme(&self) -> PageResult<ThemeMode> {
        let mode = self.sessions.theme()?.toggled();
        self.sessions.set_theme(mode)?;
        self.with_surface(|s| paint_theme(s, mode)).await;
        tracing::debug!(theme = mode.as_str(), "theme toggled");
        Ok(mode)
    }

    /// Page entry for protected pages: theme first, then the guard.
    ///
    /// On rejection the surface navigates to login and no request is made.
    pub async fn enter_page(&self, page: &str, guard: &SessionGuard) -> PageResult<Session> {
        self.with_surface(|s| s.set_page(page)).await;
        self.apply_theme().await?;

        let snapshot = self.sessions.snapshot()?;
        match guard.admit(&snapshot) {
            Ok(session) => {
                tracing::info!(page, role = %session.role, "page entered");
                Ok(session)
            }
            Err(rejection) => {
                tracing::warn!(page, reason = %rejection, "page entry refused");
                let login = self.config.login_page.clone();
                self.with_surface(|s| s.navigate(login)).await;
                Err(PageError::Rejected(rejection))
            }
        }
    }

    /// Page entry for public pages. Returns the session when a valid one exists.
    pub async fn enter_public_page(&self, page: &str) -> PageResult<Option<Session>> {
        self.with_surface(|s| s.set_page(page)).await;
        self.apply_theme().await?;

        let snapshot = self.sessions.snapshot()?;
        let session = SessionGuard::any_role().admit(&snapshot).ok();
        tracing::info!(page, signed_in = session.is_some(), "page entered");
        Ok(session)
    }

    /// User-initiated sign-out.
    pub async fn logout(&self) -> PageResult<()> {
        self.sessions.clear_all()?;
        tracing::info!("logged out");
        let login = self.config.login_page.clone();
        self.with_surface(|s| s.navigate(login)).await;
        Ok(())
    }

    /// Sign-out after an authentication failure. Storage errors are logged;
    /// navigation happens regardless.
    pub async fn force_logout(&self) {
        if let Err(e) = self.sessions.clear_all() {
            tracing::error!(error = %e, "failed to clear client storage");
        }
        tracing::warn!("session ended after authentication failure");
        let login = self.config.login_page.clone();
        self.with_surface(|s| s.navigate(login)).await;
    }

    /// Applies the global side effect of a failed request: authentication
    /// failures end the session.
    pub async fn settle<T>(&self, outcome: Result<T, FetchError>) -> Result<T, FetchError> {
        if let Err(e) = &outcome {
            if e.is_auth_failure() {
                self.force_logout().await;
            }
        }
        outcome
    }

    /// Sets a form field's value, as typing into it would.
    pub async fn fill(&self, id: &str, value: &str) {
        self.with_surface(|s| s.set_value(id, value)).await;
    }

    /// Runs a fetch for `container` under a fresh epoch.
    ///
    /// Authentication failures end the session whether or not the response
    /// is still current.
    pub async fn land<T, Fut>(&self, container: &str, fetch: Fut) -> Landing<T>
    where
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let epoch = self.epochs.begin(container);
        let outcome = self.settle(fetch.await).await;

        if !self.epochs.is_current(&epoch) {
            tracing::warn!(container, epoch = epoch.value(), "discarding stale response");
            return Landing::Stale;
        }

        match outcome {
            Ok(value) => Landing::Fresh(value),
            Err(e) => {
                tracing::debug!(container, error = %e, "fetch failed");
                Landing::Failed(e)
            }
        }
    }
}

fn paint_theme(surface: &mut PageSurface, mode: ThemeMode) {
    if mode.is_dark() {
        surface.add_body_class(DARK_MODE_CLASS);
    } else {
        surface.remove_body_class(DARK_MODE_CLASS);
    }
    surface.set_text(THEME_TOGGLE_BUTTON, mode.toggle_label());
}
