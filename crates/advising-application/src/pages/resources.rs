//! Public resource catalog.
//!
//! Fetches the catalog once per load, keeps it in a [`CatalogState`], and
//! re-renders the visible subset whenever the category selection changes.
//! Filtering never refetches.

use std::sync::Arc;

use advising_core::fetch::Endpoint;
use advising_core::filter::{ALL_CATEGORIES, CatalogState, CategoryFilter};
use advising_core::payload::{Resource, ResourcesPayload};
use advising_core::session::Session;
use tokio::sync::RwLock;

use super::LOGOUT_BUTTON;
use crate::context::{AppContext, Landing};
use crate::error::PageResult;
use crate::render::{ListItem, NavLink, SelectOption, Tone};

pub const PAGE: &str = "resources.html";

pub const NAV_LINKS: &str = "nav-links";
pub const RESOURCES_LIST: &str = "resources-ul";
pub const CATEGORY_FILTER: &str = "category-filter";

const EMPTY_CATALOG: &str = "No resources available.";
const NO_MATCHES: &str = "No resources found matching your criteria.";

pub struct ResourcesPage {
    ctx: Arc<AppContext>,
    catalog: RwLock<CatalogState<Resource>>,
}

impl ResourcesPage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            catalog: RwLock::new(CatalogState::default()),
        }
    }

    pub async fn load(&self) -> PageResult<()> {
        let session = self.ctx.enter_public_page(PAGE).await?;
        self.render_nav(session.as_ref()).await?;

        let loading = self
            .ctx
            .renderer()
            .placeholder_item("Loading resources...", Tone::Loading)?;
        self.ctx
            .with_surface(|s| s.set_html(RESOURCES_LIST, loading))
            .await;

        let bearer = session.as_ref().map(|s| s.token.as_str());
        let fetch = self
            .ctx
            .rest()
            .get::<ResourcesPayload>(&Endpoint::Resources, bearer);

        match self.ctx.land(RESOURCES_LIST, fetch).await {
            Landing::Fresh(reply) => {
                let count = reply.payload.resources.len();
                {
                    let mut catalog = self.catalog.write().await;
                    catalog.replace(reply.payload.resources);
                    catalog.select(CategoryFilter::All);
                }
                tracing::debug!(count, "resources loaded");
                self.render_categories().await?;
                self.render_visible().await
            }
            Landing::Failed(e) => {
                let message = format!("Error: {}", e.inline_message("Could not load resources."));
                let html = self.ctx.renderer().placeholder_item(&message, Tone::Error)?;
                self.ctx.with_surface(|s| s.set_html(RESOURCES_LIST, html)).await;
                Ok(())
            }
            Landing::Stale => Ok(()),
        }
    }

    /// Applies a dropdown selection (`"all"` or a category name).
    pub async fn select_category(&self, selection: &str) -> PageResult<()> {
        self.catalog
            .write()
            .await
            .select(CategoryFilter::from_selection(selection));
        self.ctx
            .with_surface(|s| s.set_value(CATEGORY_FILTER, selection))
            .await;
        self.render_visible().await
    }

    /// Dropdown values in display order, the "all" option first.
    pub async fn category_options(&self) -> Vec<String> {
        let catalog = self.catalog.read().await;
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(catalog.categories())
            .collect()
    }

    /// Titles of the resources the current selection shows.
    pub async fn visible_titles(&self) -> Vec<String> {
        self.catalog
            .read()
            .await
            .visible()
            .into_iter()
            .map(resource_title)
            .collect()
    }

    pub async fn logout(&self) -> PageResult<()> {
        self.ctx.logout().await
    }

    async fn render_nav(&self, session: Option<&Session>) -> PageResult<()> {
        let links = match session {
            Some(session) => vec![
                link(session.role.dashboard_path(), "Dashboard", false),
                link(PAGE, "Resources", true),
                link(session.role.profile_path(), "My Profile", false),
            ],
            None => vec![
                link(&self.ctx.config().login_page, "Login", false),
                link(PAGE, "Resources", true),
            ],
        };
        let html = self.ctx.renderer().nav(&links)?;
        let signed_in = session.is_some();
        self.ctx
            .with_surface(|s| {
                s.set_html(NAV_LINKS, html);
                if signed_in {
                    s.show(LOGOUT_BUTTON);
                } else {
                    s.hide(LOGOUT_BUTTON);
                }
            })
            .await;
        Ok(())
    }

    async fn render_categories(&self) -> PageResult<()> {
        let mut options = vec![SelectOption {
            value: ALL_CATEGORIES.to_string(),
            label: "All Categories".to_string(),
        }];
        options.extend(
            self.catalog
                .read()
                .await
                .categories()
                .into_iter()
                .map(|c| SelectOption {
                    value: c.clone(),
                    label: c,
                }),
        );

        let html = self.ctx.renderer().options(&options)?;
        self.ctx
            .with_surface(|s| {
                s.set_html(CATEGORY_FILTER, html);
                s.set_value(CATEGORY_FILTER, ALL_CATEGORIES);
            })
            .await;
        Ok(())
    }

    async fn render_visible(&self) -> PageResult<()> {
        let (items, empty_message) = {
            let catalog = self.catalog.read().await;
            let items: Vec<ListItem> = catalog.visible().into_iter().map(list_item).collect();
            let empty = if catalog.items().is_empty() {
                EMPTY_CATALOG
            } else {
                NO_MATCHES
            };
            (items, empty)
        };

        let html = if items.is_empty() {
            self.ctx
                .renderer()
                .placeholder_item(empty_message, Tone::Info)?
        } else {
            self.ctx.renderer().list(&items, empty_message)?
        };
        self.ctx.with_surface(|s| s.set_html(RESOURCES_LIST, html)).await;
        Ok(())
    }
}

fn link(href: &str, label: &str, active: bool) -> NavLink {
    NavLink {
        href: href.to_string(),
        label: label.to_string(),
        active,
    }
}

fn resource_title(resource: &Resource) -> String {
    resource
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Unnamed Resource".to_string())
}

pub(crate) fn list_item(resource: &Resource) -> ListItem {
    let category = resource
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("General");
    ListItem {
        title: resource_title(resource),
        url: resource.url.clone().filter(|u| !u.trim().is_empty()),
        description: Some(
            resource
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description available.".to_string()),
        ),
        meta: Some(format!("Category: {category}")),
    }
}
