//! Editing sessions for brochure templates and websites
//!
//! A session owns one document plus a [`BlockEditor`] over the blocks being
//! edited. Persistence goes through an injected collaborator. Failures never
//! discard in-memory work: they are logged and queued as [`Notification`]s,
//! and a cancelled operation leaves the session exactly as it was.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::brochure::BrochureGenerator;
use super::document::render_site_page;
use super::domain::DomainResult;
use super::editor::BlockEditor;
use super::publish::{PublishReceipt, Publisher};
use super::task::{run_cancellable, CancelToken, TaskOutcome};
use crate::core::site::{
    normalize_path, DomainConfig, GeneratedBrochure, Listing, NavConfig, Page, SeoMeta, Site,
    Template, TrackingConfig,
};
use crate::core::theme::{Branding, Theme};
use crate::service::{ServiceError, WebsiteService};
use crate::storage::{StoreError, TemplateRepository};

/// Severity of a [`Notification`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A non-fatal message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, message)
    }

    fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Brochure template editing session
pub struct TemplateSession {
    template: Template,
    editor: BlockEditor,
    repo: Arc<dyn TemplateRepository>,
    notifications: Vec<Notification>,
    dirty: bool,
}

impl TemplateSession {
    pub fn new(template: Template, repo: Arc<dyn TemplateRepository>) -> Self {
        let editor = BlockEditor::from_blocks(template.blocks.clone());
        Self {
            template,
            editor,
            repo,
            notifications: Vec::new(),
            dirty: false,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The template with the editor's current blocks.
    pub fn snapshot(&self) -> Template {
        let mut template = self.template.clone();
        template.blocks = self.editor.blocks().to_vec();
        template
    }

    pub fn editor(&self) -> &BlockEditor {
        &self.editor
    }

    /// Mutable access to the block editor. Marks the session dirty.
    pub fn editor_mut(&mut self) -> &mut BlockEditor {
        self.dirty = true;
        &mut self.editor
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.template.name = name.into();
        self.dirty = true;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.template.description = description;
        self.dirty = true;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.template.theme = theme;
        self.dirty = true;
    }

    pub fn set_branding(&mut self, branding: Branding) {
        self.template.branding = branding;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub async fn save(&mut self, token: &CancelToken) -> TaskOutcome<(), StoreError> {
        let mut snapshot = self.snapshot();
        snapshot.updated_at = Utc::now();
        let repo = Arc::clone(&self.repo);
        let outcome = run_cancellable(token, async {
            repo.save_template(&snapshot).await
        })
        .await;
        match &outcome {
            TaskOutcome::Completed(()) => {
                info!(template_id = %snapshot.id, blocks = snapshot.blocks.len(), "saved template");
                self.template = snapshot;
                self.dirty = false;
                self.notifications
                    .push(Notification::success("Template saved", self.template.name.clone()));
            }
            TaskOutcome::Failed(e) => {
                warn!(template_id = %self.template.id, error = %e, "template save failed");
                self.notifications.push(Notification::error(
                    "Could not save template",
                    e.to_string(),
                ));
            }
            TaskOutcome::Cancelled => {
                debug!(template_id = %self.template.id, "template save cancelled");
            }
        }
        outcome
    }

    /// Generate a brochure from the current editor state.
    pub async fn generate(
        &mut self,
        generator: &BrochureGenerator,
        listing_ids: &[String],
        inventory: &[Listing],
        token: &CancelToken,
    ) -> TaskOutcome<GeneratedBrochure, StoreError> {
        let snapshot = self.snapshot();
        let outcome = run_cancellable(token, generator.generate(&snapshot, listing_ids, inventory)).await;
        match &outcome {
            TaskOutcome::Completed(brochure) => {
                self.notifications.push(Notification::success(
                    "Brochure ready",
                    brochure.share_url.clone(),
                ));
            }
            TaskOutcome::Failed(e) => {
                warn!(template_id = %snapshot.id, error = %e, "brochure generation failed");
                self.notifications.push(Notification::error(
                    "Could not generate brochure",
                    e.to_string(),
                ));
            }
            TaskOutcome::Cancelled => {}
        }
        outcome
    }
}

/// Website editing session
///
/// The editor holds the blocks of the active page. Switching pages writes
/// the editor's blocks back into the site first.
pub struct SiteSession {
    site: Site,
    active_page: String,
    editor: BlockEditor,
    service: Arc<dyn WebsiteService>,
    notifications: Vec<Notification>,
    dirty: bool,
}

impl SiteSession {
    /// Open `site`, starting on its first page. A site without pages gets a
    /// home page.
    pub fn new(mut site: Site, service: Arc<dyn WebsiteService>) -> Self {
        if site.pages.is_empty() {
            site.pages.push(Page::new("Home", "/"));
        }
        let first = &site.pages[0];
        let active_page = first.id.clone();
        let editor = BlockEditor::from_blocks(first.blocks.clone());
        Self {
            site,
            active_page,
            editor,
            service,
            notifications: Vec::new(),
            dirty: false,
        }
    }

    /// The site as last loaded or saved. The active page's blocks may lag
    /// behind the editor; see [`SiteSession::snapshot`].
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// The site with the editor's blocks written into the active page.
    pub fn snapshot(&self) -> Site {
        let mut site = self.site.clone();
        if let Some(page) = site.page_mut(&self.active_page) {
            page.blocks = self.editor.blocks().to_vec();
        }
        site
    }

    pub fn active_page_id(&self) -> &str {
        &self.active_page
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.site.page(&self.active_page)
    }

    pub fn editor(&self) -> &BlockEditor {
        &self.editor
    }

    /// Mutable access to the active page's editor. Marks the session dirty.
    pub fn editor_mut(&mut self) -> &mut BlockEditor {
        self.dirty = true;
        &mut self.editor
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn flush_editor(&mut self) {
        let blocks = self.editor.blocks().to_vec();
        if let Some(page) = self.site.page_mut(&self.active_page) {
            page.blocks = blocks;
        }
    }

    /// Switch the editor to another page.
    pub fn open_page(&mut self, page_id: &str) -> bool {
        if page_id == self.active_page {
            return self.site.page(page_id).is_some();
        }
        let Some(page) = self.site.page(page_id) else {
            return false;
        };
        let editor = BlockEditor::from_blocks(page.blocks.clone());
        self.flush_editor();
        self.editor = editor;
        self.active_page = page_id.to_string();
        true
    }

    /// Append a page and return its id. A path that collides with another
    /// page is suffixed and an info notification explains the change.
    pub fn add_page(&mut self, title: &str, path: &str) -> String {
        let requested = normalize_path(path);
        let mut page = Page::new(title, &requested);
        page.path = self.site.unique_path(&requested, None);
        if page.path != requested {
            self.notifications.push(Notification::info(
                "Page path adjusted",
                format!("{} is already used; the new page lives at {}", requested, page.path),
            ));
        }
        let id = page.id.clone();
        self.site.pages.push(page);
        self.dirty = true;
        id
    }

    pub fn rename_page(&mut self, page_id: &str, title: &str) -> bool {
        self.update_page(page_id, |page| page.title = title.to_string())
    }

    /// Change a page's path, suffixing it on collision. Returns the path
    /// actually used.
    pub fn set_page_path(&mut self, page_id: &str, path: &str) -> Option<String> {
        self.site.page(page_id)?;
        let path = self.site.unique_path(path, Some(page_id));
        let assigned = path.clone();
        self.update_page(page_id, |page| page.path = path);
        Some(assigned)
    }

    pub fn set_page_visibility(&mut self, page_id: &str, visible: bool) -> bool {
        self.update_page(page_id, |page| page.is_visible = visible)
    }

    pub fn set_page_seo(&mut self, page_id: &str, seo: Option<SeoMeta>) -> bool {
        self.update_page(page_id, |page| page.seo = seo)
    }

    fn update_page(&mut self, page_id: &str, apply: impl FnOnce(&mut Page)) -> bool {
        match self.site.page_mut(page_id) {
            Some(page) => {
                apply(page);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Remove a page. The last page cannot be deleted. Deleting the active
    /// page opens the first remaining one.
    pub fn delete_page(&mut self, page_id: &str) -> bool {
        if self.site.page(page_id).is_none() {
            return false;
        }
        if self.site.pages.len() == 1 {
            self.notifications.push(Notification::error(
                "Cannot delete page",
                "A site must keep at least one page",
            ));
            return false;
        }
        self.site.pages.retain(|p| p.id != page_id);
        if self.active_page == page_id {
            let first = &self.site.pages[0];
            self.active_page = first.id.clone();
            self.editor = BlockEditor::from_blocks(first.blocks.clone());
        }
        self.dirty = true;
        true
    }

    pub fn reorder_pages(&mut self, page_ids: &[String]) -> bool {
        let reordered = self.site.reorder_pages(page_ids);
        self.dirty |= reordered;
        reordered
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.site.name = name.into();
        self.dirty = true;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.site.theme = theme;
        self.dirty = true;
    }

    pub fn set_branding(&mut self, branding: Branding) {
        self.site.branding = branding;
        self.dirty = true;
    }

    pub fn set_nav(&mut self, nav: NavConfig) {
        self.site.nav = nav;
        self.dirty = true;
    }

    pub fn set_seo(&mut self, seo: SeoMeta) {
        self.site.seo = seo;
        self.dirty = true;
    }

    pub fn set_tracking(&mut self, tracking: TrackingConfig) {
        self.site.tracking = tracking;
        self.dirty = true;
    }

    /// Full HTML of the active page as it currently stands in the editor.
    pub fn render_active_page(&self) -> String {
        let site = self.snapshot();
        match site.page(&self.active_page) {
            Some(page) => render_site_page(&site, page),
            None => String::new(),
        }
    }

    /// Stage the current state as a preview and return its URL.
    pub fn preview(&self, publisher: &Publisher) -> Result<String, StoreError> {
        publisher.preview(&self.snapshot())
    }

    pub async fn save(&mut self, token: &CancelToken) -> TaskOutcome<(), ServiceError> {
        let snapshot = self.snapshot();
        let service = Arc::clone(&self.service);
        let outcome = run_cancellable(token, async { service.update_site(&snapshot).await }).await;
        match outcome {
            TaskOutcome::Completed(stored) => {
                info!(site_id = %stored.id, pages = stored.pages.len(), "saved site");
                self.accept(stored);
                self.notifications
                    .push(Notification::success("Site saved", self.site.name.clone()));
                TaskOutcome::Completed(())
            }
            TaskOutcome::Failed(e) => {
                self.report_failure("Could not save site", &e);
                TaskOutcome::Failed(e)
            }
            TaskOutcome::Cancelled => {
                debug!(site_id = %self.site.id, "site save cancelled");
                TaskOutcome::Cancelled
            }
        }
    }

    /// Save, then publish.
    pub async fn publish(&mut self, token: &CancelToken) -> TaskOutcome<PublishReceipt, ServiceError> {
        let snapshot = self.snapshot();
        let service = Arc::clone(&self.service);
        let outcome = run_cancellable(token, async {
            service.update_site(&snapshot).await?;
            let receipt = service.publish_site(&snapshot.id).await?;
            let stored = service.get_site(&snapshot.id).await?;
            Ok::<_, ServiceError>((receipt, stored))
        })
        .await;
        match outcome {
            TaskOutcome::Completed((receipt, stored)) => {
                self.accept(stored);
                self.notifications
                    .push(Notification::success("Site published", receipt.url.clone()));
                TaskOutcome::Completed(receipt)
            }
            TaskOutcome::Failed(e) => {
                self.report_failure("Could not publish site", &e);
                TaskOutcome::Failed(e)
            }
            TaskOutcome::Cancelled => TaskOutcome::Cancelled,
        }
    }

    /// Request a public address. A rejected request completes with
    /// `success: false` and leaves the site unchanged.
    pub async fn set_domain(
        &mut self,
        config: DomainConfig,
        token: &CancelToken,
    ) -> TaskOutcome<DomainResult, ServiceError> {
        let service = Arc::clone(&self.service);
        let site_id = self.site.id.clone();
        let request = config.clone();
        let outcome = run_cancellable(token, async { service.set_domain(&site_id, request).await }).await;
        match &outcome {
            TaskOutcome::Completed(result) if result.success => {
                self.site.domain = Some(config);
                self.notifications
                    .push(Notification::success("Domain saved", result.message.clone()));
            }
            TaskOutcome::Completed(result) => {
                self.notifications
                    .push(Notification::error("Domain rejected", result.message.clone()));
            }
            TaskOutcome::Failed(e) => self.report_failure("Could not set domain", e),
            TaskOutcome::Cancelled => {}
        }
        outcome
    }

    /// Take the stored copy while keeping the editor and active page.
    fn accept(&mut self, stored: Site) {
        self.site = stored;
        self.flush_editor();
        self.dirty = false;
    }

    fn report_failure(&mut self, title: &str, error: &ServiceError) {
        warn!(site_id = %self.site.id, error = %error, "{}", title);
        self.notifications
            .push(Notification::error(title, error.to_string()));
    }
}
