//! Integration tests: sessions, service, publishing and resolution together
//!
//! These tests simulate the builder end to end:
//!   SiteSession → WebsiteService → repositories → key-value store
//!                                → Publisher → Resolver (public URL)

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use std::sync::Arc;

    use crate::core::block::BlockType;
    use crate::core::site::{DomainConfig, Site, Template};
    use crate::runtime::resolve::{Resolution, ResolutionSource, Resolver};
    use crate::runtime::session::{NotificationLevel, SiteSession, TemplateSession};
    use crate::runtime::share::{ShareContent, SharePlatform};
    use crate::runtime::task::{CancelToken, TaskOutcome};
    use crate::service::inventory::demo_inventory;
    use crate::service::WebsiteService;
    use crate::storage::{keys, KeyValueStore, KvRepository, TemplateRepository};
    use crate::tests::support::{harness, FailingStore};
    use crate::workspace::Workspace;

    fn resolver(h: &crate::tests::support::Harness) -> Resolver {
        Resolver::new(Arc::new(h.store.clone()), Arc::new(h.session.clone()))
    }

    /// Publish a site from a session and resolve it by slug.
    #[tokio::test]
    async fn test_publish_then_resolve() {
        let h = harness();
        let site = h.service.create_site("Main St Motors", "main-st-motors").await.unwrap();
        let mut session = SiteSession::new(site, h.service.clone());
        session.editor_mut().add_block(BlockType::Inventory);

        let receipt = session.publish(&CancelToken::new()).await.ok().unwrap();
        assert_eq!(receipt.url, "https://sites.example.com/s/main-st-motors/");
        assert!(session.site().published_at.is_some());

        match resolver(&h).resolve_site("main-st-motors", None) {
            Resolution::Found { value, source } => {
                assert_eq!(source, ResolutionSource::Published);
                assert_eq!(value.pages[0].blocks.len(), 2);
            }
            Resolution::NotFound => panic!("published site did not resolve"),
        }
        assert_eq!(resolver(&h).resolve_site("unknown", None), Resolution::NotFound);
    }

    /// Drafts resolve from the stored collection until published.
    #[tokio::test]
    async fn test_draft_resolves_from_store() {
        let h = harness();
        h.service.create_site("Draft Motors", "draft").await.unwrap();
        let resolved = resolver(&h).resolve_site("draft", None);
        assert_eq!(resolved.source(), Some(ResolutionSource::Stored));
    }

    /// A preview written by the session wins over everything else.
    #[tokio::test]
    async fn test_preview_wins() {
        let h = harness();
        let site = h.service.create_site("Demo", "demo").await.unwrap();
        h.service.publish_site(&site.id).await.unwrap();

        let mut session = SiteSession::new(site, h.service.clone());
        session.set_name("Demo (preview)");
        session.preview(&h.publisher).unwrap();

        let resolved = resolver(&h).resolve_site("demo", Some("?preview=1"));
        assert_eq!(resolved.source(), Some(ResolutionSource::Session));
        assert_eq!(resolved.into_value().unwrap().name, "Demo (preview)");
    }

    /// A failed save keeps every edit and queues an error notification.
    #[tokio::test]
    async fn test_failed_save_keeps_state() {
        let h = harness();
        let site = h.service.create_site("Demo", "demo").await.unwrap();
        let mut session = SiteSession::new(site, h.service.clone());
        session.editor_mut().add_block(BlockType::Contact);
        session.add_page("Service", "/service");

        h.sites.reject_saves(true);
        let outcome = session.save(&CancelToken::new()).await;
        assert!(matches!(outcome, TaskOutcome::Failed(_)));
        assert!(session.is_dirty());
        assert_eq!(session.editor().len(), 2);
        assert_eq!(session.site().pages.len(), 2);
        let notes = session.take_notifications();
        assert_eq!(notes.last().unwrap().level, NotificationLevel::Error);

        h.sites.reject_saves(false);
        assert!(session.save(&CancelToken::new()).await.is_completed());
        let stored = h.service.get_site(&session.site().id).await.unwrap();
        assert_eq!(stored.pages.len(), 2);
        assert_eq!(stored.pages[0].blocks.len(), 2);
    }

    /// Publishing while the site save fails leaves nothing published.
    #[tokio::test]
    async fn test_failed_publish_rolls_back_snapshot() {
        let h = harness();
        let site = h.service.create_site("Demo", "demo").await.unwrap();
        h.sites.reject_saves(true);
        assert!(h.service.publish_site(&site.id).await.is_err());
        assert!(h.publisher.published("demo").unwrap().is_none());
        assert!(!h.service.get_site(&site.id).await.unwrap().is_published());
    }

    /// A cancelled save neither writes nor touches session state.
    #[tokio::test]
    async fn test_cancelled_save_changes_nothing() {
        let h = harness();
        let site = h.service.create_site("Demo", "demo").await.unwrap();
        let mut session = SiteSession::new(site, h.service.clone());
        session.editor_mut().add_block(BlockType::Map);

        let token = CancelToken::new();
        token.cancel();
        assert!(session.save(&token).await.is_cancelled());
        assert!(session.is_dirty());
        assert!(session.notifications().is_empty());
        let stored = h.service.get_site(&session.site().id).await.unwrap();
        assert_eq!(stored.pages[0].blocks.len(), 1);
    }

    /// A template save that hits a full store keeps the template editable.
    #[tokio::test]
    async fn test_template_save_failure() {
        let store = FailingStore::default();
        let repo = Arc::new(KvRepository::new(Arc::new(store.clone())));
        let mut session = TemplateSession::new(Template::new("Weekend"), repo.clone());
        session.editor_mut().add_block(BlockType::Hero);

        store.set_failing(true);
        assert!(matches!(session.save(&CancelToken::new()).await, TaskOutcome::Failed(_)));
        assert_eq!(session.editor().len(), 1);
        assert_eq!(session.notifications()[0].level, NotificationLevel::Error);
        assert!(repo.list_templates().await.unwrap().is_empty());

        store.set_failing(false);
        assert!(session.save(&CancelToken::new()).await.is_completed());
        assert_eq!(repo.list_templates().await.unwrap().len(), 1);
    }

    /// A shared `?data=` link resolves without any stored copy.
    #[tokio::test]
    async fn test_data_param_link() {
        let h = harness();
        let site = Site::new("Portable", "portable");
        let url = h.publisher.preview_data_url(&site).unwrap();
        let query = url.split_once('?').unwrap().1;
        let resolved = resolver(&h).resolve_site("portable", Some(query));
        assert_eq!(resolved.source(), Some(ResolutionSource::DataParam));

        let payload = URL_SAFE_NO_PAD.encode(b"{not json");
        assert!(!resolver(&h)
            .resolve_site("portable", Some(&format!("data={}", payload)))
            .is_found());
    }

    /// Generate a brochure, resolve it publicly and share it.
    #[tokio::test]
    async fn test_brochure_flow() {
        let workspace = Workspace::in_memory();
        let mut session = workspace.template_session(Template::new("Truck Month"));
        session.editor_mut().add_block(BlockType::Hero);
        session.editor_mut().add_block(BlockType::Inventory);
        assert!(session.save(&CancelToken::new()).await.is_completed());

        let brochure = session
            .generate(
                &workspace.brochures,
                &["demo-1".to_string(), "demo-2".to_string()],
                &demo_inventory(),
                &CancelToken::new(),
            )
            .await
            .ok()
            .unwrap();
        assert_eq!(brochure.listings.len(), 2);
        assert_eq!(brochure.blocks.len(), 2);

        let resolved = workspace
            .resolver
            .get_public_brochure(&brochure.public_id, None)
            .into_value()
            .unwrap();
        assert_eq!(resolved.id, brochure.id);

        workspace.brochures.record_view(&brochure.id).await.unwrap();
        let analytics = workspace
            .brochures
            .record_share(&brochure.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!((analytics.views, analytics.shares), (1, 1));

        let share = ShareContent::for_brochure(&brochure);
        let encoded = urlencoding::encode(&brochure.share_url).into_owned();
        assert!(share.intent(SharePlatform::Facebook).ends_with(&encoded));
    }

    /// Domain requests go through the service and only stick when valid.
    #[tokio::test]
    async fn test_domain_flow() {
        let h = harness();
        let site = h.service.create_site("Demo", "demo").await.unwrap();
        let mut session = SiteSession::new(site, h.service.clone());

        let custom = DomainConfig::CustomDomain { domain: "mainstmotors.com".into() };
        let result = session.set_domain(custom.clone(), &CancelToken::new()).await.ok().unwrap();
        assert!(result.success);
        assert_eq!(session.site().domain.as_ref(), Some(&custom));

        let stored = h.service.get_site(&session.site().id).await.unwrap();
        assert_eq!(stored.domain, Some(custom));
        assert!(h.store.get(keys::SITES).unwrap().is_some());
    }
}
