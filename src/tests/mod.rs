//! Cross-module test suites for the builder
//!
//! Inline unit tests live next to the code they cover. The suites here
//! exercise several modules together: editing scenarios, rendering of the
//! whole block vocabulary, ordering properties, and sessions over real and
//! failing storage.

#[cfg(test)]
mod editor_tests;
#[cfg(test)]
mod integration;

/// Shared doubles for the suites above
#[cfg(test)]
pub(crate) mod support {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use crate::core::site::Site;
    use crate::runtime::publish::Publisher;
    use crate::service::LocalWebsiteService;
    use crate::storage::{KeyValueStore, KvRepository, MemoryStore, SiteRepository, StoreError};

    /// A store whose writes fail while `failing` is set
    #[derive(Clone, Default)]
    pub struct FailingStore {
        pub inner: MemoryStore,
        pub failing: Arc<AtomicBool>,
    }

    impl FailingStore {
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    /// Site repository that reads normally but can refuse saves
    pub struct FlakySites {
        pub inner: KvRepository,
        pub rejecting: AtomicBool,
    }

    impl FlakySites {
        pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
            Self {
                inner: KvRepository::new(store),
                rejecting: AtomicBool::new(false),
            }
        }

        pub fn reject_saves(&self, reject: bool) {
            self.rejecting.store(reject, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SiteRepository for FlakySites {
        async fn list_sites(&self) -> Result<Vec<Site>, StoreError> {
            self.inner.list_sites().await
        }

        async fn get_site(&self, id: &str) -> Result<Option<Site>, StoreError> {
            self.inner.get_site(id).await
        }

        async fn find_site_by_slug(&self, slug: &str) -> Result<Option<Site>, StoreError> {
            self.inner.find_site_by_slug(slug).await
        }

        async fn save_site(&self, site: &Site) -> Result<(), StoreError> {
            if self.rejecting.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("backend offline".into()));
            }
            self.inner.save_site(site).await
        }

        async fn delete_site(&self, id: &str) -> Result<bool, StoreError> {
            self.inner.delete_site(id).await
        }
    }

    /// A memory-backed service plus the pieces tests poke at directly
    pub struct Harness {
        pub store: MemoryStore,
        pub session: MemoryStore,
        pub sites: Arc<FlakySites>,
        pub publisher: Publisher,
        pub service: Arc<LocalWebsiteService>,
    }

    pub fn harness() -> Harness {
        let store = MemoryStore::new();
        let session = MemoryStore::new();
        let sites = Arc::new(FlakySites::new(Arc::new(store.clone())));
        let media = Arc::new(KvRepository::new(Arc::new(store.clone())));
        let publisher = Publisher::new(
            Arc::new(store.clone()),
            Arc::new(session.clone()),
            sites.clone(),
            "https://sites.example.com",
        );
        let service = Arc::new(LocalWebsiteService::new(
            sites.clone(),
            media,
            publisher.clone(),
            "dealersites.app",
        ));
        Harness {
            store,
            session,
            sites,
            publisher,
            service,
        }
    }
}
