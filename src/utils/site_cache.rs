use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::error::Result;
use crate::model::site::Site;
use crate::repository::SiteCatalog;

/// Caches positive site lookups in front of another catalog.
///
/// Misses are never cached, so a site registered a minute ago resolves on the
/// next request. The active list always goes to the inner catalog.
///
/// A hit is served until its TTL (`SITE_CACHE_TTL_SECS`) runs out, so a site
/// deactivated in the meantime stays selectable for at most that long.
pub struct CachedSiteCatalog {
    inner: Arc<dyn SiteCatalog>,
    by_id: Cache<String, Site>,
    by_code: Cache<String, Site>,
}

impl CachedSiteCatalog {
    pub fn new(inner: Arc<dyn SiteCatalog>, ttl: Duration) -> Self {
        let build = || -> Cache<String, Site> {
            Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build()
        };

        Self {
            inner,
            by_id: build(),
            by_code: build(),
        }
    }

    async fn remember(&self, site: &Site) {
        self.by_id.insert(site.id.to_lowercase(), site.clone()).await;
        self.by_code
            .insert(site.site_code.to_lowercase(), site.clone())
            .await;
    }
}

#[async_trait]
impl SiteCatalog for CachedSiteCatalog {
    async fn list_active(&self) -> Result<Vec<Site>> {
        self.inner.list_active().await
    }

    async fn find_active_by_id(&self, id: &str) -> Result<Option<Site>> {
        if let Some(site) = self.by_id.get(&id.to_lowercase()).await {
            return Ok(Some(site));
        }

        let found = self.inner.find_active_by_id(id).await?;
        if let Some(site) = &found {
            self.remember(site).await;
        }
        Ok(found)
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Site>> {
        if let Some(site) = self.by_code.get(&code.to_lowercase()).await {
            return Ok(Some(site));
        }

        let found = self.inner.find_active_by_code(code).await?;
        if let Some(site) = &found {
            self.remember(site).await;
        }
        Ok(found)
    }
}
