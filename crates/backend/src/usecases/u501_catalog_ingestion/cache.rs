use chrono::{DateTime, Utc};
use contracts::domain::a001_product::ProductRecord;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::error::IngestionError;
use super::executor::fetch_catalog;
use super::source_client::CatalogSource;
use crate::shared::config::CatalogConfig;

/// Time source for freshness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Product list from one successful load
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub records: Vec<ProductRecord>,
}

/// In-memory catalog with a freshness window
///
/// Created once at startup and shared by all requests. A stale or missing
/// snapshot is reloaded on demand; only one reload runs at a time and callers
/// that queued behind it reuse its result.
pub struct CatalogCache {
    config: CatalogConfig,
    source: Arc<dyn CatalogSource>,
    clock: Arc<dyn Clock>,
    snapshot: RwLock<Option<Arc<CatalogSnapshot>>>,
    refresh_lock: Mutex<()>,
}

impl CatalogCache {
    pub fn new(
        config: CatalogConfig,
        source: Arc<dyn CatalogSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            source,
            clock,
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Current snapshot without any freshness check or I/O
    #[cfg(test)]
    pub async fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.snapshot.read().await.clone()
    }

    /// Cached catalog if still fresh, otherwise a newly loaded one.
    ///
    /// A failed reload keeps the previous snapshot untouched and returns the
    /// error; stale data is never served in its place.
    pub async fn get_catalog(&self) -> Result<Arc<CatalogSnapshot>, IngestionError> {
        if let Some(snapshot) = self.fresh_snapshot().await {
            tracing::debug!("Catalog cache hit ({} products)", snapshot.records.len());
            return Ok(snapshot);
        }

        let _refresh = self.refresh_lock.lock().await;

        // Another caller may have finished a reload while we waited.
        if let Some(snapshot) = self.fresh_snapshot().await {
            return Ok(snapshot);
        }

        let started_at = self.clock.now();
        let timer = std::time::Instant::now();
        match fetch_catalog(&self.config, self.source.as_ref()).await {
            Ok(records) => {
                let snapshot = Arc::new(CatalogSnapshot {
                    fetched_at: started_at,
                    records,
                });
                *self.snapshot.write().await = Some(Arc::clone(&snapshot));
                tracing::info!(
                    "Catalog refreshed: {} products, elapsed_ms={}",
                    snapshot.records.len(),
                    timer.elapsed().as_millis()
                );
                Ok(snapshot)
            }
            Err(e) => {
                if e.is_fetch_error() {
                    tracing::error!(
                        "Catalog source unreachable, elapsed_ms={}: {}",
                        timer.elapsed().as_millis(),
                        e
                    );
                } else {
                    tracing::error!("Catalog refresh failed: {}", e);
                }
                Err(e)
            }
        }
    }

    async fn fresh_snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        let window = self.freshness_window();
        let now = self.clock.now();
        self.snapshot
            .read()
            .await
            .as_ref()
            .filter(|s| now - s.fetched_at < window)
            .cloned()
    }

    fn freshness_window(&self) -> chrono::Duration {
        let secs = i64::try_from(self.config.cache_ttl_seconds).unwrap_or(i64::MAX);
        chrono::Duration::try_seconds(secs).unwrap_or(chrono::Duration::MAX)
    }
}
