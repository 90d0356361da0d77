use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use crate::segmentation::{
    SegmentationError, SegmentationMode, SegmentationResult, SegmentationService,
};

type CacheKey = (String, SegmentationMode);

/// Deduplicating front for a [`SegmentationService`].
///
/// Each `(cache_key, mode)` pair is computed by at most one request at a time. Callers that
/// arrive while it runs wait for the same result, and later callers get it from the cache.
/// The computation runs on a spawned task, so a caller that goes away does not cancel it and
/// its result still lands in the cache. Failures are not cached.
pub struct SegmentationCache<S> {
    service: Arc<S>,
    cells: Mutex<HashMap<CacheKey, Arc<OnceCell<SegmentationResult>>>>,
}

impl<S> std::fmt::Debug for SegmentationCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentationCache").finish_non_exhaustive()
    }
}

impl<S: SegmentationService + 'static> SegmentationCache<S> {
    pub fn new(service: S) -> Self {
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<S>) -> Self {
        Self {
            service,
            cells: Mutex::new(HashMap::new()),
        }
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Cached result for `image`, computing it if no earlier request has.
    #[tracing::instrument(skip(self, image))]
    pub async fn segment(
        &self,
        image: Arc<image::RgbaImage>,
        mode: SegmentationMode,
        cache_key: &str,
    ) -> Result<SegmentationResult, SegmentationError> {
        let cell = self.cell(cache_key, mode).await;
        if let Some(hit) = cell.get() {
            tracing::debug!("segmentation cache hit");
            return Ok(hit.clone());
        }

        let service = Arc::clone(&self.service);
        let key = cache_key.to_owned();
        let task = tokio::spawn(async move {
            cell.get_or_try_init(|| service.segment(image, mode, &key))
                .await
                .cloned()
        });
        match task.await {
            Ok(result) => {
                if let Err(err) = &result {
                    tracing::debug!(%err, "segmentation failed; not cached");
                }
                result
            }
            Err(err) => {
                tracing::warn!(%err, "segmentation task aborted");
                Err(SegmentationError::Failure)
            }
        }
    }

    /// Result already stored for the pair, without computing anything.
    pub async fn cached(
        &self,
        cache_key: &str,
        mode: SegmentationMode,
    ) -> Option<SegmentationResult> {
        let cells = self.cells.lock().await;
        cells.get(&(cache_key.to_owned(), mode))?.get().cloned()
    }

    pub async fn suggest_mode(
        &self,
        image: Arc<image::RgbaImage>,
        cache_key: &str,
    ) -> SegmentationMode {
        self.service.suggest_mode(image, cache_key).await
    }

    async fn cell(
        &self,
        cache_key: &str,
        mode: SegmentationMode,
    ) -> Arc<OnceCell<SegmentationResult>> {
        let mut cells = self.cells.lock().await;
        Arc::clone(cells.entry((cache_key.to_owned(), mode)).or_default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segmentation/cache.rs"]
mod tests;
