//! Form lifecycle operations over the gateway and the preview cache.
//!
//! The store owns the two policies that make the dual storage behave
//! predictably:
//!
//! - **read precedence**: the gateway's live record wins; on NotFound or
//!   transport failure the preview cache snapshot is served; if both miss,
//!   the caller gets NotFound. "Never existed" and "store and cache both
//!   unreachable" collapse into one outcome on purpose.
//! - **dual write**: every save also snapshots into the cache, and a
//!   gateway failure never skips the cache write; the failure is still
//!   reported afterwards.
//!
//! One store instance is constructed at startup and injected into handlers.
//! There is no cross-request locking: concurrent updates to the same id are
//! last-write-wins, with no version check.

use std::sync::Arc;

use crate::cache::PreviewCache;
use crate::error::{CoreError, CoreResult};
use crate::form::FormDocument;
use crate::gateway::{FormFilter, FormGateway, GatewayError};
use crate::normalize::{FormPatch, RawForm};

pub struct FormStore {
    gateway: Arc<dyn FormGateway>,
    cache: Arc<PreviewCache>,
}

fn storage_error(err: GatewayError) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Form",
        id: id.to_string(),
    }
}

impl FormStore {
    pub fn new(gateway: Arc<dyn FormGateway>, cache: Arc<PreviewCache>) -> Self {
        FormStore { gateway, cache }
    }

    pub fn cache(&self) -> &PreviewCache {
        &self.cache
    }

    /// Create a new document owned by `owner`.
    ///
    /// Requires a non-empty name; this is checked before anything reaches
    /// the gateway. A client-supplied id (draft id) is kept, otherwise a
    /// UUID is assigned here so the cache snapshot and the stored record
    /// share a key even when the gateway write fails.
    pub async fn create(&self, mut raw: RawForm, owner: &str) -> CoreResult<FormDocument> {
        if raw.name.trim().is_empty() {
            return Err(CoreError::Validation("form must have a name".to_string()));
        }

        raw.id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string());
        raw.user_id = Some(owner.to_string());

        let mut doc = FormDocument::from_raw(raw);
        match self.gateway.create(&doc.to_raw()).await {
            Ok(stored) => {
                let stored = FormDocument::from_raw(stored);
                self.cache.put(&stored);
                Ok(stored)
            }
            Err(err) => {
                // The snapshot is written even though the remote write
                // failed; the error is still the caller's to see.
                doc.updated_at = Some(chrono::Utc::now());
                self.cache.put(&doc);
                Err(storage_error(err))
            }
        }
    }

    /// Fetch one document, applying read precedence.
    pub async fn get(&self, id: &str) -> CoreResult<FormDocument> {
        match self.gateway.find_by_id(id).await {
            Ok(Some(raw)) => Ok(FormDocument::from_raw(raw)),
            Ok(None) | Err(GatewayError::NotFound) => {
                self.cache.get(id).ok_or_else(|| not_found(id))
            }
            Err(GatewayError::Unavailable(reason)) => {
                tracing::warn!(%id, %reason, "gateway read failed, serving preview snapshot");
                self.cache.get(id).ok_or_else(|| not_found(id))
            }
        }
    }

    /// Merge `patch` into the document.
    ///
    /// Publishing is terminal: once a document is published, a patch that
    /// tries to clear the flag is rejected here, not merely hidden by the
    /// UI. Everything else is last-write-wins.
    pub async fn update(&self, id: &str, patch: FormPatch) -> CoreResult<FormDocument> {
        if patch.effective_published() == Some(false) {
            let current = match self.gateway.find_by_id(id).await {
                Ok(found) => found.map(FormDocument::from_raw),
                Err(_) => self.cache.get(id),
            };
            if current.is_some_and(|doc| doc.published) {
                return Err(CoreError::Validation(
                    "a published form cannot revert to draft".to_string(),
                ));
            }
        }

        match self.gateway.update(id, &patch).await {
            Ok(stored) => {
                let stored = FormDocument::from_raw(stored);
                self.cache.put(&stored);
                Ok(stored)
            }
            Err(GatewayError::NotFound) => Err(not_found(id)),
            Err(GatewayError::Unavailable(reason)) => {
                // Best-effort snapshot so the editor's work survives the
                // outage; the storage error still surfaces.
                if let Some(mut doc) = self.cache.get(id) {
                    patch.apply_to(&mut doc);
                    self.cache.put(&doc);
                }
                Err(CoreError::Storage(reason))
            }
        }
    }

    /// Update with the publish flag forced true. Irreversible.
    pub async fn publish(&self, id: &str) -> CoreResult<FormDocument> {
        self.update(
            id,
            FormPatch {
                published: Some(true),
                ..FormPatch::default()
            },
        )
        .await
    }

    /// Remove the document from the gateway and the cache.
    ///
    /// The snapshot is cleared unconditionally, and a gateway NotFound is
    /// treated as success: cleanup callers only care that the record is
    /// gone.
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        self.cache.remove(id);
        match self.gateway.delete(id).await {
            Ok(()) | Err(GatewayError::NotFound) => Ok(()),
            Err(err @ GatewayError::Unavailable(_)) => Err(storage_error(err)),
        }
    }

    /// Update-or-create under a caller-supplied id (preview/draft seeding).
    ///
    /// Unlike [`create`](Self::create) this accepts unnamed documents: draft
    /// seeds start empty. The cache write happens no matter what the
    /// gateway says.
    pub async fn upsert(&self, id: &str, mut raw: RawForm) -> CoreResult<FormDocument> {
        raw.id = Some(id.to_string());
        let mut doc = FormDocument::from_raw(raw);

        match self.gateway.upsert(id, &doc.to_raw()).await {
            Ok(stored) => {
                let stored = FormDocument::from_raw(stored);
                self.cache.put(&stored);
                Ok(stored)
            }
            Err(err) => {
                doc.updated_at = Some(chrono::Utc::now());
                self.cache.put(&doc);
                Err(storage_error(err))
            }
        }
    }

    /// All draft documents, newest first; on gateway failure the cached
    /// snapshots stand in, in index order.
    pub async fn list_drafts(&self) -> CoreResult<Vec<FormDocument>> {
        self.list(FormFilter::drafts()).await
    }

    /// All documents owned by `user_id`, newest first, with the same
    /// fallback.
    pub async fn list_by_owner(&self, user_id: &str) -> CoreResult<Vec<FormDocument>> {
        self.list(FormFilter::owned_by(user_id)).await
    }

    async fn list(&self, filter: FormFilter) -> CoreResult<Vec<FormDocument>> {
        match self.gateway.list(&filter).await {
            Ok(raws) => Ok(raws.into_iter().map(FormDocument::from_raw).collect()),
            Err(err) => {
                tracing::warn!(error = %err, "gateway list failed, serving preview snapshots");
                Ok(self
                    .cache
                    .snapshots()
                    .into_iter()
                    .filter(|doc| {
                        filter.published.map_or(true, |p| doc.published == p)
                            && filter
                                .user_id
                                .as_deref()
                                .map_or(true, |u| doc.user_id == u)
                    })
                    .collect())
            }
        }
    }

    /// Gateway liveness, for health reporting.
    pub async fn ping(&self) -> bool {
        self.gateway.ping().await.is_ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
