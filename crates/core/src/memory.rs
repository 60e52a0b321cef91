//! In-memory persistence gateway.
//!
//! A `HashMap`-grade stand-in for the real backend, used by the test
//! suites and by storage-less local runs. It mirrors the production
//! gateway's observable semantics: merge updates, `created_at` descending
//! ordering, NotFound on unknown ids, and a foreign-key check on
//! submission ingestion.
//!
//! The gateway can be switched offline, after which every operation fails
//! with [`GatewayError::Unavailable`]; the store's fallback paths are
//! exercised this way.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::gateway::{
    FormFilter, FormGateway, GatewayError, GatewayResult, SubmissionGateway,
};
use crate::normalize::{FormPatch, RawForm};
use crate::submission::Submission;
use crate::types::{FormId, ANON_USER_ID};

#[derive(Default)]
struct MemoryState {
    /// Insertion-ordered entries; the id is unique within the vec.
    forms: Vec<(u64, RawForm)>,
    submissions: Vec<Submission>,
    next_seq: u64,
    next_submission_id: i64,
}

/// In-memory implementation of both gateway traits over shared state.
#[derive(Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
    offline: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> GatewayResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(GatewayError::Unavailable(
                "memory gateway is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

fn merge_patch(raw: &mut RawForm, patch: &FormPatch) {
    if let Some(name) = &patch.name {
        raw.name = name.clone();
    }
    if let Some(source) = patch.pages.clone().or_else(|| patch.fields.clone()) {
        raw.pages = Some(source);
        raw.fields = None;
    }
    if let Some(settings) = &patch.settings {
        raw.settings = Some(settings.clone());
    }
    if let Some(published) = patch.effective_published() {
        raw.published = Some(published);
        raw.is_draft = None;
    }
    raw.updated_at = Some(chrono::Utc::now());
}

fn matches_filter(raw: &RawForm, filter: &FormFilter) -> bool {
    if let Some(published) = filter.published {
        if raw.effective_published() != published {
            return false;
        }
    }
    if let Some(user_id) = &filter.user_id {
        let owner = raw.user_id.as_deref().unwrap_or(ANON_USER_ID);
        if owner != user_id {
            return false;
        }
    }
    true
}

#[async_trait]
impl FormGateway for MemoryGateway {
    async fn create(&self, form: &RawForm) -> GatewayResult<RawForm> {
        self.check_online()?;
        let id = form
            .id
            .clone()
            .ok_or_else(|| GatewayError::Unavailable("create requires an id".to_string()))?;

        let mut state = self.state.lock().expect("memory gateway poisoned");
        if state.forms.iter().any(|(_, f)| f.id.as_deref() == Some(id.as_str())) {
            return Err(GatewayError::Unavailable(format!(
                "duplicate form id {id}"
            )));
        }

        let now = chrono::Utc::now();
        let mut stored = form.clone();
        stored.user_id.get_or_insert_with(|| ANON_USER_ID.to_string());
        stored.created_at = Some(now);
        stored.updated_at = Some(now);

        let seq = state.next_seq;
        state.next_seq += 1;
        state.forms.push((seq, stored.clone()));
        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> GatewayResult<Option<RawForm>> {
        self.check_online()?;
        let state = self.state.lock().expect("memory gateway poisoned");
        Ok(state
            .forms
            .iter()
            .find(|(_, f)| f.id.as_deref() == Some(id))
            .map(|(_, f)| f.clone()))
    }

    async fn list(&self, filter: &FormFilter) -> GatewayResult<Vec<RawForm>> {
        self.check_online()?;
        let state = self.state.lock().expect("memory gateway poisoned");
        let mut matched: Vec<&(u64, RawForm)> = state
            .forms
            .iter()
            .filter(|(_, f)| matches_filter(f, filter))
            .collect();
        // created_at descending; ties broken by insertion order, newest first.
        matched.sort_by(|(seq_a, a), (seq_b, b)| {
            (b.created_at, seq_b).cmp(&(a.created_at, seq_a))
        });
        Ok(matched.into_iter().map(|(_, f)| f.clone()).collect())
    }

    async fn update(&self, id: &str, patch: &FormPatch) -> GatewayResult<RawForm> {
        self.check_online()?;
        let mut state = self.state.lock().expect("memory gateway poisoned");
        let entry = state
            .forms
            .iter_mut()
            .find(|(_, f)| f.id.as_deref() == Some(id))
            .ok_or(GatewayError::NotFound)?;
        merge_patch(&mut entry.1, patch);
        Ok(entry.1.clone())
    }

    async fn upsert(&self, id: &str, form: &RawForm) -> GatewayResult<RawForm> {
        self.check_online()?;
        let mut state = self.state.lock().expect("memory gateway poisoned");
        let now = chrono::Utc::now();

        if let Some(entry) = state
            .forms
            .iter_mut()
            .find(|(_, f)| f.id.as_deref() == Some(id))
        {
            let created_at = entry.1.created_at;
            let mut stored = form.clone();
            stored.id = Some(id.to_string());
            if stored.user_id.is_none() {
                stored.user_id = entry.1.user_id.clone();
            }
            stored.created_at = created_at;
            stored.updated_at = Some(now);
            entry.1 = stored.clone();
            return Ok(stored);
        }

        let mut stored = form.clone();
        stored.id = Some(id.to_string());
        stored.user_id.get_or_insert_with(|| ANON_USER_ID.to_string());
        stored.created_at = Some(now);
        stored.updated_at = Some(now);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.forms.push((seq, stored.clone()));
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.check_online()?;
        let mut state = self.state.lock().expect("memory gateway poisoned");
        let before = state.forms.len();
        state.forms.retain(|(_, f)| f.id.as_deref() != Some(id));
        if state.forms.len() == before {
            return Err(GatewayError::NotFound);
        }
        // Cascade, as the production schema does via ON DELETE.
        state.submissions.retain(|s| s.form_id != id);
        Ok(())
    }

    async fn ping(&self) -> GatewayResult<()> {
        self.check_online()
    }
}

#[async_trait]
impl SubmissionGateway for MemoryGateway {
    async fn create(&self, form_id: &FormId, data: Value) -> GatewayResult<Submission> {
        self.check_online()?;
        let mut state = self.state.lock().expect("memory gateway poisoned");
        if !state
            .forms
            .iter()
            .any(|(_, f)| f.id.as_deref() == Some(form_id.as_str()))
        {
            return Err(GatewayError::NotFound);
        }

        state.next_submission_id += 1;
        let submission = Submission {
            id: state.next_submission_id,
            form_id: form_id.clone(),
            data,
            submitted_at: chrono::Utc::now(),
        };
        state.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_by_form(&self, form_id: &str) -> GatewayResult<Vec<Submission>> {
        self.check_online()?;
        let state = self.state.lock().expect("memory gateway poisoned");
        let mut matched: Vec<Submission> = state
            .submissions
            .iter()
            .filter(|s| s.form_id == form_id)
            .cloned()
            .collect();
        matched.sort_by_key(|s| (s.submitted_at, s.id));
        Ok(matched)
    }

    async fn count_by_form(&self, form_id: &str) -> GatewayResult<u64> {
        self.check_online()?;
        let state = self.state.lock().expect("memory gateway poisoned");
        Ok(state.submissions.iter().filter(|s| s.form_id == form_id).count() as u64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
