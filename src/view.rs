//! The users screen: list cache, edit session and gateway wired together.
//!
//! Server state is authoritative. After every accepted mutation the list is
//! refetched rather than patched locally; rejected or failed mutations leave
//! the list exactly as it was.

use std::sync::Arc;

use crate::api::{GatewayError, MutationOutcome, UsersGateway};
use crate::config::DeleteRefresh;
use crate::models::{FieldError, UserRecord};
use crate::session::EditSession;
use crate::store::{Page, RecordStore};

/// How a submit of the edit form ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Accepted by the server; the form is closed.
    /// The id stays 0 only if the server neither returned nor listed the new record.
    Saved(UserRecord),
    /// Rejected for a duplicate unique field; the form stays open.
    Conflict(String),
    /// Any other failure; nothing changed locally.
    Failed(GatewayError),
    /// No form was open, so nothing was sent.
    NotOpen,
}

/// How a delete request ended.
#[derive(Debug)]
pub enum RemoveOutcome {
    Deleted,
    Failed(GatewayError),
    /// Only persisted records (`id > 0`) can be deleted.
    InvalidId(i64),
}

pub struct UsersView {
    gateway: Arc<dyn UsersGateway>,
    store: RecordStore,
    session: EditSession,
    delete_refresh: DeleteRefresh,
    list_stale: bool,
}

impl UsersView {
    pub fn new(gateway: Arc<dyn UsersGateway>, delete_refresh: DeleteRefresh) -> Self {
        Self {
            gateway,
            store: RecordStore::new(),
            session: EditSession::new(),
            delete_refresh,
            list_stale: true,
        }
    }

    pub fn records(&self) -> &[UserRecord] {
        self.store.records()
    }

    pub fn page(&self, page: usize, per_page: usize) -> Page<'_> {
        self.store.page(page, per_page)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// True when the last refetch failed and the list may lag the server.
    pub fn list_is_stale(&self) -> bool {
        self.list_stale
    }

    /// Initial population of the list.
    pub async fn activate(&mut self) -> Result<(), GatewayError> {
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), GatewayError> {
        let result = self.store.refresh(self.gateway.as_ref()).await;
        self.list_stale = result.is_err();
        result
    }

    pub fn start_create(&mut self) {
        self.session.start_create();
    }

    pub fn start_edit(&mut self, record: &UserRecord) {
        self.session.start_edit(record);
    }

    /// Open the form on the listed record with `id`, if it is in the list.
    pub fn start_edit_by_id(&mut self, id: i64) -> bool {
        match self.store.find(id) {
            Some(record) => {
                self.session.start_edit(record);
                true
            }
            None => false,
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        self.session.set_field(field, value)
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Submit the draft currently held by the form.
    pub async fn save(&mut self) -> SubmitOutcome {
        let draft = self.session.draft().clone();
        self.submit(draft).await
    }

    /// Route `draft` to create (`id == 0`) or update (`id > 0`).
    pub async fn submit(&mut self, draft: UserRecord) -> SubmitOutcome {
        if !self.session.is_open() {
            return SubmitOutcome::NotOpen;
        }
        let result = if draft.is_new() {
            self.gateway.create(&draft).await
        } else {
            self.gateway.update(draft.id, &draft).await
        };

        match result {
            Ok(MutationOutcome::Saved(mut saved)) => {
                self.session.submit_succeeded();
                // A failed refetch is reported through list_is_stale; the save itself stands.
                let _ = self.refresh().await;
                // Bodyless create replies leave the id to be read from the refetched list.
                if saved.is_new() {
                    if let Some(listed) = self.store.records().iter().find(|r| r.username == saved.username) {
                        saved.id = listed.id;
                    }
                }
                tracing::info!(id = saved.id, username = %saved.username, "User saved");
                SubmitOutcome::Saved(saved)
            }
            Ok(MutationOutcome::Conflict(message)) => {
                self.session.submit_rejected(draft);
                tracing::warn!(%message, "User rejected as conflicting");
                SubmitOutcome::Conflict(message)
            }
            Err(e) => {
                self.session.submit_rejected(draft);
                tracing::error!(%e, "Saving user failed");
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Delete a persisted record, then refetch according to the delete policy.
    pub async fn remove(&mut self, id: i64) -> RemoveOutcome {
        if id <= 0 {
            return RemoveOutcome::InvalidId(id);
        }
        match self.gateway.delete_by_id(id).await {
            Ok(()) => {
                tracing::info!(id, "User deleted");
                let _ = self.refresh().await;
                RemoveOutcome::Deleted
            }
            Err(e) => {
                tracing::error!(%e, id, "Deleting user failed");
                if self.delete_refresh == DeleteRefresh::Always {
                    let _ = self.refresh().await;
                }
                RemoveOutcome::Failed(e)
            }
        }
    }
}
