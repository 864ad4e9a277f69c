//! View-local cache of the users collection.
//!
//! The store never patches records in place: it is replaced wholesale by the
//! gateway's `list()` result, in the order the server returned.

use crate::api::{GatewayError, UsersGateway};
use crate::models::UserRecord;

/// One page of the cached collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: &'a [UserRecord],
    pub total_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub per_page: usize,
}

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<UserRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Replace the collection with a fresh `list()`.
    /// On failure the previous contents stay as they were.
    pub async fn refresh(&mut self, gateway: &dyn UsersGateway) -> Result<(), GatewayError> {
        match gateway.list().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Users list refreshed");
                self.records = records;
                Ok(())
            }
            Err(e) => {
                tracing::error!(%e, "Failed to refresh users list");
                Err(e)
            }
        }
    }

    /// Slice the collection into pages.
    /// `page == 0` or `per_page == 0` returns everything as a single page.
    pub fn page(&self, page: usize, per_page: usize) -> Page<'_> {
        let total_count = self.records.len();

        if page == 0 || per_page == 0 {
            return Page {
                items: &self.records,
                total_count,
                current_page: 0,
                total_pages: 1,
                per_page: total_count,
            };
        }

        let total_pages = if total_count == 0 {
            1
        } else {
            total_count.div_ceil(per_page)
        };

        let current_page = page.max(1).min(total_pages);
        let start_idx = (current_page - 1) * per_page;
        let end_idx = start_idx.saturating_add(per_page).min(total_count);

        let items: &[UserRecord] = if start_idx < total_count {
            &self.records[start_idx..end_idx]
        } else {
            &[]
        };

        Page {
            items,
            total_count,
            current_page,
            total_pages,
            per_page,
        }
    }
}
