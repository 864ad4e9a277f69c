//! Edit surface state: whether the form is open and which draft it holds.
//!
//! Transitions are plain methods so the screen logic can be exercised without
//! a gateway. A submit holds the owning view mutably until the server answers,
//! so the session cannot be closed or reopened while a call is in flight.

use crate::models::{FieldError, UserRecord};

#[derive(Debug, Default)]
pub struct EditSession {
    is_open: bool,
    draft: UserRecord,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn draft(&self) -> &UserRecord {
        &self.draft
    }

    /// Open the form on the canonical empty record.
    pub fn start_create(&mut self) {
        self.draft = UserRecord::empty();
        self.open();
    }

    /// Open the form on a copy of `record`; later edits never touch the original.
    pub fn start_edit(&mut self, record: &UserRecord) {
        self.draft = record.clone();
        self.open();
    }

    /// Write one form field into the open draft.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        self.draft.apply_field(field, value)
    }

    /// Close without saving.
    pub fn cancel(&mut self) {
        self.is_open = false;
    }

    /// Close and reset after the server accepted the draft.
    pub fn submit_succeeded(&mut self) {
        self.is_open = false;
        self.draft = UserRecord::empty();
    }

    /// Keep the form open with the draft as submitted.
    pub fn submit_rejected(&mut self, submitted: UserRecord) {
        self.draft = submitted;
    }

    fn open(&mut self) {
        self.is_open = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn persisted() -> UserRecord {
        UserRecord {
            id: 5,
            full_name: "Old".into(),
            email: "old@x.com".into(),
            username: "old".into(),
            password: "pw".into(),
            role: Role { id: 1, name: "admin".into() },
        }
    }

    #[test]
    fn start_create_resets_any_previous_draft() {
        let mut session = EditSession::new();
        session.start_edit(&persisted());
        session.start_create();
        assert!(session.is_open());
        assert_eq!(session.draft(), &UserRecord::empty());
    }

    #[test]
    fn start_edit_copies_the_record() {
        let original = persisted();
        let mut session = EditSession::new();
        session.start_edit(&original);
        session.set_field("fullName", "New").unwrap();
        assert_eq!(session.draft().full_name, "New");
        assert_eq!(original.full_name, "Old");
    }

    #[test]
    fn success_closes_and_resets_draft() {
        let mut session = EditSession::new();
        session.start_edit(&persisted());
        session.submit_succeeded();
        assert!(!session.is_open());
        assert_eq!(session.draft(), &UserRecord::empty());
    }

    #[test]
    fn rejection_keeps_form_open_with_submitted_draft() {
        let mut session = EditSession::new();
        session.start_edit(&persisted());
        session.set_field("username", "taken").unwrap();
        let submitted = session.draft().clone();
        session.submit_rejected(submitted.clone());
        assert!(session.is_open());
        assert_eq!(session.draft(), &submitted);
    }

    #[test]
    fn cancel_closes() {
        let mut session = EditSession::new();
        session.start_create();
        session.cancel();
        assert!(!session.is_open());
    }
}
