pub mod user_record;

pub use user_record::{parse_role, FieldError, Role, UserRecord, FORM_FIELDS};
