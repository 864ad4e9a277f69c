use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role attached to a user, as the server describes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// A user entity as exchanged with the users resource.
///
/// `id == 0` marks a record the server has not created yet; every persisted
/// record carries a server-assigned positive id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Attribute names the edit form emits values for.
pub const FORM_FIELDS: [&str; 5] = ["fullName", "email", "username", "password", "role"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Role values are written as `<id>:<name>`.
    #[error("Invalid role '{0}', expected <id>:<name>")]
    InvalidRole(String),
}

impl UserRecord {
    /// The canonical empty record used as a fresh draft.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Apply a single form value keyed by its wire attribute name.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::models::UserRecord;
    ///
    /// let mut draft = UserRecord::empty();
    /// draft.apply_field("fullName", "Ada Lovelace").unwrap();
    /// draft.apply_field("role", "2:editor").unwrap();
    /// assert_eq!(draft.full_name, "Ada Lovelace");
    /// assert_eq!(draft.role.name, "editor");
    /// ```
    pub fn apply_field(&mut self, field: &str, value: &str) -> Result<(), FieldError> {
        match field {
            "fullName" => self.full_name = value.to_string(),
            "email" => self.email = value.to_string(),
            "username" => self.username = value.to_string(),
            "password" => self.password = value.to_string(),
            "role" => self.role = parse_role(value)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

pub fn parse_role(raw: &str) -> Result<Role, FieldError> {
    let (id, name) = raw
        .split_once(':')
        .ok_or_else(|| FieldError::InvalidRole(raw.to_string()))?;
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| FieldError::InvalidRole(raw.to_string()))?;
    let name = name.trim();
    if id < 0 || name.is_empty() {
        return Err(FieldError::InvalidRole(raw.to_string()));
    }
    Ok(Role { id, name: name.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_payload() {
        let json = r#"{"id":7,"fullName":"Grace Hopper","email":"g@x.com","username":"grace","password":"","role":{"id":1,"name":"admin"}}"#;
        let rec: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, 7);
        assert_eq!(rec.full_name, "Grace Hopper");
        assert_eq!(rec.role, Role { id: 1, name: "admin".into() });
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let rec: UserRecord = serde_json::from_str(r#"{"id":3,"username":"x"}"#).unwrap();
        assert_eq!(rec.full_name, "");
        assert_eq!(rec.role, Role::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut rec = UserRecord::empty();
        assert_eq!(
            rec.apply_field("nickname", "x"),
            Err(FieldError::UnknownField("nickname".into()))
        );
        assert_eq!(rec, UserRecord::empty());
    }

    #[test]
    fn malformed_role_is_rejected() {
        assert!(parse_role("editor").is_err());
        assert!(parse_role("x:editor").is_err());
        assert!(parse_role("2:").is_err());
        assert_eq!(parse_role(" 2 : editor ").unwrap(), Role { id: 2, name: "editor".into() });
    }
}
