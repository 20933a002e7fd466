//! Entity records and the session they are viewed under.
//!
//! Backend payloads use Spanish keys; the structs here use English names and
//! map them with `#[serde(rename)]`.

mod admin;
pub mod event;
mod student;
mod teacher;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::{InputRule, sanitize};

pub use admin::Admin;
pub use event::{DraftError, Event, EventDraft};
pub use student::Student;
pub use teacher::Teacher;

/// Loosely typed scalar as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// True for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.trim().is_empty())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            FieldValue::Float(_) => None,
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        i64::try_from(n)
            .map(FieldValue::Integer)
            .unwrap_or_else(|_| FieldValue::Text(n.to_string()))
    }
}

/// Role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts the English names and the backend's role names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrador" => Ok(Role::Admin),
            "teacher" | "maestro" => Ok(Role::Teacher),
            "student" | "alumno" => Ok(Role::Student),
            other => Err(format!(
                "unknown role '{}' (expected admin, teacher or student)",
                other
            )),
        }
    }
}

/// Signed-in user as seen by the screens. The token is opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    pub token: String,
    pub user_id: Option<u64>,
}

impl Session {
    pub fn new(role: Role, token: impl Into<String>, user_id: Option<u64>) -> Self {
        Self {
            role,
            token: token.into(),
            user_id,
        }
    }

    /// A session with an empty token counts as absent.
    pub fn is_active(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Nested account sub-record holding the canonical name and email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl UserRef {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Top-level copies of the nested account fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl PersonFields {
    /// Copies non-empty nested values over the top-level ones.
    pub fn absorb(&mut self, user: Option<&UserRef>) {
        let Some(user) = user else {
            return;
        };
        if !user.first_name.is_empty() {
            self.first_name.clone_from(&user.first_name);
        }
        if !user.last_name.is_empty() {
            self.last_name.clone_from(&user.last_name);
        }
        if !user.email.is_empty() {
            self.email.clone_from(&user.email);
        }
    }

    pub fn name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    /// Letters-only names and a whitespace-free email.
    pub fn sanitize(&mut self) {
        self.first_name = sanitize(&self.first_name, InputRule::Letters);
        self.last_name = sanitize(&self.last_name, InputRule::Letters);
        self.email = sanitize(&self.email, InputRule::Email);
    }
}

/// "first last", trimmed when either half is missing.
pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

/// Applies `rule` to a text value. Numbers pass through.
pub(crate) fn sanitize_value(value: &mut FieldValue, rule: InputRule) {
    if let FieldValue::Text(s) = value {
        *s = sanitize(s, rule);
    }
}

/// Drops the time part of a backend timestamp (`2001-05-20T00:00:00Z`).
pub(crate) fn strip_time(date: &mut String) {
    if let Some(pos) = date.find('T') {
        date.truncate(pos);
    }
}

/// Text field helper for `TableRow::field`.
pub(crate) fn text(s: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_untagged() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[12, 1.5, "A-3"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Integer(12),
                FieldValue::Float(1.5),
                FieldValue::Text("A-3".into())
            ]
        );
        assert_eq!(values[2].to_string(), "A-3");
    }

    #[test]
    fn test_field_value_helpers() {
        assert!(FieldValue::Text("  ".into()).is_blank());
        assert!(!FieldValue::Integer(0).is_blank());
        assert_eq!(FieldValue::Text(" 42 ".into()).as_i64(), Some(42));
        assert_eq!(FieldValue::Float(3.0).as_i64(), Some(3));
        assert_eq!(FieldValue::Float(3.5).as_i64(), None);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("maestro".parse::<Role>(), Ok(Role::Teacher));
        assert_eq!("Administrador".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("student".parse::<Role>(), Ok(Role::Student));
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_session_absent_when_token_empty() {
        assert!(!Session::new(Role::Admin, "  ", None).is_active());
        assert!(Session::new(Role::Admin, "abc", None).is_active());
    }

    #[test]
    fn test_person_absorb_keeps_existing_when_nested_blank() {
        let mut p = PersonFields {
            first_name: "Ana".into(),
            last_name: String::new(),
            email: "old@x.com".into(),
        };
        let user = UserRef {
            id: 1,
            first_name: String::new(),
            last_name: "Lopez".into(),
            email: "ana@x.com".into(),
        };
        p.absorb(Some(&user));
        assert_eq!(p.name(), "Ana Lopez");
        assert_eq!(p.email, "ana@x.com");
    }

    #[test]
    fn test_full_name_trims() {
        assert_eq!(full_name("Ana", ""), "Ana");
        assert_eq!(full_name("", ""), "");
    }
}
