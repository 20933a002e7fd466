use serde::{Deserialize, Serialize};

use super::{FieldValue, PersonFields, Role, Session, UserRef, text};
use crate::table::{Column, ColumnKind, TableRow, admin_only};
use crate::util::{InputRule, sanitize};

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", ColumnKind::Numeric),
    Column::new("admin_key", "Admin key", ColumnKind::Plain),
    Column::new("name", "Name", ColumnKind::Name),
    Column::new("email", "Email", ColumnKind::Plain),
    Column::new("rfc", "RFC", ColumnKind::Plain),
    Column::new("occupation", "Occupation", ColumnKind::Plain),
    Column::new("edit", "Edit", ColumnKind::Action).visible_if(admin_only),
    Column::new("delete", "Delete", ColumnKind::Action).visible_if(admin_only),
];

/// Administrator account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "clave_admin", default)]
    pub admin_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    #[serde(flatten)]
    pub person: PersonFields,
    #[serde(default)]
    pub rfc: String,
    #[serde(rename = "ocupacion", default)]
    pub occupation: String,
}

impl Admin {
    /// Cleans typed input the way the registration form does.
    pub fn sanitize(&mut self) {
        self.person.sanitize();
        self.admin_key = sanitize(&self.admin_key, InputRule::NoWhitespace);
        self.rfc = sanitize(&self.rfc, InputRule::Rfc);
        self.occupation = sanitize(&self.occupation, InputRule::Letters);
    }
}

impl TableRow for Admin {
    fn id(&self) -> u64 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn flatten(&mut self) {
        self.person.absorb(self.user.as_ref());
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "admin_key" => text(&self.admin_key),
            "name" => Some(self.person.name().into()),
            "first_name" => text(&self.person.first_name),
            "last_name" => text(&self.person.last_name),
            "email" => text(&self.person.email),
            "rfc" => text(&self.rfc),
            "occupation" => text(&self.occupation),
            _ => None,
        }
    }

    fn searchable_text(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}",
            self.id,
            self.admin_key,
            self.person.first_name,
            self.person.last_name,
            self.person.email,
            self.rfc,
            self.occupation
        )
        .to_lowercase()
    }

    fn can_edit(&self, session: &Session) -> bool {
        session.role == Role::Admin
    }

    fn can_delete(&self, session: &Session) -> bool {
        session.role == Role::Admin
    }

    fn listable_by(role: Role) -> bool {
        admin_only(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "id": 3,
        "clave_admin": "ADM-01",
        "user": {"id": 9, "first_name": "Rosa", "last_name": "Mena", "email": "rosa@uni.mx"},
        "rfc": "MERO800101AB1",
        "ocupacion": "Coordinadora"
    }"#;

    #[test]
    fn test_flatten_from_nested_user() {
        let mut admin: Admin = serde_json::from_str(JSON).unwrap();
        assert_eq!(admin.person.first_name, "");
        admin.flatten();
        assert_eq!(admin.field("name"), Some(FieldValue::Text("Rosa Mena".into())));
        assert_eq!(admin.field("email"), Some(FieldValue::Text("rosa@uni.mx".into())));
    }

    #[test]
    fn test_searchable_text() {
        let mut admin: Admin = serde_json::from_str(JSON).unwrap();
        admin.flatten();
        let text = admin.searchable_text();
        assert!(text.contains("adm-01"));
        assert!(text.contains("rosamena"));
        assert!(text.contains("coordinadora"));
    }

    #[test]
    fn test_only_admins_mutate() {
        let admin: Admin = serde_json::from_str(JSON).unwrap();
        assert!(admin.can_delete(&Session::new(Role::Admin, "t", None)));
        assert!(!admin.can_edit(&Session::new(Role::Teacher, "t", Some(9))));
    }

    #[test]
    fn test_sanitize_form_fields() {
        let mut admin = Admin {
            admin_key: "ADM 01".into(),
            person: PersonFields {
                first_name: "Rosa3".into(),
                last_name: "Mena-López".into(),
                email: "rosa mena@uni.mx".into(),
            },
            rfc: "mero-800101-ab1x".into(),
            occupation: "Coordinadora #2".into(),
            ..Default::default()
        };
        admin.sanitize();
        assert_eq!(admin.admin_key, "ADM01");
        assert_eq!(admin.person.first_name, "Rosa");
        assert_eq!(admin.person.last_name, "MenaLópez");
        assert_eq!(admin.person.email, "rosamena@uni.mx");
        assert_eq!(admin.rfc, "mero800101ab1");
        assert_eq!(admin.occupation, "Coordinadora ");
    }
}
