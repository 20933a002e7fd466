use serde::{Deserialize, Serialize};

use super::{
    FieldValue, PersonFields, Role, Session, UserRef, sanitize_value, strip_time, text,
};
use crate::table::{Column, ColumnKind, TableRow, admin_only, staff_only};
use crate::util::{InputRule, sanitize};

const COLUMNS: &[Column] = &[
    Column::new("worker_id", "Worker ID", ColumnKind::Numeric),
    Column::new("name", "Name", ColumnKind::Name),
    Column::new("email", "Email", ColumnKind::Plain),
    Column::new("birth_date", "Birth date", ColumnKind::Date),
    Column::new("phone", "Phone", ColumnKind::Plain),
    Column::new("rfc", "RFC", ColumnKind::Plain),
    Column::new("cubicle", "Cubicle", ColumnKind::Code),
    Column::new("research_area", "Research area", ColumnKind::Plain),
    Column::new("edit", "Edit", ColumnKind::Action).visible_if(staff_only),
    Column::new("delete", "Delete", ColumnKind::Action).visible_if(admin_only),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "id_trabajador", default)]
    pub worker_id: FieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    #[serde(flatten)]
    pub person: PersonFields,
    #[serde(rename = "fecha_nacimiento", default)]
    pub birth_date: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(default)]
    pub rfc: String,
    #[serde(rename = "cubiculo", default)]
    pub cubicle: String,
    #[serde(rename = "area_investigacion", default)]
    pub research_area: FieldValue,
}

impl Teacher {
    /// Cleans typed input the way the registration form does.
    pub fn sanitize(&mut self) {
        self.person.sanitize();
        sanitize_value(&mut self.worker_id, InputRule::NoWhitespace);
        self.phone = sanitize(&self.phone, InputRule::Digits);
        self.rfc = sanitize(&self.rfc, InputRule::Rfc);
    }

    /// Account id of the teacher, used to match the signed-in user.
    pub fn user_id(&self) -> Option<u64> {
        self.user.as_ref().map(|u| u.id)
    }
}

impl TableRow for Teacher {
    fn id(&self) -> u64 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn flatten(&mut self) {
        self.person.absorb(self.user.as_ref());
        strip_time(&mut self.birth_date);
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "worker_id" => Some(self.worker_id.clone()),
            "name" => Some(self.person.name().into()),
            "first_name" => text(&self.person.first_name),
            "last_name" => text(&self.person.last_name),
            "email" => text(&self.person.email),
            "birth_date" => text(&self.birth_date),
            "phone" => text(&self.phone),
            "rfc" => text(&self.rfc),
            "cubicle" => text(&self.cubicle),
            "research_area" => Some(self.research_area.clone()),
            _ => None,
        }
    }

    fn searchable_text(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}",
            self.worker_id,
            self.person.first_name,
            self.person.last_name,
            self.person.email,
            self.rfc,
            self.cubicle,
            self.research_area
        )
        .to_lowercase()
    }

    /// Admins edit anyone; a teacher only their own profile.
    fn can_edit(&self, session: &Session) -> bool {
        match session.role {
            Role::Admin => true,
            Role::Teacher => session.user_id.is_some() && session.user_id == self.user_id(),
            Role::Student => false,
        }
    }

    fn can_delete(&self, session: &Session) -> bool {
        session.role == Role::Admin
    }

    fn listable_by(role: Role) -> bool {
        staff_only(role)
    }
}
