use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    FieldValue, PersonFields, Role, Session, UserRef, sanitize_value, strip_time, text,
};
use crate::table::{Column, ColumnKind, TableRow, staff_only};
use crate::util::{InputRule, age_on, parse_date, sanitize, today};

const COLUMNS: &[Column] = &[
    Column::new("enrollment", "Enrollment", ColumnKind::Numeric),
    Column::new("name", "Name", ColumnKind::Name),
    Column::new("email", "Email", ColumnKind::Plain),
    Column::new("birth_date", "Birth date", ColumnKind::Date),
    Column::new("age", "Age", ColumnKind::Numeric),
    Column::new("phone", "Phone", ColumnKind::Plain),
    Column::new("curp", "CURP", ColumnKind::Plain),
    Column::new("rfc", "RFC", ColumnKind::Plain),
    Column::new("occupation", "Occupation", ColumnKind::Plain),
    Column::new("edit", "Edit", ColumnKind::Action).visible_if(staff_only),
    Column::new("delete", "Delete", ColumnKind::Action).visible_if(staff_only),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "matricula", default)]
    pub enrollment: FieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    #[serde(flatten)]
    pub person: PersonFields,
    #[serde(rename = "fecha_nacimiento", default)]
    pub birth_date: String,
    /// Stored age. Only used when the birth date does not parse.
    #[serde(rename = "edad", default, skip_serializing_if = "Option::is_none")]
    pub stored_age: Option<FieldValue>,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(default)]
    pub curp: String,
    #[serde(default)]
    pub rfc: String,
    #[serde(rename = "ocupacion", default)]
    pub occupation: String,
}

impl Student {
    /// Cleans typed input the way the registration form does.
    pub fn sanitize(&mut self) {
        self.person.sanitize();
        sanitize_value(&mut self.enrollment, InputRule::NoWhitespace);
        self.phone = sanitize(&self.phone, InputRule::Digits);
        self.curp = sanitize(&self.curp, InputRule::NoWhitespace);
        self.rfc = sanitize(&self.rfc, InputRule::Rfc);
        self.occupation = sanitize(&self.occupation, InputRule::Letters);
    }

    /// Age on `on`, from the birth date when it parses.
    pub fn age_at(&self, on: NaiveDate) -> Option<FieldValue> {
        match parse_date(&self.birth_date) {
            Some(birth) => age_on(birth, on).map(|a| FieldValue::Integer(a.into())),
            None => self.stored_age.clone(),
        }
    }
}

impl TableRow for Student {
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
            "enrollment" => Some(self.enrollment.clone()),
            "name" => Some(self.person.name().into()),
            "first_name" => text(&self.person.first_name),
            "last_name" => text(&self.person.last_name),
            "email" => text(&self.person.email),
            "birth_date" => text(&self.birth_date),
            "age" => self.age_at(today()),
            "phone" => text(&self.phone),
            "curp" => text(&self.curp),
            "rfc" => text(&self.rfc),
            "occupation" => text(&self.occupation),
            _ => None,
        }
    }

    fn searchable_text(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}{}",
            self.enrollment,
            self.person.first_name,
            self.person.last_name,
            self.person.email,
            self.curp,
            self.rfc,
            self.occupation,
            self.phone
        )
        .to_lowercase()
    }

    fn can_edit(&self, session: &Session) -> bool {
        matches!(session.role, Role::Admin | Role::Teacher)
    }

    fn can_delete(&self, session: &Session) -> bool {
        matches!(session.role, Role::Admin | Role::Teacher)
    }

    fn creatable_by(role: Role) -> bool {
        staff_only(role)
    }
}
