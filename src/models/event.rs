//! Academic events and the event form.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{FieldValue, Role, Session, UserRef, strip_time, text};
use crate::table::{Column, ColumnKind, TableRow, admin_only};
use crate::util::{
    InputRule, TimeParseError, format_12h, format_24h, format_date, limit_digits, parse_clock,
    parse_date, sanitize, today,
};
use crate::view::common::RowStyleClass;

const COLUMNS: &[Column] = &[
    Column::new("id", "ID", ColumnKind::Numeric),
    Column::new("name", "Name", ColumnKind::Plain),
    Column::new("kind", "Type", ColumnKind::Plain),
    Column::new("date", "Date", ColumnKind::Date),
    Column::new("schedule", "Schedule", ColumnKind::Plain),
    Column::new("venue", "Venue", ColumnKind::Plain),
    Column::new("audience", "Audience", ColumnKind::Plain),
    Column::new("owner", "Owner", ColumnKind::Name),
    Column::new("capacity", "Capacity", ColumnKind::Numeric),
    Column::new("edit", "Edit", ColumnKind::Action).visible_if(admin_only),
    Column::new("delete", "Delete", ColumnKind::Action).visible_if(admin_only),
];

pub const AUDIENCE_STUDENTS: &str = "estudiantes";
pub const AUDIENCE_TEACHERS: &str = "profesores";
pub const AUDIENCE_GENERAL: &str = "publico_general";

const UNASSIGNED: &str = "Unassigned";

/// Display label for an event type code. Unknown codes are shown as is.
pub fn kind_label(kind: &str) -> &str {
    match kind {
        "conferencia" => "Conference",
        "seminario" => "Seminar",
        "taller" => "Workshop",
        "curso" => "Course",
        "congreso" => "Congress",
        "simposio" => "Symposium",
        "concurso" => "Contest",
        "otro" => "Other",
        other => other,
    }
}

/// Display label for an audience code. Unknown codes are shown as is.
pub fn audience_label(audience: &str) -> &str {
    match audience {
        AUDIENCE_STUDENTS => "Students",
        AUDIENCE_TEACHERS | "maestros" => "Teachers",
        AUDIENCE_GENERAL => "General public",
        other => other,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "hora_inicio", default)]
    pub start: String,
    #[serde(rename = "hora_fin", default)]
    pub end: String,
    #[serde(rename = "lugar", default)]
    pub venue: String,
    #[serde(rename = "publico_objetivo", default)]
    pub audience: String,
    #[serde(rename = "programa_educativo", default)]
    pub program: Option<String>,
    #[serde(rename = "responsable", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserRef>,
    #[serde(rename = "responsable_id", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<u64>,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "cupo_maximo", default)]
    pub capacity: FieldValue,
}

impl Event {
    /// "start - end" as stored.
    pub fn schedule(&self) -> String {
        format!("{} - {}", self.start, self.end)
    }

    /// Responsible person's name, or "Unassigned".
    pub fn owner_name(&self) -> String {
        self.owner
            .as_ref()
            .map(UserRef::full_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNASSIGNED.to_string())
    }

    /// True when the event date is before `on`. Unparseable dates are never past.
    pub fn is_past_on(&self, on: NaiveDate) -> bool {
        parse_date(&self.date).is_some_and(|d| d < on)
    }
}

impl TableRow for Event {
    fn id(&self) -> u64 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn flatten(&mut self) {
        strip_time(&mut self.date);
        if self.owner_id.is_none() {
            self.owner_id = self.owner.as_ref().map(|o| o.id);
        }
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.into()),
            "name" => text(&self.name),
            "kind" => text(&self.kind),
            "date" => text(&self.date),
            "schedule" => Some(self.schedule().into()),
            "venue" => text(&self.venue),
            "audience" => text(&self.audience),
            "program" => self.program.as_deref().and_then(text),
            "owner" => Some(self.owner_name().into()),
            "description" => text(&self.description),
            "capacity" => Some(self.capacity.clone()),
            _ => None,
        }
    }

    fn display(&self, key: &str) -> String {
        match key {
            "kind" => kind_label(&self.kind).to_string(),
            "audience" => audience_label(&self.audience).to_string(),
            _ => self.field(key).map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    fn searchable_text(&self) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.name,
            self.kind,
            self.venue,
            self.audience,
            self.owner_name(),
            self.description
        )
        .to_lowercase()
    }

    fn visible_to(&self, role: Role) -> bool {
        match role {
            Role::Admin => true,
            Role::Teacher => matches!(self.audience.as_str(), AUDIENCE_TEACHERS | AUDIENCE_GENERAL),
            Role::Student => matches!(self.audience.as_str(), AUDIENCE_STUDENTS | AUDIENCE_GENERAL),
        }
    }

    fn can_edit(&self, session: &Session) -> bool {
        session.is_admin()
    }

    fn can_delete(&self, session: &Session) -> bool {
        session.is_admin()
    }

    fn row_style(&self) -> RowStyleClass {
        if self.is_past_on(today()) {
            RowStyleClass::Dimmed
        } else {
            RowStyleClass::Normal
        }
    }
}

const NAME_LEN: (usize, usize) = (5, 100);
const VENUE_MAX: usize = 200;
const DESCRIPTION_LEN: (usize, usize) = (10, 300);
const CAPACITY_RANGE: (u32, u32) = (1, 999);
const CAPACITY_DIGITS: usize = 3;

/// Event form validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Field left empty.
    Required(&'static str),
    NameLength,
    /// Field holds characters outside its allowed set.
    Characters(&'static str),
    VenueTooLong,
    DescriptionLength,
    Capacity,
    InvalidDate(String),
    DateInPast,
    InvalidTime(TimeParseError),
    EndNotAfterStart,
    ProgramRequired,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::Required(field) => write!(f, "{} is required", field),
            DraftError::NameLength => write!(
                f,
                "name must be {} to {} characters",
                NAME_LEN.0, NAME_LEN.1
            ),
            DraftError::Characters(field) => {
                write!(f, "{} contains characters that are not allowed", field)
            }
            DraftError::VenueTooLong => {
                write!(f, "venue must be at most {} characters", VENUE_MAX)
            }
            DraftError::DescriptionLength => write!(
                f,
                "description must be {} to {} characters",
                DESCRIPTION_LEN.0, DESCRIPTION_LEN.1
            ),
            DraftError::Capacity => write!(
                f,
                "capacity must be between {} and {}",
                CAPACITY_RANGE.0, CAPACITY_RANGE.1
            ),
            DraftError::InvalidDate(input) => write!(f, "invalid date '{}'", input),
            DraftError::DateInPast => write!(f, "date must not be in the past"),
            DraftError::InvalidTime(e) => write!(f, "{}", e),
            DraftError::EndNotAfterStart => write!(f, "end time must be after start time"),
            DraftError::ProgramRequired => {
                write!(f, "program is required for student events")
            }
        }
    }
}

impl std::error::Error for DraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DraftError::InvalidTime(e) => Some(e),
            _ => None,
        }
    }
}

/// Event form contents, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub kind: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub venue: String,
    pub audience: String,
    pub program: String,
    pub owner_id: Option<u64>,
    pub description: String,
    pub capacity: String,
}

impl EventDraft {
    /// Prefills the form from a stored event. Times become 12-hour.
    pub fn from_event(event: &Event) -> Self {
        let to_12h = |t: &str| {
            parse_clock(t)
                .map(format_12h)
                .unwrap_or_else(|_| t.to_string())
        };
        let mut date = event.date.clone();
        strip_time(&mut date);
        Self {
            name: event.name.clone(),
            kind: event.kind.clone(),
            date,
            start: to_12h(&event.start),
            end: to_12h(&event.end),
            venue: event.venue.clone(),
            audience: event.audience.clone(),
            program: event.program.clone().unwrap_or_default(),
            owner_id: event
                .owner_id
                .or_else(|| event.owner.as_ref().map(|o| o.id)),
            description: event.description.clone(),
            capacity: event.capacity.to_string(),
        }
    }

    /// Strips characters outside each field's allowed set.
    pub fn sanitize(&mut self) {
        self.name = sanitize(&self.name, InputRule::Alphanumeric);
        self.venue = sanitize(&self.venue, InputRule::Alphanumeric);
        self.description = sanitize(&self.description, InputRule::Prose);
        self.capacity = limit_digits(&self.capacity, CAPACITY_DIGITS);
        if self.audience != AUDIENCE_STUDENTS {
            self.program.clear();
        }
    }

    /// Every rule the draft violates. Empty means valid.
    pub fn validate(&self, today: NaiveDate) -> Vec<DraftError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(DraftError::Required("name"));
        } else {
            let len = name.chars().count();
            if len < NAME_LEN.0 || len > NAME_LEN.1 {
                errors.push(DraftError::NameLength);
            }
            if !name.chars().all(|c| InputRule::Alphanumeric.allows(c)) {
                errors.push(DraftError::Characters("name"));
            }
        }

        if self.kind.trim().is_empty() {
            errors.push(DraftError::Required("type"));
        }

        if self.date.trim().is_empty() {
            errors.push(DraftError::Required("date"));
        } else {
            match parse_date(&self.date) {
                Some(d) if d < today => errors.push(DraftError::DateInPast),
                Some(_) => {}
                None => errors.push(DraftError::InvalidDate(self.date.trim().to_string())),
            }
        }

        let start = self.parse_time(&self.start, "start time", &mut errors);
        let end = self.parse_time(&self.end, "end time", &mut errors);
        if let (Some(start), Some(end)) = (start, end)
            && end <= start
        {
            errors.push(DraftError::EndNotAfterStart);
        }

        let venue = self.venue.trim();
        if venue.is_empty() {
            errors.push(DraftError::Required("venue"));
        } else {
            if venue.chars().count() > VENUE_MAX {
                errors.push(DraftError::VenueTooLong);
            }
            if !venue.chars().all(|c| InputRule::Alphanumeric.allows(c)) {
                errors.push(DraftError::Characters("venue"));
            }
        }

        if self.audience.trim().is_empty() {
            errors.push(DraftError::Required("audience"));
        } else if self.audience == AUDIENCE_STUDENTS && self.program.trim().is_empty() {
            errors.push(DraftError::ProgramRequired);
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(DraftError::Required("description"));
        } else {
            let len = description.chars().count();
            if len < DESCRIPTION_LEN.0 || len > DESCRIPTION_LEN.1 {
                errors.push(DraftError::DescriptionLength);
            }
            if !description.chars().all(|c| InputRule::Prose.allows(c)) {
                errors.push(DraftError::Characters("description"));
            }
        }

        if self.capacity.trim().is_empty() {
            errors.push(DraftError::Required("capacity"));
        } else if self.capacity_value().is_none() {
            errors.push(DraftError::Capacity);
        }

        errors
    }

    /// Builds the event to send to the backend: 24-hour times, ISO date.
    pub fn to_event(&self, id: u64) -> Result<Event, DraftError> {
        let date = parse_date(&self.date)
            .ok_or_else(|| DraftError::InvalidDate(self.date.trim().to_string()))?;
        let start = parse_clock(&self.start).map_err(DraftError::InvalidTime)?;
        let end = parse_clock(&self.end).map_err(DraftError::InvalidTime)?;
        let capacity = self.capacity_value().ok_or(DraftError::Capacity)?;
        let program = (self.audience == AUDIENCE_STUDENTS)
            .then(|| self.program.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Event {
            id,
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            date: format_date(date),
            start: format_24h(start),
            end: format_24h(end),
            venue: self.venue.trim().to_string(),
            audience: self.audience.trim().to_string(),
            program,
            owner: None,
            owner_id: self.owner_id,
            description: self.description.trim().to_string(),
            capacity: FieldValue::Integer(capacity.into()),
        })
    }

    fn parse_time(
        &self,
        input: &str,
        field: &'static str,
        errors: &mut Vec<DraftError>,
    ) -> Option<NaiveTime> {
        if input.trim().is_empty() {
            errors.push(DraftError::Required(field));
            return None;
        }
        match parse_clock(input) {
            Ok(t) => Some(t),
            Err(e) => {
                errors.push(DraftError::InvalidTime(e));
                None
            }
        }
    }

    fn capacity_value(&self) -> Option<u32> {
        self.capacity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (CAPACITY_RANGE.0..=CAPACITY_RANGE.1).contains(n))
    }
}

impl Event {
    /// Runs the event through the form on `today`: sanitizes it, checks every
    /// rule, then stores the date as ISO and the times as 24-hour.
    pub fn apply_form(&mut self, today: NaiveDate) -> Result<(), Vec<DraftError>> {
        let mut draft = EventDraft::from_event(self);
        draft.sanitize();
        let errors = draft.validate(today);
        if !errors.is_empty() {
            return Err(errors);
        }
        let mut normalized = draft.to_event(self.id).map_err(|e| vec![e])?;
        normalized.owner = self.owner.take();
        *self = normalized;
        Ok(())
    }
}
