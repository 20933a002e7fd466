//! List screen controller.
//!
//! A `Screen` owns one table, one provider and the session it was opened
//! with. Provider failures come back as `ScreenError` and leave the table as
//! it was; destructive actions only run with a confirmed `Confirmation`.

use std::fmt;

use tracing::{debug, info, warn};

use crate::models::Session;
use crate::provider::{ProviderError, Record, RecordProvider};
use crate::table::{TableRow, TableState};
use crate::view::build_table;
use crate::view::common::TableViewModel;

/// Answer from a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub confirmed: bool,
}

impl Confirmation {
    pub const YES: Self = Self { confirmed: true };
    pub const NO: Self = Self { confirmed: false };
}

/// Result of a confirmation-gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// No session token; the screen cannot be opened.
    NoSession,
    /// The session's role may not perform this action.
    Forbidden { action: &'static str, id: Option<u64> },
    /// Form input breaks these rules; nothing was sent.
    Invalid(Vec<String>),
    Provider(ProviderError),
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::NoSession => write!(f, "No active session"),
            ScreenError::Forbidden {
                action,
                id: Some(id),
            } => write!(f, "Not allowed to {} record {}", action, id),
            ScreenError::Forbidden { action, id: None } => {
                write!(f, "Not allowed to {} records", action)
            }
            ScreenError::Invalid(errors) => write!(f, "Invalid input: {}", errors.join("; ")),
            ScreenError::Provider(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreenError::Provider(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProviderError> for ScreenError {
    fn from(e: ProviderError) -> Self {
        ScreenError::Provider(e)
    }
}

pub struct Screen<T: Record, P: RecordProvider<T>> {
    title: String,
    session: Session,
    provider: P,
    pub table: TableState<T>,
}

impl<T: Record, P: RecordProvider<T>> Screen<T, P> {
    /// Opens an empty screen. Fails without an active session, or when the
    /// session's role may not list this record type.
    pub fn open(
        title: impl Into<String>,
        session: Session,
        provider: P,
        page_size: usize,
    ) -> Result<Self, ScreenError> {
        if !session.is_active() {
            return Err(ScreenError::NoSession);
        }
        if !T::listable_by(session.role) {
            debug!(role = %session.role, "list not available to role");
            return Err(ScreenError::Forbidden {
                action: "view",
                id: None,
            });
        }
        Ok(Self {
            title: title.into(),
            session,
            provider,
            table: TableState::new(page_size),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Loads from the provider, keeping only records the role may see.
    ///
    /// On failure the table keeps its previous contents.
    pub fn reload(&mut self) -> Result<usize, ScreenError> {
        let records = match self.provider.load_list() {
            Ok(records) => records,
            Err(e) => {
                warn!(screen = %self.title, error = %e, "load failed, keeping previous rows");
                return Err(e.into());
            }
        };
        let role = self.session.role;
        let visible: Vec<T> = records.into_iter().filter(|r| r.visible_to(role)).collect();
        let count = visible.len();
        self.table.load(visible);
        debug!(screen = %self.title, count, "screen reloaded");
        Ok(count)
    }

    fn find(&self, id: u64) -> Result<&T, ScreenError> {
        self.table
            .items
            .iter()
            .find(|r| r.id() == id)
            .ok_or(ScreenError::Provider(ProviderError::NotFound(id)))
    }

    /// Deletes a loaded record after confirmation, then reloads.
    pub fn delete(&mut self, id: u64, confirmation: Confirmation) -> Result<Outcome, ScreenError> {
        if !confirmation.confirmed {
            debug!(id, "delete cancelled");
            return Ok(Outcome::Cancelled);
        }
        if !self.find(id)?.can_delete(&self.session) {
            return Err(ScreenError::Forbidden {
                action: "delete",
                id: Some(id),
            });
        }
        self.provider.delete(id)?;
        info!(screen = %self.title, id, "record deleted");
        self.reload()?;
        Ok(Outcome::Applied)
    }

    /// Saves changes to a loaded record after confirmation, then reloads.
    ///
    /// Permission is checked against the stored record, not the edited one.
    pub fn update(
        &mut self,
        mut record: T,
        confirmation: Confirmation,
    ) -> Result<Outcome, ScreenError> {
        if !confirmation.confirmed {
            debug!(id = record.id(), "update cancelled");
            return Ok(Outcome::Cancelled);
        }
        let id = record.id();
        if !self.find(id)?.can_edit(&self.session) {
            return Err(ScreenError::Forbidden {
                action: "edit",
                id: Some(id),
            });
        }
        record.prepare_input().map_err(ScreenError::Invalid)?;
        self.provider.update(record)?;
        info!(screen = %self.title, id, "record updated");
        self.reload()?;
        Ok(Outcome::Applied)
    }

    /// Registers a new record, then reloads. Returns the stored record.
    pub fn create(&mut self, mut record: T) -> Result<T, ScreenError> {
        if !T::creatable_by(self.session.role) {
            return Err(ScreenError::Forbidden {
                action: "create",
                id: None,
            });
        }
        record.prepare_input().map_err(ScreenError::Invalid)?;
        let created = self.provider.create(record)?;
        info!(screen = %self.title, id = created.id(), "record created");
        self.reload()?;
        Ok(created)
    }

    /// View model of the current page for the session's role.
    pub fn view(&self) -> TableViewModel<u64> {
        build_table(&self.title, &self.table, &self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::AUDIENCE_GENERAL;
    use crate::models::{Admin, Event, FieldValue, Role, Student, Teacher, UserRef};
    use crate::provider::MemoryProvider;
    use crate::util::{format_date, today};
    use chrono::Days;

    fn event(id: u64, audience: &str) -> Event {
        Event {
            id,
            name: format!("Evento {}", id),
            audience: audience.into(),
            ..Default::default()
        }
    }

    fn events() -> MemoryProvider<Event> {
        MemoryProvider::new(vec![
            event(1, "estudiantes"),
            event(2, "profesores"),
            event(3, "publico_general"),
        ])
    }

    fn admin() -> Session {
        Session::new(Role::Admin, "token", Some(1))
    }

    #[test]
    fn test_open_requires_session() {
        let result = Screen::open("Events", Session::new(Role::Admin, "", None), events(), 10);
        assert!(matches!(result, Err(ScreenError::NoSession)));
    }

    fn session(role: Role) -> Session {
        Session::new(role, "token", Some(7))
    }

    fn is_view_forbidden<T: Record, P: RecordProvider<T>>(
        result: Result<Screen<T, P>, ScreenError>,
    ) -> bool {
        matches!(result, Err(ScreenError::Forbidden { action: "view", id: None }))
    }

    #[test]
    fn test_open_checks_role_per_list() {
        let admins = || {
            MemoryProvider::new(vec![Admin {
                id: 1,
                rfc: "SECRET".into(),
                ..Default::default()
            }])
        };
        let teachers = || MemoryProvider::new(vec![Teacher::default()]);

        assert!(is_view_forbidden(Screen::open(
            "Admins",
            session(Role::Student),
            admins(),
            10
        )));
        assert!(is_view_forbidden(Screen::open(
            "Admins",
            session(Role::Teacher),
            admins(),
            10
        )));
        assert!(is_view_forbidden(Screen::open(
            "Teachers",
            session(Role::Student),
            teachers(),
            10
        )));

        let mut screen = Screen::open("Admins", session(Role::Admin), admins(), 10).unwrap();
        assert_eq!(screen.reload().unwrap(), 1);
        let screen = Screen::open("Teachers", session(Role::Teacher), teachers(), 10);
        assert!(screen.is_ok());
    }

    #[test]
    fn test_every_role_lists_students_and_events() {
        for role in [Role::Admin, Role::Teacher, Role::Student] {
            let students = MemoryProvider::<Student>::default();
            assert!(Screen::open("Students", session(role), students, 10).is_ok());
            assert!(Screen::open("Events", session(role), events(), 10).is_ok());
        }
    }

    #[test]
    fn test_forbidden_view_message() {
        let err = ScreenError::Forbidden {
            action: "view",
            id: None,
        };
        assert_eq!(err.to_string(), "Not allowed to view records");
    }

    #[test]
    fn test_reload_filters_by_role() {
        let session = Session::new(Role::Student, "token", Some(9));
        let mut screen = Screen::open("Events", session, events(), 10).unwrap();
        assert_eq!(screen.reload().unwrap(), 2);
        let ids: Vec<u64> = screen.table.page().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_failed_reload_keeps_previous_rows() {
        let mut screen = Screen::open("Events", admin(), events(), 10).unwrap();
        screen.reload().unwrap();
        screen.table.set_filter("evento");

        let mut failing = events();
        failing.set_fail_loads(true);
        let mut broken = Screen::open("Events", admin(), failing, 10).unwrap();
        broken.table = screen.table.clone();

        let err = broken.reload().unwrap_err();
        assert!(matches!(err, ScreenError::Provider(ProviderError::Unavailable(_))));
        assert_eq!(broken.table.total_filtered(), 3);
        assert_eq!(broken.table.filter(), "evento");
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut screen = Screen::open("Events", admin(), events(), 10).unwrap();
        screen.reload().unwrap();
        assert_eq!(screen.delete(2, Confirmation::NO).unwrap(), Outcome::Cancelled);
        assert_eq!(screen.provider().records().len(), 3);

        assert_eq!(screen.delete(2, Confirmation::YES).unwrap(), Outcome::Applied);
        assert_eq!(screen.provider().records().len(), 2);
        assert_eq!(screen.table.total_filtered(), 2);
    }

    #[test]
    fn test_delete_keeps_filter() {
        let mut screen = Screen::open("Events", admin(), events(), 10).unwrap();
        screen.reload().unwrap();
        screen.table.set_filter("evento 3");
        screen.delete(1, Confirmation::YES).unwrap();
        assert_eq!(screen.table.filter(), "evento 3");
        assert_eq!(screen.table.total_filtered(), 1);
    }

    #[test]
    fn test_forbidden_and_missing() {
        let session = Session::new(Role::Teacher, "token", Some(5));
        let mut screen = Screen::open("Events", session, events(), 10).unwrap();
        screen.reload().unwrap();
        assert_eq!(
            screen.delete(2, Confirmation::YES),
            Err(ScreenError::Forbidden {
                action: "delete",
                id: Some(2)
            })
        );
        // Event 1 targets students, so a teacher never loaded it.
        assert_eq!(
            screen.delete(1, Confirmation::YES),
            Err(ScreenError::Provider(ProviderError::NotFound(1)))
        );
        assert!(matches!(
            screen.create(event(0, "profesores")),
            Err(ScreenError::Forbidden { action: "create", .. })
        ));
    }

    #[test]
    fn test_teacher_updates_own_profile_only() {
        let teacher = |id: u64, user_id: u64| Teacher {
            id,
            user: Some(UserRef {
                id: user_id,
                ..Default::default()
            }),
            ..Default::default()
        };
        let provider = MemoryProvider::new(vec![teacher(1, 10), teacher(2, 20)]);
        let session = Session::new(Role::Teacher, "token", Some(20));
        let mut screen = Screen::open("Teachers", session, provider, 10).unwrap();
        screen.reload().unwrap();

        let mut own = teacher(2, 20);
        own.cubicle = "B-4".into();
        assert_eq!(screen.update(own, Confirmation::YES).unwrap(), Outcome::Applied);
        assert_eq!(screen.provider().records()[1].cubicle, "B-4");

        // Claiming someone else's account id does not bypass the check.
        let other = teacher(1, 20);
        assert!(matches!(
            screen.update(other, Confirmation::YES),
            Err(ScreenError::Forbidden { action: "edit", .. })
        ));
    }

    #[test]
    fn test_teacher_registers_students() {
        let session = Session::new(Role::Teacher, "token", Some(3));
        let mut screen =
            Screen::open("Students", session, MemoryProvider::<Student>::default(), 10).unwrap();
        let created = screen.create(Student::default()).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(screen.table.total_filtered(), 1);
    }

    #[test]
    fn test_create_and_update_clean_form_input() {
        let mut screen = Screen::open(
            "Admins",
            admin(),
            MemoryProvider::<Admin>::default(),
            10,
        )
        .unwrap();
        let created = screen
            .create(Admin {
                admin_key: "ADM 7".into(),
                rfc: "abcd-010101-xyz9".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(created.admin_key, "ADM7");
        assert_eq!(created.rfc, "abcd010101xyz");

        let mut edited = created.clone();
        edited.occupation = "Rectora 2".into();
        screen.update(edited, Confirmation::YES).unwrap();
        assert_eq!(screen.provider().records()[0].occupation, "Rectora ");
    }

    #[test]
    fn test_event_form_rules_block_create() {
        let mut screen = Screen::open("Events", admin(), events(), 10).unwrap();
        screen.reload().unwrap();

        let Err(ScreenError::Invalid(errors)) = screen.create(event(0, AUDIENCE_GENERAL)) else {
            panic!("empty event accepted");
        };
        assert!(errors.contains(&"date is required".to_string()));
        assert_eq!(screen.provider().records().len(), 3);

        let date = today().checked_add_days(Days::new(30)).unwrap();
        let valid = Event {
            name: "Feria de ciencias".into(),
            kind: "feria".into(),
            date: format_date(date),
            start: "9:00 AM".into(),
            end: "13:00".into(),
            venue: "Explanada".into(),
            description: "Proyectos de todos los semestres.".into(),
            capacity: FieldValue::Integer(200),
            ..event(0, AUDIENCE_GENERAL)
        };
        let created = screen.create(valid).unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.start, "09:00");
        assert_eq!(screen.table.total_filtered(), 4);
    }

    #[test]
    fn test_view_uses_session_role() {
        let session = Session::new(Role::Student, "token", None);
        let mut screen = Screen::open("Events", session, events(), 10).unwrap();
        screen.reload().unwrap();
        let vm = screen.view();
        assert_eq!(vm.title, "Events");
        assert!(!vm.keys.contains(&"edit"));
        assert_eq!(vm.rows.len(), 2);
    }
}
