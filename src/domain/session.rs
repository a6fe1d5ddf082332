use chrono::{Local, NaiveDate};

/// Who is operating the app and which session date they are looking at
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub current_user: Option<String>,
    pub selected_date: NaiveDate,
}

impl SessionContext {
    pub fn new(current_user: Option<String>, selected_date: NaiveDate) -> Self {
        Self {
            current_user: current_user.filter(|u| !u.trim().is_empty()),
            selected_date,
        }
    }

    /// Session for today's date, as seen by the local clock.
    pub fn today(current_user: Option<String>) -> Self {
        Self::new(current_user, Local::now().date_naive())
    }

    pub fn user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }
}
