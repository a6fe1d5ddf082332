use std::path::PathBuf;

use super::schedule::{default_schedules, SessionSchedule};

pub struct StoreSettings {
    pub remote_url: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: &'static str,
    pub data_dir: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            remote_url: None,
            timeout_secs: 5,
            user_agent: "SeochoTennisClub/1.0",
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StoreSettings {
    /// Defaults overridden by `CLUB_STORE_URL`, `CLUB_DATA_DIR` and
    /// `CLUB_STORE_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(url) = std::env::var("CLUB_STORE_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            settings.remote_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Ok(dir) = std::env::var("CLUB_DATA_DIR") {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(secs) = std::env::var("CLUB_STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            settings.timeout_secs = secs;
        }

        settings
    }

    /// Only http(s) endpoints count as a configured remote store.
    pub fn remote_configured(&self) -> bool {
        self.remote_url
            .as_deref()
            .is_some_and(|u| u.starts_with("https://") || u.starts_with("http://"))
    }
}

#[derive(Clone)]
pub struct ClubSettings {
    pub court_names: Vec<String>,
    pub min_attendance: usize,
    pub max_attendance: usize,
    pub schedules: Vec<SessionSchedule>,
}

impl Default for ClubSettings {
    fn default() -> Self {
        Self {
            court_names: vec!["Court 7".to_string(), "Court 8".to_string()],
            min_attendance: 8,
            max_attendance: 16,
            schedules: default_schedules(),
        }
    }
}

pub struct AppConfig {
    pub store: StoreSettings,
    pub club: ClubSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            store: StoreSettings::from_env(),
            club: ClubSettings::default(),
        }
    }
}
