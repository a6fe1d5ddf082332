pub mod schedule;
pub mod settings;

pub use schedule::{schedule_for, SessionSchedule};
pub use settings::{AppConfig, ClubSettings, StoreSettings};
