use chrono::{Datelike, NaiveDate, Weekday};

/// Start times of the match slots on one weekly club day
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSchedule {
    pub weekday: Weekday,
    pub label: String,
    pub times: Vec<String>,
}

impl SessionSchedule {
    pub fn new(weekday: Weekday, label: &str, times: &[&str]) -> Self {
        Self {
            weekday,
            label: label.to_string(),
            times: times.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Thursday evening and Sunday late afternoon, five 30-minute slots each
pub fn default_schedules() -> Vec<SessionSchedule> {
    vec![
        SessionSchedule::new(
            Weekday::Thu,
            "Thursday 19:00 - 22:00",
            &["19:00", "19:30", "20:00", "20:30", "21:00"],
        ),
        SessionSchedule::new(
            Weekday::Sun,
            "Sunday 17:00 - 20:00",
            &["17:00", "17:30", "18:00", "18:30", "19:00"],
        ),
    ]
}

/// Schedule for the weekday of `date`; days without a session fall back to the
/// first configured schedule.
pub fn schedule_for(schedules: &[SessionSchedule], date: NaiveDate) -> Option<&SessionSchedule> {
    schedules
        .iter()
        .find(|s| s.weekday == date.weekday())
        .or_else(|| schedules.first())
}

pub fn is_operating_day(schedules: &[SessionSchedule], date: NaiveDate) -> bool {
    schedules.iter().any(|s| s.weekday == date.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn test_sunday_uses_sunday_slots() {
        let schedules = default_schedules();
        let schedule = schedule_for(&schedules, date(9)).unwrap();
        assert_eq!(schedule.weekday, Weekday::Sun);
        assert_eq!(schedule.times.first().map(String::as_str), Some("17:00"));
    }

    #[test]
    fn test_off_day_falls_back_to_thursday() {
        let schedules = default_schedules();
        // 2025-03-04 is a Tuesday
        let schedule = schedule_for(&schedules, date(4)).unwrap();
        assert_eq!(schedule.weekday, Weekday::Thu);
        assert!(!is_operating_day(&schedules, date(4)));
        assert!(is_operating_day(&schedules, date(6)));
    }
}
