use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::models::{AttendanceRecord, Match, Member};

/// Named top-level documents held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Members,
    Attendance,
    Matches,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Members => "members",
            Collection::Attendance => "attendance",
            Collection::Matches => "matches",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed document stored under one collection name
pub trait CollectionDocument: Serialize + for<'de> Deserialize<'de> + Default {
    const COLLECTION: Collection;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembersDocument {
    #[serde(default)]
    pub members: Vec<Member>,
}

impl CollectionDocument for MembersDocument {
    const COLLECTION: Collection = Collection::Members;
}

impl MembersDocument {
    pub fn find(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.find(id).map(|m| m.name.as_str())
    }

    /// Remove a member, returning it when present.
    pub fn remove(&mut self, id: &str) -> Option<Member> {
        let idx = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(idx))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDocument {
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl CollectionDocument for AttendanceDocument {
    const COLLECTION: Collection = Collection::Attendance;
}

impl AttendanceDocument {
    pub fn for_date(&self, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.attendance.iter().find(|a| a.date == date)
    }

    /// Insert or overwrite the record for `record.date`.
    pub fn upsert(&mut self, record: AttendanceRecord) {
        match self.attendance.iter_mut().find(|a| a.date == record.date) {
            Some(existing) => *existing = record,
            None => self.attendance.push(record),
        }
    }

    pub fn attendees(&self, date: NaiveDate) -> Vec<String> {
        self.for_date(date)
            .map(|a| a.member_ids.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchesDocument {
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl CollectionDocument for MatchesDocument {
    const COLLECTION: Collection = Collection::Matches;
}

impl MatchesDocument {
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.date == date).collect()
    }

    pub fn remove(&mut self, id: &str) -> Option<Match> {
        let idx = self.matches.iter().position(|m| m.id == id)?;
        Some(self.matches.remove(idx))
    }
}
