use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};

use crate::config::schedule::is_operating_day;
use crate::config::ClubSettings;
use crate::domain::{DateRange, Member, MemberId};
use crate::repository::{attendance, members};
use crate::store::{DocumentStore, SyncStatus};

/// Attendance of one member over a month's operating days
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceStat {
    pub member_id: MemberId,
    pub name: String,
    pub attended: usize,
    pub rate_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAttendance {
    pub year: i32,
    pub month: u32,
    pub operating_days: usize,
    pub stats: Vec<AttendanceStat>,
}

/// Attendance as written, after duplicate ids were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct SavedAttendance {
    pub member_ids: Vec<MemberId>,
    pub status: SyncStatus,
}

pub struct AttendanceService<'a, S: DocumentStore> {
    store: &'a S,
    club: &'a ClubSettings,
}

impl<'a, S: DocumentStore> AttendanceService<'a, S> {
    pub fn new(store: &'a S, club: &'a ClubSettings) -> Self {
        Self { store, club }
    }

    /// Save who came on `date`, replacing any earlier record for that date.
    pub async fn record(&self, date: NaiveDate, member_ids: &[MemberId]) -> Result<SavedAttendance> {
        let roster = members::load_all(self.store).await;
        let checked = dedup_preserving_order(member_ids);

        if let Some(unknown) = checked.iter().find(|id| !roster.contains(id)) {
            bail!("No member with id {}", unknown);
        }
        self.check_head_count(checked.len())?;

        let status = attendance::upsert_attendance(self.store, date, checked.clone()).await?;
        Ok(SavedAttendance {
            member_ids: checked,
            status,
        })
    }

    pub async fn attendees(&self, date: NaiveDate) -> Vec<Member> {
        let roster = members::load_all(self.store).await;
        attendance::attendees_on(self.store, date)
            .await
            .iter()
            .filter_map(|id| roster.find(id).cloned())
            .collect()
    }

    /// Attendance rates for the month of `today`, counting only operating days
    /// that have already happened.
    pub async fn monthly_stats(&self, today: NaiveDate) -> MonthlyAttendance {
        let month = DateRange::month_of(today);
        let operating_days = DateRange::new(month.start, today)
            .days()
            .filter(|d| is_operating_day(&self.club.schedules, *d))
            .count();

        let roster = members::load_all(self.store).await;
        let records = attendance::load_all(self.store).await;

        let mut stats: Vec<AttendanceStat> = roster
            .members
            .iter()
            .map(|member| {
                let attended = records
                    .attendance
                    .iter()
                    .filter(|r| month.contains(r.date) && r.contains(&member.id))
                    .count();
                AttendanceStat {
                    member_id: member.id.clone(),
                    name: member.name.clone(),
                    attended,
                    rate_percent: rate(attended, operating_days),
                }
            })
            .collect();
        stats.sort_by(|a, b| b.attended.cmp(&a.attended).then_with(|| a.name.cmp(&b.name)));

        MonthlyAttendance {
            year: today.year(),
            month: today.month(),
            operating_days,
            stats,
        }
    }

    fn check_head_count(&self, count: usize) -> Result<()> {
        if count < self.club.min_attendance {
            bail!(
                "At least {} attendees are required (got {})",
                self.club.min_attendance,
                count
            );
        }
        if count > self.club.max_attendance {
            bail!(
                "At most {} attendees are allowed (got {})",
                self.club.max_attendance,
                count
            );
        }
        Ok(())
    }
}

fn dedup_preserving_order(ids: &[MemberId]) -> Vec<MemberId> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(id.clone());
        }
    }
    seen
}

fn rate(attended: usize, operating_days: usize) -> f64 {
    if operating_days == 0 {
        0.0
    } else {
        attended as f64 / operating_days as f64 * 100.0
    }
}
