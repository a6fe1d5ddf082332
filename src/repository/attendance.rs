use anyhow::Result;
use chrono::NaiveDate;
use log::info;

use super::{load, save, try_load};
use crate::domain::{AttendanceDocument, AttendanceRecord, MemberId};
use crate::store::{DocumentStore, SyncStatus};

pub async fn load_all<S: DocumentStore>(store: &S) -> AttendanceDocument {
    load(store).await
}

pub async fn attendees_on<S: DocumentStore>(store: &S, date: NaiveDate) -> Vec<MemberId> {
    load_all(store).await.attendees(date)
}

/// Replace the record for `date` with `member_ids`.
pub async fn upsert_attendance<S: DocumentStore>(
    store: &S,
    date: NaiveDate,
    member_ids: Vec<MemberId>,
) -> Result<SyncStatus> {
    let mut document: AttendanceDocument = try_load(store).await?;
    let count = member_ids.len();
    document.upsert(AttendanceRecord { date, member_ids });
    let status = save(store, &document).await?;

    info!("Saved attendance for {} ({} members)", date, count);
    Ok(status)
}
