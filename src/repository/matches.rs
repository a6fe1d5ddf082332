use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;

use super::{load, save, try_load};
use crate::domain::{Match, MatchesDocument};
use crate::store::{DocumentStore, SyncStatus};

pub async fn list_all<S: DocumentStore>(store: &S) -> Vec<Match> {
    let document: MatchesDocument = load(store).await;
    document.matches
}

pub async fn list_on_date<S: DocumentStore>(store: &S, date: NaiveDate) -> Vec<Match> {
    let document: MatchesDocument = load(store).await;
    document.on_date(date).into_iter().cloned().collect()
}

/// Append results to the collection and write it back in one go.
pub async fn insert_matches<S: DocumentStore>(store: &S, new_matches: Vec<Match>) -> Result<SyncStatus> {
    let mut document: MatchesDocument = try_load(store).await?;
    let count = new_matches.len();
    document.matches.extend(new_matches);
    let status = save(store, &document).await?;

    info!("Saved {} match results", count);
    Ok(status)
}

pub async fn delete_match<S: DocumentStore>(store: &S, id: &str) -> Result<Match> {
    let mut document: MatchesDocument = try_load(store).await?;
    let removed = document
        .remove(id)
        .with_context(|| format!("No match with id {}", id))?;
    save(store, &document).await?;

    info!("Deleted match {}", id);
    Ok(removed)
}
