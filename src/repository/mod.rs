pub mod attendance;
pub mod matches;
pub mod members;

use anyhow::{Context, Result};
use log::warn;
use serde_json::Value;

use crate::domain::CollectionDocument;
use crate::errors::{store_context, with_parse_context};
use crate::store::{DocumentStore, SyncStatus};

/// Latest snapshot of a collection.
///
/// Unreadable or malformed documents degrade to an empty collection so the
/// app keeps working on whatever it can see.
pub async fn load<D, S>(store: &S) -> D
where
    D: CollectionDocument,
    S: DocumentStore,
{
    match try_load(store).await {
        Ok(document) => document,
        Err(e) => {
            warn!("{:#}; continuing with an empty {}", e, D::COLLECTION);
            D::default()
        }
    }
}

/// Strict snapshot for read-modify-write paths: an absent document is empty,
/// but one that does not decode is an error so it never gets overwritten.
pub(crate) async fn try_load<D, S>(store: &S) -> Result<D>
where
    D: CollectionDocument,
    S: DocumentStore,
{
    match store.get(D::COLLECTION).await? {
        None | Some(Value::Null) => Ok(D::default()),
        Some(value) => with_parse_context(
            serde_json::from_value(value),
            &format!("{} document", D::COLLECTION),
        ),
    }
}

/// Overwrite the whole collection.
pub async fn save<D, S>(store: &S, document: &D) -> Result<SyncStatus>
where
    D: CollectionDocument,
    S: DocumentStore,
{
    let value = serde_json::to_value(document)
        .with_context(|| store_context("serialize", D::COLLECTION.as_str()))?;
    store.put(D::COLLECTION, &value).await
}


#[cfg(test)]
mod tests {
    use super::test_support::{cleanup, temp_store};
    use super::*;
    use crate::domain::{Collection, Match, MembersDocument};
    use chrono::NaiveDate;
    use serde_json::json;

    #[tokio::test]
    async fn test_absent_collection_loads_default() {
        let store = temp_store("absent");
        let members: MembersDocument = load(&store).await;
        assert!(members.members.is_empty());
        cleanup(&store);
    }

    #[tokio::test]
    async fn test_malformed_collection_loads_default() {
        let store = temp_store("malformed");
        store
            .put(Collection::Members, &json!({"members": "not a list"}))
            .await
            .unwrap();

        let members: MembersDocument = load(&store).await;

        assert!(members.members.is_empty());
        cleanup(&store);
    }

    #[tokio::test]
    async fn test_write_against_malformed_collection_keeps_it() {
        let store = temp_store("malformed_write");
        let stored = json!({"matches": [
            {"id": "g_old1", "date": "2025-03-06", "team1": ["a", "b"], "team2": ["c", "d"],
             "score1": 6, "score2": 4, "winner": "team1"},
            {"id": "g_bad", "date": "2025-03-06", "team1": ["a", "b"], "team2": ["c", "d"],
             "score1": -1, "score2": 6, "winner": "team2"}
        ]});
        store.put(Collection::Matches, &stored).await.unwrap();

        let game = Match::new(
            "g_new".to_string(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            ["a".to_string(), "b".to_string()],
            ["c".to_string(), "d".to_string()],
            6,
            2,
        )
        .unwrap();

        assert!(matches::insert_matches(&store, vec![game]).await.is_err());
        assert!(matches::delete_match(&store, "g_old1").await.is_err());
        assert_eq!(store.get(Collection::Matches).await.unwrap(), Some(stored));
        cleanup(&store);
    }

    #[tokio::test]
    async fn test_write_against_malformed_members_keeps_them() {
        let store = temp_store("malformed_members_write");
        let stored = json!({"members": "not a list"});
        store.put(Collection::Members, &stored).await.unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();

        assert!(members::insert_member(&store, "Kim", None, date).await.is_err());
        assert!(attendance::upsert_attendance(&store, date, vec![]).await.is_ok());
        assert_eq!(store.get(Collection::Members).await.unwrap(), Some(stored));
        cleanup(&store);
    }
}
