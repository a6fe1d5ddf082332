use crate::domain::{DateRange, RankingEntry};
use crate::ranking::compute_rankings;
use crate::repository::{matches, members};
use crate::store::DocumentStore;

pub struct LeaderboardService<'a, S: DocumentStore> {
    store: &'a S,
}

impl<'a, S: DocumentStore> LeaderboardService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Rankings over a fresh snapshot of matches and members.
    pub async fn rankings(&self, range: DateRange) -> Vec<RankingEntry> {
        let results = matches::list_all(self.store).await;
        let roster = members::load_all(self.store).await;
        compute_rankings(&results, &roster, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Match, RankingPeriod};
    use crate::repository::test_support::{cleanup, temp_store};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_rankings_use_stored_matches_and_names() {
        let store = temp_store("leaderboard");
        let date = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
        let mut ids = Vec::new();
        for name in ["Ahn", "Baek", "Cho", "Do"] {
            ids.push(members::insert_member(&store, name, None, date).await.unwrap().id);
        }
        let game = Match::new(
            "g_1".to_string(),
            date,
            [ids[0].clone(), ids[1].clone()],
            [ids[2].clone(), ids[3].clone()],
            6,
            0,
        )
        .unwrap();
        matches::insert_matches(&store, vec![game]).await.unwrap();

        let service = LeaderboardService::new(&store);
        let weekly = service.rankings(RankingPeriod::Weekly.range_for(date)).await;

        assert_eq!(weekly.len(), 4);
        assert_eq!(weekly[0].points, 8);
        assert!(weekly[0].name == "Ahn" || weekly[0].name == "Baek");

        let next_month = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        assert!(service
            .rankings(RankingPeriod::Monthly.range_for(next_month))
            .await
            .is_empty());
        cleanup(&store);
    }
}
