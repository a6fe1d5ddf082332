use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cache::Cache;
use crate::config::{schedule_for, ClubSettings};
use crate::domain::ids::{generate_id, MATCH_PREFIX};
use crate::domain::{Match, MemberId, ScheduledMatch, SessionContext};
use crate::errors::{draft_context, with_parse_context};
use crate::repository::{attendance, matches, members};
use crate::scheduler::generate_matches;
use crate::store::{DocumentStore, SyncStatus};

/// Scheduled pairings for one date, waiting for scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDraft {
    pub date: NaiveDate,
    pub schedule_label: String,
    pub slot_count: usize,
    pub matches: Vec<ScheduledMatch>,
}

/// Outcome of entering scores for a draft
#[derive(Debug, Clone, PartialEq)]
pub struct SavedScores {
    pub saved: Vec<Match>,
    pub skipped: usize,
    pub status: Option<SyncStatus>,
}

pub struct MatchdayService<'a, S: DocumentStore> {
    store: &'a S,
    club: &'a ClubSettings,
    session: &'a SessionContext,
    drafts: &'a Cache,
}

impl<'a, S: DocumentStore> MatchdayService<'a, S> {
    pub fn new(
        store: &'a S,
        club: &'a ClubSettings,
        session: &'a SessionContext,
        drafts: &'a Cache,
    ) -> Self {
        Self {
            store,
            club,
            session,
            drafts,
        }
    }

    fn date(&self) -> NaiveDate {
        self.session.selected_date
    }

    fn draft_key(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }

    /// Draw a fresh schedule for the session date and keep it as the draft.
    /// Calling it again re-rolls the pairings.
    pub async fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MatchDraft> {
        let attendees = attendance::attendees_on(self.store, self.date()).await;
        if attendees.len() < self.club.min_attendance {
            bail!(
                "Not enough attendees on {} (have {}, need {})",
                self.date(),
                attendees.len(),
                self.club.min_attendance
            );
        }

        let schedule = schedule_for(&self.club.schedules, self.date())
            .context("No session schedule is configured")?;
        info!("Planning {} with schedule {}", self.date(), schedule.label);

        let draft = MatchDraft {
            date: self.date(),
            schedule_label: schedule.label.clone(),
            slot_count: schedule.times.len(),
            matches: generate_matches(&attendees, &schedule.times, &self.club.court_names, rng),
        };

        self.drafts
            .save_draft(&self.draft_key(), &draft)
            .with_context(|| draft_context("save", &self.draft_key()))?;
        Ok(draft)
    }

    pub fn draft(&self) -> Result<Option<MatchDraft>> {
        self.drafts
            .load_draft(&self.draft_key())
            .with_context(|| draft_context("load", &self.draft_key()))
    }

    /// Enter scores for the draft in match order. `None` leaves a match
    /// unplayed. The draft is discarded once anything has been saved.
    pub async fn record_scores(&self, scores: &[Option<(u32, u32)>]) -> Result<SavedScores> {
        let draft = self
            .draft()?
            .with_context(|| format!("No scheduled matches for {}; run schedule first", self.date()))?;

        if scores.len() > draft.matches.len() {
            bail!(
                "Got {} scores but only {} matches are scheduled",
                scores.len(),
                draft.matches.len()
            );
        }

        let mut saved = Vec::new();
        for (scheduled, score) in draft.matches.iter().zip(scores) {
            if let Some((score1, score2)) = score {
                let game = Match::from_scheduled(
                    generate_id(MATCH_PREFIX),
                    draft.date,
                    scheduled,
                    *score1,
                    *score2,
                )?
                .recorded_by(self.session.user());
                saved.push(game);
            }
        }
        let skipped = draft.matches.len() - saved.len();

        if saved.is_empty() {
            info!("No scores entered for {}", draft.date);
            return Ok(SavedScores {
                saved,
                skipped,
                status: None,
            });
        }

        let status = matches::insert_matches(self.store, saved.clone()).await?;
        self.drafts
            .remove_draft(&self.draft_key())
            .with_context(|| draft_context("remove", &self.draft_key()))?;

        Ok(SavedScores {
            saved,
            skipped,
            status: Some(status),
        })
    }

    /// Record a match played outside the drawn schedule.
    pub async fn record_manual(
        &self,
        team1: [MemberId; 2],
        team2: [MemberId; 2],
        score1: u32,
        score2: u32,
    ) -> Result<Match> {
        let roster = members::load_all(self.store).await;
        if let Some(unknown) = team1.iter().chain(team2.iter()).find(|id| !roster.contains(id)) {
            bail!("No member with id {}", unknown);
        }

        let game = Match::new(generate_id(MATCH_PREFIX), self.date(), team1, team2, score1, score2)?
            .recorded_by(self.session.user());
        matches::insert_matches(self.store, vec![game.clone()]).await?;
        Ok(game)
    }

    pub async fn results(&self) -> Vec<Match> {
        matches::list_on_date(self.store, self.date()).await
    }

    pub async fn delete(&self, id: &str) -> Result<Match> {
        matches::delete_match(self.store, id).await
    }
}

/// Parses `6:4`, `6-4` or `6 4`; `-` or `_` marks a match without a score.
pub fn parse_score(input: &str) -> Result<Option<(u32, u32)>> {
    let trimmed = input.trim();
    if trimmed == "-" || trimmed == "_" || trimmed.is_empty() {
        return Ok(None);
    }

    let (first, second) = trimmed
        .split_once(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .with_context(|| format!("Score '{}' must look like 6:4", trimmed))?;
    let (first, second) = (first.trim(), second.trim());
    if !is_game_count(first) || !is_game_count(second) {
        bail!("Score '{}' must be two game counts, e.g. 6:4", trimmed);
    }

    let score1 = with_parse_context(first.parse::<u32>(), "first score")?;
    let score2 = with_parse_context(second.parse::<u32>(), "second score")?;
    Ok(Some((score1, score2)))
}

fn is_game_count(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Winner;
    use crate::repository::test_support::{cleanup, temp_store};
    use crate::store::FileStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()
    }

    async fn seed_attendance(store: &FileStore, count: usize) -> Vec<MemberId> {
        let mut ids = Vec::new();
        for i in 0..count {
            let member = members::insert_member(store, &format!("P{}", i), None, thursday())
                .await
                .unwrap();
            ids.push(member.id);
        }
        attendance::upsert_attendance(store, thursday(), ids.clone())
            .await
            .unwrap();
        ids
    }

    #[test]
    fn test_parse_score_forms() {
        assert_eq!(parse_score("6:4").unwrap(), Some((6, 4)));
        assert_eq!(parse_score(" 3-6 ").unwrap(), Some((3, 6)));
        assert_eq!(parse_score("-").unwrap(), None);
        assert!(parse_score("6:x").is_err());
        assert!(parse_score("6").is_err());
        assert_eq!(parse_score("6 4").unwrap(), Some((6, 4)));
    }

    #[test]
    fn test_parse_score_rejects_signed_games() {
        assert!(parse_score("6:-4").is_err());
        assert!(parse_score("-3:6").is_err());
        assert!(parse_score("6--4").is_err());
        assert!(parse_score("6:+4").is_err());
        assert!(parse_score("6:4:2").is_err());
    }

    #[tokio::test]
    async fn test_plan_then_score() {
        let store = temp_store("matchday_plan");
        let drafts = Cache::new(store.dir()).unwrap();
        let club = ClubSettings::default();
        let session = SessionContext::new(Some("Kim".to_string()), thursday());
        let service = MatchdayService::new(&store, &club, &session, &drafts);
        seed_attendance(&store, 8).await;

        let draft = service.plan(&mut ChaCha8Rng::seed_from_u64(1)).await.unwrap();
        assert_eq!(draft.matches.len(), 10);
        assert_eq!(draft.matches[0].start_time, "19:00");
        assert_eq!(service.draft().unwrap(), Some(draft.clone()));

        let outcome = service
            .record_scores(&[Some((6, 4)), None, Some((5, 5))])
            .await
            .unwrap();

        assert_eq!(outcome.saved.len(), 2);
        assert_eq!(outcome.skipped, 8);
        assert_eq!(outcome.status, Some(SyncStatus::Synced));
        assert!(service.draft().unwrap().is_none());

        let results = service.results().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].team1, draft.matches[0].team1);
        assert_eq!(results[0].court.as_deref(), Some(draft.matches[0].court.as_str()));
        assert_eq!(results[0].recorded_by.as_deref(), Some("Kim"));
        assert_eq!(results[1].winner, Winner::Draw);
        assert_eq!(results[1].time_slot, Some(draft.matches[2].time_slot));
        cleanup(&store);
    }

    #[tokio::test]
    async fn test_plan_requires_minimum_attendance() {
        let store = temp_store("matchday_min");
        let drafts = Cache::new(store.dir()).unwrap();
        let club = ClubSettings::default();
        let session = SessionContext::new(None, thursday());
        let service = MatchdayService::new(&store, &club, &session, &drafts);
        seed_attendance(&store, 6).await;

        assert!(service.plan(&mut ChaCha8Rng::seed_from_u64(1)).await.is_err());
        assert!(service.record_scores(&[Some((6, 0))]).await.is_err());
        cleanup(&store);
    }

    #[tokio::test]
    async fn test_manual_record_and_delete() {
        let store = temp_store("matchday_manual");
        let drafts = Cache::new(store.dir()).unwrap();
        let club = ClubSettings::default();
        let session = SessionContext::new(None, thursday());
        let service = MatchdayService::new(&store, &club, &session, &drafts);
        let ids = seed_attendance(&store, 4).await;

        let game = service
            .record_manual(
                [ids[0].clone(), ids[1].clone()],
                [ids[2].clone(), ids[3].clone()],
                6,
                2,
            )
            .await
            .unwrap();
        assert_eq!(game.winner, Winner::Team1);
        assert_eq!(game.recorded_by, None);

        let duplicate = service
            .record_manual(
                [ids[0].clone(), ids[1].clone()],
                [ids[2].clone(), ids[0].clone()],
                6,
                2,
            )
            .await;
        assert!(duplicate.is_err());

        service.delete(&game.id).await.unwrap();
        assert!(service.results().await.is_empty());
        cleanup(&store);
    }
}
