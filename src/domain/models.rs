use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type MemberId = String;
pub type MatchId = String;

/// Registered club member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub join_date: NaiveDate,
}

impl Member {
    pub fn new(id: MemberId, name: &str, phone: Option<&str>, join_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            phone: normalize_phone(phone),
            join_date,
        }
    }

    pub fn update(&mut self, name: Option<&str>, phone: Option<&str>) {
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if phone.is_some() {
            self.phone = normalize_phone(phone);
        }
    }
}

fn normalize_phone(phone: Option<&str>) -> Option<String> {
    phone
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// Members present at the session held on `date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub member_ids: Vec<MemberId>,
}

impl AttendanceRecord {
    pub fn contains(&self, member_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == member_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Team1,
    Team2,
    Draw,
}

impl Winner {
    pub fn from_scores(score1: u32, score2: u32) -> Self {
        match score1.cmp(&score2) {
            std::cmp::Ordering::Greater => Winner::Team1,
            std::cmp::Ordering::Less => Winner::Team2,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Winner::Team1 => "team1",
            Winner::Team2 => "team2",
            Winner::Draw => "draw",
        }
    }
}

/// A doubles match with its final score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub date: NaiveDate,
    pub team1: [MemberId; 2],
    pub team2: [MemberId; 2],
    pub score1: u32,
    pub score2: u32,
    pub winner: Winner,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<String>,
}

impl Match {
    /// Build a match result; the four players must all be different.
    pub fn new(
        id: MatchId,
        date: NaiveDate,
        team1: [MemberId; 2],
        team2: [MemberId; 2],
        score1: u32,
        score2: u32,
    ) -> Result<Self> {
        ensure_distinct_players(&team1, &team2)?;

        Ok(Self {
            id,
            date,
            team1,
            team2,
            score1,
            score2,
            winner: Winner::from_scores(score1, score2),
            court: None,
            time_slot: None,
            start_time: None,
            recorded_by: None,
        })
    }

    /// Promote a scheduled pairing to a scored match.
    pub fn from_scheduled(
        id: MatchId,
        date: NaiveDate,
        scheduled: &ScheduledMatch,
        score1: u32,
        score2: u32,
    ) -> Result<Self> {
        let mut game = Self::new(
            id,
            date,
            scheduled.team1.clone(),
            scheduled.team2.clone(),
            score1,
            score2,
        )?;
        game.court = Some(scheduled.court.clone());
        game.time_slot = Some(scheduled.time_slot);
        game.start_time = Some(scheduled.start_time.clone());
        Ok(game)
    }

    pub fn recorded_by(mut self, user: Option<&str>) -> Self {
        self.recorded_by = user.map(str::to_string);
        self
    }

    pub fn players(&self) -> impl Iterator<Item = &MemberId> {
        self.team1.iter().chain(self.team2.iter())
    }

    pub fn score_diff(&self) -> u32 {
        self.score1.abs_diff(self.score2)
    }
}

fn ensure_distinct_players(team1: &[MemberId; 2], team2: &[MemberId; 2]) -> Result<()> {
    let players: Vec<&MemberId> = team1.iter().chain(team2.iter()).collect();

    for (idx, player) in players.iter().enumerate() {
        if players[idx + 1..].contains(player) {
            bail!("Player {} appears more than once in the match", player);
        }
    }
    Ok(())
}

/// A pairing produced by the scheduler, before any score is entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub match_num: u32,
    pub time_slot: u32,
    pub start_time: String,
    pub court: String,
    pub team1: [MemberId; 2],
    pub team2: [MemberId; 2],
}

impl ScheduledMatch {
    pub fn players(&self) -> impl Iterator<Item = &MemberId> {
        self.team1.iter().chain(self.team2.iter())
    }
}

/// Leaderboard line for one player over a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub member_id: MemberId,
    pub name: String,
    pub points: i64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_won: u32,
    pub games_lost: u32,
}

impl RankingEntry {
    pub fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            name: String::new(),
            points: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            games_won: 0,
            games_lost: 0,
        }
    }

    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}
