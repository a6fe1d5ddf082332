use std::cmp::Ordering;
use std::collections::HashMap;
use log::debug;

use crate::domain::{DateRange, Match, MemberId, MembersDocument, RankingEntry};

pub const UNKNOWN_PLAYER: &str = "Unknown";

const WIN_BONUS: i64 = 2;
const DRAW_POINTS: i64 = 1;

/// Builds the points leaderboard for matches played inside `range`.
///
/// Winners score `2 + game difference`, losers lose the game difference and a
/// draw is worth one point to everybody on court. Players with no match in the
/// range are left out. Ordering is points, then wins (both descending), then
/// member id.
pub fn compute_rankings(
    matches: &[Match],
    members: &MembersDocument,
    range: DateRange,
) -> Vec<RankingEntry> {
    let in_range: Vec<&Match> = matches.iter().filter(|m| range.contains(m.date)).collect();
    debug!(
        "Ranking {} of {} matches between {} and {}",
        in_range.len(),
        matches.len(),
        range.start,
        range.end
    );

    let mut table = accumulate(&in_range);
    let mut entries: Vec<RankingEntry> = table.drain().map(|(_, entry)| entry).collect();

    attach_names(&mut entries, members);
    entries.sort_by(compare_entries);
    entries
}

fn accumulate(matches: &[&Match]) -> HashMap<MemberId, RankingEntry> {
    let mut table: HashMap<MemberId, RankingEntry> = HashMap::new();

    for game in matches {
        let outcome = TeamOutcome::of(game);

        for player in &game.team1 {
            let entry = entry_for(&mut table, player);
            apply_result(entry, outcome.team1, game.score1, game.score2);
        }
        for player in &game.team2 {
            let entry = entry_for(&mut table, player);
            apply_result(entry, outcome.team2, game.score2, game.score1);
        }
    }

    table
}

fn entry_for<'a>(
    table: &'a mut HashMap<MemberId, RankingEntry>,
    player: &MemberId,
) -> &'a mut RankingEntry {
    table
        .entry(player.clone())
        .or_insert_with(|| RankingEntry::new(player.clone()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Win(u32),
    Loss(u32),
    Draw,
}

struct TeamOutcome {
    team1: Outcome,
    team2: Outcome,
}

impl TeamOutcome {
    fn of(game: &Match) -> Self {
        let diff = game.score_diff();
        match game.score1.cmp(&game.score2) {
            Ordering::Greater => Self {
                team1: Outcome::Win(diff),
                team2: Outcome::Loss(diff),
            },
            Ordering::Less => Self {
                team1: Outcome::Loss(diff),
                team2: Outcome::Win(diff),
            },
            Ordering::Equal => Self {
                team1: Outcome::Draw,
                team2: Outcome::Draw,
            },
        }
    }
}

fn apply_result(entry: &mut RankingEntry, outcome: Outcome, own_score: u32, opponent_score: u32) {
    entry.games_won += own_score;
    entry.games_lost += opponent_score;

    match outcome {
        Outcome::Win(diff) => {
            entry.wins += 1;
            entry.points += WIN_BONUS + diff as i64;
        }
        Outcome::Loss(diff) => {
            entry.losses += 1;
            entry.points -= diff as i64;
        }
        Outcome::Draw => {
            entry.draws += 1;
            entry.points += DRAW_POINTS;
        }
    }
}

fn attach_names(entries: &mut [RankingEntry], members: &MembersDocument) {
    for entry in entries.iter_mut() {
        entry.name = members
            .name_of(&entry.member_id)
            .unwrap_or(UNKNOWN_PLAYER)
            .to_string();
    }
}

fn compare_entries(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.member_id.cmp(&b.member_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Member;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn game(id: &str, day: u32, players: [&str; 4], score1: u32, score2: u32) -> Match {
        Match::new(
            id.to_string(),
            date(day),
            [players[0].to_string(), players[1].to_string()],
            [players[2].to_string(), players[3].to_string()],
            score1,
            score2,
        )
        .unwrap()
    }

    fn roster() -> MembersDocument {
        let names = [("a", "Ahn"), ("b", "Baek"), ("c", "Cho"), ("d", "Do")];
        MembersDocument {
            members: names
                .iter()
                .map(|(id, name)| Member::new(id.to_string(), name, None, date(1)))
                .collect(),
        }
    }

    fn find<'a>(entries: &'a [RankingEntry], id: &str) -> &'a RankingEntry {
        entries.iter().find(|e| e.member_id == id).unwrap()
    }

    #[test]
    fn test_shutout_win_awards_bonus_plus_difference() {
        let matches = vec![game("g1", 6, ["a", "b", "c", "d"], 6, 0)];

        let rankings = compute_rankings(&matches, &roster(), DateRange::single_day(date(6)));

        for id in ["a", "b"] {
            let entry = find(&rankings, id);
            assert_eq!(entry.points, 8);
            assert_eq!(entry.wins, 1);
            assert_eq!(entry.games_won, 6);
            assert_eq!(entry.games_lost, 0);
        }
        for id in ["c", "d"] {
            let entry = find(&rankings, id);
            assert_eq!(entry.points, -6);
            assert_eq!(entry.losses, 1);
            assert_eq!(entry.games_won, 0);
            assert_eq!(entry.games_lost, 6);
        }
    }

    #[test]
    fn test_draw_gives_everyone_one_point() {
        let matches = vec![game("g1", 6, ["a", "b", "c", "d"], 6, 6)];

        let rankings = compute_rankings(&matches, &roster(), DateRange::single_day(date(6)));

        assert_eq!(rankings.len(), 4);
        for entry in &rankings {
            assert_eq!(entry.points, 1);
            assert_eq!(entry.draws, 1);
            assert_eq!(entry.wins + entry.losses, 0);
            assert_eq!(entry.games_won, 6);
            assert_eq!(entry.games_lost, 6);
        }
    }

    #[test]
    fn test_range_without_matches_is_empty() {
        let matches = vec![game("g1", 6, ["a", "b", "c", "d"], 6, 2)];

        let range = DateRange::new(date(10), date(16));
        assert!(compute_rankings(&matches, &roster(), range).is_empty());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let matches = vec![
            game("g1", 3, ["a", "b", "c", "d"], 6, 2),
            game("g2", 9, ["a", "c", "b", "d"], 6, 3),
            game("g3", 10, ["a", "d", "b", "c"], 6, 0),
        ];

        let rankings = compute_rankings(&matches, &roster(), DateRange::week_of(date(6)));

        assert_eq!(find(&rankings, "a").matches_played(), 2);
        assert_eq!(find(&rankings, "a").points, 6 + 5);
    }

    #[test]
    fn test_sorted_by_points_then_wins_then_id() {
        let matches = vec![
            game("g1", 6, ["a", "b", "c", "d"], 6, 4),
            game("g2", 6, ["c", "d", "a", "b"], 6, 4),
            game("g3", 6, ["a", "c", "b", "d"], 5, 5),
        ];

        let rankings = compute_rankings(&matches, &roster(), DateRange::single_day(date(6)));

        // Every player finishes on 3 points with one win
        assert!(rankings.iter().all(|e| e.points == 3 && e.wins == 1));
        let order: Vec<&str> = rankings.iter().map(|e| e.member_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_points_may_go_negative_and_rank_last() {
        let matches = vec![
            game("g1", 6, ["a", "b", "c", "d"], 6, 1),
            game("g2", 6, ["a", "c", "b", "d"], 6, 2),
        ];

        let rankings = compute_rankings(&matches, &roster(), DateRange::single_day(date(6)));

        assert_eq!(rankings.first().unwrap().member_id, "a");
        let last = rankings.last().unwrap();
        assert_eq!(last.member_id, "d");
        assert_eq!(last.points, -9);
    }

    #[test]
    fn test_names_resolved_from_roster() {
        let matches = vec![game("g1", 6, ["a", "b", "c", "zz"], 6, 3)];

        let rankings = compute_rankings(&matches, &roster(), DateRange::single_day(date(6)));

        assert_eq!(find(&rankings, "a").name, "Ahn");
        assert_eq!(find(&rankings, "zz").name, UNKNOWN_PLAYER);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let matches = vec![
            game("g1", 6, ["a", "b", "c", "d"], 6, 4),
            game("g2", 6, ["a", "c", "b", "d"], 3, 6),
        ];
        let range = DateRange::single_day(date(6));

        let first = compute_rankings(&matches, &roster(), range);
        let second = compute_rankings(&matches, &roster(), range);

        assert_eq!(first, second);
    }
}
