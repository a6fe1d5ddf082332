use chrono::NaiveDate;
use colored::Colorize;

use crate::domain::{DateRange, Match, Member, MemberId, MembersDocument, RankingEntry};
use crate::ranking::UNKNOWN_PLAYER;
use crate::scheduler::summarize;
use crate::services::{MatchDraft, MonthlyAttendance, SavedScores};
use crate::store::SyncStatus;

pub fn team_names(ids: &[MemberId], roster: &MembersDocument) -> String {
    ids.iter()
        .map(|id| roster.name_of(id).unwrap_or(UNKNOWN_PLAYER))
        .collect::<Vec<_>>()
        .join(" & ")
}

pub fn print_sync(status: SyncStatus) {
    match status {
        SyncStatus::Synced => println!("{}", "Saved.".green()),
        SyncStatus::LocalOnly => println!(
            "{}",
            "Saved locally; the remote store could not be reached.".yellow()
        ),
    }
}

pub fn print_members(members: &[Member]) {
    if members.is_empty() {
        println!("{}", "No members registered".dimmed());
        return;
    }
    for member in members {
        println!(
            "{:<12} {:<20} {:<15} joined {}",
            member.id.dimmed(),
            member.name.bold(),
            member.phone.as_deref().unwrap_or("-"),
            member.join_date
        );
    }
    println!("{} members", members.len());
}

pub fn print_attendees(date: NaiveDate, attendees: &[Member]) {
    println!("{} {}", "Attendance".bold(), date);
    for member in attendees {
        println!("  {:<12} {}", member.id.dimmed(), member.name);
    }
    println!("{} present", attendees.len());
}

pub fn print_monthly(monthly: &MonthlyAttendance) {
    println!(
        "{} {}-{:02} ({} operating days so far)",
        "Attendance rate".bold(),
        monthly.year,
        monthly.month,
        monthly.operating_days
    );
    for stat in &monthly.stats {
        let rate = format!("{:>4.0}%", stat.rate_percent);
        let rate = if stat.rate_percent >= 75.0 {
            rate.green()
        } else if stat.rate_percent >= 50.0 {
            rate.yellow()
        } else {
            rate.red()
        };
        println!(
            "  {:<20} {:>2}/{:<2} {}",
            stat.name, stat.attended, monthly.operating_days, rate
        );
    }
}

pub fn print_draft(draft: &MatchDraft, attendee_ids: &[MemberId], roster: &MembersDocument) {
    println!(
        "{} {} ({} matches, {} slots)",
        "Schedule".bold(),
        draft.schedule_label,
        draft.matches.len(),
        draft.slot_count
    );

    let mut current_slot = 0;
    for scheduled in &draft.matches {
        if scheduled.time_slot != current_slot {
            current_slot = scheduled.time_slot;
            println!(
                "{}",
                format!("-- slot {} {} --", scheduled.time_slot, scheduled.start_time).green()
            );
        }
        println!(
            "  #{:<3} {:<8} {}  vs  {}",
            scheduled.match_num,
            scheduled.court.bold(),
            team_names(&scheduled.team1, roster),
            team_names(&scheduled.team2, roster)
        );
    }

    println!("{}", "Games per player".bold());
    for load in summarize(&draft.matches, attendee_ids) {
        let courts = load
            .courts
            .iter()
            .map(|(court, count)| format!("{} x{}", court, count))
            .collect::<Vec<_>>()
            .join(", ");
        let name = roster.name_of(&load.member_id).unwrap_or(UNKNOWN_PLAYER);
        println!("  {:<20} {} ({})", name, load.plays, courts);
    }
}

pub fn print_saved_scores(outcome: &SavedScores) {
    println!(
        "{} saved, {} left without a score",
        outcome.saved.len(),
        outcome.skipped
    );
    match outcome.status {
        Some(status) => print_sync(status),
        None => println!("{}", "Nothing to save".yellow()),
    }
}

pub fn print_results(results: &[Match], roster: &MembersDocument) {
    if results.is_empty() {
        println!("{}", "No match results".dimmed());
        return;
    }
    for (idx, game) in results.iter().enumerate() {
        let slot = match (&game.court, &game.start_time) {
            (Some(court), Some(start)) => format!("{} {}", start, court),
            (Some(court), None) => court.clone(),
            _ => String::new(),
        };
        println!(
            "{:>2}. {:<18} {}  {}  {}  {}",
            idx + 1,
            slot,
            team_names(&game.team1, roster),
            format!("{}:{}", game.score1, game.score2).bold(),
            team_names(&game.team2, roster),
            game.id.dimmed()
        );
    }
}

pub fn print_rankings(range: DateRange, rankings: &[RankingEntry]) {
    println!("{} {} ~ {}", "Rankings".bold(), range.start, range.end);
    if rankings.is_empty() {
        println!("{}", "No match results".dimmed());
        return;
    }
    for (idx, entry) in rankings.iter().enumerate() {
        let rank = format!("{:>2}", idx + 1);
        let rank = match idx {
            0 => rank.yellow().bold(),
            1 | 2 => rank.bold(),
            _ => rank.normal(),
        };
        let points = format!("{:>4}", entry.points);
        let points = if entry.points < 0 { points.red() } else { points.green() };
        println!(
            "{} {:<20} {} pts  {}W {}D {}L  games {}-{}",
            rank,
            entry.name,
            points,
            entry.wins,
            entry.draws,
            entry.losses,
            entry.games_won,
            entry.games_lost
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_names_fall_back_for_unknown_ids() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 6).unwrap();
        let roster = MembersDocument {
            members: vec![Member::new("m_1".to_string(), "Kim", None, date)],
        };

        let names = team_names(&["m_1".to_string(), "m_2".to_string()], &roster);

        assert_eq!(names, format!("Kim & {}", UNKNOWN_PLAYER));
    }
}
