use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{MemberId, ScheduledMatch};

/// Players on court in one doubles match
pub const PLAYERS_PER_MATCH: usize = 4;

/// Assigns attendees to doubles matches, slot by slot.
///
/// Each slot fills as many courts as the head-count allows, taking the players
/// who have played least so far (random order among equals). When both of two
/// courts are in use, players who have been on the first court less often are
/// sent there. Returns an empty schedule for fewer than four attendees.
pub fn generate_matches<R: Rng + ?Sized>(
    attendee_ids: &[MemberId],
    time_slots: &[String],
    court_names: &[String],
    rng: &mut R,
) -> Vec<ScheduledMatch> {
    if attendee_ids.len() < PLAYERS_PER_MATCH {
        info!(
            "Not enough attendees to schedule matches ({} < {})",
            attendee_ids.len(),
            PLAYERS_PER_MATCH
        );
        return Vec::new();
    }

    let mut counters = UsageCounters::new(attendee_ids.len(), court_names.len());
    let mut roster: Vec<usize> = (0..attendee_ids.len()).collect();
    let mut matches = Vec::new();

    for (slot_idx, start_time) in time_slots.iter().enumerate() {
        let courts = courts_for_slot(court_names.len(), attendee_ids.len());
        if courts == 0 {
            debug!("Slot {} skipped: no court can be filled", slot_idx + 1);
            continue;
        }

        let selected = select_least_played(&mut roster, &counters, courts, rng);
        let groups = assign_courts(selected, courts, &counters, rng);

        for (court_idx, group) in groups.into_iter().enumerate() {
            counters.record(&group, court_idx);
            matches.push(ScheduledMatch {
                match_num: matches.len() as u32 + 1,
                time_slot: slot_idx as u32 + 1,
                start_time: start_time.clone(),
                court: court_names[court_idx].clone(),
                team1: [attendee_ids[group[0]].clone(), attendee_ids[group[1]].clone()],
                team2: [attendee_ids[group[2]].clone(), attendee_ids[group[3]].clone()],
            });
        }
    }

    info!(
        "Scheduled {} matches for {} attendees over {} slots",
        matches.len(),
        attendee_ids.len(),
        time_slots.len()
    );
    matches
}

fn courts_for_slot(available_courts: usize, attendees: usize) -> usize {
    available_courts.min(attendees / PLAYERS_PER_MATCH)
}

/// Lowest play counts first; shuffling before the stable sort randomises ties.
fn select_least_played<R: Rng + ?Sized>(
    roster: &mut [usize],
    counters: &UsageCounters,
    courts: usize,
    rng: &mut R,
) -> Vec<usize> {
    roster.shuffle(rng);
    roster.sort_by_key(|&player| counters.plays[player]);
    roster[..courts * PLAYERS_PER_MATCH].to_vec()
}

fn assign_courts<R: Rng + ?Sized>(
    mut selected: Vec<usize>,
    courts: usize,
    counters: &UsageCounters,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    selected.shuffle(rng);

    if courts == 2 && selected.len() == 2 * PLAYERS_PER_MATCH {
        selected.sort_by_key(|&player| counters.court_balance(player));
    }

    selected
        .chunks(PLAYERS_PER_MATCH)
        .map(|chunk| {
            let mut group = chunk.to_vec();
            group.shuffle(rng);
            group
        })
        .collect()
}

/// Per-call play and court usage, indexed by attendee position
struct UsageCounters {
    plays: Vec<u32>,
    court_usage: Vec<Vec<u32>>,
}

impl UsageCounters {
    fn new(players: usize, courts: usize) -> Self {
        Self {
            plays: vec![0; players],
            court_usage: vec![vec![0; courts]; players],
        }
    }

    fn record(&mut self, group: &[usize], court_idx: usize) {
        for &player in group {
            self.plays[player] += 1;
            self.court_usage[player][court_idx] += 1;
        }
    }

    /// First-court visits minus second-court visits.
    fn court_balance(&self, player: usize) -> i64 {
        let usage = &self.court_usage[player];
        usage[0] as i64 - usage[1] as i64
    }
}
