use std::collections::BTreeMap;

use crate::domain::{MemberId, ScheduledMatch};

/// How often one attendee plays in a schedule, overall and per court
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLoad {
    pub member_id: MemberId,
    pub plays: u32,
    pub courts: BTreeMap<String, u32>,
}

impl PlayerLoad {
    fn new(member_id: MemberId) -> Self {
        Self {
            member_id,
            plays: 0,
            courts: BTreeMap::new(),
        }
    }

    pub fn court_count(&self, court: &str) -> u32 {
        self.courts.get(court).copied().unwrap_or(0)
    }
}

/// Loads for every attendee, in attendee order; those never scheduled show zero.
pub fn summarize(matches: &[ScheduledMatch], attendee_ids: &[MemberId]) -> Vec<PlayerLoad> {
    let mut loads: Vec<PlayerLoad> = attendee_ids.iter().cloned().map(PlayerLoad::new).collect();

    for scheduled in matches {
        for player in scheduled.players() {
            if let Some(load) = loads.iter_mut().find(|l| &l.member_id == player) {
                load.plays += 1;
                *load.courts.entry(scheduled.court.clone()).or_insert(0) += 1;
            }
        }
    }

    loads
}
