use crate::events::{Event, PlayType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline counts for a batch of set pieces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetPieceSummary {
    pub total_set_pieces: usize,
    pub corners: usize,
    pub free_kicks: usize,
    pub penalties: usize,
    pub goals: usize,
    pub shots: usize,
    /// (goals + shots) / total; 0 when there are no set pieces.
    pub success_rate: f64,
}

impl SetPieceSummary {
    pub fn count(&self, play_type: PlayType) -> usize {
        match play_type {
            PlayType::Corner => self.corners,
            PlayType::FreeKick => self.free_kicks,
            PlayType::Penalty => self.penalties,
        }
    }

    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut s = Self::default();
        for e in events {
            s.total_set_pieces += 1;
            match e.play_type {
                PlayType::Corner => s.corners += 1,
                PlayType::FreeKick => s.free_kicks += 1,
                PlayType::Penalty => s.penalties += 1,
            }
            if e.outcome.is_goal() {
                s.goals += 1;
            } else if e.outcome.is_shot() {
                s.shots += 1;
            }
        }
        if s.total_set_pieces > 0 {
            s.success_rate = (s.goals + s.shots) as f64 / s.total_set_pieces as f64;
        }
        s
    }
}

/// Per-match summaries, ascending by match id. Events without an id are grouped under `None`.
pub fn summarize_by_match(events: &[Event]) -> BTreeMap<Option<u64>, SetPieceSummary> {
    let mut grouped: BTreeMap<Option<u64>, Vec<&Event>> = BTreeMap::new();
    for e in events {
        grouped.entry(e.match_id).or_default().push(e);
    }
    grouped
        .into_iter()
        .map(|(id, evs)| (id, SetPieceSummary::from_events(evs)))
        .collect()
}
