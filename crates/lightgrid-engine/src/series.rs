use serde::{Deserialize, Serialize};

use crate::{MatchState, PlayerId};

/// Running result of consecutive matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesTally {
    pub wins_a: u32,
    pub wins_b: u32,
    pub ties: u32,
}

impl SeriesTally {
    /// Record a finished match. `InProgress` is ignored.
    pub fn record(&mut self, state: MatchState) {
        match state {
            MatchState::WonBy(PlayerId::A) => self.wins_a += 1,
            MatchState::WonBy(PlayerId::B) => self.wins_b += 1,
            MatchState::Tie => self.ties += 1,
            MatchState::InProgress => {},
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.wins_a + self.wins_b + self.ties
    }

    pub fn wins(&self, id: PlayerId) -> u32 {
        match id {
            PlayerId::A => self.wins_a,
            PlayerId::B => self.wins_b,
        }
    }

    /// The player with strictly more wins, if any.
    pub fn leader(&self) -> Option<PlayerId> {
        match self.wins_a.cmp(&self.wins_b) {
            std::cmp::Ordering::Greater => Some(PlayerId::A),
            std::cmp::Ordering::Less => Some(PlayerId::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}
