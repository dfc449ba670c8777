use crate::{Grid, MatchState, Player, PlayerId, Position};

/// One player's move for the current tick, decided before any grid write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub player: PlayerId,
    pub from: Position,
    pub to: Position,
    pub survived: bool,
}

/// Both players' moves for a tick, in player order (A, then B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    moves: [PlannedMove; 2],
}

impl MovePlan {
    /// Classify both moves against the grid as it stood at the start of the tick.
    ///
    /// A move survives only if its target is empty and the other player is not
    /// heading into the same cell.
    pub fn compute(grid: &Grid, players: &[Player; 2]) -> Self {
        let targets = [
            players[0].next_position(grid.height(), grid.width()),
            players[1].next_position(grid.height(), grid.width()),
        ];
        let same_target = targets[0] == targets[1];

        let plan = |i: usize| {
            let player = &players[i];
            let target_free = grid.cell_at(targets[i]).is_ok_and(|c| c.is_empty());
            PlannedMove {
                player: player.id(),
                from: player.position(),
                to: targets[i],
                survived: target_free && !same_target,
            }
        };

        Self {
            moves: [plan(0), plan(1)],
        }
    }

    pub fn moves(&self) -> &[PlannedMove; 2] {
        &self.moves
    }

    pub fn get(&self, id: PlayerId) -> &PlannedMove {
        &self.moves[id.index()]
    }

    pub fn outcome(&self) -> MatchState {
        MatchState::from_survivors(self.moves[0].survived, self.moves[1].survived)
    }
}
