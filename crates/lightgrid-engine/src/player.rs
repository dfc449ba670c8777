use serde::{Deserialize, Serialize};

use crate::{Direction, PlayerId, Position};

/// A light cycle: where it is, where it's heading, and where it has been.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    position: Position,
    direction: Direction,
    /// Cells previously occupied, oldest first. Excludes the current position.
    history: Vec<Position>,
}

impl Player {
    pub fn new(id: PlayerId, start: Position, direction: Direction) -> Self {
        Self {
            id,
            position: start,
            direction,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Any direction is accepted, including a reversal.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// The cell one step ahead, wrapping toroidally on both axes.
    pub fn next_position(&self, height: usize, width: usize) -> Position {
        let Position { row, col } = self.position;
        match self.direction {
            Direction::Up => Position::new(if row == 0 { height - 1 } else { row - 1 }, col),
            Direction::Down => Position::new((row + 1) % height, col),
            Direction::Left => Position::new(row, if col == 0 { width - 1 } else { col - 1 }),
            Direction::Right => Position::new(row, (col + 1) % width),
        }
    }

    /// Commit a move, recording the cell just left.
    pub fn advance_to(&mut self, new_position: Position) {
        self.history.push(self.position);
        self.position = new_position;
    }
}
