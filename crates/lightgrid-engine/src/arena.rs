use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{Cell, Direction, Grid, Player, PlayerId, Position};

/// A starting cell with starting direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Position,
    pub direction: Direction,
}

/// Preferred spawn: A at the origin heading right, B at the far corner heading left.
pub fn corner_spawn(id: PlayerId, height: usize, width: usize) -> SpawnPoint {
    match id {
        PlayerId::A => SpawnPoint {
            position: Position::new(0, 0),
            direction: Direction::Right,
        },
        PlayerId::B => SpawnPoint {
            position: Position::new(height - 1, width - 1),
            direction: Direction::Left,
        },
    }
}

/// Place a player on its corner if free, otherwise on a random empty cell.
///
/// Writes the player's head to the grid. Fails with `NoSpaceAvailable` once
/// `attempts` random samples have all hit occupied cells.
pub fn place_player<R: Rng + ?Sized>(
    grid: &mut Grid,
    id: PlayerId,
    attempts: u32,
    rng: &mut R,
) -> Result<Player> {
    let spawn = corner_spawn(id, grid.height(), grid.width());
    let position = if grid.cell_at(spawn.position)?.is_empty() {
        spawn.position
    } else {
        let fallback = grid.random_empty_position(rng, attempts)?;
        tracing::debug!(
            player = %id,
            row = fallback.row,
            col = fallback.col,
            "Corner occupied, placed at random cell"
        );
        fallback
    };

    grid.set_cell(position, Cell::Head(id))?;
    Ok(Player::new(id, position, spawn.direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;
    use crate::test_helpers::{fill_grid, seeded_rng};

    #[test]
    fn corners_on_rectangular_grid() {
        let a = corner_spawn(PlayerId::A, 7, 12);
        let b = corner_spawn(PlayerId::B, 7, 12);
        assert_eq!(a.position, Position::new(0, 0));
        assert_eq!(a.direction, Direction::Right);
        assert_eq!(b.position, Position::new(6, 11));
        assert_eq!(b.direction, Direction::Left);
    }

    #[test]
    fn free_corner_is_used() {
        let mut grid = Grid::new(6, 6).unwrap();
        let player = place_player(&mut grid, PlayerId::B, 100, &mut seeded_rng(0)).unwrap();
        assert_eq!(player.position(), Position::new(5, 5));
        assert_eq!(
            grid.cell_at(Position::new(5, 5)).unwrap(),
            Cell::Head(PlayerId::B)
        );
    }

    #[test]
    fn occupied_corner_falls_back_to_random_cell() {
        let mut grid = Grid::new(6, 6).unwrap();
        grid.set_cell(Position::new(0, 0), Cell::Blocked).unwrap();

        let player = place_player(&mut grid, PlayerId::A, 100, &mut seeded_rng(5)).unwrap();

        assert_ne!(player.position(), Position::new(0, 0));
        assert_eq!(player.direction(), Direction::Right);
        assert_eq!(
            grid.cell_at(player.position()).unwrap(),
            Cell::Head(PlayerId::A)
        );
        assert_eq!(grid.cell_at(Position::new(0, 0)).unwrap(), Cell::Blocked);
    }

    #[test]
    fn full_grid_fails_without_writing() {
        let mut grid = Grid::new(4, 4).unwrap();
        fill_grid(&mut grid, Cell::Trail(PlayerId::B));
        let before = grid.clone();

        let err = place_player(&mut grid, PlayerId::A, 100, &mut seeded_rng(2)).unwrap_err();

        assert_eq!(err, EngineError::NoSpaceAvailable { attempts: 100 });
        assert_eq!(grid, before);
    }
}
