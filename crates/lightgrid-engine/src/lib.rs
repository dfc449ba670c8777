pub mod arena;
pub mod collision;
pub mod config;
pub mod error;
pub mod grid;
pub mod player;
pub mod series;

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub use config::MatchConfig;
pub use error::{EngineError, Result};
pub use grid::Grid;
pub use player::Player;

use collision::MovePlan;

/// Identity of one of the two players. There is no third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    A,
    B,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::A, PlayerId::B];

    /// Slot in the engine's player array.
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

impl FromStr for PlayerId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "a" | "A" => Ok(Self::A),
            "b" | "B" => Ok(Self::B),
            other => Err(EngineError::UnknownPlayer(other.to_string())),
        }
    }
}

/// Cardinal direction on the grid. Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Case-insensitive lookup by name (`"up"`, `"LEFT"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// A `(row, col)` grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Trail(PlayerId),
    Head(PlayerId),
    /// A cell where a crash happened.
    Blocked,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// A cell write produced by a step, for incremental redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDelta {
    pub position: Position,
    pub cell: Cell,
}

/// Outcome of the match so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchState {
    #[default]
    InProgress,
    WonBy(PlayerId),
    Tie,
}

impl MatchState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Derive the state from whether each player survived the tick.
    pub fn from_survivors(a_survived: bool, b_survived: bool) -> Self {
        match (a_survived, b_survived) {
            (true, true) => Self::InProgress,
            (true, false) => Self::WonBy(PlayerId::A),
            (false, true) => Self::WonBy(PlayerId::B),
            (false, false) => Self::Tie,
        }
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::WonBy(id) => write!(f, "player {id} won"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Per-player slice of a [`MatchSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub position: Position,
    pub direction: Direction,
    pub trail_length: usize,
}

/// Read-only view of the match for drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub height: usize,
    pub width: usize,
    pub tick: u64,
    pub state: MatchState,
    pub players: Vec<PlayerSnapshot>,
}

/// The two-player light-cycle match.
///
/// Owns the grid and both players exclusively; drivers mutate it only through
/// [`MatchEngine::set_direction`] and [`MatchEngine::step`].
#[derive(Debug, Clone)]
pub struct MatchEngine {
    grid: Grid,
    players: [Player; 2],
    state: MatchState,
    tick: u64,
}

impl MatchEngine {
    /// Build a match from config, seeding placement from `config.seed` or the OS.
    pub fn new(config: &MatchConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::setup(2, config, &mut rng)
    }

    /// Create the grid and place `player_count` players. Only two are supported.
    pub fn setup<R: Rng + ?Sized>(
        player_count: usize,
        config: &MatchConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if player_count != PlayerId::ALL.len() {
            return Err(EngineError::InvalidPlayerCount(player_count));
        }

        let mut grid = Grid::new(config.grid_height, config.grid_width)?;
        let a = arena::place_player(&mut grid, PlayerId::A, config.placement_attempts, rng)?;
        let b = arena::place_player(&mut grid, PlayerId::B, config.placement_attempts, rng)?;

        tracing::debug!(
            height = grid.height(),
            width = grid.width(),
            a = ?a.position(),
            b = ?b.position(),
            "Match set up"
        );

        Ok(Self {
            grid,
            players: [a, b],
            state: MatchState::InProgress,
            tick: 0,
        })
    }

    /// Build a match on a pre-populated grid. Both heads are written to the grid.
    pub fn from_parts(mut grid: Grid, a: Player, b: Player) -> Result<Self> {
        if a.id() != PlayerId::A {
            return Err(EngineError::UnknownPlayer(format!("{} in slot A", a.id())));
        }
        if b.id() != PlayerId::B {
            return Err(EngineError::UnknownPlayer(format!("{} in slot B", b.id())));
        }
        if a.position() == b.position() {
            return Err(EngineError::SharedStart(a.position()));
        }
        grid.set_cell(a.position(), Cell::Head(PlayerId::A))?;
        grid.set_cell(b.position(), Cell::Head(PlayerId::B))?;

        Ok(Self {
            grid,
            players: [a, b],
            state: MatchState::InProgress,
            tick: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Number of steps executed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Queue a direction for the next step. Reversals are allowed; they crash
    /// into the player's own trail on the following step.
    pub fn set_direction(&mut self, id: PlayerId, direction: Direction) {
        self.players[id.index()].set_direction(direction);
    }

    /// Advance both players one cell as a single transaction.
    ///
    /// Returns the cell writes in application order: A's target, B's target,
    /// A's vacated cell, B's vacated cell.
    pub fn step(&mut self) -> Result<Vec<CellDelta>> {
        if self.state.is_terminal() {
            return Err(EngineError::MatchAlreadyOver);
        }

        let plan = MovePlan::compute(&self.grid, &self.players);
        let mut deltas = Vec::with_capacity(4);

        for mv in plan.moves() {
            let cell = if mv.survived {
                Cell::Head(mv.player)
            } else {
                tracing::debug!(
                    player = %mv.player,
                    row = mv.to.row,
                    col = mv.to.col,
                    tick = self.tick,
                    "Player crashed"
                );
                Cell::Blocked
            };
            self.grid.set_cell(mv.to, cell)?;
            deltas.push(CellDelta {
                position: mv.to,
                cell,
            });
        }

        for mv in plan.moves() {
            let cell = Cell::Trail(mv.player);
            self.grid.set_cell(mv.from, cell)?;
            deltas.push(CellDelta {
                position: mv.from,
                cell,
            });
        }

        for mv in plan.moves() {
            if mv.survived {
                self.players[mv.player.index()].advance_to(mv.to);
            }
        }

        self.tick += 1;
        self.state = plan.outcome();
        if self.state.is_terminal() {
            tracing::info!(state = %self.state, tick = self.tick, "Match over");
        }

        Ok(deltas)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            height: self.grid.height(),
            width: self.grid.width(),
            tick: self.tick,
            state: self.state,
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id(),
                    position: p.position(),
                    direction: p.direction(),
                    trail_length: p.history().len(),
                })
                .collect(),
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::{Cell, Direction, Grid, MatchEngine, Player, PlayerId, Position};

    /// Deterministic RNG for placement tests.
    pub fn seeded_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// An `h` x `w` match with explicit starting positions and directions.
    pub fn engine_with(
        height: usize,
        width: usize,
        a: (Position, Direction),
        b: (Position, Direction),
    ) -> MatchEngine {
        let grid = Grid::new(height, width).expect("test grid dimensions must be non-zero");
        engine_on(grid, a, b)
    }

    /// Same as [`engine_with`] on a caller-prepared grid.
    pub fn engine_on(
        grid: Grid,
        a: (Position, Direction),
        b: (Position, Direction),
    ) -> MatchEngine {
        MatchEngine::from_parts(
            grid,
            Player::new(PlayerId::A, a.0, a.1),
            Player::new(PlayerId::B, b.0, b.1),
        )
        .expect("test players must be in bounds")
    }

    /// The 5x5 corner-start layout: A at the origin facing right, B opposite facing left.
    pub fn corner_engine_5x5() -> MatchEngine {
        engine_with(
            5,
            5,
            (Position::new(0, 0), Direction::Right),
            (Position::new(4, 4), Direction::Left),
        )
    }

    /// Fill every cell with `cell`.
    pub fn fill_grid(grid: &mut Grid, cell: Cell) {
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                grid.set_cell(Position::new(row, col), cell)
                    .expect("in-bounds by construction");
            }
        }
    }

    /// Step until the match ends, returning the number of steps taken.
    pub fn run_until_over(engine: &mut MatchEngine, max_steps: usize) -> usize {
        for n in 1..=max_steps {
            engine.step().expect("step before terminal state");
            if engine.state().is_terminal() {
                return n;
            }
        }
        panic!("match did not finish within {max_steps} steps");
    }
}
