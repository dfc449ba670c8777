use crate::Position;

/// Errors raised by the grid, setup and match engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Cell access outside `[0, height) x [0, width)`.
    OutOfBounds {
        position: Position,
        height: usize,
        width: usize,
    },
    /// Random placement exhausted its attempt budget.
    NoSpaceAvailable { attempts: u32 },
    /// Setup asked for a player count other than two.
    InvalidPlayerCount(usize),
    /// A player identity that is not `A` or `B`.
    UnknownPlayer(String),
    /// `step()` called after the match reached a terminal state.
    MatchAlreadyOver,
    /// A grid with a zero-sized dimension, or too many cells to allocate.
    InvalidDimensions { height: usize, width: usize },
    /// Both players given the same starting cell.
    SharedStart(Position),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds {
                position,
                height,
                width,
            } => write!(
                f,
                "position ({}, {}) is outside the {height}x{width} grid",
                position.row, position.col
            ),
            Self::NoSpaceAvailable { attempts } => {
                write!(f, "no empty cell found after {attempts} attempts")
            },
            Self::InvalidPlayerCount(n) => {
                write!(f, "exactly 2 players are supported, got {n}")
            },
            Self::UnknownPlayer(id) => write!(f, "unknown player id {id:?}"),
            Self::MatchAlreadyOver => write!(f, "match is already over"),
            Self::InvalidDimensions { height, width } => {
                write!(f, "invalid grid dimensions {height}x{width}")
            },
            Self::SharedStart(position) => write!(
                f,
                "both players start at ({}, {})",
                position.row, position.col
            ),
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;
