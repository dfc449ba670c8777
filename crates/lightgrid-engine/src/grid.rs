use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::{Cell, Position};

/// Fixed-size occupancy map, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty `height` x `width` grid.
    ///
    /// Zero-sized dimensions and grids too large to allocate are rejected
    /// with `InvalidDimensions`.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        let invalid = EngineError::InvalidDimensions { height, width };
        if height == 0 || width == 0 {
            return Err(invalid);
        }
        let len = height.checked_mul(width).ok_or_else(|| invalid.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, Cell::Empty);
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if self.contains(pos) {
            Ok(pos.row * self.width + pos.col)
        } else {
            Err(EngineError::OutOfBounds {
                position: pos,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn cell_at(&self, pos: Position) -> Result<Cell> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx])
    }

    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> Result<()> {
        let idx = self.index(pos)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Sample uniformly until an empty cell turns up, giving up after `attempts`.
    pub fn random_empty_position<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        attempts: u32,
    ) -> Result<Position> {
        for _ in 0..attempts {
            let pos = Position::new(
                rng.random_range(0..self.height),
                rng.random_range(0..self.width),
            );
            if self.cells[pos.row * self.width + pos.col].is_empty() {
                return Ok(pos);
            }
        }
        Err(EngineError::NoSpaceAvailable { attempts })
    }

    /// Every cell in row-major order, for a full repaint.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Position::new(i / width, i % width), cell))
    }

    /// Number of cells holding exactly `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}
