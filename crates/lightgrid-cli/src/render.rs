use std::io::Write;

use lightgrid_engine::{Cell, CellDelta, Grid, MatchState, PlayerId};

/// Where the game loop sends what changed on screen.
pub trait FrameSink {
    /// Paint every cell. Called once before the first tick.
    fn paint_full(&mut self, grid: &Grid);

    /// Apply one tick's cell writes, in order.
    fn paint_cells(&mut self, deltas: &[CellDelta]);

    /// The match reached a terminal state.
    fn finish(&mut self, state: MatchState);
}

/// Character used for a cell in text output.
pub fn cell_glyph(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Trail(PlayerId::A) => 'a',
        Cell::Trail(PlayerId::B) => 'b',
        Cell::Head(PlayerId::A) => 'A',
        Cell::Head(PlayerId::B) => 'B',
        Cell::Blocked => 'X',
    }
}

/// Text frame buffer kept in sync incrementally from cell deltas.
pub struct AsciiFrame<W: Write> {
    width: usize,
    glyphs: Vec<char>,
    out: W,
    /// Redraw the whole frame after every tick (ANSI clear + home).
    live: bool,
}

impl<W: Write> AsciiFrame<W> {
    pub fn new(out: W, live: bool) -> Self {
        Self {
            width: 0,
            glyphs: Vec::new(),
            out,
            live,
        }
    }

    /// Current frame as newline-separated rows.
    pub fn render(&self) -> String {
        if self.width == 0 {
            return String::new();
        }
        let mut s = String::with_capacity(self.glyphs.len() + self.glyphs.len() / self.width);
        for row in self.glyphs.chunks(self.width) {
            s.extend(row.iter());
            s.push('\n');
        }
        s
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_frame(&mut self, prefix: &str) {
        let frame = self.render();
        if let Err(e) = write!(self.out, "{prefix}{frame}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write frame");
        }
    }
}

impl<W: Write> FrameSink for AsciiFrame<W> {
    fn paint_full(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.glyphs = grid.cells().map(|(_, cell)| cell_glyph(cell)).collect();
        if self.live {
            self.flush_frame("\x1b[2J\x1b[H");
        }
    }

    fn paint_cells(&mut self, deltas: &[CellDelta]) {
        for delta in deltas {
            let idx = delta.position.row * self.width + delta.position.col;
            if let Some(glyph) = self.glyphs.get_mut(idx) {
                *glyph = cell_glyph(delta.cell);
            }
        }
        if self.live {
            self.flush_frame("\x1b[H");
        }
    }

    fn finish(&mut self, state: MatchState) {
        self.flush_frame(if self.live { "\x1b[H" } else { "" });
        if let Err(e) = writeln!(self.out, "{state}") {
            tracing::warn!(error = %e, "Failed to write result");
        }
    }
}
