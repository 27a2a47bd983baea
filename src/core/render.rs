use crate::core::grid::Grid;
use crate::domain::model::{Direction, Position, Word};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fill for positions no word covers.
pub const EMPTY_CELL: &str = "  ";
/// Fill for letter cells in the blank view.
pub const HIDDEN_CELL: &str = "[]";

/// One cell of the lattice view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeCell {
    /// A word starts here.
    Numbered(u32),
    /// Letter cell that is not a word start.
    Open,
    /// Blocked cell enclosed by letter cells.
    Void,
    /// Blocked cell reachable from the edge of the grid.
    Boundary,
}

impl LatticeCell {
    pub fn symbol(&self) -> String {
        match self {
            LatticeCell::Numbered(n) => format!("{:<2}", n),
            LatticeCell::Open => "  ".to_string(),
            LatticeCell::Void => "X ".to_string(),
            LatticeCell::Boundary => "B ".to_string(),
        }
    }
}

/// Read-only projections of a finalized layout.
pub struct Renderer<'a> {
    grid: &'a Grid,
    words: &'a [Word],
}

impl<'a> Renderer<'a> {
    pub fn new(grid: &'a Grid, words: &'a [Word]) -> Self {
        Self { grid, words }
    }

    /// `(rows, cols)` of the bounded grid, `(0, 0)` when nothing is placed.
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid
            .bounds()
            .map(|b| (b.rows(), b.cols()))
            .unwrap_or((0, 0))
    }

    fn project<T: Clone>(&self, fill: T, mut cell: impl FnMut(char, u32) -> T) -> Vec<Vec<T>> {
        let Some(bounds) = self.grid.bounds() else {
            return Vec::new();
        };
        let mut rows = vec![vec![fill; bounds.cols()]; bounds.rows()];
        for (position, c) in self.grid.cells() {
            let Some(letter) = c.letter else { continue };
            let at = *position - bounds.min;
            rows[at.row as usize][at.col as usize] = cell(letter, c.number);
        }
        rows
    }

    /// Width of one display cell: two characters, widened so the highest
    /// clue number still fits and every row stays aligned.
    pub fn cell_width(&self) -> usize {
        let highest = self.grid.cells().map(|(_, c)| c.number).max().unwrap_or(0);
        highest.to_string().len().max(EMPTY_CELL.len())
    }

    /// Numbers where words start, letters everywhere else.
    pub fn solution(&self) -> Vec<Vec<String>> {
        let width = self.cell_width();
        self.project(pad(EMPTY_CELL, width), |letter, number| {
            if number > 0 {
                pad(number, width)
            } else {
                pad(letter, width)
            }
        })
    }

    /// Numbers where words start, letters hidden.
    pub fn blank(&self) -> Vec<Vec<String>> {
        let width = self.cell_width();
        self.project(pad(EMPTY_CELL, width), |_, number| {
            if number > 0 {
                pad(number, width)
            } else {
                pad(HIDDEN_CELL, width)
            }
        })
    }

    /// Classifies every cell; blocked cells connected to the edge become
    /// [`LatticeCell::Boundary`], the rest stay [`LatticeCell::Void`].
    pub fn lattice(&self) -> Vec<Vec<LatticeCell>> {
        let mut rows = self.project(LatticeCell::Void, |_, number| {
            if number > 0 {
                LatticeCell::Numbered(number)
            } else {
                LatticeCell::Open
            }
        });
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());

        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        for r in 0..height {
            for c in 0..width {
                let on_edge = r == 0 || c == 0 || r + 1 == height || c + 1 == width;
                if on_edge && rows[r][c] == LatticeCell::Void {
                    rows[r][c] = LatticeCell::Boundary;
                    queue.push_back((r, c));
                }
            }
        }

        while let Some((r, c)) = queue.pop_front() {
            let neighbours = [
                (r.wrapping_sub(1), c),
                (r + 1, c),
                (r, c.wrapping_sub(1)),
                (r, c + 1),
            ];
            for (nr, nc) in neighbours {
                if nr < height && nc < width && rows[nr][nc] == LatticeCell::Void {
                    rows[nr][nc] = LatticeCell::Boundary;
                    queue.push_back((nr, nc));
                }
            }
        }

        rows
    }

    /// `"<number>. <hint>"` for every placed word running in `direction`,
    /// ordered by number.
    pub fn hints(&self, direction: Direction) -> Vec<String> {
        let mut placed: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| w.direction() == Some(direction))
            .collect();
        placed.sort_by_key(|w| w.number());
        placed
            .iter()
            .map(|w| format!("{}. {}", w.number(), w.hint()))
            .collect()
    }

    /// Letter at a display coordinate of the solution grid.
    pub fn letter_at(&self, row: usize, col: usize) -> Option<char> {
        let bounds = self.grid.bounds()?;
        let position = bounds.min + Position::new(row as i32, col as i32);
        self.grid.cell(position).and_then(|c| c.letter)
    }
}

/// Joins a projected view into printable lines.
pub fn to_text<T: AsRef<str>>(rows: &[Vec<T>]) -> String {
    rows.iter()
        .map(|row| row.iter().map(|c| c.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad(value: impl std::fmt::Display, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

pub fn lattice_to_text(rows: &[Vec<LatticeCell>]) -> String {
    let symbols: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(LatticeCell::symbol).collect())
        .collect();
    let width = symbols.iter().flatten().map(String::len).max().unwrap_or(0);
    let padded: Vec<Vec<String>> = symbols
        .iter()
        .map(|row| row.iter().map(|s| pad(s, width)).collect())
        .collect();
    to_text(&padded)
}
