use crate::domain::model::{Bearing, Cell, Direction, Position};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Why a cell refused a letter during laying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupiedReason {
    LetterMismatch { existing: char, wanted: char },
    OrientationClaimed(Direction),
    OutOfBounds,
}

/// Outcome of a rejected laying attempt. This is an expected result of the
/// dry run, not an error surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellOccupied {
    pub position: Position,
    pub reason: OccupiedReason,
}

impl fmt::Display for CellOccupied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            OccupiedReason::LetterMismatch { existing, wanted } => write!(
                f,
                "cell {} holds '{}', cannot write '{}'",
                self.position, existing, wanted
            ),
            OccupiedReason::OrientationClaimed(direction) => write!(
                f,
                "cell {} already carries a {} word",
                self.position,
                direction.to_string().to_lowercase()
            ),
            OccupiedReason::OutOfBounds => write!(f, "cell {} is out of bounds", self.position),
        }
    }
}

/// Inclusive bounding box of the occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    pub fn rows(&self) -> usize {
        (self.max.row - self.min.row + 1) as usize
    }

    pub fn cols(&self) -> usize {
        (self.max.col - self.min.col + 1) as usize
    }
}

/// Sparse, unbounded letter grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: BTreeMap<Position, Cell>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The cell at `position`, or the invalid boundary sentinel when nothing
    /// has been written there.
    pub fn get(&self, position: Position) -> &Cell {
        self.cells.get(&position).unwrap_or(&Cell::BOUNDARY)
    }

    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(&position)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (&Position, &Cell)> {
        self.cells.iter()
    }

    /// Letter -> bearings through existing cells whose orientation is still
    /// free. Rebuilt on every call.
    pub fn letter_index(&self) -> BTreeMap<char, BTreeSet<Bearing>> {
        let mut index: BTreeMap<char, BTreeSet<Bearing>> = BTreeMap::new();
        for (&position, cell) in &self.cells {
            let Some(letter) = cell.letter else { continue };
            if !cell.available() {
                continue;
            }
            let free = index.entry(letter).or_default();
            for direction in Direction::ALL {
                if !cell.claimed(direction) {
                    free.insert(Bearing::new(position, direction));
                }
            }
        }
        index
    }

    /// Writes `letters` along `bearing`, claiming the orientation on every
    /// cell. Stops at the first conflicting cell; cells written before the
    /// conflict stay written, so callers lay against a copy first.
    pub fn lay(&mut self, letters: &[char], bearing: Bearing) -> Result<(), CellOccupied> {
        for (offset, &letter) in letters.iter().enumerate() {
            let position = bearing.at(offset);
            let cell = self.cells.entry(position).or_insert_with(|| Cell::new(letter));

            if !cell.is_valid {
                return Err(CellOccupied {
                    position,
                    reason: OccupiedReason::OutOfBounds,
                });
            }
            match cell.letter {
                Some(existing) if existing != letter => {
                    return Err(CellOccupied {
                        position,
                        reason: OccupiedReason::LetterMismatch {
                            existing,
                            wanted: letter,
                        },
                    });
                }
                _ => {}
            }
            if cell.claimed(bearing.direction) {
                return Err(CellOccupied {
                    position,
                    reason: OccupiedReason::OrientationClaimed(bearing.direction),
                });
            }
            cell.claim(bearing.direction);
        }
        Ok(())
    }

    /// Lays `letters` on a throwaway copy and reports whether it would fit.
    /// `self` is never modified.
    pub fn try_lay(&self, letters: &[char], bearing: Bearing) -> Result<(), CellOccupied> {
        let mut trial = self.clone();
        trial.lay(letters, bearing)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self.cells.keys();
        let first = *positions.next()?;
        let (min, max) = positions.fold((first, first), |(min, max), p| {
            (
                Position::new(min.row.min(p.row), min.col.min(p.col)),
                Position::new(max.row.max(p.row), max.col.max(p.col)),
            )
        });
        Some(Bounds { min, max })
    }

    /// Moves every cell by `offset`.
    pub fn translate(&mut self, offset: Position) {
        if offset == Position::ORIGIN {
            return;
        }
        self.cells = std::mem::take(&mut self.cells)
            .into_iter()
            .map(|(position, cell)| (position + offset, cell))
            .collect();
    }

    pub(crate) fn clear_numbers(&mut self) {
        for cell in self.cells.values_mut() {
            cell.number = 0;
        }
    }

    pub(crate) fn set_number(&mut self, position: Position, number: u32) {
        if let Some(cell) = self.cells.get_mut(&position) {
            cell.number = number;
        }
    }
}
