//! Placement engine: finds intersecting bearings for a word, validates them
//! with a dry run and commits one of them to the live grid.

use crate::core::grid::Grid;
use crate::domain::model::{Bearing, Direction, Position, Word};
use crate::utils::error::{Result, XwordError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Rows/columns of blank space left between the bounding box and an
/// isolated word.
const ISOLATION_GAP: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    /// Crosses at least one existing word; `options` is how many valid
    /// bearings the choice was made from.
    Intersecting { options: usize },
    /// No valid intersection existed (or the grid was empty).
    Isolated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub bearing: Bearing,
    pub kind: PlacementKind,
}

/// Every bearing that would put one of the word's letters on an existing
/// cell carrying that letter with the orientation still free. Not validated.
pub fn candidates(grid: &Grid, word: &Word) -> BTreeSet<Bearing> {
    let index = grid.letter_index();
    let mut found = BTreeSet::new();

    for (offset, letter) in word.letters().iter().enumerate() {
        let Some(bearings) = index.get(letter) else {
            continue;
        };
        for through in bearings {
            let anchor = through.anchor.step(through.direction, -(offset as i32));
            found.insert(Bearing::new(anchor, through.direction));
        }
    }

    found
}

/// Candidates that survive a dry run against a copy of the grid.
pub fn valid_candidates(grid: &Grid, word: &Word) -> Vec<Bearing> {
    candidates(grid, word)
        .into_iter()
        .filter(|&bearing| match grid.try_lay(word.letters(), bearing) {
            Ok(()) => true,
            Err(conflict) => {
                tracing::trace!("{} rejected at {}: {}", word, bearing, conflict);
                false
            }
        })
        .collect()
}

/// Bearing for a word that cannot intersect anything.
///
/// The first word goes to the origin. Later words go just outside the
/// current bounding box: below it when running across, to its right when
/// running down, so they never touch existing cells.
pub fn fallback_bearing<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Bearing {
    let direction = if rng.gen_bool(0.5) {
        Direction::Across
    } else {
        Direction::Down
    };

    let anchor = match grid.bounds() {
        None => Position::ORIGIN,
        Some(bounds) => match direction {
            Direction::Across => Position::new(bounds.max.row + ISOLATION_GAP, bounds.min.col),
            Direction::Down => Position::new(bounds.min.row, bounds.max.col + ISOLATION_GAP),
        },
    };

    Bearing::new(anchor, direction)
}

/// Places `word` on `grid`, preferring a random valid intersection and
/// falling back to an isolated bearing.
///
/// # Errors
///
/// [`XwordError::PlacementFailed`] when the word is already placed or the
/// fallback bearing itself does not validate.
pub fn place<R: Rng + ?Sized>(grid: &mut Grid, word: &mut Word, rng: &mut R) -> Result<Placement> {
    if let Some(existing) = word.start() {
        return Err(XwordError::PlacementFailed {
            word: word.text().to_string(),
            reason: format!("already placed at {}", existing),
        });
    }

    let valid = valid_candidates(grid, word);
    let placement = match valid.choose(rng) {
        Some(&bearing) => Placement {
            bearing,
            kind: PlacementKind::Intersecting {
                options: valid.len(),
            },
        },
        None => {
            let bearing = fallback_bearing(grid, rng);
            if !grid.is_empty() {
                tracing::warn!("No intersection for {}, placing it isolated at {}", word, bearing);
            }
            Placement {
                bearing,
                kind: PlacementKind::Isolated,
            }
        }
    };

    commit(grid, word, placement.bearing)?;
    tracing::debug!("Placed {} at {} ({:?})", word, placement.bearing, placement.kind);
    Ok(placement)
}

/// Validates on a copy, then replays the laying on the live grid.
fn commit(grid: &mut Grid, word: &mut Word, bearing: Bearing) -> Result<()> {
    let to_error = |conflict: crate::core::grid::CellOccupied| XwordError::PlacementFailed {
        word: word.text().to_string(),
        reason: conflict.to_string(),
    };

    grid.try_lay(word.letters(), bearing).map_err(to_error)?;
    grid.lay(word.letters(), bearing).map_err(to_error)?;
    word.set_start(bearing);
    Ok(())
}
