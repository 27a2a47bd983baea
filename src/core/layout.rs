use crate::core::grid::{Bounds, Grid};
use crate::domain::model::{Position, Word};

/// Numbers placed words in row-major order of their start cell. Words that
/// start on the same cell (an across and a down) share a number. Unplaced
/// words get 0. Returns the highest number handed out.
pub fn assign_numbers(grid: &mut Grid, words: &mut [Word]) -> u32 {
    grid.clear_numbers();

    let mut order: Vec<usize> = Vec::with_capacity(words.len());
    for (i, word) in words.iter_mut().enumerate() {
        if word.is_placed() {
            order.push(i);
        } else {
            word.set_number(0);
        }
    }
    order.sort_by_key(|&i| words[i].start().map(|b| b.anchor));

    let mut number = 0;
    let mut previous: Option<Position> = None;
    for i in order {
        let Some(bearing) = words[i].start() else {
            continue;
        };
        if previous != Some(bearing.anchor) {
            number += 1;
            previous = Some(bearing.anchor);
            grid.set_number(bearing.anchor, number);
        }
        words[i].set_number(number);
    }

    number
}

/// Translates the grid and every placed word so the bounding box starts at
/// the origin. Calling it on an already recentered layout changes nothing.
pub fn recenter(grid: &mut Grid, words: &mut [Word]) -> Option<Bounds> {
    let bounds = grid.bounds()?;
    if bounds.min != Position::ORIGIN {
        let offset = -bounds.min;
        tracing::debug!("Recentering layout by {}", offset);
        grid.translate(offset);
        for word in words.iter_mut() {
            word.translate(offset);
        }
    }
    grid.bounds()
}
