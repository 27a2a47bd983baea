pub mod crossword;
pub mod grid;
pub mod layout;
pub mod placement;
pub mod render;

pub use crate::domain::model::{Bearing, Cell, Direction, Position, Word, WordEntry};
pub use crate::utils::error::Result;
