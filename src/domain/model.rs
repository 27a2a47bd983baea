use crate::utils::error::{Result, XwordError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

/// Grid coordinate. Ordering is row-major: row first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Moves `steps` cells along `direction` (negative steps go backwards).
    #[inline]
    pub fn step(self, direction: Direction, steps: i32) -> Self {
        self + direction.offset() * steps
    }
}

impl Add for Position {
    type Output = Position;

    #[inline]
    fn add(self, rhs: Position) -> Self::Output {
        Position::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Position;

    #[inline]
    fn sub(self, rhs: Position) -> Self::Output {
        Position::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Neg for Position {
    type Output = Position;

    #[inline]
    fn neg(self) -> Self::Output {
        Position::new(-self.row, -self.col)
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    #[inline]
    fn mul(self, rhs: i32) -> Position {
        Position::new(self.row * rhs, self.col * rhs)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    /// Unit step for this direction.
    #[inline]
    pub const fn offset(self) -> Position {
        match self {
            Direction::Across => Position::new(0, 1),
            Direction::Down => Position::new(1, 0),
        }
    }

    #[inline]
    pub fn next(self, position: Position) -> Position {
        position + self.offset()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => f.write_str("Across"),
            Direction::Down => f.write_str("Down"),
        }
    }
}

/// Where a word starts and which way it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bearing {
    pub anchor: Position,
    pub direction: Direction,
}

impl Bearing {
    pub const fn new(anchor: Position, direction: Direction) -> Self {
        Self { anchor, direction }
    }

    /// Position of the letter at `offset` for a word laid along this bearing.
    #[inline]
    pub fn at(&self, offset: usize) -> Position {
        self.anchor.step(self.direction, offset as i32)
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction, self.anchor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// `None` only on the out-of-bounds sentinel.
    pub letter: Option<char>,
    pub word_across: bool,
    pub word_down: bool,
    pub is_valid: bool,
    /// Clue number when a word starts here, 0 otherwise.
    pub number: u32,
}

impl Cell {
    pub const BOUNDARY: Cell = Cell {
        letter: None,
        word_across: false,
        word_down: false,
        is_valid: false,
        number: 0,
    };

    pub fn new(letter: char) -> Self {
        Self {
            letter: Some(letter),
            word_across: false,
            word_down: false,
            is_valid: true,
            number: 0,
        }
    }

    /// A cell carrying both an across and a down word has no orientation left.
    pub fn available(&self) -> bool {
        self.is_valid && !(self.word_across && self.word_down)
    }

    pub fn claimed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Across => self.word_across,
            Direction::Down => self.word_down,
        }
    }

    pub(crate) fn claim(&mut self, direction: Direction) {
        match direction {
            Direction::Across => self.word_across = true,
            Direction::Down => self.word_down = true,
        }
    }
}

/// Raw `(text, hint, required)` triple as delivered by a word source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub text: String,
    pub hint: String,
    pub required: bool,
}

impl WordEntry {
    pub fn new(text: impl Into<String>, hint: impl Into<String>, required: bool) -> Self {
        Self {
            text: text.into(),
            hint: hint.into(),
            required,
        }
    }
}

/// A dictionary entry and, once placed, its bearing and clue number.
///
/// Two words are equal when their normalized text is equal; the hint and
/// placement state do not take part in the comparison.
#[derive(Debug, Clone)]
pub struct Word {
    text: String,
    letters: Vec<char>,
    hint: String,
    required: bool,
    start: Option<Bearing>,
    number: u32,
}

impl Word {
    pub fn new(text: &str, hint: &str, required: bool) -> Result<Self> {
        let text = text.trim().to_uppercase();
        let letters: Vec<char> = text.chars().collect();

        if letters.len() < 2 {
            return Err(XwordError::WordTooShort {
                length: letters.len(),
                word: text,
            });
        }
        // 無大小寫之分的文字 (CJK、'ª') 也要擋下，格子只放大寫字母
        if let Some(&character) = letters.iter().find(|c| !(c.is_alphabetic() && c.is_uppercase())) {
            return Err(XwordError::InvalidCharacter { word: text, character });
        }

        Ok(Self {
            text,
            letters,
            hint: hint.trim().to_string(),
            required,
            start: None,
            number: 0,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub(crate) fn mark_required(&mut self) {
        self.required = true;
    }

    pub fn start(&self) -> Option<Bearing> {
        self.start
    }

    pub fn is_placed(&self) -> bool {
        self.start.is_some()
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn direction(&self) -> Option<Direction> {
        self.start.map(|b| b.direction)
    }

    /// Positions covered by the word, empty when unplaced.
    pub fn positions(&self) -> Vec<Position> {
        match self.start {
            Some(bearing) => (0..self.len()).map(|i| bearing.at(i)).collect(),
            None => Vec::new(),
        }
    }

    /// Records the placement. A placed word is never moved to another bearing.
    pub(crate) fn set_start(&mut self, bearing: Bearing) {
        debug_assert!(self.start.is_none(), "word {} placed twice", self.text);
        if self.start.is_none() {
            self.start = Some(bearing);
        }
    }

    /// Shifts an existing placement during recentering.
    pub(crate) fn translate(&mut self, offset: Position) {
        if let Some(bearing) = self.start.as_mut() {
            bearing.anchor = bearing.anchor + offset;
        }
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        self.number = number;
    }
}

impl TryFrom<&WordEntry> for Word {
    type Error = XwordError;

    fn try_from(entry: &WordEntry) -> Result<Self> {
        Word::new(&entry.text, &entry.hint, entry.required)
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Word {}

impl Hash for Word {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_is_row_major() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 5),
            Position::new(0, -1),
            Position::new(-2, 9),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(-2, 9),
                Position::new(0, -1),
                Position::new(0, 5),
                Position::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_direction_steps() {
        let p = Position::new(3, 4);
        assert_eq!(Direction::Across.next(p), Position::new(3, 5));
        assert_eq!(Direction::Down.next(p), Position::new(4, 4));
        assert_eq!(p.step(Direction::Down, -2), Position::new(1, 4));
        assert_eq!(Bearing::new(p, Direction::Across).at(2), Position::new(3, 6));
    }

    #[test]
    fn test_word_normalization() {
        let word = Word::new("  cat ", "  a small feline ", true).unwrap();
        assert_eq!(word.text(), "CAT");
        assert_eq!(word.hint(), "a small feline");
        assert!(word.required());
        assert!(!word.is_placed());
        assert_eq!(word.number(), 0);
    }

    #[test]
    fn test_word_too_short() {
        let err = Word::new("A", "letter", true).unwrap_err();
        assert!(matches!(err, XwordError::WordTooShort { length: 1, .. }));
        assert!(Word::new("OK", "fine", true).is_ok());
    }

    #[test]
    fn test_word_rejects_non_letters() {
        let err = Word::new("ICE CREAM", "dessert", false).unwrap_err();
        assert!(matches!(err, XwordError::InvalidCharacter { character: ' ', .. }));
    }

    #[test]
    fn test_word_rejects_caseless_letters() {
        let err = Word::new("貓咪", "cat", true).unwrap_err();
        assert!(matches!(err, XwordError::InvalidCharacter { character: '貓', .. }));
        assert!(Word::new("ªB", "ordinal", true).is_err());

        let word = Word::new("straße", "street", true).unwrap();
        assert_eq!(word.text(), "STRASSE");
        assert!(word.letters().iter().all(|c| c.is_uppercase()));
    }

    #[test]
    fn test_word_equality_ignores_hint() {
        let a = Word::new("CAT", "feline", true).unwrap();
        let b = Word::new("cat", "pet that purrs", false).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Word::new("CAR", "feline", true).unwrap());
    }

    #[test]
    fn test_cell_availability() {
        let mut cell = Cell::new('A');
        assert!(cell.available());
        cell.claim(Direction::Across);
        assert!(cell.available());
        cell.claim(Direction::Down);
        assert!(!cell.available());
        assert!(!Cell::BOUNDARY.available());
    }
}
