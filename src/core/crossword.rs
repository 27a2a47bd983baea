use crate::core::grid::{Bounds, Grid};
use crate::core::layout;
use crate::core::placement::{self, Placement};
use crate::core::render::Renderer;
use crate::domain::model::Word;
use crate::utils::error::{Result, XwordError};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// One puzzle: the grid, the words submitted to it and the random source
/// driving placement choices.
#[derive(Debug, Clone)]
pub struct Crossword {
    grid: Grid,
    words: Vec<Word>,
    rng: Pcg64Mcg,
    seed: u64,
}

impl Crossword {
    /// Seeds from entropy; the seed stays readable through [`Crossword::seed`].
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            grid: Grid::new(),
            words: Vec::new(),
            rng: Pcg64Mcg::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, text: &str) -> Option<&Word> {
        let text = text.trim().to_uppercase();
        self.words.iter().find(|w| w.text() == text)
    }

    /// Adds `word` to the puzzle and places it right away.
    ///
    /// A word whose text is already present is merged into the existing one
    /// (a required duplicate makes the kept word required) and `Ok(None)` is
    /// returned. When placement fails the word is still kept, unplaced, so
    /// [`Crossword::missing_mandatory_words`] reports it.
    pub fn submit(&mut self, word: Word) -> Result<Option<Placement>> {
        if let Some(existing) = self.words.iter_mut().find(|w| **w == word) {
            tracing::warn!("Duplicate word {} ignored", word);
            if word.required() && !existing.required() {
                existing.mark_required();
            }
            return Ok(None);
        }

        self.words.push(word);
        let Some(word) = self.words.last_mut() else {
            return Ok(None);
        };
        placement::place(&mut self.grid, word, &mut self.rng).map(Some)
    }

    /// Numbers the placed words and moves the layout to a zero-based origin.
    pub fn finalize(&mut self) -> Option<Bounds> {
        let highest = layout::assign_numbers(&mut self.grid, &mut self.words);
        tracing::debug!("Assigned {} clue numbers", highest);
        layout::recenter(&mut self.grid, &mut self.words)
    }

    /// Recenters and returns a renderer over the current layout.
    pub fn renderer(&mut self) -> Renderer<'_> {
        layout::recenter(&mut self.grid, &mut self.words);
        Renderer::new(&self.grid, &self.words)
    }

    pub fn required_words(&self) -> Vec<&Word> {
        self.words.iter().filter(|w| w.required()).collect()
    }

    pub fn optional_words(&self) -> Vec<&Word> {
        self.words.iter().filter(|w| !w.required()).collect()
    }

    pub fn placed_words(&self) -> Vec<&Word> {
        self.words.iter().filter(|w| w.is_placed()).collect()
    }

    pub fn unplaced_words(&self) -> Vec<&Word> {
        self.words.iter().filter(|w| !w.is_placed()).collect()
    }

    pub fn missing_mandatory_words(&self) -> Vec<&Word> {
        self.words
            .iter()
            .filter(|w| w.required() && !w.is_placed())
            .collect()
    }

    /// Errors with the texts of every required word left unplaced.
    pub fn ensure_mandatory_placed(&self) -> Result<()> {
        let missing: Vec<String> = self
            .missing_mandatory_words()
            .iter()
            .map(|w| w.text().to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(XwordError::MissingMandatoryWords { words: missing })
        }
    }
}

impl Default for Crossword {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest words first, keeping the input order among equal lengths.
pub fn sort_by_length(words: &mut [Word]) {
    words.sort_by(|a, b| b.len().cmp(&a.len()));
}
