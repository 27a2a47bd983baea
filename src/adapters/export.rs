use crate::core::crossword::Crossword;
use crate::core::render::{to_text, LatticeCell};
use crate::domain::model::Direction;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TEXT_FILENAME: &str = "crossword.txt";
pub const JSON_FILENAME: &str = "crossword.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordExport {
    pub text: String,
    pub hint: String,
    pub required: bool,
    pub number: u32,
    pub row: i32,
    pub col: i32,
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosswordExport {
    pub name: String,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub cols: usize,
    /// Solution letters row by row, a space where no word runs.
    pub grid: Vec<String>,
    pub lattice: Vec<Vec<LatticeCell>>,
    pub words: Vec<WordExport>,
    pub unplaced: Vec<String>,
}

impl CrosswordExport {
    pub fn from_crossword(name: &str, crossword: &mut Crossword) -> Self {
        let seed = crossword.seed();
        let renderer = crossword.renderer();
        let (rows, cols) = renderer.dimensions();
        let grid = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| renderer.letter_at(r, c).unwrap_or(' '))
                    .collect::<String>()
            })
            .collect();
        let lattice = renderer.lattice();

        let mut words: Vec<WordExport> = crossword
            .placed_words()
            .into_iter()
            .filter_map(|w| {
                let start = w.start()?;
                Some(WordExport {
                    text: w.text().to_string(),
                    hint: w.hint().to_string(),
                    required: w.required(),
                    number: w.number(),
                    row: start.anchor.row,
                    col: start.anchor.col,
                    direction: start.direction,
                })
            })
            .collect();
        words.sort_by_key(|w| (w.number, w.direction));

        Self {
            name: name.to_string(),
            seed,
            generated_at: Utc::now(),
            rows,
            cols,
            grid,
            lattice,
            words,
            unplaced: crossword
                .unplaced_words()
                .iter()
                .map(|w| w.text().to_string())
                .collect(),
        }
    }
}

/// Printable puzzle: optional solution, blank grid and both hint lists.
pub fn render_text(name: &str, crossword: &mut Crossword, include_solution: bool) -> String {
    let renderer = crossword.renderer();
    let mut sections = vec![name.to_string()];

    if include_solution {
        sections.push(format!("Solution:\n{}", to_text(&renderer.solution())));
    }
    sections.push(format!("Puzzle:\n{}", to_text(&renderer.blank())));

    for direction in Direction::ALL {
        let hints = renderer.hints(direction);
        if !hints.is_empty() {
            sections.push(format!("{}:\n{}", direction, hints.join("\n")));
        }
    }

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

pub struct Exporter<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> Exporter<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn write_text(&self, name: &str, crossword: &mut Crossword, include_solution: bool) -> Result<String> {
        let text = render_text(name, crossword, include_solution);
        self.storage.write_file(TEXT_FILENAME, text.as_bytes())
    }

    pub fn write_json(&self, name: &str, crossword: &mut Crossword) -> Result<String> {
        let export = CrosswordExport::from_crossword(name, crossword);
        let json = serde_json::to_string_pretty(&export)?;
        self.storage.write_file(JSON_FILENAME, json.as_bytes())
    }
}
