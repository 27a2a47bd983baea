use crate::core::crossword::Crossword;
use crate::domain::model::WordEntry;
use crate::utils::error::Result;

/// Supplies `(text, hint, required)` triples in submission order.
pub trait WordSource {
    fn read_entries(&self) -> Result<Vec<WordEntry>>;
}

pub trait Storage {
    /// Returns the full path written.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    fn puzzle_name(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn seed(&self) -> Option<u64>;
    fn sort_by_length(&self) -> bool;
    fn include_solution(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<WordEntry>>;
    fn build(&self, entries: Vec<WordEntry>) -> Result<BuildOutcome>;
    fn load(&self, crossword: &mut Crossword) -> Result<Vec<String>>;
}

/// Result of the build stage: the finalized puzzle plus the entries that
/// could not become words.
#[derive(Debug)]
pub struct BuildOutcome {
    pub crossword: Crossword,
    pub rejected: Vec<String>,
    pub isolated: usize,
}
