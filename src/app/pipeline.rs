use crate::adapters::export::Exporter;
use crate::core::crossword::{sort_by_length, Crossword};
use crate::core::placement::PlacementKind;
use crate::domain::model::{Word, WordEntry};
use crate::domain::ports::{BuildOutcome, ConfigProvider, Pipeline, Storage, WordSource};
use crate::utils::error::{Result, XwordError};

pub struct CrosswordPipeline<W: WordSource, S: Storage, C: ConfigProvider> {
    source: W,
    storage: S,
    config: C,
}

impl<W: WordSource, S: Storage, C: ConfigProvider> CrosswordPipeline<W, S, C> {
    pub fn new(source: W, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }

    /// Turns entries into words. An optional entry that is not a valid word
    /// is reported and dropped; an invalid required entry stops the run.
    fn words_from_entries(entries: &[WordEntry]) -> Result<(Vec<Word>, Vec<String>)> {
        let mut words = Vec::with_capacity(entries.len());
        let mut rejected = Vec::new();

        for entry in entries {
            match Word::try_from(entry) {
                Ok(word) => words.push(word),
                Err(e) if !entry.required => {
                    tracing::warn!("Dropping optional entry: {}", e);
                    rejected.push(entry.text.clone());
                }
                Err(e) => return Err(e),
            }
        }

        Ok((words, rejected))
    }
}

impl<W: WordSource, S: Storage, C: ConfigProvider> Pipeline for CrosswordPipeline<W, S, C> {
    fn extract(&self) -> Result<Vec<WordEntry>> {
        let entries = self.source.read_entries()?;
        if entries.is_empty() {
            return Err(XwordError::EmptyWordList);
        }
        Ok(entries)
    }

    fn build(&self, entries: Vec<WordEntry>) -> Result<BuildOutcome> {
        let (mut words, rejected) = Self::words_from_entries(&entries)?;
        if words.is_empty() {
            return Err(XwordError::EmptyWordList);
        }
        if self.config.sort_by_length() {
            sort_by_length(&mut words);
        }

        let seed = self.config.seed().unwrap_or_else(rand::random);
        tracing::info!("Using seed {}", seed);
        let mut crossword = Crossword::with_seed(seed);

        let mut isolated = 0;
        for word in words {
            let first = crossword.grid().is_empty();
            match crossword.submit(word) {
                Ok(Some(placement)) if placement.kind == PlacementKind::Isolated && !first => {
                    isolated += 1;
                }
                Ok(_) => {}
                // 單一字詞放不下不中斷整個流程，最後由 missing_mandatory_words 判斷
                Err(e) => tracing::error!("{}", e),
            }
        }
        crossword.finalize();

        crossword.ensure_mandatory_placed()?;
        for word in crossword.unplaced_words() {
            tracing::warn!("Optional word {} was not placed", word);
        }

        Ok(BuildOutcome {
            crossword,
            rejected,
            isolated,
        })
    }

    fn load(&self, crossword: &mut Crossword) -> Result<Vec<String>> {
        let exporter = Exporter::new(&self.storage);
        let name = self.config.puzzle_name();
        let mut outputs = Vec::new();

        for format in self.config.output_formats() {
            let path = match format.as_str() {
                "text" => exporter.write_text(name, crossword, self.config.include_solution())?,
                "json" => exporter.write_json(name, crossword)?,
                other => {
                    return Err(XwordError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            };
            outputs.push(path);
        }

        Ok(outputs)
    }
}
