use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_file_extension, validate_output_formats, validate_path, Validate,
    WORD_FILE_EXTENSIONS,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "small-xword")]
#[command(about = "Lay out a crossword from a word/hint list")]
pub struct CliConfig {
    /// Word list: Word<TAB>Hint<TAB>Optional per line
    #[arg(long)]
    pub words: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "Crossword")]
    pub name: String,

    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_delimiter = ',', default_value = "text")]
    pub formats: Vec<String>,

    #[arg(long, default_value = "\t")]
    pub delimiter: char,

    #[arg(long, help = "The word list starts with a header row")]
    pub has_headers: bool,

    #[arg(long, help = "Submit words in file order instead of longest first")]
    pub keep_order: bool,

    #[arg(long, help = "Leave the solution grid out of the text output")]
    pub no_solution: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn puzzle_name(&self) -> &str {
        &self.name
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn sort_by_length(&self) -> bool {
        !self.keep_order
    }

    fn include_solution(&self) -> bool {
        !self.no_solution
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("words", &self.words)?;
        validate_file_extension("words", &self.words, &WORD_FILE_EXTENSIONS)?;
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("formats", &self.formats)?;
        validate_delimiter("delimiter", self.delimiter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::try_parse_from(["small-xword", "--words", "animals.tsv"]).unwrap();

        assert_eq!(config.output_path, "./output");
        assert_eq!(config.formats, vec!["text".to_string()]);
        assert_eq!(config.delimiter, '\t');
        assert!(config.sort_by_length());
        assert!(config.include_solution());
        assert!(config.seed().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_overrides() {
        let config = CliConfig::try_parse_from([
            "small-xword",
            "--words",
            "animals.csv",
            "--seed",
            "42",
            "--formats",
            "text,json",
            "--delimiter",
            ",",
            "--keep-order",
            "--no-solution",
        ])
        .unwrap();

        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.output_formats().len(), 2);
        assert!(!config.sort_by_length());
        assert!(!config.include_solution());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CliConfig::try_parse_from(["small-xword", "--words", "animals.tsv"]).unwrap();
        config.formats = vec!["pdf".to_string()];
        assert!(config.validate().is_err());

        config.formats = vec!["json".to_string()];
        config.words = "animals.xlsx".to_string();
        assert!(config.validate().is_err());
    }
}
