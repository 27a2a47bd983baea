use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, XwordError};
use crate::utils::validation::{
    validate_delimiter, validate_file_extension, validate_output_formats, validate_path,
    validate_required_field, Validate, WORD_FILE_EXTENSIONS,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub puzzle: PuzzleConfig,
    #[serde(default)]
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub name: String,
    pub seed: Option<u64>,
    pub sort_by_length: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub delimiter: Option<String>,
    pub has_headers: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub include_solution: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${WORDS_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| XwordError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn words_path(&self) -> Result<&String> {
        validate_required_field("input.path", &self.input.path)
    }

    /// 分隔字元，預設 TAB
    pub fn delimiter(&self) -> Result<u8> {
        match self.input.delimiter.as_deref() {
            None => Ok(b'\t'),
            Some(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => validate_delimiter("input.delimiter", c),
                    _ => Err(XwordError::InvalidConfigValueError {
                        field: "input.delimiter".to_string(),
                        value: raw.to_string(),
                        reason: "Delimiter must be exactly one character".to_string(),
                    }),
                }
            }
        }
    }

    pub fn has_headers(&self) -> bool {
        self.input.has_headers.unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.puzzle.name.trim().is_empty() {
            return Err(XwordError::ConfigValidationError {
                field: "puzzle.name".to_string(),
                message: "Puzzle name cannot be empty".to_string(),
            });
        }

        let words = self.words_path()?;
        validate_path("input.path", words)?;
        validate_file_extension("input.path", words, &WORD_FILE_EXTENSIONS)?;
        self.delimiter()?;

        validate_path("output.path", &self.output.path)?;
        validate_output_formats("output.formats", &self.output.formats)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn puzzle_name(&self) -> &str {
        &self.puzzle.name
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn seed(&self) -> Option<u64> {
        self.puzzle.seed
    }

    fn sort_by_length(&self) -> bool {
        self.puzzle.sort_by_length.unwrap_or(true)
    }

    fn include_solution(&self) -> bool {
        self.output.include_solution.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[puzzle]
name = "Animals"
seed = 42

[input]
path = "animals.tsv"

[output]
path = "./out"
formats = ["text", "json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.puzzle_name(), "Animals");
        assert_eq!(config.seed(), Some(42));
        assert!(config.sort_by_length());
        assert!(config.include_solution());
        assert_eq!(config.delimiter().unwrap(), b'\t');
        assert_eq!(config.words_path().unwrap(), "animals.tsv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMALL_XWORD_TEST_DIR", "/tmp/words");

        let toml_content = r#"
[puzzle]
name = "Env"

[input]
path = "${SMALL_XWORD_TEST_DIR}/list.tsv"

[output]
path = "${SMALL_XWORD_UNSET_VAR}"
formats = ["text"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.words_path().unwrap(), "/tmp/words/list.tsv");
        assert_eq!(config.output.path, "${SMALL_XWORD_UNSET_VAR}");

        std::env::remove_var("SMALL_XWORD_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[puzzle]
name = "Broken"

[input]
delimiter = "::"

[output]
path = "./out"
formats = ["pdf"]
"#;

        let mut config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(XwordError::MissingConfigError { .. })
        ));

        config.input.path = Some("words.tsv".to_string());
        assert!(matches!(
            config.validate(),
            Err(XwordError::InvalidConfigValueError { .. })
        ));

        config.input.delimiter = Some(",".to_string());
        config.output.formats = vec!["json".to_string()];
        assert!(config.validate().is_ok());

        config.input.path = Some("words.xlsx".to_string());
        assert!(matches!(
            config.validate(),
            Err(XwordError::InvalidConfigValueError { ref field, .. }) if field == "input.path"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[puzzle]\nname = \"File\"\nsort_by_length = false\n\n[output]\npath = \"out\"\nformats = [\"json\"]\ninclude_solution = false"
        )
        .unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert!(!config.sort_by_length());
        assert!(!config.include_solution());
        assert!(config.input.path.is_none());
        assert!(TomlConfig::from_file("/definitely/missing.toml").is_err());
    }
}
