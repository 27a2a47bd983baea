use thiserror::Error;

#[derive(Error, Debug)]
pub enum XwordError {
    #[error("Word '{word}' is too short: {length} letter(s), at least 2 required")]
    WordTooShort { word: String, length: usize },

    #[error("Word '{word}' contains a non-letter character '{character}'")]
    InvalidCharacter { word: String, character: char },

    #[error("Could not place word '{word}': {reason}")]
    PlacementFailed { word: String, reason: String },

    #[error("Mandatory words were not placed: {}", .words.join(", "))]
    MissingMandatoryWords { words: Vec<String> },

    #[error("The word list is empty")]
    EmptyWordList,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Placement,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl XwordError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            XwordError::WordTooShort { .. }
            | XwordError::InvalidCharacter { .. }
            | XwordError::EmptyWordList
            | XwordError::CsvError(_) => ErrorCategory::Input,
            XwordError::PlacementFailed { .. } | XwordError::MissingMandatoryWords { .. } => {
                ErrorCategory::Placement
            }
            XwordError::IoError(_) | XwordError::SerializationError(_) => ErrorCategory::Io,
            XwordError::TomlError(_)
            | XwordError::ConfigValidationError { .. }
            | XwordError::InvalidConfigValueError { .. }
            | XwordError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 換個 seed 重跑可能就會成功
            XwordError::PlacementFailed { .. } | XwordError::MissingMandatoryWords { .. } => {
                ErrorSeverity::Medium
            }
            // 必要字詞無效時整個流程已中止，不能當成警告
            XwordError::WordTooShort { .. }
            | XwordError::InvalidCharacter { .. }
            | XwordError::EmptyWordList
            | XwordError::CsvError(_)
            | XwordError::TomlError(_)
            | XwordError::ConfigValidationError { .. }
            | XwordError::InvalidConfigValueError { .. }
            | XwordError::MissingConfigError { .. } => ErrorSeverity::High,
            XwordError::IoError(_) | XwordError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that ended with this error. Every error
    /// that reaches a binary has stopped the run, so none of them map to 0.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,     // 輸入或配置錯誤
            ErrorSeverity::Medium => 2,   // 換 seed 重試
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            XwordError::WordTooShort { .. } => "Remove the word or extend it to at least 2 letters",
            XwordError::InvalidCharacter { .. } => {
                "Use letters only; spaces, digits and punctuation cannot be placed on the grid"
            }
            XwordError::PlacementFailed { .. } | XwordError::MissingMandatoryWords { .. } => {
                "Run again with a different --seed, or mark the word as optional"
            }
            XwordError::EmptyWordList => "Check that the word file has at least one non-empty row",
            XwordError::CsvError(_) => "Check the delimiter and the Word/Hint/Optional column layout",
            XwordError::IoError(_) => "Check that the paths exist and are writable",
            XwordError::SerializationError(_) => "Report this as a bug",
            XwordError::TomlError(_) => "Make sure the file exists and is valid TOML format",
            XwordError::ConfigValidationError { .. }
            | XwordError::InvalidConfigValueError { .. }
            | XwordError::MissingConfigError { .. } => "Fix the configuration value and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Word list problem: {}", self),
            ErrorCategory::Placement => format!("Layout problem: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, XwordError>;
