use crate::domain::model::WordEntry;
use crate::domain::ports::WordSource;
use crate::utils::error::Result;
use std::io::Read;
use std::path::PathBuf;

/// First letters of the `Optional` column that mark a word as optional
/// (Bonus, Optional, True, Extra). Anything else, including a missing
/// column, means required.
const OPTIONAL_MARKERS: &str = "BOTE";

/// Word list in `Word<TAB>Hint<TAB>Optional` rows.
#[derive(Debug, Clone)]
pub struct TsvWordSource {
    path: PathBuf,
    delimiter: u8,
    has_headers: bool,
}

impl TsvWordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b'\t',
            has_headers: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

impl WordSource for TsvWordSource {
    fn read_entries(&self) -> Result<Vec<WordEntry>> {
        tracing::debug!("Reading word list from {}", self.path.display());
        let file = std::fs::File::open(&self.path)?;
        parse_entries(file, self.delimiter, self.has_headers)
    }
}

pub fn is_optional_marker(value: &str) -> bool {
    value
        .trim()
        .chars()
        .next()
        .map(|c| OPTIONAL_MARKERS.contains(c.to_ascii_uppercase()))
        .unwrap_or(false)
}

/// Parses delimited rows into entries. Rows without a word are skipped;
/// a missing hint falls back to the word itself.
pub fn parse_entries<R: Read>(reader: R, delimiter: u8, has_headers: bool) -> Result<Vec<WordEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut entries = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let text = record.get(0).unwrap_or("").trim();
        if text.is_empty() {
            tracing::warn!("Skipping row {} without a word", line + 1);
            continue;
        }

        let hint = match record.get(1).map(str::trim) {
            Some(hint) if !hint.is_empty() => hint,
            _ => text,
        };
        let optional = record.get(2).map(is_optional_marker).unwrap_or(false);

        entries.push(WordEntry::new(text, hint, !optional));
    }

    tracing::debug!("Parsed {} word entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_entries_columns_and_defaults() {
        let data = "cat\tA small feline\nbonus\tExtra credit\tB\ndog\t\tfalse\nowl\n\t\t\n";
        let entries = parse_entries(data.as_bytes(), b'\t', false).unwrap();

        assert_eq!(
            entries,
            vec![
                WordEntry::new("cat", "A small feline", true),
                WordEntry::new("bonus", "Extra credit", false),
                WordEntry::new("dog", "dog", true),
                WordEntry::new("owl", "owl", true),
            ]
        );
    }

    #[test]
    fn test_optional_markers() {
        for marker in ["B", "bonus", " O", "optional", "T", "true", "E", "extra"] {
            assert!(is_optional_marker(marker), "{marker}");
        }
        for marker in ["F", "false", "no", "", "  "] {
            assert!(!is_optional_marker(marker), "{marker}");
        }
    }

    #[test]
    fn test_headers_and_custom_delimiter() {
        let data = "Word,Hint,Optional\nhello,greeting,F\nworld,planet,T\n";
        let entries = parse_entries(data.as_bytes(), b',', true).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].required);
        assert!(!entries[1].required);
    }

    #[test]
    fn test_read_entries_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# animals").unwrap();
        writeln!(file, "cat\tfeline").unwrap();
        writeln!(file, "car\tvehicle\tO").unwrap();

        let entries = TsvWordSource::new(file.path()).read_entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], WordEntry::new("car", "vehicle", false));
    }
}
