use std::fmt;

use async_trait::async_trait;

use super::types::SeedRecord;

/// Errors that can occur while fetching the seed collection.
/// Any of them is fatal to startup.
#[derive(Debug)]
pub enum LoadError {
    /// Local file could not be read.
    Io(String),
    /// Network-level failure (DNS, connection refused, body cut short).
    Network(String),
    /// Server answered with a non-success status.
    Http { status: u16, message: String },
    /// Body was not a JSON array of seed records.
    Parse(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "I/O error: {msg}"),
            LoadError::Network(msg) => write!(f, "network error: {msg}"),
            LoadError::Http { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            LoadError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

#[async_trait]
pub trait SeedProvider: Send + Sync {
    /// Human-readable origin, for logs and the failure screen.
    fn describe(&self) -> String;

    /// Fetch and parse the full ordered record list. Called once at startup.
    async fn fetch(&self) -> Result<Vec<SeedRecord>, LoadError>;
}

/// Parse a JSON array of seed records.
pub fn parse_records(json: &str) -> Result<Vec<SeedRecord>, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_accepts_camel_case() {
        let json = r#"[{"level": 1, "frontText": "ichi", "backText": "一", "hint": "one"}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, "1");
        assert_eq!(records[0].front_text, "ichi");
        assert_eq!(records[0].back_text, "一");
        assert_eq!(records[0].hint, "one");
    }

    #[test]
    fn test_parse_records_accepts_collection_names() {
        let json = r#"[{"id": 7, "niveau": "N5", "prononciation": "ni", "kanji": "二", "hint": "two"}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].level, "N5");
        assert_eq!(records[0].front_text, "ni");
        assert_eq!(records[0].back_text, "二");
    }

    #[test]
    fn test_parse_records_missing_field_is_parse_error() {
        let json = r#"[{"level": 1, "hint": "no text"}]"#;
        assert!(matches!(parse_records(json), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_parse_records_not_an_array() {
        assert!(matches!(parse_records("{}"), Err(LoadError::Parse(_))));
        assert!(matches!(parse_records("not json"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }
}
