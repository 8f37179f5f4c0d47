//! Seed collection read from a local JSON file.

use std::path::PathBuf;

use async_trait::async_trait;
use log::info;

use crate::seed::{LoadError, SeedProvider, SeedRecord, parse_records};

pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedProvider for FileSeed {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<SeedRecord>, LoadError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Io(format!("{}: {e}", self.path.display())))?;
        let records = parse_records(&contents)?;
        info!("Read {} seed records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_records_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"niveau": 1, "prononciation": "ichi", "kanji": "一", "hint": "one"}}]"#
        )
        .unwrap();

        let records = FileSeed::new(file.path()).fetch().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].back_text, "一");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let seed = FileSeed::new(dir.path().join("absent.json"));
        assert!(matches!(seed.fetch().await, Err(LoadError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{").unwrap();
        let result = FileSeed::new(file.path()).fetch().await;
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
