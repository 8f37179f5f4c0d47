use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::provider::SeedProvider;
use super::providers::{FileSeed, HttpSeed};

/// One externally supplied flashcard record, before it becomes an `Item`.
///
/// Field names of the original kanji collection (`niveau`, `prononciation`,
/// `kanji`) are accepted alongside the camelCase ones. Any `id` in the
/// source is ignored; items are numbered on load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    #[serde(alias = "niveau", deserialize_with = "level_tag")]
    pub level: String,
    #[serde(alias = "prononciation")]
    pub front_text: String,
    #[serde(alias = "kanji")]
    pub back_text: String,
    #[serde(default)]
    pub hint: String,
}

/// Levels show up as JSON numbers or strings; both become the string tag.
fn level_tag<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tag {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Tag::deserialize(deserializer)? {
        Tag::Number(n) => n.to_string(),
        Tag::Text(s) => s,
    })
}

/// Where the seed collection lives. `http://`/`https://` means a GET,
/// anything else is a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    File(PathBuf),
    Http(String),
}

impl FromStr for SeedSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(SeedSource::Http(s.to_string()))
        } else {
            Ok(SeedSource::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedSource::File(path) => write!(f, "{}", path.display()),
            SeedSource::Http(url) => f.write_str(url),
        }
    }
}

impl SeedSource {
    pub fn into_provider(self) -> Box<dyn SeedProvider> {
        match self {
            SeedSource::File(path) => Box::new(FileSeed::new(path)),
            SeedSource::Http(url) => Box::new(HttpSeed::new(url)),
        }
    }
}
