//! Fighter record format
//!
//! Records are lenient: every field may be missing and bad values are
//! normalized rather than rejected.

use crate::config::BoutConfig;
use crate::core::{Fighter, FighterId, Rating, Tendency};
use crate::tables::FightingStyle;
use crate::{FightError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A fighter as the host stores it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterRecord {
    pub id: Option<u32>,
    pub name: String,
    /// Free-form style name; unknown names fall back to the generic style
    pub style: Option<String>,
    #[serde(alias = "ratings")]
    pub rating: Rating,
    #[serde(alias = "tendencies")]
    pub tendency: Option<Tendency>,
}

impl FighterRecord {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        FighterRecord {
            id: Some(id),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_tendency(mut self, tendency: Tendency) -> Self {
        self.tendency = Some(tendency);
        self
    }

    pub fn fighting_style(&self) -> FightingStyle {
        self.style
            .as_deref()
            .and_then(FightingStyle::parse_lenient)
            .unwrap_or_default()
    }

    /// Display name, falling back to the id when the record has none
    pub fn display_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("Fighter {}", self.id.unwrap_or(0))
        } else {
            trimmed.to_string()
        }
    }

    /// Build a fresh bout fighter from this record
    pub fn into_fighter(&self, config: &BoutConfig) -> Fighter {
        Fighter::new(
            FighterId::new(self.id.unwrap_or(0)),
            self.display_name(),
            config.max_health,
            config.starting_stamina,
        )
        .with_style(self.fighting_style())
        .with_rating(self.rating.clone())
        .with_tendency(self.tendency.unwrap_or_default())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    List(Vec<FighterRecord>),
    Wrapped { fighters: Vec<FighterRecord> },
}

/// Loader for fighter record files
pub struct RecordLoader;

impl RecordLoader {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<FighterRecord>> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a JSON array of records or an object with a `fighters` array
    pub fn parse(content: &str) -> Result<Vec<FighterRecord>> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        match serde_json::from_value::<RecordFile>(value) {
            Ok(RecordFile::List(records)) | Ok(RecordFile::Wrapped { fighters: records }) => Ok(records),
            Err(e) => Err(FightError::ParseError(format!(
                "expected an array of fighters or an object with a \"fighters\" array: {e}"
            ))),
        }
    }
}
