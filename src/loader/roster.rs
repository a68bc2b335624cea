//! Roster of fighter records with lookup by id or name

use crate::config::BoutConfig;
use crate::core::Fighter;
use crate::loader::record::{FighterRecord, RecordLoader};
use crate::{FightError, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Lookup key for names: ASCII-folded, lowercase, single-spaced
pub fn name_key(name: &str) -> String {
    deunicode::deunicode(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<FighterRecord>,
    by_id: FxHashMap<u32, usize>,
    by_name: FxHashMap<String, usize>,
}

impl Roster {
    /// Index a list of records
    ///
    /// Records without an id get the next free id after the largest one
    /// present. Duplicate ids are rejected; duplicate names resolve to the
    /// first record.
    pub fn from_records(records: Vec<FighterRecord>) -> Result<Self> {
        let mut next_id = records.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
        let mut roster = Roster::default();

        for mut record in records {
            let id = match record.id {
                Some(id) => id,
                None => {
                    let id = next_id;
                    next_id += 1;
                    record.id = Some(id);
                    id
                }
            };
            let index = roster.records.len();
            if roster.by_id.insert(id, index).is_some() {
                return Err(FightError::InvalidRecord(format!("duplicate fighter id {id}")));
            }
            roster.by_name.entry(name_key(&record.display_name())).or_insert(index);
            roster.records.push(record);
        }

        Ok(roster)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_records(RecordLoader::load_from_file(path)?)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FighterRecord] {
        &self.records
    }

    pub fn get_by_id(&self, id: u32) -> Option<&FighterRecord> {
        self.by_id.get(&id).map(|i| &self.records[*i])
    }

    /// Case- and accent-insensitive name lookup
    pub fn get_by_name(&self, name: &str) -> Option<&FighterRecord> {
        self.by_name.get(&name_key(name)).map(|i| &self.records[*i])
    }

    /// Look up by numeric id first, then by name
    pub fn find(&self, query: &str) -> Result<&FighterRecord> {
        query
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|id| self.get_by_id(id))
            .or_else(|| self.get_by_name(query))
            .ok_or_else(|| FightError::FighterNotFound(query.to_string()))
    }

    /// Find a record and build a bout fighter from it
    pub fn fighter(&self, query: &str, config: &BoutConfig) -> Result<Fighter> {
        Ok(self.find(query)?.into_fighter(config))
    }
}
