//! The night dataset: night identifiers mapped to their exposure lists.
//!
//! This is the shape of `merged.json`, the document the merge stage writes and
//! the generate stage consumes:
//!
//! ```json
//! {
//!   "20190912": [{ "EXPID": "00004521", "RA": 150.1, "DEC": 2.2 }],
//!   "20190913": [{ "EXPID": 4602 }]
//! }
//! ```
//!
//! Nights are held in a `BTreeMap`, so iteration is ascending by identifier.
//! Display order is decided later by the controller. Records are not
//! validated beyond what deserialization requires.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One captured frame within a night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Exposure identifier. Doubles as the display title and the thumbnail
    /// filename stem. Integer identifiers are kept in decimal form.
    #[serde(rename = "EXPID", deserialize_with = "deserialize_expid")]
    pub expid: String,
    /// Telescope pointing, degrees.
    #[serde(rename = "RA", default, skip_serializing_if = "Option::is_none")]
    pub ra: Option<f64>,
    #[serde(rename = "DEC", default, skip_serializing_if = "Option::is_none")]
    pub dec: Option<f64>,
}

impl Exposure {
    pub fn new(expid: impl Into<String>) -> Self {
        Self {
            expid: expid.into(),
            ra: None,
            dec: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawExpId {
    Text(String),
    Number(u64),
}

fn deserialize_expid<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawExpId::deserialize(deserializer)? {
        RawExpId::Text(s) => s,
        RawExpId::Number(n) => n.to_string(),
    })
}

/// Mapping from night identifier (`YYYYMMDD`) to that night's exposures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NightDataset {
    nights: BTreeMap<String, Vec<Exposure>>,
}

impl NightDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a `merged.json` document from disk.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace (or add) the exposure list for a night.
    pub fn insert(&mut self, night: impl Into<String>, exposures: Vec<Exposure>) {
        self.nights.insert(night.into(), exposures);
    }

    pub fn get(&self, night: &str) -> Option<&[Exposure]> {
        self.nights.get(night).map(Vec::as_slice)
    }

    pub fn contains(&self, night: &str) -> bool {
        self.nights.contains_key(night)
    }

    /// Night identifiers, ascending.
    pub fn nights(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.nights.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Exposure])> {
        self.nights.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.nights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nights.is_empty()
    }

    pub fn total_exposures(&self) -> usize {
        self.nights.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<Exposure>)> for NightDataset {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Exposure>)>>(iter: I) -> Self {
        Self {
            nights: iter.into_iter().collect(),
        }
    }
}
