use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use super::sample::SAMPLE_RECORDS;

/// One normalized entity record as handed over by the data-cleaning layer.
/// Field-name normalization happens upstream; this is the contract format.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct EntityRecord {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub collectives: Vec<String>,
    #[serde(default)]
    pub associates: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

pub enum RecordSource {
    File(PathBuf),
    BundledSample,
}

impl RecordSource {
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::BundledSample => "bundled sample".to_string(),
        }
    }

    pub fn load(&self) -> Result<Vec<EntityRecord>> {
        let raw = match self {
            Self::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read record file {}", path.display()))?,
            Self::BundledSample => SAMPLE_RECORDS.to_string(),
        };

        let records: Vec<EntityRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("invalid record JSON from {}", self.label()))?;

        if records.is_empty() {
            Err(anyhow!("record source {} contained no entries", self.label()))
        } else {
            Ok(records)
        }
    }
}

/// Loads the requested file source, falling back to the bundled sample when it
/// fails. Only a broken sample is a hard error.
pub fn load_with_fallback(path: Option<PathBuf>) -> Result<(Vec<EntityRecord>, String)> {
    if let Some(path) = path {
        let source = RecordSource::File(path);
        match source.load() {
            Ok(records) => return Ok((records, source.label())),
            Err(error) => {
                log::warn!("{error:#}; falling back to the bundled sample records");
            }
        }
    }

    let fallback = RecordSource::BundledSample;
    let records = fallback.load()?;
    Ok((records, fallback.label()))
}
