//! A small persisted expense tracker: records with a description, amount,
//! and category live in a [`records::store::RecordStore`] that writes every
//! mutation through to a [`storage::BlobStore`]. The [`tracker::Tracker`]
//! facade adds the single-slot edit session, category filtering, and
//! change notifications a front-end needs.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::errors::SpendlogError;

pub mod errors;
pub mod records;
pub mod storage;
pub mod tracker;

pub use records::session::EditSession;
pub use records::store::RecordStore;
pub use records::summary::Summary;
pub use records::view::SortKey;
pub use records::{Record, RecordDraft, RecordId};
pub use tracker::{Tracker, TrackerEvent};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency: char,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: '₹',
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("spendlog"),
        }
    }
}

impl Config {
    /// Reads `spendlog.toml` from the user's config directory. A missing
    /// file means defaults; an unparsable one is an error.
    pub fn load() -> Result<Self, SpendlogError> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(Self::default());
        };
        let path = config_dir.join("spendlog").join("spendlog.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        debug!(path = %path.display(), "config file found");
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
