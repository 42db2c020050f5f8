// Per-game override persistence (load/save)
//
// The whole collection lives in one JSON array document; every save
// rewrites the full document. Concurrent writers are last-write-wins at
// document granularity, but each write is temp-then-rename so a reader
// never observes a torn document.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::game::GameRecord;

/// Errors surfaced by [`GameStore::upsert`].
///
/// Read-side failures never reach the caller (the store self-heals to an
/// empty collection), but silently dropping an edit is worse than silently
/// starting empty, so save failures propagate.
#[derive(Debug)]
pub enum StoreError {
    Encode(String),
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Encode(msg) => write!(f, "Failed to encode game records: {}", msg),
            StoreError::Io(msg) => write!(f, "Failed to write game records: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Disk-backed store of per-game override records
pub struct GameStore {
    path: PathBuf,
}

impl GameStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location, `~/.config/polaris/games.json`
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// Get the default store file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("polaris")
            .join("games.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored record.
    ///
    /// A missing, unreadable, or malformed document degrades to an empty
    /// collection and the document is rewritten as an empty array, so the
    /// next load starts from a well-formed file. Duplicate identities are
    /// coalesced here (last entry wins, document order otherwise kept), so
    /// callers never see two records with the same key.
    pub fn load_all(&self) -> Vec<GameRecord> {
        let records: Vec<GameRecord> = match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("Error parsing {}: {}", self.path.display(), e);
                    self.reset();
                    return Vec::new();
                }
            },
            Err(_) => {
                self.reset();
                return Vec::new();
            }
        };

        coalesce(records)
    }

    /// Look up the record for a game, or build a fresh default one.
    ///
    /// The fresh record is in-memory only; it becomes durable on the next
    /// [`GameStore::upsert`]. `title` is display metadata for the miss case.
    pub fn get(&self, title_id: &str, version: &str, title: &str) -> GameRecord {
        self.load_all()
            .into_iter()
            .find(|record| record.key() == (title_id, version))
            .unwrap_or_else(|| GameRecord::new(title_id, version, title))
    }

    /// Insert or replace the record with a matching identity, then rewrite
    /// the whole document.
    pub fn upsert(&self, record: GameRecord) -> Result<(), StoreError> {
        let mut records = self.load_all();
        match records.iter_mut().find(|r| r.key() == record.key()) {
            Some(slot) => *slot = record,
            None => records.push(record),
        }
        self.write_document(&records)
    }

    // Self-heal: replace an unreadable document with an empty one. Failing
    // to rewrite only costs another reset on the next load.
    fn reset(&self) {
        if let Err(e) = self.write_document(&[]) {
            eprintln!("Error resetting {}: {}", self.path.display(), e);
        }
    }

    fn write_document(&self, records: &[GameRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("{}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        // Write to temp file, then atomic rename
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json)
            .map_err(|e| StoreError::Io(format!("{}: {}", temp.display(), e)))?;
        fs::rename(&temp, &self.path)
            .map_err(|e| StoreError::Io(format!("{}: {}", self.path.display(), e)))
    }
}

// Deduplicate by (title_id, version): the last entry in document order
// wins, first-appearance order is kept.
fn coalesce(records: Vec<GameRecord>) -> Vec<GameRecord> {
    let mut out: Vec<GameRecord> = Vec::with_capacity(records.len());
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let key = (record.title_id.clone(), record.version.clone());
        match seen.get(&key) {
            Some(&slot) => out[slot] = record,
            None => {
                seen.insert(key, out.len());
                out.push(record);
            }
        }
    }

    out
}
