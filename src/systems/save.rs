//! Snapshot persistence: the schema and the pluggable storage backends.
//!
//! The snapshot is the sole persistence boundary. It captures the goal,
//! difficulty range, bonus inventory, energy (with its partial regen timer
//! and a UTC timestamp for offline catch-up), audio settings, and every
//! occupied slot with its status counters. Reconstruction happens in
//! [`crate::GameSession::load`].

use crate::board::SlotIndex;
use crate::TilefuseResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One occupied slot in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSave {
    pub slot_index: SlotIndex,
    pub value: u64,
    pub transform: bool,
    pub freeze_turns: u32,
    pub burn_turns: u32,
}

/// Full persisted game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub goal_number: u64,
    pub goal_range: u64,
    pub double_merge: bool,
    pub mystery_tiles: u32,
    pub energy: u32,
    pub energy_regen_timer: f32,
    /// Unix seconds (UTC) at save time, for offline energy catch-up
    pub last_save_timestamp: i64,
    #[serde(default = "default_true")]
    pub music_enabled: bool,
    #[serde(default = "default_true")]
    pub sfx_enabled: bool,
    #[serde(default)]
    pub tiles: Vec<TileSave>,
}

fn default_true() -> bool {
    true
}

/// Storage backend for the snapshot.
///
/// Object-safe so the session can hold any backend behind a box; hosts
/// supply platform-appropriate stores (browser storage, platform prefs).
pub trait SnapshotStore {
    /// Persists a snapshot, replacing any previous one.
    fn write(&mut self, data: &SaveData) -> TilefuseResult<()>;

    /// Reads the stored snapshot, or `None` when nothing has been saved.
    fn read(&self) -> TilefuseResult<Option<SaveData>>;

    /// Deletes the stored snapshot, if any.
    fn clear(&mut self) -> TilefuseResult<()>;
}

/// In-memory store holding the serialized snapshot; the default for tests
/// and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    encoded: Option<String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn write(&mut self, data: &SaveData) -> TilefuseResult<()> {
        self.encoded = Some(serde_json::to_string(data)?);
        Ok(())
    }

    fn read(&self) -> TilefuseResult<Option<SaveData>> {
        match &self.encoded {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> TilefuseResult<()> {
        self.encoded = None;
        Ok(())
    }
}

/// File-backed store writing the snapshot as JSON.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn write(&mut self, data: &SaveData) -> TilefuseResult<()> {
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn read(&self) -> TilefuseResult<Option<SaveData>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn clear(&mut self) -> TilefuseResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> SaveData {
        SaveData {
            goal_number: 17,
            goal_range: 30,
            double_merge: true,
            mystery_tiles: 2,
            energy: 7,
            energy_regen_timer: 42.5,
            last_save_timestamp: 1_700_000_000,
            music_enabled: false,
            sfx_enabled: true,
            tiles: vec![TileSave {
                slot_index: 3,
                value: 9,
                transform: true,
                freeze_turns: 2,
                burn_turns: 0,
            }],
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemorySnapshotStore::new();
        assert!(store.read().unwrap().is_none());

        store.write(&sample_data()).unwrap();
        let loaded = store.read().unwrap().expect("snapshot present");
        assert_eq!(loaded, sample_data());

        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSnapshotStore::new(dir.path().join("save.json"));
        assert!(store.read().unwrap().is_none());

        store.write(&sample_data()).unwrap();
        let loaded = store.read().unwrap().expect("snapshot present");
        assert_eq!(loaded, sample_data());

        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_settings_default_when_missing() {
        // Older snapshots without audio settings default both to enabled.
        let json = r#"{
            "goal_number": 5,
            "goal_range": 20,
            "double_merge": false,
            "mystery_tiles": 0,
            "energy": 10,
            "energy_regen_timer": 0.0,
            "last_save_timestamp": 0
        }"#;
        let data: SaveData = serde_json::from_str(json).unwrap();
        assert!(data.music_enabled);
        assert!(data.sfx_enabled);
        assert!(data.tiles.is_empty());
    }
}
