//! Durable respawn checkpoint.
//!
//! The store is a typed repository over a flat float key-value file (the
//! save format keeps the four scalar keys of the original save data). The
//! file is RON on disk and is rewritten whole on every store, so no
//! transactional machinery is needed; a write failure is reported and the
//! in-memory record stays authoritative for the session.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

const KEY_X: &str = "CheckpointX";
const KEY_Y: &str = "CheckpointY";
const KEY_Z: &str = "CheckpointZ";
const KEY_ROT: &str = "CheckpointRot";

/// Last-stored respawn transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum CheckpointError {
    /// Load attempted before any station was visited. Non-fatal: respawn
    /// simply leaves the player in place.
    #[error("no checkpoint has been stored yet")]
    NoCheckpoint,
}

/// On-disk shape of the save file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SaveFile {
    floats: HashMap<String, f32>,
}

/// Checkpoint repository backed by a RON save file.
#[derive(Resource, Debug)]
pub struct CheckpointStore {
    path: PathBuf,
    save: SaveFile,
}

impl CheckpointStore {
    /// Open the store at `path`, reading back any record a previous run
    /// persisted. A missing or unparseable file starts empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let save = crate::ron::load_ron_file::<SaveFile>(&path).unwrap_or_default();
        Self { path, save }
    }

    /// Overwrite the stored checkpoint and flush it to disk.
    pub fn store(&mut self, position: Vec3, yaw_degrees: f32) {
        self.save.floats.insert(KEY_X.to_string(), position.x);
        self.save.floats.insert(KEY_Y.to_string(), position.y);
        self.save.floats.insert(KEY_Z.to_string(), position.z);
        self.save.floats.insert(KEY_ROT.to_string(), yaw_degrees);

        if let Err(e) = crate::ron::save_ron_file(&self.path, &self.save) {
            eprintln!("Failed to write save file {}: {e}", self.path.display());
        }
    }

    /// True iff a checkpoint has ever been stored (including by a
    /// previous run).
    #[must_use]
    pub fn has_checkpoint(&self) -> bool {
        self.save.floats.contains_key(KEY_X)
    }

    /// Last-stored checkpoint.
    ///
    /// # Errors
    /// `CheckpointError::NoCheckpoint` when nothing has been stored.
    pub fn load(&self) -> Result<Checkpoint, CheckpointError> {
        if !self.has_checkpoint() {
            return Err(CheckpointError::NoCheckpoint);
        }
        let get = |key| self.save.floats.get(key).copied().unwrap_or(0.0);
        Ok(Checkpoint {
            position: Vec3::new(get(KEY_X), get(KEY_Y), get(KEY_Z)),
            yaw_degrees: get(KEY_ROT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lowtide-{}-{name}.ron", std::process::id()))
    }

    #[test]
    fn empty_store_has_no_checkpoint() {
        let store = CheckpointStore::open(scratch_path("empty"));
        assert!(!store.has_checkpoint());
        assert_eq!(store.load(), Err(CheckpointError::NoCheckpoint));
    }

    #[test]
    fn store_then_load_round_trips() {
        let path = scratch_path("roundtrip");
        let mut store = CheckpointStore::open(&path);
        store.store(Vec3::new(0.0, 1.0, 0.0), 90.0);
        assert!(store.has_checkpoint());
        let cp = store.load().unwrap();
        assert_eq!(cp.position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(cp.yaw_degrees, 90.0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn checkpoint_survives_reopen() {
        let path = scratch_path("reopen");
        {
            let mut store = CheckpointStore::open(&path);
            store.store(Vec3::new(-4.5, 2.0, 12.25), 180.0);
        }
        let store = CheckpointStore::open(&path);
        let cp = store.load().unwrap();
        assert_eq!(cp.position, Vec3::new(-4.5, 2.0, 12.25));
        assert_eq!(cp.yaw_degrees, 180.0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn later_store_overwrites_earlier() {
        let path = scratch_path("overwrite");
        let mut store = CheckpointStore::open(&path);
        store.store(Vec3::ZERO, 0.0);
        store.store(Vec3::new(7.0, 1.0, -2.0), 45.0);
        let cp = store.load().unwrap();
        assert_eq!(cp.position, Vec3::new(7.0, 1.0, -2.0));
        assert_eq!(cp.yaw_degrees, 45.0);
        let _ = std::fs::remove_file(path);
    }
}
