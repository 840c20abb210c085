//! Utilities for reading and writing RON files and watching directories
//! for changes.
//!
//! Settings and the save file are both plain RON on disk. The watcher is a
//! small filesystem listener that flips a shared boolean when a watched
//! file is modified, used for hot-reloading settings during development.

use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Resource)]
/// File-watcher resource for RON hot-reload.
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Shared boolean set to `true` when watched files change.
    _watcher: Option<notify::RecommendedWatcher>, // watcher handle kept to prevent immediate drop.
}

impl RonWatcher {
    /// Create a `RonWatcher` with no active OS watcher. Useful as a
    /// fallback when watcher creation fails (read-only filesystems,
    /// platforms without notify support).
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }
}

/// Load all `.ron` files from a directory and deserialize them into `T`.
///
/// Files that fail to parse are skipped with a warning on stderr; a missing
/// directory yields an empty `Vec`.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let mut items = Vec::new();

    if let Ok(entries) = std::fs::read_dir(path) {
        for entry in entries.flatten() {
            if let Ok(metadata) = entry.metadata()
                && metadata.is_file()
                && let Some(ext) = entry.path().extension()
                && ext == "ron"
                && let Ok(content) = std::fs::read_to_string(entry.path())
            {
                match ron::from_str::<T>(&content) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        eprintln!("Failed to parse {}: {e:?}", entry.path().display());
                    }
                }
            }
        }
    }

    items
}

/// Load a single RON file, returning `None` when the file is absent or
/// fails to parse (parse failures are reported to stderr).
#[must_use]
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = std::fs::read_to_string(path).ok()?;
    match ron::from_str::<T>(&content) {
        Ok(item) => Some(item),
        Err(e) => {
            eprintln!("Failed to parse {}: {e:?}", path.display());
            None
        }
    }
}

/// Serialize `value` as pretty RON and write it to `path`, creating parent
/// directories as needed.
///
/// # Errors
/// Returns an `io::Error` if serialization fails or the file cannot be
/// written.
pub fn save_ron_file<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    let s = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| std::io::Error::other(format!("RON serialize failed: {e:?}")))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, s)
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// The returned watcher's `changed` flag is set to `true` whenever a file
/// under the watched directory is modified.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or registered for `path`.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Canonicalize so events can be filtered to the watched directory.
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, notify::EventKind::Modify(_)) {
                    let relevant = event.paths.iter().any(|p| {
                        std::fs::canonicalize(p)
                            .unwrap_or_else(|_| p.clone())
                            .starts_with(&watched_path)
                    });
                    if relevant {
                        *changed_clone.lock().unwrap() = true;
                    }
                }
            }
            Err(e) => eprintln!("Watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher {
        changed,
        _watcher: Some(watcher),
    })
}
