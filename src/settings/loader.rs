//! Settings loading and hot-reloading.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If
//! multiple RON files are present, the first successfully parsed `Settings`
//! is used. If no RON files are found or none parse, defaults are used.
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use crate::settings::Settings;
use bevy::prelude::{Res, ResMut, Resource};

#[derive(Resource)]
pub struct SettingsWatcher(pub crate::ron::RonWatcher);

/// Load settings from `path` (directory). If multiple `.ron` files are
/// present the first parsed `Settings` will be used. If none exist the
/// `Default` is used.
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let items: Vec<Settings> = load_ron_files(path);
    if let Some(first) = items.into_iter().next() {
        first
    } else {
        Settings::defaults()
    }
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Returns a `notify::Error` if the underlying watcher cannot be created.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(SettingsWatcher)
}

/// Check for changes and reload the settings resource when files change.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    let mut flag = match watcher.0.changed.lock() {
        Ok(flag) => flag,
        Err(poisoned) => {
            eprintln!("warning: settings watcher mutex poisoned, recovering");
            poisoned.into_inner()
        }
    };
    if *flag {
        println!("Settings changed, reloading...");
        *settings = load_settings_from_dir("data/settings");
        *flag = false;
    }
}

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher(crate::ron::RonWatcher::stub())
    }
}
