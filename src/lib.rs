pub mod db;
pub mod error;
pub mod models;
pub mod settings;
pub mod spinner;
pub mod utils;
pub mod wheel;
pub mod wheels;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, Context, Result};
use db::Database;
use models::WheelCollection;
use settings::{SettingsStore, SpinSettings};
use spinner::SpinController;
use tokio::sync::Mutex;

pub use error::WheelError;

pub struct AppState {
    pub db: Database,
    pub wheels: Arc<Mutex<WheelCollection>>,
    pub spinner: SpinController,
    pub settings: Arc<SettingsStore>,
}

impl AppState {
    /// Opens the store under `data_dir` and loads every saved wheel.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let database = Database::new(data_dir.join("spins.sqlite3"))?;
        let settings = Arc::new(SettingsStore::new(data_dir.join("settings.json"))?);

        let saved = database.load_wheels().await?;
        log::info!("Opened {} saved wheels", saved.len());
        let wheels = Arc::new(Mutex::new(WheelCollection::new(saved)));

        let spinner = SpinController::new(wheels.clone(), database.clone(), settings.clone());

        Ok(Self {
            db: database,
            wheels,
            spinner,
            settings,
        })
    }
}

/// Initialize logging (reads RUST_LOG env var)
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Per-user data directory, e.g. `~/.local/share/spins` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("com", "dangial", "spins")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("could not determine a home directory"))
}

pub fn get_spin_settings(state: &AppState) -> Result<SpinSettings, String> {
    Ok(state.settings.spin())
}

pub fn set_spin_settings(state: &AppState, settings: SpinSettings) -> Result<(), String> {
    state
        .settings
        .update_spin(settings)
        .map_err(|e| e.to_string())
}
