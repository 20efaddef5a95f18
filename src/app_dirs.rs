//! Where matsel keeps its files on disk.
//!
//! Config and logs share one `.matsel` folder under the OS config directory.
//! `MATSEL_CONFIG_HOME` replaces the OS directory for portable setups and
//! integration tests.

use std::path::PathBuf;
use std::sync::Mutex;

use directories::BaseDirs;

/// Folder created under the config base directory.
pub const APP_DIR_NAME: &str = ".matsel";
/// Environment variable that replaces the OS config directory.
pub const CONFIG_HOME_ENV: &str = "MATSEL_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

/// Base directory pinned by unit tests; wins over the environment.
static PINNED_BASE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Failure to locate or create a matsel directory.
#[derive(Debug, thiserror::Error)]
pub enum AppDirError {
    /// Neither `MATSEL_CONFIG_HOME` nor the OS provided a base directory.
    #[error("No config directory available; set MATSEL_CONFIG_HOME")]
    NoBaseDir,
    /// The directory could not be created.
    #[error("Failed to create {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

/// The `.matsel` folder, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(base_dir()?.join(APP_DIR_NAME))
}

/// The `.matsel/logs` folder, created on first use.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}

fn base_dir() -> Result<PathBuf, AppDirError> {
    let pinned = PINNED_BASE.lock().ok().and_then(|slot| slot.clone());
    pinned
        .or_else(|| {
            std::env::var_os(CONFIG_HOME_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
        .ok_or(AppDirError::NoBaseDir)
}
