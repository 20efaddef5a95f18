use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_HOME_VAR: &str = "MATSEL_CONFIG_HOME";
const API_BASE_VAR: &str = "MATSEL_API_BASE";

/// Sets the matsel environment variables for one test, restoring them on drop.
pub struct MatselEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl MatselEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        Self::set(path, None)
    }

    pub fn set(config_home: PathBuf, api_base: Option<&str>) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous = vec![
            (CONFIG_HOME_VAR, std::env::var(CONFIG_HOME_VAR).ok()),
            (API_BASE_VAR, std::env::var(API_BASE_VAR).ok()),
        ];
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_VAR, config_home);
            match api_base {
                Some(value) => std::env::set_var(API_BASE_VAR, value),
                None => std::env::remove_var(API_BASE_VAR),
            }
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for MatselEnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.previous.drain(..) {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(name, value),
                    None => std::env::remove_var(name),
                }
            }
        }
    }
}
