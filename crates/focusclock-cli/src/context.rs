use std::path::PathBuf;

use focusclock_core::error::Result;
use focusclock_core::storage::{self, KeyValueStore};
use focusclock_core::{AppConfig, Database, Notifier, NullStore, Session};

const DB_FILE: &str = "focusclock.db";

/// Global options shared by every command.
pub struct Context {
    data_dir: Option<PathBuf>,
    no_persist: bool,
    config: AppConfig,
    /// Problem hit while loading the config, before logging was set up.
    startup_warning: Option<String>,
}

impl Context {
    pub fn new(data_dir: Option<PathBuf>, no_persist: bool) -> Self {
        let mut ctx = Self {
            data_dir,
            no_persist,
            config: AppConfig::default(),
            startup_warning: None,
        };
        if !no_persist {
            match ctx.data_dir() {
                Ok(dir) => match AppConfig::load_from(&dir) {
                    Ok(config) => ctx.config = config,
                    Err(e) => {
                        ctx.startup_warning = Some(format!("{e}; using default configuration"))
                    }
                },
                Err(e) => {
                    ctx.startup_warning = Some(format!(
                        "cannot use data directory: {e}; using default configuration"
                    ))
                }
            }
        }
        ctx
    }

    /// Log whatever went wrong in [`Context::new`]. Call once tracing is up.
    pub fn report_startup(&self) {
        if let Some(warning) = &self.startup_warning {
            tracing::warn!("{warning}");
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// `--data-dir` if given, otherwise `~/.config/focusclock`. Created on demand.
    pub fn data_dir(&self) -> std::io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Ok(dir.clone())
            }
            None => storage::data_dir(),
        }
    }

    fn open_store(&self) -> Result<Box<dyn KeyValueStore>> {
        if self.no_persist {
            return Ok(Box::new(NullStore));
        }
        let dir = self.data_dir()?;
        let db = Database::open_at(&dir.join(DB_FILE))?;
        Ok(Box::new(db))
    }

    /// Open the session. A store that cannot be opened degrades to
    /// in-memory operation.
    pub fn open_session(&self, notifier: Box<dyn Notifier>) -> Session<Box<dyn KeyValueStore>> {
        let store = match self.open_store() {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("{e}; continuing without persistence");
                Box::new(NullStore)
            }
        };
        Session::open(store, notifier)
    }
}
