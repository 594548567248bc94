//! Runtime configuration resolved from flags, environment and platform dirs.
//!
//! Precedence: command-line flag, then `LETSDO_*` variable, then default
//! under the platform's local data directory.

use crate::args::Args;
use crate::error::CliError;
use std::path::{Path, PathBuf};

pub const ENV_DB: &str = "LETSDO_DB";
pub const ENV_LOG_DIR: &str = "LETSDO_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "LETSDO_LOG_LEVEL";

const APP_DIR_NAME: &str = "letsdo";
const DB_FILE_NAME: &str = "letsdo.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageTarget {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub storage: StorageTarget,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl CliConfig {
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        Self::resolve(
            args,
            |key| std::env::var(key).ok(),
            dirs::data_local_dir().as_deref(),
        )
    }

    /// Resolution with injectable environment lookup and data dir.
    pub fn resolve<F>(args: &Args, env: F, data_dir: Option<&Path>) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_path = |key: &str| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        };
        let app_dir = data_dir.map(|dir| dir.join(APP_DIR_NAME));

        let storage = if args.memory {
            StorageTarget::Memory
        } else {
            let path = args
                .db
                .clone()
                .or_else(|| env_path(ENV_DB))
                .or_else(|| app_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME)))
                .ok_or_else(|| {
                    CliError::Config(format!(
                        "no local data directory found; pass --db or set {ENV_DB}"
                    ))
                })?;
            StorageTarget::File(path)
        };

        let log_dir = args
            .log_dir
            .clone()
            .or_else(|| env_path(ENV_LOG_DIR))
            .or_else(|| app_dir.as_ref().map(|dir| dir.join(LOG_DIR_NAME)))
            .map(|dir| absolutize(&dir))
            .transpose()?;

        let log_level = args
            .log_level
            .clone()
            .or_else(|| env(ENV_LOG_LEVEL))
            .unwrap_or_else(|| letsdo_core::default_log_level().to_string());

        Ok(Self {
            storage,
            log_dir,
            log_level,
        })
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, CliError> {
    std::path::absolute(path).map_err(|err| {
        CliError::Config(format!(
            "cannot resolve log directory `{}`: {err}",
            path.display()
        ))
    })
}
