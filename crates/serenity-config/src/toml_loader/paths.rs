//! Config path resolution and first-run file creation.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serenity_common::ConfigError;
use tracing::{debug, info};

use super::template::default_config_toml;

const APP_DIR: &str = "serenity";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/serenity/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| config_path_in(&base))
        .ok_or(ConfigError::NoConfigDir)
}

fn config_path_in(base: &Path) -> PathBuf {
    base.join(APP_DIR).join(CONFIG_FILE)
}

/// Write the documented default config to `path`.
///
/// An existing file is never overwritten; if one appears between the
/// caller's lookup and this write, it is left as is.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |target: &Path, source| ConfigError::Write {
        path: target.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("config already present at {}, keeping it", path.display());
            return Ok(());
        }
        Err(e) => return Err(write_err(path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| write_err(path, e))?;

    info!("created default config at {}", path.display());
    Ok(())
}
