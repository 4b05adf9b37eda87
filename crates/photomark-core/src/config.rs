//! Application configuration, loaded from a `photomark.toml` file.
//!
//! Every field has a default, so an empty or partial file is valid. A
//! missing file yields [`Config::default`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::PHOTO_JPEG_QUALITY;
use crate::store::DEFAULT_MIN_PASSWORD_LEN;

pub const CONFIG_FILE: &str = "photomark.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the user store, photo files and photo metadata.
    pub data_dir: PathBuf,
    /// JPEG quality for saved photos (1-100).
    pub jpeg_quality: u8,
    /// Minimum password length accepted at registration.
    pub min_password_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("photomark-data"),
            jpeg_quality: PHOTO_JPEG_QUALITY,
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

impl Config {
    /// Config with defaults and the given data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

/// Load the config at `path`, falling back to defaults if it does not exist.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = toml::to_string_pretty(config)?;
    fs::write(path, text).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from_path(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.min_password_len, 6);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "jpeg_quality = 75\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.data_dir, Config::default().data_dir);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "jpeg_quality = = 3").unwrap();

        assert!(matches!(load_from_path(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            data_dir: PathBuf::from("/var/lib/photomark"),
            jpeg_quality: 80,
            min_password_len: 8,
        };

        save_to_path(&config, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), config);
    }
}
