//! Flat-file JSON stores for users and saved photos.
//!
//! Each store is a single JSON array rewritten in full on every mutation.
//! Mutations inside one process are serialized by a per-store mutex, and the
//! file is replaced through a temporary file plus rename so readers never see
//! a half-written array.

mod photos;
mod users;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

pub use photos::{Photo, PhotoRepository, METADATA_FILE, PHOTOS_DIR};
pub use users::{AuthError, User, UserRepository, DEFAULT_MIN_PASSWORD_LEN, USERS_FILE};

/// Error types for the flat-file stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed store file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode photo: {0}")]
    Encode(#[from] EncodeError),

    #[error("Failed to decode stored photo: {0}")]
    Decode(#[from] DecodeError),
}

impl StoreError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path) -> impl FnOnce(serde_json::Error) -> StoreError + '_ {
        move |source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Serialize `value` and atomically replace `path` with it.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(value).map_err(StoreError::json(path))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).map_err(StoreError::io(&tmp))?;
    fs::rename(&tmp, path).map_err(StoreError::io(path))
}

/// Read a whole file, treating a missing file as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path)(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_json_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.json");

        write_json(&path, &vec![1, 2, 3]).unwrap();
        write_json(&path, &vec![4]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[4]");
        assert!(!dir.path().join("list.json.tmp").exists());
    }

    #[test]
    fn test_read_optional_missing_file() {
        let dir = tempdir().unwrap();
        assert_eq!(read_optional(&dir.path().join("nope.json")).unwrap(), None);
    }

    #[test]
    fn test_io_error_mentions_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("list.json");
        let err = write_json(&path, &Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("list.json"));
    }
}
