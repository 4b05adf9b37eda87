//! Saved photos and their metadata.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{Local, TimeZone, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{read_optional, write_json, StoreError};
use crate::decode::{decode_image, DecodedImage};
use crate::encode::{encode_image, PHOTO_JPEG_QUALITY};
use crate::filter::PhotoFilter;
use crate::location::Coordinate;

/// Directory holding the JPEG files, relative to the store root.
pub const PHOTOS_DIR: &str = "photos";

/// Metadata file, relative to the store root.
pub const METADATA_FILE: &str = "photos_metadata.json";

/// Metadata for one saved photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub file_path: PathBuf,
    #[serde(default)]
    pub filter_applied: PhotoFilter,
}

impl Photo {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Capture time as `dd/MM/yyyy HH:mm` in local time.
    pub fn formatted_date(&self) -> String {
        self.format_date(&Local)
    }

    /// Capture time as `dd/MM/yyyy HH:mm` in the given time zone.
    pub fn format_date<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        tz.timestamp_millis_opt(self.timestamp)
            .single()
            .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default()
    }

    /// Decode the stored JPEG.
    pub fn load_image(&self) -> Result<DecodedImage, StoreError> {
        let bytes = fs::read(&self.file_path).map_err(StoreError::io(&self.file_path))?;
        Ok(decode_image(&bytes)?)
    }
}

/// Photo files plus a JSON metadata list, rooted in one directory.
#[derive(Debug)]
pub struct PhotoRepository {
    photos_dir: PathBuf,
    metadata_file: PathBuf,
    jpeg_quality: u8,
    lock: Mutex<()>,
}

impl PhotoRepository {
    /// Open the store under `root`, creating the photo directory and an empty
    /// metadata list if they do not exist yet.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();
        let photos_dir = root.join(PHOTOS_DIR);
        let metadata_file = root.join(METADATA_FILE);

        fs::create_dir_all(&photos_dir).map_err(StoreError::io(&photos_dir))?;
        if !metadata_file.exists() {
            write_json(&metadata_file, &Vec::<Photo>::new())?;
        }

        Ok(Self {
            photos_dir,
            metadata_file,
            jpeg_quality: PHOTO_JPEG_QUALITY,
            lock: Mutex::new(()),
        })
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    pub fn photos_dir(&self) -> &Path {
        &self.photos_dir
    }

    /// Encode `image` to JPEG, store it, and record its metadata.
    ///
    /// Fails without touching the metadata if the existing list cannot be
    /// read. Entries that do not parse as photos are written back unchanged.
    pub fn save_photo(
        &self,
        image: &DecodedImage,
        username: &str,
        email: &str,
        location: Coordinate,
        filter: PhotoFilter,
    ) -> Result<Photo, StoreError> {
        let jpeg = encode_image(image, self.jpeg_quality)?;

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load_entries()?;

        // Ids are timestamps, so keep them strictly increasing
        let latest = entries
            .iter()
            .filter_map(|entry| entry.get("timestamp").and_then(Value::as_i64))
            .max()
            .unwrap_or(i64::MIN);
        let mut timestamp = Utc::now().timestamp_millis().max(latest.saturating_add(1));
        let mut file_path = self.file_for(username, timestamp);
        while file_path.exists() {
            timestamp += 1;
            file_path = self.file_for(username, timestamp);
        }

        let photo = Photo {
            id: timestamp.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            timestamp,
            file_path,
            filter_applied: filter,
        };
        let entry = serde_json::to_value(&photo).map_err(StoreError::json(&self.metadata_file))?;
        entries.push(entry);

        fs::write(&photo.file_path, jpeg).map_err(StoreError::io(&photo.file_path))?;
        if let Err(e) = write_json(&self.metadata_file, &entries) {
            if let Err(cleanup) = fs::remove_file(&photo.file_path) {
                warn!("Could not remove {}: {cleanup}", photo.file_path.display());
            }
            return Err(e);
        }

        info!("Saved photo {} for {username} ({filter})", photo.id);
        Ok(photo)
    }

    /// All photos, newest first.
    ///
    /// Entries that fail to parse are skipped; an unreadable metadata file
    /// yields an empty list.
    pub fn photos(&self) -> Vec<Photo> {
        let mut photos = self.read_all();
        photos.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        photos
    }

    /// Photos owned by `username`, newest first.
    pub fn photos_by_user(&self, username: &str) -> Vec<Photo> {
        self.photos()
            .into_iter()
            .filter(|p| p.username == username)
            .collect()
    }

    /// Remove the photo file and its metadata entry.
    pub fn delete_photo(&self, photo: &Photo) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.load_entries()?;

        match fs::remove_file(&photo.file_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Photo file {} already gone", photo.file_path.display());
            }
            Err(e) => return Err(StoreError::io(&photo.file_path)(e)),
        }

        entries.retain(|entry| entry.get("id").and_then(Value::as_str) != Some(photo.id.as_str()));
        write_json(&self.metadata_file, &entries)?;

        info!("Deleted photo {}", photo.id);
        Ok(())
    }

    fn file_for(&self, username: &str, timestamp: i64) -> PathBuf {
        self.photos_dir.join(format!("photo_{username}_{timestamp}.jpg"))
    }

    /// The raw metadata list. A missing file is empty; anything unreadable is
    /// an error.
    fn load_entries(&self) -> Result<Vec<Value>, StoreError> {
        match read_optional(&self.metadata_file)? {
            Some(text) => {
                serde_json::from_str(&text).map_err(StoreError::json(&self.metadata_file))
            }
            None => Ok(Vec::new()),
        }
    }

    fn read_all(&self) -> Vec<Photo> {
        let entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable photo metadata: {e}");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(photo) => Some(photo),
                Err(e) => {
                    warn!("Skipping malformed photo entry: {e}");
                    None
                }
            })
            .collect()
    }
}
