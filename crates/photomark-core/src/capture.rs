//! The capture workflow: sign in, pick a photo, preview filters, save.
//!
//! A photo can only be saved when its EXIF carries a usable location.

use log::{info, warn};
use thiserror::Error;

use crate::config::Config;
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::filter::{apply_filter, PhotoFilter};
use crate::location::{read_location, LocationReading};
use crate::store::{
    AuthError, Photo, PhotoRepository, StoreError, User, UserRepository, USERS_FILE,
};

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Could not read the GPS location of this photo")]
    NoLocation,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// A decoded photo together with the location found in its EXIF.
#[derive(Debug, Clone)]
pub struct Selection {
    pub image: DecodedImage,
    pub location: LocationReading,
}

/// User and photo stores sharing one data directory.
#[derive(Debug)]
pub struct Studio {
    users: UserRepository,
    photos: PhotoRepository,
}

impl Studio {
    pub fn open(config: &Config) -> Result<Self, CaptureError> {
        let photos =
            PhotoRepository::open(&config.data_dir)?.with_jpeg_quality(config.jpeg_quality);
        let users = UserRepository::open(config.data_dir.join(USERS_FILE))
            .with_min_password_len(config.min_password_len);

        info!("Opened data directory {}", config.data_dir.display());
        Ok(Self { users, photos })
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn photos(&self) -> &PhotoRepository {
        &self.photos
    }

    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<(), CaptureError> {
        Ok(self.users.register(username, email, password)?)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User, CaptureError> {
        Ok(self.users.login(username, password)?)
    }

    /// Decode a picked photo and read its location.
    pub fn inspect(&self, bytes: &[u8]) -> Result<Selection, CaptureError> {
        let image = decode_image(bytes)?;
        let location = read_location(bytes);
        if !location.is_present() {
            warn!("Selected photo has no usable location: {location:?}");
        }
        Ok(Selection { image, location })
    }

    pub fn preview(&self, selection: &Selection, filter: PhotoFilter) -> DecodedImage {
        apply_filter(&selection.image, filter)
    }

    /// Apply `filter` and store the result for `user`.
    pub fn save(
        &self,
        user: &User,
        selection: &Selection,
        filter: PhotoFilter,
    ) -> Result<Photo, CaptureError> {
        let Some(location) = selection.location.coordinate() else {
            return Err(CaptureError::NoLocation);
        };

        let filtered = apply_filter(&selection.image, filter);
        let photo = self
            .photos
            .save_photo(&filtered, &user.username, &user.email, location, filter)?;
        Ok(photo)
    }

    /// The user's photos, newest first.
    pub fn gallery(&self, user: &User) -> Vec<Photo> {
        self.photos.photos_by_user(&user.username)
    }

    pub fn delete(&self, photo: &Photo) -> Result<(), CaptureError> {
        Ok(self.photos.delete_photo(photo)?)
    }
}
