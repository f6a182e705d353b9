use crate::model::ProfileImage;
use base64::Engine;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const MAX_PROFILE_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("Profile image is required")]
    Missing,
    #[error("Please select a valid image file")]
    NotAnImage,
    #[error("Image size must be less than 5MB")]
    TooLarge,
    #[error("Could not read '{path}': {reason}")]
    Unreadable { path: String, reason: String },
}

/// Service for profile image validation and preview generation
pub struct ImageService;

impl ImageService {
    /// Loads an image from disk. The size limit is checked from file metadata
    /// before any bytes are read.
    pub fn load_profile_image(path: &Path) -> Result<ProfileImage, ImageError> {
        let display = path.display().to_string();
        let unreadable = |e: std::io::Error| ImageError::Unreadable {
            path: display.clone(),
            reason: e.to_string(),
        };

        let metadata = fs::metadata(path).map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(ImageError::NotAnImage);
        }
        if metadata.len() > MAX_PROFILE_IMAGE_BYTES {
            return Err(ImageError::TooLarge);
        }
        let bytes = fs::read(path).map_err(unreadable)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());
        Self::from_bytes(file_name, &bytes)
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Result<ProfileImage, ImageError> {
        if bytes.len() as u64 > MAX_PROFILE_IMAGE_BYTES {
            return Err(ImageError::TooLarge);
        }
        let mime_type = Self::detect_mime(bytes).ok_or(ImageError::NotAnImage)?;
        let dimensions = Self::dimensions(bytes);
        let file_name = file_name.into();
        debug!("Loaded profile image {} ({}, {} bytes)", file_name, mime_type, bytes.len());

        Ok(ProfileImage {
            file_name,
            mime_type: mime_type.to_string(),
            size_bytes: bytes.len() as u64,
            dimensions,
            preview: Self::data_url(mime_type, bytes),
        })
    }

    /// Sniffs the content rather than trusting the file extension.
    fn detect_mime(data: &[u8]) -> Option<&'static str> {
        let format = image::guess_format(data).ok()?;
        let mime = format.to_mime_type();
        mime.starts_with("image/").then_some(mime)
    }

    fn dimensions(data: &[u8]) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }

    pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        format!("data:{};base64,{}", mime_type, b64)
    }
}
