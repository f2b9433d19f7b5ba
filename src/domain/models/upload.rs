#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;

use std::fs;
use std::path;

use anyhow::Result;
use strum::EnumIter;
use strum::IntoEnumIterator;

/// Largest image accepted for upload, 16 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum ImageMime {
    Png,
    Jpg,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => return "image/png",
            ImageMime::Jpg => return "image/jpg",
            ImageMime::Jpeg => return "image/jpeg",
            ImageMime::Gif => return "image/gif",
            ImageMime::Bmp => return "image/bmp",
        }
    }

    pub fn parse(mime: &str) -> Option<ImageMime> {
        return ImageMime::iter().find(|e| return e.as_str() == mime);
    }
}

/// Guesses a MIME type from a file extension. Unknown extensions map to
/// `application/octet-stream`, which `ImageMime::parse` then rejects.
pub fn mime_from_path(path: &path::Path) -> String {
    return mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadRejection {
    UnsupportedType(String),
    TooLarge(u64),
}

impl UploadRejection {
    pub fn message(&self) -> String {
        match self {
            UploadRejection::UnsupportedType(_) => {
                return "❌ Please upload a valid medical image file (PNG, JPG, JPEG, GIF, or BMP)"
                    .to_string();
            }
            UploadRejection::TooLarge(_) => {
                return "❌ File size too large. Please upload a medical image smaller than 16MB"
                    .to_string();
            }
        }
    }
}

/// A file picked for upload, with the metadata needed to validate it before
/// any bytes are read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub path: path::PathBuf,
    pub file_name: String,
    pub mime: String,
    pub size: u64,
}

impl UploadFile {
    pub fn new(path: path::PathBuf, mime: &str, size: u64) -> UploadFile {
        let file_name = path
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return "upload".to_string());

        return UploadFile {
            path,
            file_name,
            mime: mime.to_string(),
            size,
        };
    }

    pub fn inspect(path: &path::Path) -> Result<UploadFile> {
        let metadata = fs::metadata(path)?;
        return Ok(UploadFile::new(
            path.to_path_buf(),
            &mime_from_path(path),
            metadata.len(),
        ));
    }

    /// Type is checked before size.
    pub fn validate(&self) -> Result<ImageMime, UploadRejection> {
        let mime = match ImageMime::parse(&self.mime) {
            Some(mime) => mime,
            None => return Err(UploadRejection::UnsupportedType(self.mime.to_string())),
        };

        if self.size > MAX_UPLOAD_BYTES {
            return Err(UploadRejection::TooLarge(self.size));
        }

        return Ok(mime);
    }
}
