//! Image files queued for upload with a new task.

use std::fs;
use std::io;
use std::path::Path;

/// An image file queued for upload with a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the multipart part.
    pub filename: String,
    /// MIME type sent with the multipart part.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Wrap in-memory image data.
    #[must_use]
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the content type from its extension.
    ///
    /// # Errors
    /// Returns an I/O error when the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Ok(Self::from_parts(path, bytes))
    }

    /// Like [`ImageUpload::from_path`], but refuse files larger than
    /// `max_bytes` before reading them.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::FileTooLarge`] for an oversized file, or the
    /// underlying I/O error when the file cannot be read.
    pub fn from_path_within(path: impl AsRef<Path>, max_bytes: u64) -> io::Result<Self> {
        let path = path.as_ref();
        let size = fs::metadata(path)?.len();
        if size > max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::FileTooLarge,
                format!(
                    "{} is {size} bytes; the limit is {max_bytes} bytes",
                    file_name(path)
                ),
            ));
        }
        let bytes = fs::read(path)?;
        Ok(Self::from_parts(path, bytes))
    }

    fn from_parts(path: &Path, bytes: Vec<u8>) -> Self {
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();
        Self {
            filename: file_name(path),
            content_type,
            bytes,
        }
    }

    /// Size of the image in bytes.
    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| "image".to_owned(), |name| name.to_string_lossy().into_owned())
}
