//! Limits applied to images before a create request is sent.

use serde::Deserialize;
use taskboard_client::ImageUpload;

const MIB: u64 = 1024 * 1024;

/// Upload limits, read from the `[upload]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Images allowed per task.
    pub max_images: usize,
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
    /// Accepted MIME types.
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_images: 3,
            max_file_size: 5 * MIB,
            allowed_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Why a set of images was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// More images than the policy allows.
    #[error("at most {max} images can be attached ({given} given)")]
    TooMany {
        /// Policy limit.
        max: usize,
        /// Images offered.
        given: usize,
    },
    /// A file exceeds the size limit.
    #[error("{filename} is {size} bytes; the limit is {max} bytes")]
    TooLarge {
        /// Offending file.
        filename: String,
        /// Its size.
        size: u64,
        /// Policy limit.
        max: u64,
    },
    /// A file's MIME type is not accepted.
    #[error("{filename} has unsupported type {content_type}")]
    UnsupportedType {
        /// Offending file.
        filename: String,
        /// Its MIME type.
        content_type: String,
    },
}

impl UploadPolicy {
    /// True when `content_type` is in the accepted list.
    #[must_use]
    pub fn allows_type(&self, content_type: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
    }

    /// Check count, then each file's type and size in order.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check(&self, images: &[ImageUpload]) -> Result<(), UploadError> {
        if images.len() > self.max_images {
            return Err(UploadError::TooMany {
                max: self.max_images,
                given: images.len(),
            });
        }
        for image in images {
            if !self.allows_type(&image.content_type) {
                return Err(UploadError::UnsupportedType {
                    filename: image.filename.clone(),
                    content_type: image.content_type.clone(),
                });
            }
            if image.byte_size() > self.max_file_size {
                return Err(UploadError::TooLarge {
                    filename: image.filename.clone(),
                    size: image.byte_size(),
                    max: self.max_file_size,
                });
            }
        }
        Ok(())
    }
}
