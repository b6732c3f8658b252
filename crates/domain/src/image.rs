//! Image — an opaque camera frame.
//!
//! The core never looks at the pixel data; frames are only handed over to an
//! image classifier.

use crate::id::ImageId;

/// A captured camera frame.
#[derive(Debug, Clone)]
pub struct Image {
    id: ImageId,
    bytes: Vec<u8>,
}

impl Image {
    /// Wrap raw encoded bytes into a new frame with a fresh id.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            id: ImageId::new(),
            bytes,
        }
    }

    #[must_use]
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Raw encoded bytes, for classifiers.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
