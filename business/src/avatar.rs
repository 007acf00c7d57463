//! Avatar image attached to a new user.

use std::path::Path;

/// An in-memory file selected as the user's avatar.
#[derive(Clone, PartialEq, Eq)]
pub struct AvatarFile {
    /// File name reported to the server (no directory components).
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads `path` and guesses the MIME type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "avatar".to_owned());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();

        log::debug!(
            "Loaded avatar {file_name} ({mime_type}, {} bytes)",
            bytes.len()
        );

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Whether the MIME type is in the `image/*` family.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

// File contents are left out so logs stay readable.
impl std::fmt::Debug for AvatarFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvatarFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
