//! Avatar file picker.
//!
//! The dialog talks to an [`AvatarPicker`] so tests can inject files without
//! a system dialog.
//!
//! # Platform Support
//!
//! - **Native (Windows, macOS, Linux)**: `rfd` native dialog filtered to images.
//! - **Web (WASM)**: Not supported (stub implementation).

use portal_business::AvatarFile;

/// Extensions offered by the native dialog: every extension `mime_guess`
/// maps to an `image/*` type.
pub fn image_extensions() -> &'static [&'static str] {
    mime_guess::get_mime_extensions_str("image/*").unwrap_or(&["png", "jpg", "jpeg"])
}

pub trait AvatarPicker {
    /// Asks the operator for avatar files. An empty result means the dialog
    /// was dismissed.
    fn pick_avatars(&self) -> Vec<AvatarFile>;
}

/// Picker backed by the system file dialog.
#[derive(Debug, Default)]
pub struct SystemAvatarPicker;

#[cfg(not(target_arch = "wasm32"))]
impl AvatarPicker for SystemAvatarPicker {
    fn pick_avatars(&self) -> Vec<AvatarFile> {
        use rfd::FileDialog;

        let Some(paths) = FileDialog::new()
            .add_filter("Image", image_extensions())
            .set_title("Select an avatar")
            .pick_files()
        else {
            log::debug!("Avatar picker dismissed");
            return Vec::new();
        };

        log::info!("User selected {} avatar file(s)", paths.len());
        load_first_avatar(&paths)
    }
}

#[cfg(target_arch = "wasm32")]
impl AvatarPicker for SystemAvatarPicker {
    fn pick_avatars(&self) -> Vec<AvatarFile> {
        // File picker not supported on WASM
        Vec::new()
    }
}

/// Reads only the first path of a selection. If it cannot be read the
/// selection is empty; later paths never stand in for it.
#[cfg(not(target_arch = "wasm32"))]
fn load_first_avatar(paths: &[std::path::PathBuf]) -> Vec<AvatarFile> {
    let Some(path) = paths.first() else {
        return Vec::new();
    };

    match AvatarFile::from_path(path) {
        Ok(file) => vec![file],
        Err(e) => {
            log::warn!("Failed to read avatar {:?}: {}", path, e);
            Vec::new()
        }
    }
}
