use crate::error::PickerError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Activity result code reported when the started activity succeeded
pub const RESULT_OK: i32 = -1;
/// Activity result code reported when the user backed out
pub const RESULT_CANCELED: i32 = 0;

/// Grant result for a permission that was granted
pub const PERMISSION_GRANTED: i32 = 0;
/// Grant result for a permission that was denied
pub const PERMISSION_DENIED: i32 = -1;

/// `DialogInterface.BUTTON_POSITIVE`
pub const BUTTON_POSITIVE: i32 = -1;
/// `DialogInterface.BUTTON_NEUTRAL`
pub const BUTTON_NEUTRAL: i32 = -3;

/// MIME filter used for the gallery intent
pub const IMAGE_MIME_TYPE: &str = "image/*";

/// Location of a picked or captured image, as handed out by the OS.
///
/// This is an opaque URI string (`content://...` for gallery items,
/// `file://...` for capture locations). The picker never reads the image
/// behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageLocation(String);

impl ImageLocation {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Builds a percent-encoded `file://` location for an absolute path
    pub fn from_path(path: &Path) -> Result<Self, PickerError> {
        let url = url::Url::from_file_path(path).map_err(|_| {
            PickerError::Other(format!("not an absolute path: {}", path.display()))
        })?;
        Ok(Self(url.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the decoded filesystem path for `file://` locations
    pub fn to_file_path(&self) -> Option<PathBuf> {
        let url = url::Url::parse(&self.0).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }
}

impl std::fmt::Display for ImageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Final outcome of a pick flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user picked an existing image or took a new photo
    Selected(ImageLocation),
    /// No image was produced, for whatever reason
    Cancelled,
}

impl PickOutcome {
    pub fn is_selected(&self) -> bool {
        matches!(self, PickOutcome::Selected(_))
    }

    pub fn location(&self) -> Option<&ImageLocation> {
        match self {
            PickOutcome::Selected(location) => Some(location),
            PickOutcome::Cancelled => None,
        }
    }
}

/// Name of an Android runtime permission
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub const CAMERA: &'static str = "android.permission.CAMERA";
    pub const WRITE_EXTERNAL_STORAGE: &'static str = "android.permission.WRITE_EXTERNAL_STORAGE";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn camera() -> Self {
        Self::new(Self::CAMERA)
    }

    pub fn write_external_storage() -> Self {
        Self::new(Self::WRITE_EXTERNAL_STORAGE)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of a delivered activity result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultData {
    /// Location returned by the gallery (the intent's data URI)
    pub data: Option<ImageLocation>,
}

impl ResultData {
    pub fn with_data(location: ImageLocation) -> Self {
        Self {
            data: Some(location),
        }
    }
}

/// Intent asking the camera app to write a new photo to `output`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureIntent {
    pub output: ImageLocation,
}

/// Description of the activity the host should start for a pick request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickIntent {
    /// Plain gallery selection (`ACTION_PICK` filtered to images)
    Gallery { mime_type: String },
    /// Chooser offering gallery selection plus a camera capture
    Chooser {
        title: String,
        mime_type: String,
        capture: CaptureIntent,
    },
}

impl PickIntent {
    pub fn capture_location(&self) -> Option<&ImageLocation> {
        match self {
            PickIntent::Gallery { .. } => None,
            PickIntent::Chooser { capture, .. } => Some(&capture.output),
        }
    }
}

/// Button the user pressed in the permission rationale dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationaleChoice {
    /// Carry on without the camera permissions
    Continue,
    /// Show the system permission prompt again
    TryAgain,
    /// Dialog closed without choosing
    Dismissed,
}

impl RationaleChoice {
    /// Maps an Android `DialogInterface` button constant to a choice
    pub fn from_dialog_button(which: i32) -> Self {
        match which {
            BUTTON_POSITIVE => RationaleChoice::Continue,
            BUTTON_NEUTRAL => RationaleChoice::TryAgain,
            _ => RationaleChoice::Dismissed,
        }
    }
}

/// Texts shown in the permission rationale dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationaleText {
    pub title: String,
    pub message: String,
    pub continue_label: String,
    pub try_again_label: String,
}

impl Default for RationaleText {
    fn default() -> Self {
        Self {
            title: "Camera permission required".to_string(),
            message: "Without the camera permission you can only choose an existing picture."
                .to_string(),
            continue_label: "Continue".to_string(),
            try_again_label: "Try again".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_path() {
        let location = ImageLocation::from_path(Path::new("/sdcard/DCIM/a.jpg")).unwrap();
        assert_eq!(location.as_str(), "file:///sdcard/DCIM/a.jpg");
        assert_eq!(
            location.to_file_path(),
            Some(PathBuf::from("/sdcard/DCIM/a.jpg"))
        );
    }

    #[test]
    fn test_location_encodes_reserved_characters() {
        let path = Path::new("/sdcard/My Pics#1/a b?.jpg");
        let location = ImageLocation::from_path(path).unwrap();

        assert!(!location.as_str().contains('#'));
        assert!(!location.as_str().contains('?'));
        assert!(!location.as_str().contains(' '));
        assert_eq!(location.to_file_path(), Some(path.to_path_buf()));
    }

    #[test]
    fn test_encoded_file_location_is_decoded() {
        let location = ImageLocation::new("file:///sdcard/My%20Pics/a.jpg");
        assert_eq!(
            location.to_file_path(),
            Some(PathBuf::from("/sdcard/My Pics/a.jpg"))
        );
    }

    #[test]
    fn test_relative_path_is_rejected() {
        assert!(ImageLocation::from_path(Path::new("captures/a.jpg")).is_err());
    }

    #[test]
    fn test_content_location_has_no_path() {
        let location = ImageLocation::new("content://media/external/images/media/42");
        assert_eq!(location.to_file_path(), None);
    }

    #[test]
    fn test_outcome_accessors() {
        let selected = PickOutcome::Selected(ImageLocation::new("content://x"));
        assert!(selected.is_selected());
        assert_eq!(selected.location().map(|l| l.as_str()), Some("content://x"));
        assert!(!PickOutcome::Cancelled.is_selected());
        assert!(PickOutcome::Cancelled.location().is_none());
    }

    #[test]
    fn test_dialog_buttons() {
        assert_eq!(
            RationaleChoice::from_dialog_button(BUTTON_POSITIVE),
            RationaleChoice::Continue
        );
        assert_eq!(
            RationaleChoice::from_dialog_button(BUTTON_NEUTRAL),
            RationaleChoice::TryAgain
        );
        // BUTTON_NEGATIVE
        assert_eq!(
            RationaleChoice::from_dialog_button(-2),
            RationaleChoice::Dismissed
        );
    }

    #[test]
    fn test_chooser_capture_location() {
        let gallery = PickIntent::Gallery {
            mime_type: IMAGE_MIME_TYPE.to_string(),
        };
        assert!(gallery.capture_location().is_none());

        let chooser = PickIntent::Chooser {
            title: "Pick".to_string(),
            mime_type: IMAGE_MIME_TYPE.to_string(),
            capture: CaptureIntent {
                output: ImageLocation::new("file:///tmp/x.jpg"),
            },
        };
        assert_eq!(
            chooser.capture_location().map(|l| l.as_str()),
            Some("file:///tmp/x.jpg")
        );
    }
}
