use crate::error::PickerError;
use crate::models::{ImageLocation, Permission, PickIntent, RationaleText};
use crate::permissions::PermissionChecker;
use std::path::Path;

/// Platform side of the picker: the activity the helper is attached to.
///
/// Every method is called on the UI thread. Results come back later through
/// the forwarding hooks on [`crate::ImagePickerHelper`]; none of these calls
/// block on the user.
pub trait ActivityHost: PermissionChecker {
    /// SDK level of the running OS
    fn sdk_version(&self) -> u32;

    /// Asks the OS to prompt for `permissions`; the decision arrives through
    /// `on_request_permissions_result` with the same `request_code`
    fn request_permissions(
        &mut self,
        permissions: &[Permission],
        request_code: i32,
    ) -> Result<(), PickerError>;

    /// Starts the activity described by `intent`; its result arrives through
    /// `on_activity_result` with the same `request_code`
    fn launch(&mut self, intent: &PickIntent, request_code: i32) -> Result<(), PickerError>;

    /// Reserves a location a camera capture named `file_name` can be written to.
    /// `directory` overrides the platform default when set.
    fn allocate_capture_location(
        &mut self,
        directory: Option<&Path>,
        file_name: &str,
    ) -> Result<ImageLocation, PickerError>;

    /// Shows the dialog offering to continue without permissions or to try
    /// again; the choice arrives through `on_rationale_choice`
    fn show_permission_rationale(
        &mut self,
        text: &RationaleText,
        request_code: i32,
    ) -> Result<(), PickerError>;
}

/// Creates `directory` if needed and returns a `file://` location for
/// `file_name` inside it. Relative directories are resolved first.
pub fn prepare_capture_file(directory: &Path, file_name: &str) -> Result<ImageLocation, PickerError> {
    std::fs::create_dir_all(directory)?;
    let directory = std::fs::canonicalize(directory)?;
    ImageLocation::from_path(&directory.join(file_name))
}
