//! # Simple Image Picker
//!
//! Lets an Android app obtain an image either by picking an existing photo
//! from the gallery or by capturing a new one with the camera.
//!
//! The crate does not touch image data. It sequences the asynchronous
//! callbacks of the activity model:
//! - runtime permission checks and prompts for the camera
//! - a chooser offering gallery and camera, with a pre-allocated capture file
//! - routing of activity results back to the request that started them
//! - a "continue / try again" dialog after the permissions were denied
//!
//! Every request ends in exactly one [`PickOutcome`]: `Selected` with the
//! image location, or `Cancelled`.
//!
//! ## Platform Separation
//!
//! [`ImagePickerHelper`] talks to the platform only through the
//! [`ActivityHost`] trait. On Android, [`android::AndroidHost`] implements
//! it over JNI. The activity forwards its callbacks to the helper.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use simple_image_picker::{ImagePickerHelper, PickOutcome};
//!
//! let mut picker = ImagePickerHelper::new(host);
//! let outcome = picker.pick_image_channel();
//!
//! // onActivityResult
//! picker.on_activity_result(request_code, result_code, data.as_ref());
//! // onRequestPermissionsResult
//! picker.on_request_permissions_result(request_code, &permissions, &grant_results);
//! // rationale dialog button
//! picker.on_rationale_choice(request_code, choice);
//! ```

pub mod completion;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod models;
pub mod permissions;
pub mod picker;
pub mod registry;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(feature = "components")]
pub mod components;

pub use completion::Completion;
pub use config::PickerConfig;
pub use error::PickerError;
pub use host::ActivityHost;
pub use models::{
    ImageLocation, Permission, PickIntent, PickOutcome, RationaleChoice, RationaleText,
    ResultData,
};
pub use permissions::{all_granted, permissions_to_request, PermissionChecker};
pub use picker::ImagePickerHelper;
pub use registry::RequestRegistry;

#[cfg(target_os = "android")]
pub use android::AndroidHost;

#[cfg(feature = "components")]
pub use components::{PermissionRationaleDialog, PermissionRationaleProps, RationaleLabels};
