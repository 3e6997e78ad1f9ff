use crate::error::PickerError;
use crate::models::{Permission, RationaleText};
use crate::registry::MAX_REQUEST_CODE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// First request code handed out for pick and permission requests
pub const DEFAULT_REQUEST_CODE_BASE: i32 = 1000;

/// First SDK level with runtime permissions (Android 6.0)
pub const RUNTIME_PERMISSIONS_SDK: u32 = 23;

/// Configuration for the image picker
///
/// All fields have defaults, so a TOML file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// First request code used by the request registries
    pub request_code_base: i32,
    /// Directory for new camera captures. `None` lets the host choose
    /// (the public DCIM directory on Android).
    pub capture_directory: Option<PathBuf>,
    /// File extension of camera captures, without the dot
    pub capture_extension: String,
    /// Title of the chooser offering gallery and camera
    pub chooser_title: String,
    /// Permissions needed to offer a camera capture
    pub capture_permissions: Vec<Permission>,
    /// SDK level from which permissions are requested at runtime
    pub runtime_permissions_sdk: u32,
    /// Texts of the dialog shown after the permissions were denied
    pub rationale: RationaleText,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            request_code_base: DEFAULT_REQUEST_CODE_BASE,
            capture_directory: None,
            capture_extension: "jpg".to_string(),
            chooser_title: "Select or take a new picture".to_string(),
            capture_permissions: vec![Permission::camera(), Permission::write_external_storage()],
            runtime_permissions_sdk: RUNTIME_PERMISSIONS_SDK,
            rationale: RationaleText::default(),
        }
    }
}

impl PickerConfig {
    pub fn from_toml(s: &str) -> Result<Self, PickerError> {
        let config: PickerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, PickerError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads the configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, PickerError> {
        log::debug!("Loading picker configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// File name for a new camera capture
    pub fn capture_file_name(&self) -> String {
        format!("{}.{}", uuid::Uuid::new_v4(), self.capture_extension)
    }

    /// Replaces invalid values with their defaults, logging each replacement
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !valid_request_code_base(self.request_code_base) {
            log::warn!(
                "request_code_base {} out of range, using {}",
                self.request_code_base,
                defaults.request_code_base
            );
            self.request_code_base = defaults.request_code_base;
        }
        if !valid_extension(&self.capture_extension) {
            log::warn!(
                "invalid capture_extension '{}', using '{}'",
                self.capture_extension,
                defaults.capture_extension
            );
            self.capture_extension = defaults.capture_extension;
        }
        self
    }

    fn validate(&self) -> Result<(), PickerError> {
        if !valid_request_code_base(self.request_code_base) {
            return Err(PickerError::Config(format!(
                "request_code_base must be between 0 and {}, got {}",
                MAX_REQUEST_CODE, self.request_code_base
            )));
        }
        if !valid_extension(&self.capture_extension) {
            return Err(PickerError::Config(format!(
                "invalid capture_extension '{}'",
                self.capture_extension
            )));
        }
        Ok(())
    }
}

fn valid_request_code_base(base: i32) -> bool {
    (0..=MAX_REQUEST_CODE).contains(&base)
}

fn valid_extension(extension: &str) -> bool {
    !extension.is_empty() && !extension.contains('.')
}
