use std::fmt;

/// Internal error type of the picker.
///
/// None of these ever reach the completion of a pick request; the picker logs
/// them and resolves the request as cancelled.
#[derive(Debug)]
pub enum PickerError {
    /// A platform call (JNI, activity method) failed
    Platform(String),
    /// Filesystem error while preparing a capture location
    Io(std::io::Error),
    /// Configuration could not be parsed or written
    Config(String),
    /// No free request code is left in the registry
    RegistryFull,
    /// General error
    Other(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PickerError::Platform(msg) => write!(f, "Platform error: {}", msg),
            PickerError::Io(e) => write!(f, "IO error: {}", e),
            PickerError::Config(msg) => write!(f, "Configuration error: {}", msg),
            PickerError::RegistryFull => write!(f, "No free request code available"),
            PickerError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PickerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PickerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PickerError {
    fn from(e: std::io::Error) -> Self {
        PickerError::Io(e)
    }
}

impl From<toml::de::Error> for PickerError {
    fn from(e: toml::de::Error) -> Self {
        PickerError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for PickerError {
    fn from(e: toml::ser::Error) -> Self {
        PickerError::Config(e.to_string())
    }
}

#[cfg(target_os = "android")]
impl From<jni::errors::Error> for PickerError {
    fn from(e: jni::errors::Error) -> Self {
        PickerError::Platform(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PickerError::Platform("no activity".to_string()).to_string(),
            "Platform error: no activity"
        );
        assert_eq!(
            PickerError::RegistryFull.to_string(),
            "No free request code available"
        );
        assert_eq!(PickerError::Other("plain".to_string()).to_string(), "plain");
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PickerError = io.into();
        assert!(matches!(err, PickerError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
