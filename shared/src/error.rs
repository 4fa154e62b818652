use std::fmt;

#[derive(Debug)]
pub enum MandelbrotError {
    /// Rejected before any computation, e.g. an image size not divisible by 4.
    InvalidConfiguration(String),
    /// A frame sink or the still-image writer could not open or write its output.
    SinkFailure(String),
    Serialization(serde_json::Error),
}

impl fmt::Display for MandelbrotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MandelbrotError::InvalidConfiguration(reason) => {
                write!(f, "Invalid configuration: {}", reason)
            }
            MandelbrotError::SinkFailure(reason) => write!(f, "Sink failure: {}", reason),
            MandelbrotError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for MandelbrotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MandelbrotError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MandelbrotError {
    fn from(error: std::io::Error) -> Self {
        MandelbrotError::SinkFailure(error.to_string())
    }
}

impl From<serde_json::Error> for MandelbrotError {
    fn from(error: serde_json::Error) -> Self {
        MandelbrotError::Serialization(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_sink_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error: MandelbrotError = io.into();
        assert!(matches!(error, MandelbrotError::SinkFailure(ref m) if m.contains("read-only")));
    }

    #[test]
    fn display_names_the_category() {
        let error = MandelbrotError::InvalidConfiguration("image size 401".to_string());
        assert_eq!(error.to_string(), "Invalid configuration: image size 401");
    }
}
