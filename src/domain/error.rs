use std::io;
use thiserror::Error;

use super::resource::ResourceId;

/// Failure to read a single resource
///
/// The one error kind a batch produces. Missing files, permission problems
/// and other I/O faults are all represented the same way; the underlying
/// [`io::ErrorKind`] is kept for callers that want to tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to read {id}: {message}")]
pub struct ReadError {
    pub id: ResourceId,
    pub kind: io::ErrorKind,
    pub message: String,
}

impl ReadError {
    pub fn new(id: ResourceId, kind: io::ErrorKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
        }
    }

    /// Wrap an I/O error raised while reading `id`
    pub fn from_io(id: ResourceId, error: &io::Error) -> Self {
        Self::new(id, error.kind(), error.to_string())
    }

    /// Shorthand for the resource-does-not-exist case
    pub fn not_found(id: ResourceId) -> Self {
        Self::new(id, io::ErrorKind::NotFound, "resource not found")
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == io::ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_resource_id() {
        let err = ReadError::not_found(ResourceId::new("poem-two/stanza-09.txt"));
        assert_eq!(
            err.to_string(),
            "Failed to read poem-two/stanza-09.txt: resource not found"
        );
    }

    #[test]
    fn io_error_conversion_keeps_kind() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ReadError::from_io(ResourceId::new("secret.txt"), &io_err);

        assert_eq!(err.kind, io::ErrorKind::PermissionDenied);
        assert_eq!(err.message, "denied");
        assert!(!err.is_not_found());
    }

    #[test]
    fn error_is_cloneable() {
        let err = ReadError::not_found(ResourceId::new("a.txt"));
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
