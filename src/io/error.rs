use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Store-level errors for writes
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        let err = WriteError::Write {
            path: PathBuf::from("out/poem.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write out/poem.txt: denied");
    }

    #[test]
    fn exposes_source() {
        use std::error::Error as _;

        let err = WriteError::CreateDir {
            path: PathBuf::from("out"),
            source: io::Error::other("boom"),
        };
        assert!(err.source().is_some());
    }
}
