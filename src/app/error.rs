use thiserror::Error;

use crate::domain::ReadError;
use crate::io::WriteError;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceId;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            AppError::InvalidArguments("fault index 9 out of range".to_string()).to_string(),
            "Invalid arguments: fault index 9 out of range"
        );
        assert_eq!(
            AppError::from(ReadError::not_found(ResourceId::new("a.txt"))).to_string(),
            "Read error: Failed to read a.txt: resource not found"
        );
    }

    #[test]
    fn write_error_conversion() {
        let write_err = WriteError::Write {
            path: std::path::PathBuf::from("out.txt"),
            source: std::io::Error::other("disk full"),
        };
        let app_err = AppError::from(write_err);

        match app_err {
            AppError::Write(WriteError::Write { .. }) => {}
            _ => panic!("Expected Write error variant"),
        }
    }

    #[test]
    fn read_error_conversion() {
        let read_err = ReadError::not_found(ResourceId::new("gone.txt"));
        let app_err = AppError::from(read_err);

        match app_err {
            AppError::Read(e) => assert_eq!(e.id.as_str(), "gone.txt"),
            _ => panic!("Expected Read error variant"),
        }
    }
}
