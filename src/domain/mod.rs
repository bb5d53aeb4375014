pub mod error;
pub mod outcome;
pub mod request;
pub mod resource;

// Re-export commonly used types
pub use error::ReadError;
pub use outcome::{BatchEntry, BatchMode, BatchResult, ReadOutcome};
pub use request::BatchRequest;
pub use resource::ResourceId;
