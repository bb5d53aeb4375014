pub mod observer;
pub mod policy;
pub mod reader;

// Re-export commonly used types
pub use observer::{BatchEvent, BatchObserver, NoopObserver, Recorder};
pub use policy::{AbortOnError, ErrorPolicy, FailurePolicy, SilentSkip, SkipErrors};
pub use reader::BatchFileReader;
