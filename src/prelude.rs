//! Prelude module for convenient imports
//!
//! Import everything you need with: `use stanza::prelude::*;`

// Domain types
pub use crate::domain::{
    BatchEntry, BatchMode, BatchRequest, BatchResult, ReadError, ReadOutcome, ResourceId,
};

// Store types
pub use crate::io::{FileStore, MemoryStore, ResourceReader, WriteError};

// Batch types
pub use crate::batch::{
    AbortOnError, BatchEvent, BatchFileReader, BatchObserver, ErrorPolicy, FailurePolicy,
    NoopObserver, Recorder, SilentSkip, SkipErrors,
};

// App types
pub use crate::app::{
    AppError, Cli, CliApp, ConsoleReporter, DemoContext, DemoRegistry, OnError, dispatch,
};
