pub mod cli;
pub mod console;
pub mod demos;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use cli::{Cli, CliApp, OnError};
pub use console::ConsoleReporter;
pub use demos::{DemoContext, DemoRegistry, dispatch};
pub use error::AppError;
pub use logging::init_logging;
