pub mod error;
pub mod file_store;
pub mod memory_store;
pub mod traits;

// Re-export commonly used types
pub use error::WriteError;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::ResourceReader;
