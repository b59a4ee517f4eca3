// Public modules
pub mod discover;
pub mod error;
pub mod record;
pub mod scaffold;
pub mod validate;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
