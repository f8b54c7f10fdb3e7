pub mod error;
pub mod stats;
pub mod types;
pub mod validate;

pub use error::JournalError;
pub use types::*;

/// Standard result type for all journal operations
pub type JournalResult<T> = Result<T, JournalError>;
