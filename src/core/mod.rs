// Public modules
pub mod context;
pub mod error;
pub mod git;
pub mod pipeline;
pub mod prompt;
pub mod scaffold;
pub mod template;
pub mod tty;
pub mod venv;

// Internal modules - not part of public API
pub(crate) mod local_files;
pub(crate) mod slugify;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
