//! Shared types for the Folio workspace: the error taxonomy used across
//! crates and the session identifier attached to chat sessions.

pub mod errors;
pub mod id;

pub use errors::{ConfigError, FolioError};
pub use id::SessionId;

pub type Result<T> = std::result::Result<T, FolioError>;
