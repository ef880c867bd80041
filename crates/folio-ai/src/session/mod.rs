//! Chat session management.
//!
//! A `Session` owns one conversation with the provider: the transcript the
//! UI renders, the immutable system prompt, and the provider handle. At most
//! one request is in flight; calls made while a reply is streaming are
//! dropped, not queued.

mod chat;
mod manager;
mod types;


pub use manager::Session;
pub use types::{IgnoreReason, SendOutcome, SessionError, SessionOptions, SessionState, Transcript};
