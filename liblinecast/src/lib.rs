//! Linecast - daily content broadcasting for LINE channels
//!
//! This library provides the pieces behind the `line-post` and `line-check`
//! tools: loading candidate posts from a JSON file, picking today's entry,
//! turning it into LINE messages and broadcasting them.

pub mod config;
pub mod content;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod messages;
pub mod platforms;
pub mod selection;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use credentials::ChannelToken;
pub use error::{ErrorKind, LinecastError, Result};
pub use types::{BroadcastRequest, BroadcastResponse, Message, PostRecord};
