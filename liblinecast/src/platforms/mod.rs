//! Broadcast targets
//!
//! A [`Broadcaster`] delivers a batch of messages to every subscriber of a
//! channel in a single call. [`line::LineClient`] talks to the LINE
//! Messaging API; [`mock::MockBroadcaster`] records batches for tests.
//!
//! ```no_run
//! use liblinecast::platforms::{Broadcaster, line::LineClient};
//! use liblinecast::{ChannelToken, Config, messages};
//!
//! # async fn example() -> liblinecast::Result<()> {
//! let config = Config::load()?;
//! let client = LineClient::new(&config, ChannelToken::from_env(&config)?)?;
//!
//! let response = client.broadcast(&[messages::text_message("Hello")]).await?;
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BroadcastResponse, Message};

pub mod line;

// Not test-only so integration tests in other crates can use it
pub mod mock;

#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Send `messages` to all subscribers
    ///
    /// # Errors
    ///
    /// - `TransportError::Network` when the endpoint cannot be reached
    /// - `TransportError::Status` when it answers with a non-2xx status
    async fn broadcast(&self, messages: &[Message]) -> Result<BroadcastResponse>;

    /// Lowercase identifier, e.g. "line"
    fn name(&self) -> &str;
}
