//! Outbound message delivery.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::messenger::error::MessengerError;

pub mod error;
pub mod line_messenger;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Pushes a plain-text message to one user. `Ok` means the platform
    /// accepted it.
    async fn push_text(&self, user_id: &str, text: &str) -> Result<(), MessengerError>;
}
