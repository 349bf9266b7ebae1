pub mod telegram;

use async_trait::async_trait;

/// How a single relay attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// The upstream accepted the message.
    Delivered,
    /// The upstream answered, but with a non-success status.
    Rejected { status: u16, body: String },
    /// The request never produced a response.
    Transport(String),
}

/// Something that can deliver a rendered notification.
///
/// Implementations report failures through [`RelayOutcome`] and never retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn id(&self) -> &str;
    async fn send(&self, text: &str) -> RelayOutcome;
}
