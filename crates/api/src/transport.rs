use core::{fmt::Display, future::Future};
use model::{
    request::{ForwardMessage, SendMessage, SendPoll},
    MessageId,
};

/// The chat-platform operations the bot depends on.
pub trait Transport {
    type Error: Display + Send;

    /// Copies a message into another chat. Returns the ID of the new message.
    fn forward(&self, request: &ForwardMessage) -> impl Future<Output = Result<MessageId, Self::Error>> + Send;

    /// Opens a poll. Returns the platform-assigned poll ID.
    fn send_poll(&self, request: &SendPoll<'_>) -> impl Future<Output = Result<String, Self::Error>> + Send;

    fn send_message(&self, request: &SendMessage<'_>) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
