//! Inbound objects of the [Telegram Bot API][api]. Only the fields the bot reads are modeled;
//! everything else in the payload is ignored during deserialization.
//!
//! [api]: https://core.telegram.org/bots/api#available-types

use crate::{ChatId, MessageId};
use alloc::{string::String, vec::Vec};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub poll_answer: Option<PollAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: MessageId,
    pub chat: Chat,
    /// Empty for messages sent on behalf of channels.
    pub from: Option<User>,
    pub text: Option<String>,
    pub document: Option<Document>,
    /// Available sizes of the same photo, typically in ascending resolution.
    pub photo: Option<Vec<PhotoSize>>,
    pub video: Option<Video>,
    pub audio: Option<Audio>,
    pub voice: Option<Voice>,
    /// Present on the message returned by `sendPoll`.
    pub poll: Option<Poll>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    #[serde(rename = "type")]
    pub kind: ChatType,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

impl User {
    /// The handle if the user has one, otherwise their first name.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.first_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Audio {
    pub file_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Voice {
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct Poll {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct PollAnswer {
    pub poll_id: String,
    /// Absent when the vote was cast on behalf of a chat.
    pub user: Option<User>,
    /// Zero-based option indices. Empty when the vote was retracted.
    #[serde(default)]
    pub option_ids: Vec<usize>,
}
