//! Outbound method payloads. Each struct serializes to the JSON body of the Bot API method it is
//! named after.

use crate::{ChatId, MessageId};
use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ForwardMessage {
    pub chat_id: ChatId,
    pub from_chat_id: ChatId,
    pub message_id: MessageId,
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'txt> {
    pub chat_id: ChatId,
    pub text: &'txt str,
}

#[derive(Debug, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    /// Long-polling timeout in seconds.
    pub timeout: u32,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PollType {
    Regular,
    Quiz,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InputPollOption<'txt> {
    pub text: &'txt str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReplyParameters {
    pub message_id: MessageId,
}

#[derive(Debug, Serialize)]
pub struct SendPoll<'txt> {
    pub chat_id: ChatId,
    pub question: &'txt str,
    pub options: Vec<InputPollOption<'txt>>,
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub kind: PollType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

impl<'txt> SendPoll<'txt> {
    /// A non-anonymous regular poll. Votes on these polls identify the voter.
    pub fn regular<I>(chat_id: ChatId, question: &'txt str, options: I) -> Self
    where
        I: IntoIterator<Item = &'txt str>,
    {
        Self {
            chat_id,
            question,
            options: options.into_iter().map(|text| InputPollOption { text }).collect(),
            is_anonymous: false,
            kind: PollType::Regular,
            correct_option_id: None,
            reply_parameters: None,
        }
    }

    /// A non-anonymous quiz poll whose correct answer sits at `correct`.
    pub fn quiz<I>(chat_id: ChatId, question: &'txt str, options: I, correct: usize) -> Self
    where
        I: IntoIterator<Item = &'txt str>,
    {
        Self { kind: PollType::Quiz, correct_option_id: Some(correct), ..Self::regular(chat_id, question, options) }
    }

    pub fn reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_parameters = Some(ReplyParameters { message_id });
        self
    }
}

/// Envelope around every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}
