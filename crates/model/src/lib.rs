#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod request;
pub mod review;
pub mod telegram;

pub use review::{Artifact, ArtifactKind, ReviewRecord, Uploader};

/// Telegram chat identifiers. Group chats are negative.
pub type ChatId = i64;
/// Message identifiers are only unique within a chat.
pub type MessageId = i32;
