pub mod error;

use crate::{
    artifact,
    quiz::{self, QuestionRecord, QuizPoll},
    review::{self, ActionSummary},
    transport::Transport,
};
use model::{
    request::{ForwardMessage, SendMessage, SendPoll},
    telegram::{ChatType, Message, PollAnswer, Update, User},
    ChatId, ReviewRecord, Uploader,
};
use rand::{rngs::StdRng, SeedableRng};
use registry::Registry;
use std::sync::{Mutex, PoisonError};

pub struct Bot<T> {
    transport: T,
    /// Review polls opened by this bot.
    reviews: Registry,
    /// Where uploads from private chats are forwarded and where quizzes are sent.
    review_chat: Option<ChatId>,
    /// Source of distractor and option order.
    rng: Mutex<StdRng>,
}

impl<T: Transport> Bot<T> {
    pub fn new(transport: T, reviews: Registry, review_chat: Option<ChatId>) -> Self {
        Self { transport, reviews, review_chat, rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Replaces the random source, e.g. with a seeded one.
    pub fn with_rng(self, rng: StdRng) -> Self {
        Self { rng: Mutex::new(rng), ..self }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn registry(&self) -> &Registry {
        &self.reviews
    }

    /// Routes one inbound update. Never fails: problems are either replied to or logged.
    pub async fn on_update(&self, update: Update) {
        let Update { update_id, message, poll_answer } = update;

        if let Some(PollAnswer { poll_id, user, option_ids }) = poll_answer {
            match user {
                Some(user) => {
                    self.on_vote(&poll_id, &user, &option_ids);
                }
                None => log::debug!("ignoring vote without a user on poll {poll_id}"),
            }
            return;
        }

        let Some(message) = message else {
            log::debug!("ignoring update {update_id}");
            return;
        };

        let chat = message.chat.id;
        match message.text.as_deref() {
            Some(text) if text.starts_with('/') => self.on_command(chat, text).await,
            Some(text) if message.chat.kind == ChatType::Private => {
                let reply = match self.on_text(chat, text).await {
                    Ok(count) => format!("✅ Sent {count} quiz polls to the group!"),
                    Err(err) => err.to_string(),
                };
                self.reply(chat, &reply).await;
            }
            Some(_) => log::debug!("ignoring text in non-private chat {chat}"),
            None => {
                // Uploaders are deliberately not notified. The failure may be the forward itself.
                if let Err(err) = self.on_upload(&message).await {
                    log::warn!("review of message {} in chat {chat} aborted: {err}", message.message_id);
                }
            }
        }
    }

    async fn on_command(&self, chat: ChatId, text: &str) {
        // Commands may be addressed as `/id@SomeBot`.
        let name = text
            .trim_start_matches('/')
            .split(|c: char| c == '@' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        let reply = match name {
            "id" => format!("The Group ID is: {chat}"),
            "start" | "help" => String::from(error::USAGE),
            _ => {
                log::debug!("ignoring unknown command /{name} in chat {chat}");
                return;
            }
        };
        self.reply(chat, &reply).await;
    }

    async fn reply(&self, chat: ChatId, text: &str) {
        if let Err(err) = self.transport.send_message(&SendMessage { chat_id: chat, text }).await {
            log::warn!("failed to reply to chat {chat}: {err}");
        }
    }

    /// Opens a review poll for the attachment of `message`. Returns the ID of the new poll, or
    /// `None` if the message carries nothing reviewable.
    pub async fn on_upload(&self, message: &Message) -> error::Result<Option<String>> {
        let artifact = artifact::classify(message);
        if !artifact.is_known() {
            log::debug!("message {} in chat {} has no reviewable attachment", message.message_id, message.chat.id);
            return Ok(None);
        }

        let user = message.from.as_ref().ok_or(error::Error::UnknownUser)?;
        let uploader = Uploader { id: user.id, name: user.display_name().into() };
        log::info!("received {} {} from {}", artifact.kind.as_str(), artifact.name, uploader.name);

        // Uploads in private chats are only visible to the bot, so they are moved to the review chat.
        let origin = message.chat.id;
        let (chat, anchor) = match self.review_chat {
            Some(review_chat) if message.chat.kind == ChatType::Private => {
                let request =
                    ForwardMessage { chat_id: review_chat, from_chat_id: origin, message_id: message.message_id };
                let forwarded = self.transport.forward(&request).await.map_err(|err| {
                    log::warn!("failed to forward {} to chat {review_chat}: {err}", artifact.name);
                    error::Error::Forward
                })?;
                (review_chat, forwarded)
            }
            _ => (origin, message.message_id),
        };

        let request = SendPoll::regular(chat, review::QUESTION, review::OPTIONS).reply_to(anchor);
        let poll = self.transport.send_poll(&request).await.map_err(|err| {
            log::warn!("failed to open review poll in chat {chat}: {err}");
            error::Error::Send
        })?;

        let record = ReviewRecord { artifact, uploader, chat };
        self.reviews.put(&poll, record).map_err(|_| error::Error::DuplicatePoll)?;
        log::info!("tracking review poll {poll} in chat {chat}");
        Ok(Some(poll))
    }

    /// Reconciles one vote against the review polls. Votes on polls this bot does not track are
    /// ignored.
    pub fn on_vote(&self, poll: &str, voter: &User, selected: &[usize]) -> Option<ActionSummary> {
        let Some(record) = self.reviews.get(poll) else {
            log::debug!("ignoring vote on untracked poll {poll}");
            return None;
        };
        let summary = ActionSummary::new(&record, voter, selected);
        log::info!(target: "pollrelay::vote", "{summary}");
        Some(summary)
    }

    fn generate(&self, records: &[QuestionRecord]) -> Vec<QuizPoll> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        quiz::generate(records, &mut *rng)
    }

    /// Sends one quiz poll per question found in `text` to the review chat. Returns the number of
    /// polls sent. Stops at the first poll that fails to send.
    pub async fn on_text(&self, chat: ChatId, text: &str) -> error::Result<usize> {
        let text = text.trim();
        if !text.starts_with(&['[', '{'][..]) {
            return Err(error::Error::NotJson);
        }

        let doc: serde_json::Value =
            serde_json::from_str(text).map_err(|err| error::Error::MalformedInput(err.to_string().into_boxed_str()))?;
        let records = quiz::extract(&doc).ok_or(error::Error::NoQuestionsFound)?;
        let review_chat = self.review_chat.ok_or(error::Error::DestinationUnconfigured)?;
        log::info!("chat {chat} submitted {} questions", records.len());

        let polls = self.generate(&records);
        for QuizPoll { question, options, correct } in &polls {
            let request = SendPoll::quiz(review_chat, question, options.iter().map(String::as_str), *correct);
            self.transport.send_poll(&request).await.map_err(|err| {
                log::warn!("failed to send quiz poll to chat {review_chat}: {err}");
                error::Error::Send
            })?;
        }

        log::info!("sent {} quiz polls from chat {chat} to chat {review_chat}", polls.len());
        Ok(polls.len())
    }
}
