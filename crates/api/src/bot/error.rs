use core::fmt::{self, Display};

pub const USAGE: &str =
    "Hi! To create a quiz, please paste your questions in a valid JSON format. I will ignore regular text messages.";

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The message has no sender to credit the upload to.
    UnknownUser,
    /// Forwarding the upload to the review chat failed.
    Forward,
    /// The platform refused to open a poll.
    Send,
    /// The platform handed out a poll ID that is already tracked.
    DuplicatePoll,
    /// Plain chat text rather than a question list.
    NotJson,
    /// Looked like JSON but did not parse. Holds the parser diagnostic.
    MalformedInput(Box<str>),
    NoQuestionsFound,
    DestinationUnconfigured,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUser => f.write_str("Unknown user."),
            Self::Forward => f.write_str("Failed to forward the file to the review chat."),
            Self::Send => f.write_str("Failed to send the poll. Please try again later."),
            Self::DuplicatePoll => f.write_str("This poll is already being tracked."),
            Self::NotJson => f.write_str(USAGE),
            Self::MalformedInput(detail) => write!(
                f,
                "❌ JSON Error\n\nI could not parse the text. Please check your format for issues like trailing \
                 commas or incorrect quotes.\n\nDetails: {detail}"
            ),
            Self::NoQuestionsFound => {
                f.write_str("⚠️ The JSON appears valid, but I couldn't find a list of questions.")
            }
            Self::DestinationUnconfigured => {
                f.write_str("⚠️ No review chat is configured. Please set REVIEW_CHAT_ID before sending quizzes.")
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
