use core::fmt::{self, Display};
use hyper::http::{self, uri::InvalidUri};

#[derive(Debug)]
pub enum FetchError {
    /// Could not reach the Bot API.
    Connect(hyper_util::client::legacy::Error),
    Http(http::Error),
    Uri(InvalidUri),
    /// The response body was cut short.
    Body(hyper::Error),
    Json(serde_json::Error),
    /// The Bot API refused the call. Holds its description.
    Api(Box<str>),
}

impl From<hyper_util::client::legacy::Error> for FetchError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        Self::Connect(err)
    }
}

impl From<http::Error> for FetchError {
    fn from(err: http::Error) -> Self {
        Self::Http(err)
    }
}

impl From<InvalidUri> for FetchError {
    fn from(err: InvalidUri) -> Self {
        Self::Uri(err)
    }
}

impl From<hyper::Error> for FetchError {
    fn from(err: hyper::Error) -> Self {
        Self::Body(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "connection failed: {err}"),
            Self::Http(err) => write!(f, "malformed request: {err}"),
            Self::Uri(err) => write!(f, "invalid endpoint: {err}"),
            Self::Body(err) => write!(f, "failed to read response: {err}"),
            Self::Json(err) => write!(f, "unexpected payload: {err}"),
            Self::Api(description) => write!(f, "rejected by the Bot API: {description}"),
        }
    }
}

pub type Result<T> = core::result::Result<T, FetchError>;
