mod error;

pub use error::{FetchError, Result};

use crate::transport::Transport;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{HeaderValue, CONTENT_TYPE},
    Request, Uri,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client as HyperClient},
    rt::TokioExecutor,
};
use model::{
    request::{ApiResponse, ForwardMessage, GetUpdates, SendMessage, SendPoll},
    telegram::{Message, Update},
    MessageId,
};
use serde::{de::DeserializeOwned, Serialize};

pub const APPLICATION_JSON: &str = "application/json";

/// Updates the bot subscribes to when long polling.
const ALLOWED_UPDATES: &[&str] = &["message", "poll_answer"];

/// Thin client over the Telegram Bot API.
pub struct Client {
    http: HyperClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
    /// Everything before the method name, i.e. `https://api.telegram.org/bot{token}/`.
    prefix: Box<str>,
}

impl Client {
    pub fn new(token: &str) -> std::io::Result<Self> {
        let connector = HttpsConnectorBuilder::new().with_native_roots()?.https_only().enable_http1().build();
        let http = HyperClient::builder(TokioExecutor::new()).build(connector);
        let prefix = format!("https://api.telegram.org/bot{token}/").into_boxed_str();
        Ok(Self { http, prefix })
    }

    async fn call<B, R>(&self, method: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let uri: Uri = [self.prefix.as_ref(), method].concat().parse()?;
        let payload = serde_json::to_vec(body)?;
        let request = Request::post(uri)
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
            .body(Full::new(Bytes::from(payload)))?;

        // Failed calls still carry a JSON envelope, so the status code is not consulted.
        let response = self.http.request(request).await?;
        let bytes = response.into_body().collect().await?.to_bytes();
        let ApiResponse { ok, result, description } = serde_json::from_slice(&bytes)?;
        match result {
            Some(result) if ok => Ok(result),
            _ => Err(FetchError::Api(description.unwrap_or_default().into_boxed_str())),
        }
    }

    /// Long-polls for updates newer than `offset`. Waits up to `timeout` seconds for one to arrive.
    pub async fn get_updates(&self, offset: i64, timeout: u32) -> Result<Vec<Update>> {
        self.call("getUpdates", &GetUpdates { offset, timeout, allowed_updates: ALLOWED_UPDATES }).await
    }
}

impl Transport for Client {
    type Error = FetchError;

    async fn forward(&self, request: &ForwardMessage) -> Result<MessageId> {
        let Message { message_id, .. } = self.call("forwardMessage", request).await?;
        Ok(message_id)
    }

    async fn send_poll(&self, request: &SendPoll<'_>) -> Result<String> {
        let Message { poll, .. } = self.call("sendPoll", request).await?;
        let poll = poll.ok_or_else(|| FetchError::Api("sent message carries no poll".into()))?;
        Ok(poll.id)
    }

    async fn send_message(&self, request: &SendMessage<'_>) -> Result<()> {
        let _: Message = self.call("sendMessage", request).await?;
        Ok(())
    }
}
