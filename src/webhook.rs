use crate::Relay;
use api::{model::telegram::Update, Bot, Transport};
use core::{convert::Infallible, pin::pin};
use http_body_util::{BodyExt, Full};
use hyper::{
    body::{Body, Bytes},
    server::conn::http1,
    service::service_fn,
    Method, Request, Response, StatusCode,
};
use hyper_util::rt::TokioIo;
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, signal, sync::mpsc};

/// Accepted deliveries waiting for the bot, in arrival order.
pub type Queue = mpsc::UnboundedSender<Update>;

const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Serves webhook deliveries until interrupted. Connections run on their own tasks but every
/// accepted update goes through one queue, so the bot sees them in the order they arrived.
pub async fn serve(bot: Arc<Relay>, port: u16, secret: Option<Arc<str>>) -> anyhow::Result<()> {
    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, port).into();
    let listener = TcpListener::bind(addr).await?;
    log::info!("listening for webhook updates on {addr}");

    let (queue, updates) = mpsc::unbounded_channel();
    tokio::spawn(async move { drain(&bot, updates).await });

    let mut shutdown = pin!(signal::ctrl_c());
    loop {
        let (stream, peer) = tokio::select! {
            biased;
            result = &mut shutdown => {
                result?;
                break;
            }
            result = listener.accept() => match result {
                Ok(pair) => pair,
                Err(err) => {
                    log::error!("failed to accept connection: {err}");
                    continue;
                }
            },
        };

        let queue = queue.clone();
        let secret = secret.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let queue = queue.clone();
                let secret = secret.clone();
                async move { Ok::<_, Infallible>(respond(req, &queue, secret.as_deref()).await) }
            });
            if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
                log::error!("connection with {peer} failed: {err}");
            }
        });
    }

    log::info!("shutting down");
    Ok(())
}

/// Hands queued updates to the bot one at a time until every sender is gone.
pub async fn drain<T: Transport>(bot: &Bot<T>, mut updates: mpsc::UnboundedReceiver<Update>) {
    while let Some(update) = updates.recv().await {
        bot.on_update(update).await;
    }
    log::debug!("update queue closed");
}

pub async fn respond<B: Body>(req: Request<B>, queue: &Queue, secret: Option<&str>) -> Response<Full<Bytes>> {
    let status = match try_respond(req, queue, secret).await {
        Ok(()) => StatusCode::OK,
        Err(status) => status,
    };
    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = status;
    res
}

async fn try_respond<B: Body>(req: Request<B>, queue: &Queue, secret: Option<&str>) -> Result<(), StatusCode> {
    // Telegram only ever posts to the registered webhook URL.
    if req.method() != Method::POST || req.uri().path() != "/" {
        return Err(StatusCode::NOT_FOUND);
    }

    if let Some(secret) = secret {
        let given = req.headers().get(SECRET_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;
        if given.as_bytes() != secret.as_bytes() {
            log::warn!("rejected webhook delivery with a mismatched secret");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    let bytes = req.into_body().collect().await.map_err(|_| StatusCode::BAD_REQUEST)?.to_bytes();
    let update: Update = serde_json::from_slice(&bytes).map_err(|err| {
        log::warn!("undecodable update: {err}");
        StatusCode::BAD_REQUEST
    })?;

    queue.send(update).map_err(|_| {
        log::error!("update queue is closed");
        StatusCode::SERVICE_UNAVAILABLE
    })
}
