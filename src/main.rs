mod config;
mod polling;
mod webhook;

use api::{http::Client, Bot, Registry};
use config::Config;
use core::time::Duration;
use std::sync::Arc;
use tokio::{runtime::Runtime, time};

type Relay = Bot<Client>;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Config { token, review_chat, port, secret, ttl } = Config::from_env()?;
    if review_chat.is_none() {
        log::warn!("REVIEW_CHAT_ID is not set: uploads stay in their chat and quizzes are refused");
    }
    let registry = match ttl {
        Some(ttl) => Registry::with_ttl(ttl),
        None => Registry::new(),
    };

    let runtime = Runtime::new()?;
    runtime.block_on(async move {
        let bot = Arc::new(Bot::new(Client::new(&token)?, registry, review_chat));
        if let Some(ttl) = bot.registry().ttl() {
            tokio::spawn(sweep(Arc::clone(&bot), ttl));
        }
        match port {
            Some(port) => webhook::serve(bot, port, secret).await,
            None => polling::poll(&bot).await,
        }
    })
}

/// Periodically drops expired review records.
async fn sweep(bot: Arc<Relay>, ttl: Duration) {
    let mut interval = time::interval(ttl.max(Duration::from_secs(1)));
    loop {
        interval.tick().await;
        let removed = bot.registry().sweep();
        if removed > 0 {
            log::debug!("evicted {removed} expired review polls");
        }
    }
}
