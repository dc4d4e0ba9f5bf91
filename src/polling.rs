use crate::Relay;
use api::model::telegram::Update;
use core::{pin::pin, time::Duration};
use tokio::{signal, time};

/// Seconds the Bot API may hold a `getUpdates` call open.
const POLL_TIMEOUT: u32 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Offset that acknowledges `update` and everything before it.
fn next_offset(offset: i64, update: &Update) -> i64 {
    offset.max(update.update_id + 1)
}

/// Long-polls the Bot API until interrupted. Updates are handled one at a time, in order.
pub async fn poll(bot: &Relay) -> anyhow::Result<()> {
    log::info!("long polling for updates");
    let mut shutdown = pin!(signal::ctrl_c());
    let mut offset = 0;
    loop {
        let result = tokio::select! {
            biased;
            result = &mut shutdown => {
                result?;
                break;
            }
            result = bot.transport().get_updates(offset, POLL_TIMEOUT) => result,
        };

        let updates = match result {
            Ok(updates) => updates,
            Err(err) => {
                log::error!("failed to fetch updates: {err}");
                time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = next_offset(offset, &update);
            bot.on_update(update).await;
        }
    }

    log::info!("shutting down");
    Ok(())
}
