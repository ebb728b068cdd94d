use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::conversation::ConversationController;
use crate::{log_debug, log_error, log_info, log_warn};

use super::{api::TelegramApi, sink::ChatReplySink, types::Update};

const ENABLE_LOGS: bool = true;

const ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Long-poll for updates until `cancel` fires. Each update is handled on its
/// own task so a slow stats render never stalls other chats.
pub async fn run_polling(
    api: TelegramApi,
    controller: ConversationController,
    poll_timeout: Duration,
    cancel: CancellationToken,
) {
    let mut offset: i64 = 0;
    log_info!("polling for updates");

    loop {
        let updates = tokio::select! {
            result = api.get_updates(offset, poll_timeout) => result,
            _ = cancel.cancelled() => {
                log_info!("polling loop shutting down");
                break;
            }
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(err) => {
                log_error!("getUpdates failed: {:#}", err);
                tokio::select! {
                    _ = tokio::time::sleep(ERROR_BACKOFF) => continue,
                    _ = cancel.cancelled() => break,
                }
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            tokio::spawn(dispatch(api.clone(), controller.clone(), update));
        }
    }
}

async fn dispatch(api: TelegramApi, controller: ConversationController, update: Update) {
    let update_id = update.update_id;

    if let Some(callback_id) = update.callback_id() {
        if let Err(err) = api.answer_callback_query(callback_id).await {
            log_warn!("answerCallbackQuery failed for update {}: {:#}", update_id, err);
        }
    }

    let Some(incoming) = update.into_incoming() else {
        log_debug!("ignoring update {}", update_id);
        return;
    };

    let sink = ChatReplySink::new(api, incoming.chat);
    if let Err(err) = controller.handle(incoming.user, incoming.inbound, &sink).await {
        log_error!("failed to reply to update {}: {:#}", update_id, err);
    }
}
