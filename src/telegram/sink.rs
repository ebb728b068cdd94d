use anyhow::Result;
use async_trait::async_trait;

use crate::conversation::{PhotoSource, Reply, ReplySink};
use crate::models::ChatId;

use super::api::TelegramApi;

/// Sends replies into one chat.
pub struct ChatReplySink {
    api: TelegramApi,
    chat_id: ChatId,
}

impl ChatReplySink {
    pub fn new(api: TelegramApi, chat_id: ChatId) -> Self {
        Self { api, chat_id }
    }
}

#[async_trait]
impl ReplySink for ChatReplySink {
    async fn send(&self, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text {
                text,
                format,
                buttons,
            } => {
                self.api
                    .send_message(self.chat_id, &text, format, &buttons)
                    .await
            }
            Reply::Photo {
                photo: PhotoSource::Url(url),
                caption,
                format,
            } => {
                self.api
                    .send_photo_url(self.chat_id, &url, &caption, format)
                    .await
            }
            Reply::Photo {
                photo: PhotoSource::Png(png),
                caption,
                format,
            } => {
                self.api
                    .send_photo_png(self.chat_id, png, &caption, format)
                    .await
            }
        }
    }
}
