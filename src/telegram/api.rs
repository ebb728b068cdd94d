use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::multipart::{Form, Part};
use serde::{de::DeserializeOwned, Serialize};

use crate::conversation::{Button, TextFormat};
use crate::models::ChatId;

use super::types::{
    AnswerCallbackQuery, ApiResponse, GetUpdates, InlineKeyboardMarkup, SendMessage, SendPhotoUrl,
    Update,
};

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];
/// Headroom on top of the long-poll timeout before the HTTP request gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

fn parse_mode(format: TextFormat) -> Option<&'static str> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Markdown => Some("Markdown"),
    }
}

/// Thin Bot API client. The token is part of every URL, so request errors
/// are stripped of their URL before they are reported.
#[derive(Clone)]
pub struct TelegramApi {
    http: reqwest::Client,
    base: String,
    request_timeout: Duration,
}

impl TelegramApi {
    pub fn new(api_url: &str, token: &str, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build Telegram HTTP client")?;

        Ok(Self {
            http,
            base: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
            request_timeout,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.base, method)
    }

    async fn read<T: DeserializeOwned>(method: &str, response: reqwest::Response) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|err| anyhow!("{method}: failed to read response: {}", err.without_url()))?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .with_context(|| format!("{method}: malformed response"))?;

        if !envelope.ok {
            bail!(
                "{method} rejected: {}",
                envelope.description.as_deref().unwrap_or("no description")
            );
        }
        envelope
            .result
            .ok_or_else(|| anyhow!("{method}: response carried no result"))
    }

    async fn call<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &P,
        timeout: Duration,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.endpoint(method))
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|err| anyhow!("{method} failed: {}", err.without_url()))?;
        Self::read(method, response).await
    }

    pub async fn get_updates(&self, offset: i64, poll_timeout: Duration) -> Result<Vec<Update>> {
        let payload = GetUpdates {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &payload, poll_timeout + POLL_GRACE)
            .await
    }

    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        format: TextFormat,
        buttons: &[Vec<Button>],
    ) -> Result<()> {
        let payload = SendMessage {
            chat_id,
            text,
            parse_mode: parse_mode(format),
            reply_markup: InlineKeyboardMarkup::from_rows(buttons),
        };
        self.call::<_, serde_json::Value>("sendMessage", &payload, self.request_timeout)
            .await
            .map(|_| ())
    }

    pub async fn send_photo_url(
        &self,
        chat_id: ChatId,
        url: &str,
        caption: &str,
        format: TextFormat,
    ) -> Result<()> {
        let payload = SendPhotoUrl {
            chat_id,
            photo: url,
            caption,
            parse_mode: parse_mode(format),
        };
        self.call::<_, serde_json::Value>("sendPhoto", &payload, self.request_timeout)
            .await
            .map(|_| ())
    }

    /// Upload a rendered chart as `multipart/form-data`.
    pub async fn send_photo_png(
        &self,
        chat_id: ChatId,
        png: Vec<u8>,
        caption: &str,
        format: TextFormat,
    ) -> Result<()> {
        let part = Part::bytes(png)
            .file_name("chart.png")
            .mime_str("image/png")
            .context("invalid photo mime type")?;
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", part);
        if let Some(mode) = parse_mode(format) {
            form = form.text("parse_mode", mode);
        }

        let response = self
            .http
            .post(self.endpoint("sendPhoto"))
            .timeout(self.request_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|err| anyhow!("sendPhoto failed: {}", err.without_url()))?;
        Self::read::<serde_json::Value>("sendPhoto", response)
            .await
            .map(|_| ())
    }

    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<()> {
        let payload = AnswerCallbackQuery { callback_query_id };
        self.call::<_, bool>("answerCallbackQuery", &payload, self.request_timeout)
            .await
            .map(|_| ())
    }
}
