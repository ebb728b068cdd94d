use serde::{Deserialize, Serialize};

use crate::conversation::{parse_callback, parse_message, Button, Inbound};
use crate::models::{ChatId, UserId};

/// Envelope around every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: UserId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

/// An update reduced to what the conversation layer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Incoming {
    pub user: UserId,
    pub chat: ChatId,
    pub inbound: Inbound,
}

impl Update {
    /// `None` for updates the bot doesn't act on.
    pub fn into_incoming(self) -> Option<Incoming> {
        if let Some(query) = self.callback_query {
            let chat = query.message.as_ref().map(|m| m.chat.id)?;
            let inbound = query
                .data
                .as_deref()
                .and_then(parse_callback)
                .map(Inbound::Callback)?;
            return Some(Incoming {
                user: query.from.id,
                chat,
                inbound,
            });
        }

        let message = self.message?;
        let inbound = parse_message(message.text.as_deref()?)?;
        // Channel posts carry no sender; fall back to the chat.
        let user = message.from.map(|u| u.id).unwrap_or(message.chat.id);
        Some(Incoming {
            user,
            chat: message.chat.id,
            inbound,
        })
    }

    /// Callback id of a button press, even one whose payload is ignored.
    /// Every press must be answered to stop the client's spinner.
    pub fn callback_id(&self) -> Option<&str> {
        self.callback_query.as_ref().map(|q| q.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&Button> for InlineKeyboardButton {
    fn from(button: &Button) -> Self {
        match button {
            Button::Callback { label, data } => Self {
                text: label.clone(),
                callback_data: Some(data.clone()),
                url: None,
            },
            Button::Link { label, url } => Self {
                text: label.clone(),
                callback_data: None,
                url: Some(url.clone()),
            },
        }
    }
}

impl InlineKeyboardMarkup {
    /// `None` for an empty keyboard so the field can be left out.
    pub fn from_rows(rows: &[Vec<Button>]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            inline_keyboard: rows
                .iter()
                .map(|row| row.iter().map(InlineKeyboardButton::from).collect())
                .collect(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: ChatId,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct SendPhotoUrl<'a> {
    pub chat_id: ChatId,
    pub photo: &'a str,
    pub caption: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct GetUpdates {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{BotCommand, CallbackAction};

    fn update(json: &str) -> Update {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_message_becomes_search() {
        let incoming = update(
            r#"{"update_id": 7, "message": {"message_id": 1,
                "from": {"id": 42, "is_bot": false, "first_name": "Sam"},
                "chat": {"id": 42, "type": "private"}, "date": 0, "text": "Alien"}}"#,
        )
        .into_incoming()
        .unwrap();

        assert_eq!(incoming.user, 42);
        assert_eq!(incoming.chat, 42);
        assert_eq!(incoming.inbound, Inbound::Text("Alien".into()));
    }

    #[test]
    fn test_group_command() {
        let incoming = update(
            r#"{"update_id": 8, "message": {"message_id": 2,
                "from": {"id": 5, "first_name": "Kim"},
                "chat": {"id": -100, "type": "group"}, "text": "/stats@moviebot"}}"#,
        )
        .into_incoming()
        .unwrap();

        assert_eq!(incoming.user, 5);
        assert_eq!(incoming.chat, -100);
        assert_eq!(incoming.inbound, Inbound::Command(BotCommand::Stats));
    }

    #[test]
    fn test_callback_query() {
        let raw = update(
            r#"{"update_id": 9, "callback_query": {"id": "cb1",
                "from": {"id": 42, "first_name": "Sam"},
                "message": {"message_id": 3, "chat": {"id": 42}},
                "data": "movie_tt0078748"}}"#,
        );
        assert_eq!(raw.callback_id(), Some("cb1"));

        let incoming = raw.into_incoming().unwrap();
        assert_eq!(
            incoming.inbound,
            Inbound::Callback(CallbackAction::SelectMovie("tt0078748".into()))
        );
    }

    #[test]
    fn test_ignored_updates() {
        let foreign = update(
            r#"{"update_id": 10, "callback_query": {"id": "cb2",
                "from": {"id": 42}, "message": {"message_id": 3, "chat": {"id": 42}},
                "data": "page_2"}}"#,
        );
        assert_eq!(foreign.callback_id(), Some("cb2"));
        assert!(foreign.into_incoming().is_none());

        let sticker = update(
            r#"{"update_id": 11, "message": {"message_id": 4, "chat": {"id": 42}}}"#,
        );
        assert!(sticker.into_incoming().is_none());
    }

    #[test]
    fn test_keyboard_json() {
        let rows = vec![
            vec![Button::callback("📊 View My Stats", "stats")],
            vec![Button::link("🔗 View on IMDb", "https://www.imdb.com/title/tt1/")],
        ];
        let markup = InlineKeyboardMarkup::from_rows(&rows).unwrap();
        let json = serde_json::to_value(&markup).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "inline_keyboard": [
                    [{"text": "📊 View My Stats", "callback_data": "stats"}],
                    [{"text": "🔗 View on IMDb", "url": "https://www.imdb.com/title/tt1/"}]
                ]
            })
        );
        assert!(InlineKeyboardMarkup::from_rows(&[]).is_none());
    }

    #[test]
    fn test_error_envelope() {
        let response: ApiResponse<Vec<Update>> =
            serde_json::from_str(r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
                .unwrap();
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }
}
