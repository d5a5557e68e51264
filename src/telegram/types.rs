//! Telegram Bot API wire types (the subset this bot uses)

use crate::render::ControlSurface;
use crate::session::{ChatId, MessageId, ThreadId};
use crate::transport::{Inbound, TransportError};
use serde::{Deserialize, Serialize};

/// Commands that start a fresh list
const START_COMMANDS: [&str; 2] = ["/make_list", "/start_list"];

/// Envelope around every Bot API result
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, TransportError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(TransportError::Decode("ok response without result".into())),
            (false, _) => Err(TransportError::Api {
                code: self.error_code.unwrap_or(0),
                description: self.description.unwrap_or_default(),
            }),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl From<&ControlSurface> for InlineKeyboardMarkup {
    fn from(surface: &ControlSurface) -> Self {
        Self {
            inline_keyboard: surface
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| InlineKeyboardButton {
                            text: button.label.clone(),
                            callback_data: button.action.token(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageParams<'a> {
    pub chat_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i64>,
    pub text: &'a str,
    pub reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
pub struct EditMessageReplyMarkupParams {
    pub chat_id: i64,
    pub message_id: i64,
    pub reply_markup: InlineKeyboardMarkup,
}

#[derive(Debug, Serialize)]
pub struct DeleteMessageParams {
    pub chat_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryParams<'a> {
    pub callback_query_id: &'a str,
    pub show_alert: bool,
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: &'static [&'static str],
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub message_thread_id: Option<i64>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

impl Message {
    fn thread_id(&self) -> ThreadId {
        ThreadId(self.message_thread_id.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// Map to a core event; `None` for updates the bot does not handle
    pub fn into_inbound(self) -> Option<Inbound> {
        if let Some(message) = self.message {
            let thread_id = message.thread_id();
            let chat_id = ChatId(message.chat.id);
            let text = message.text?;
            if START_COMMANDS.contains(&text.as_str()) {
                return Some(Inbound::Command { chat_id, thread_id });
            }
            return Some(Inbound::TextMessage {
                chat_id,
                thread_id,
                message_id: MessageId(message.message_id),
                text,
            });
        }

        let query = self.callback_query?;
        let message = query.message?;
        Some(Inbound::Interaction {
            chat_id: ChatId(message.chat.id),
            thread_id: message.thread_id(),
            message_id: MessageId(message.message_id),
            interaction_id: query.id,
            action_token: query.data.unwrap_or_default(),
        })
    }
}
