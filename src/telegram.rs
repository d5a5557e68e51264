//! Telegram Bot API transport
//!
//! Outbound calls go through `TelegramClient`, which implements `Transport`.
//! Inbound updates are fetched by long polling in `poller`.

mod poller;
mod types;

pub use poller::UpdatePoller;

use crate::render::ControlSurface;
use crate::session::{ChatId, MessageId, ThreadId};
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use types::{
    AnswerCallbackQueryParams, ApiResponse, DeleteMessageParams, EditMessageReplyMarkupParams,
    GetUpdatesParams, InlineKeyboardMarkup, Message, SendMessageParams, Update,
};

/// Headroom on top of the long-poll wait before the HTTP client gives up
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(15);

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

/// Bot API client
pub struct TelegramClient {
    client: Client,
    /// `{api_base}/bot{token}`
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(poll_timeout + REQUEST_TIMEOUT_SLACK)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: format!("{}/bot{token}", api_base.trim_end_matches('/')),
        })
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, TransportError>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(params)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors can embed the URL, which carries the token
                let e = e.without_url();
                if e.is_timeout() {
                    TransportError::Network(format!("{method} timed out: {e}"))
                } else if e.is_connect() {
                    TransportError::Network(format!("{method} connection failed: {e}"))
                } else {
                    TransportError::Network(format!("{method} failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("Failed to read {method} response: {}", e.without_url())))?;

        // The API reports failures in the envelope as well as the status
        let envelope: ApiResponse<R> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                TransportError::Decode(format!("{method}: {e}"))
            } else {
                TransportError::Api {
                    code: i64::from(status.as_u16()),
                    description: body.clone(),
                }
            }
        })?;

        let result = envelope.into_result();
        if let Err(e) = &result {
            tracing::debug!(method, error = %e, "Bot API call failed");
        }
        result
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, TransportError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params).await
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send_message(
        &self,
        chat_id: ChatId,
        thread_id: ThreadId,
        text: &str,
        surface: &ControlSurface,
    ) -> Result<MessageId, TransportError> {
        let params = SendMessageParams {
            chat_id: chat_id.0,
            message_thread_id: (!thread_id.is_main()).then_some(thread_id.0),
            text,
            reply_markup: surface.into(),
        };
        let message: Message = self.call("sendMessage", &params).await?;
        Ok(MessageId(message.message_id))
    }

    async fn edit_message_surface(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        surface: &ControlSurface,
    ) -> Result<(), TransportError> {
        let params = EditMessageReplyMarkupParams {
            chat_id: chat_id.0,
            message_id: message_id.0,
            reply_markup: InlineKeyboardMarkup::from(surface),
        };
        // Result is the edited message, or `true` for inline messages
        let _: serde_json::Value = self.call("editMessageReplyMarkup", &params).await?;
        Ok(())
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        let params = DeleteMessageParams {
            chat_id: chat_id.0,
            message_id: message_id.0,
        };
        let _: bool = self.call("deleteMessage", &params).await?;
        Ok(())
    }

    async fn acknowledge_interaction(&self, interaction_id: &str) -> Result<(), TransportError> {
        let params = AnswerCallbackQueryParams {
            callback_query_id: interaction_id,
            show_alert: false,
        };
        let _: bool = self.call("answerCallbackQuery", &params).await?;
        Ok(())
    }
}
