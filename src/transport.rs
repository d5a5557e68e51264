//! Message transport abstraction
//!
//! The controller only ever talks to the chat platform through `Transport`,
//! so tests can swap in a recording fake.

use crate::render::ControlSurface;
use crate::session::{ChatId, MessageId, ThreadId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error {code}: {description}")]
    Api { code: i64, description: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Outbound operations the controller needs
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post a new message carrying `surface`, returning its id
    async fn send_message(
        &self,
        chat_id: ChatId,
        thread_id: ThreadId,
        text: &str,
        surface: &ControlSurface,
    ) -> Result<MessageId, TransportError>;

    /// Replace the buttons of an existing message
    async fn edit_message_surface(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        surface: &ControlSurface,
    ) -> Result<(), TransportError>;

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError>;

    /// Dismiss the client's pending state for a button press, without an alert
    async fn acknowledge_interaction(&self, interaction_id: &str) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send_message(
        &self,
        chat_id: ChatId,
        thread_id: ThreadId,
        text: &str,
        surface: &ControlSurface,
    ) -> Result<MessageId, TransportError> {
        (**self).send_message(chat_id, thread_id, text, surface).await
    }

    async fn edit_message_surface(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        surface: &ControlSurface,
    ) -> Result<(), TransportError> {
        (**self).edit_message_surface(chat_id, message_id, surface).await
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        (**self).delete_message(chat_id, message_id).await
    }

    async fn acknowledge_interaction(&self, interaction_id: &str) -> Result<(), TransportError> {
        (**self).acknowledge_interaction(interaction_id).await
    }
}

/// Event delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// The "make a new list" command
    Command { chat_id: ChatId, thread_id: ThreadId },
    TextMessage {
        chat_id: ChatId,
        thread_id: ThreadId,
        message_id: MessageId,
        text: String,
    },
    /// A button press on a message we sent
    Interaction {
        chat_id: ChatId,
        thread_id: ThreadId,
        message_id: MessageId,
        interaction_id: String,
        action_token: String,
    },
}

impl Inbound {
    pub fn chat_id(&self) -> ChatId {
        match self {
            Inbound::Command { chat_id, .. }
            | Inbound::TextMessage { chat_id, .. }
            | Inbound::Interaction { chat_id, .. } => *chat_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Inbound::Command { .. } => "command",
            Inbound::TextMessage { .. } => "text",
            Inbound::Interaction { .. } => "interaction",
        }
    }
}
