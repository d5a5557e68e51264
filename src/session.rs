//! Per-chat session types
//!
//! A chat owns exactly one list plus the id of the message that currently
//! displays it. The JSON layout matches what is already stored in Redis,
//! so field names are pinned with `serde(rename)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport-assigned chat identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl ChatId {
    /// Key under which this chat's session is stored
    pub fn store_key(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier within a chat. `0` is the "never sent" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl MessageId {
    pub const UNSET: MessageId = MessageId(0);

    pub fn is_unset(self) -> bool {
        self == Self::UNSET
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thread (topic) inside a chat. `0` is the chat's main timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub i64);

impl ThreadId {
    pub const MAIN: ThreadId = ThreadId(0);

    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "bought", default)]
    pub acquired: bool,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            acquired: false,
        }
    }

    /// Button label: check mark when acquired, cross otherwise
    pub fn display_text(&self) -> String {
        if self.acquired {
            format!("✅ {}", self.name)
        } else {
            format!("❌ {}", self.name)
        }
    }
}

/// Whether a control surface has ever been sent for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Displayed,
}

/// Everything stored for one chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Display order; positions are the toggle addressing scheme
    #[serde(default, deserialize_with = "items_or_null")]
    pub items: Vec<Item>,
    #[serde(rename = "message_id", default)]
    pub rendered_message_id: MessageId,
    #[serde(rename = "message_thread_id", default)]
    pub rendered_thread_id: ThreadId,
}

impl ChatSession {
    /// Session for a chat with nothing in the store
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            rendered_message_id: MessageId::UNSET,
            rendered_thread_id: ThreadId::MAIN,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.rendered_message_id.is_unset() {
            SessionState::Uninitialized
        } else {
            SessionState::Displayed
        }
    }

    pub fn is_displayed(&self) -> bool {
        self.state() == SessionState::Displayed
    }
}

// An emptied list was historically written as `"items": null`.
fn items_or_null<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Item>>::deserialize(deserializer)?.unwrap_or_default())
}
