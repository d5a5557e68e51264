//! Session persistence
//!
//! `KvStore` is the opaque byte store (Redis in production); `SessionStore`
//! owns the JSON encoding of a `ChatSession` on top of it.

mod redis_kv;

pub use redis_kv::RedisKv;

use crate::session::{ChatId, ChatSession};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Corrupt session payload for chat {chat_id}: {reason}")]
    Corrupt { chat_id: ChatId, reason: String },
}

/// Opaque get/set by string key
#[async_trait]
pub trait KvStore: Send + Sync {
    /// `Ok(None)` is a miss, not an error
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }
}

/// A session as read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub session: ChatSession,
    /// False when nothing was stored and `session` is `ChatSession::empty()`
    pub found: bool,
}

/// Typed session access over a `KvStore`
#[derive(Clone)]
pub struct SessionStore<K> {
    kv: K,
}

impl<K: KvStore> SessionStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    #[allow(dead_code)] // Used by tests to inspect raw payloads
    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub async fn load(&self, chat_id: ChatId) -> Result<Loaded, StoreError> {
        let Some(bytes) = self.kv.get(&chat_id.store_key()).await? else {
            return Ok(Loaded {
                session: ChatSession::empty(),
                found: false,
            });
        };

        let session = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            chat_id,
            reason: e.to_string(),
        })?;
        Ok(Loaded {
            session,
            found: true,
        })
    }

    /// Overwrite the whole stored session
    pub async fn save(&self, chat_id: ChatId, session: &ChatSession) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(session).map_err(|e| StoreError::Corrupt {
            chat_id,
            reason: e.to_string(),
        })?;
        self.kv.set(&chat_id.store_key(), bytes).await
    }
}
