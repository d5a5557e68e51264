//! Session controller
//!
//! Drives one inbound event through the state machine: load the chat's
//! session, run the pure transition, then carry out the resulting effects
//! against the store and the transport. Events for the same chat are
//! serialized; different chats proceed in parallel.


use crate::render::{Action, ControlSurface, SURFACE_TITLE};
use crate::session::{ChatId, ChatSession};
use crate::state_machine::{transition, Effect, Event, TransitionError};
use crate::store::{KvStore, SessionStore, StoreError};
use crate::transport::{Inbound, Transport, TransportError};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lock entries are swept once the map grows past this
const LOCK_SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Transport failed during {step}: {source}")]
    Transport {
        step: &'static str,
        source: TransportError,
    },
    #[error("Event rejected: {0}")]
    Rejected(#[from] TransitionError),
}

/// How an event ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Not addressed to the displayed list; nothing changed
    Ignored,
}

/// One async mutex per chat
#[derive(Default)]
struct ChatLocks {
    locks: Mutex<HashMap<ChatId, Arc<Mutex<()>>>>,
}

impl ChatLocks {
    async fn acquire(&self, chat_id: ChatId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            if locks.len() > LOCK_SWEEP_THRESHOLD {
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            Arc::clone(locks.entry(chat_id).or_default())
        };
        lock.lock_owned().await
    }
}

pub struct SessionController<K, T> {
    store: SessionStore<K>,
    transport: T,
    locks: ChatLocks,
}

impl<K, T> SessionController<K, T>
where
    K: KvStore,
    T: Transport,
{
    pub fn new(store: SessionStore<K>, transport: T) -> Self {
        Self {
            store,
            transport,
            locks: ChatLocks::default(),
        }
    }

    #[allow(dead_code)] // Used by tests
    pub fn store(&self) -> &SessionStore<K> {
        &self.store
    }

    /// Handle an event and log how it ended. Never fails the caller.
    pub async fn dispatch(&self, inbound: Inbound) {
        let chat_id = inbound.chat_id();
        let kind = inbound.kind();
        match self.handle(inbound).await {
            Ok(Outcome::Applied) => {
                tracing::debug!(chat_id = %chat_id, kind, "Event applied");
            }
            Ok(Outcome::Ignored) => {
                tracing::debug!(chat_id = %chat_id, kind, "Event ignored");
            }
            Err(ControllerError::Rejected(e)) => {
                tracing::warn!(chat_id = %chat_id, kind, error = %e, "Event dropped");
            }
            Err(e) => {
                tracing::error!(chat_id = %chat_id, kind, error = %e, "Event failed");
            }
        }
    }

    /// Run one inbound event to completion or to its first failure
    pub async fn handle(&self, inbound: Inbound) -> Result<Outcome, ControllerError> {
        let chat_id = inbound.chat_id();
        let Some(event) = self.accept(inbound).await? else {
            return Ok(Outcome::Ignored);
        };

        let _guard = self.locks.acquire(chat_id).await;
        let loaded = self.store.load(chat_id).await?;
        if !loaded.found {
            tracing::debug!(chat_id = %chat_id, "No stored session, starting empty");
        }
        let mut session = loaded.session;

        let mut events_to_process = vec![event];
        let mut applied = false;

        while let Some(current_event) = events_to_process.pop() {
            let event_name = current_event.name();
            let result = transition(&session, current_event)?;
            if result.is_ignored() {
                tracing::debug!(chat_id = %chat_id, event = event_name, "No effects");
                continue;
            }
            applied = true;
            session = result.new_session;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(chat_id, &session, effect).await? {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(if applied {
            Outcome::Applied
        } else {
            Outcome::Ignored
        })
    }

    /// Turn a transport event into a state machine event.
    ///
    /// Button presses are acknowledged here, before the session is touched,
    /// so the client stops spinning whatever happens next.
    async fn accept(&self, inbound: Inbound) -> Result<Option<Event>, ControllerError> {
        match inbound {
            Inbound::Command { thread_id, .. } => Ok(Some(Event::StartList { thread_id })),
            Inbound::TextMessage {
                thread_id,
                message_id,
                text,
                ..
            } => Ok(Some(Event::IncomingText {
                thread_id,
                message_id,
                text,
            })),
            Inbound::Interaction {
                chat_id,
                message_id,
                interaction_id,
                action_token,
                ..
            } => {
                self.transport
                    .acknowledge_interaction(&interaction_id)
                    .await
                    .map_err(|source| ControllerError::Transport {
                        step: "acknowledge",
                        source,
                    })?;

                if let Some(action) = Action::parse(&action_token) {
                    Ok(Some(Event::Interaction { message_id, action }))
                } else {
                    tracing::warn!(chat_id = %chat_id, token = %action_token, "Unknown action token");
                    Ok(None)
                }
            }
        }
    }

    async fn execute_effect(
        &self,
        chat_id: ChatId,
        session: &ChatSession,
        effect: Effect,
    ) -> Result<Option<Event>, ControllerError> {
        let step = effect.name();
        let transport_err = |source| ControllerError::Transport { step, source };

        match effect {
            Effect::PersistSession => {
                self.store.save(chat_id, session).await?;
                Ok(None)
            }

            Effect::SendSurface { thread_id, surface } => {
                let message_id = self
                    .transport
                    .send_message(chat_id, thread_id, SURFACE_TITLE, &surface)
                    .await
                    .map_err(transport_err)?;
                tracing::info!(chat_id = %chat_id, message_id = %message_id, "List message sent");
                Ok(Some(Event::SurfaceSent {
                    message_id,
                    thread_id,
                }))
            }

            Effect::EditSurface {
                message_id,
                surface,
            } => {
                self.transport
                    .edit_message_surface(chat_id, message_id, &surface)
                    .await
                    .map_err(transport_err)?;
                Ok(None)
            }

            Effect::DeleteMessage { message_id } => {
                self.transport
                    .delete_message(chat_id, message_id)
                    .await
                    .map_err(transport_err)?;
                Ok(None)
            }

            Effect::RetireSurface { message_id } => {
                self.transport
                    .edit_message_surface(chat_id, message_id, &ControlSurface::default())
                    .await
                    .map_err(transport_err)?;
                tracing::debug!(chat_id = %chat_id, message_id = %message_id, "Old list message retired");
                Ok(None)
            }
        }
    }
}
