//! Pure state transition function

use super::{Effect, Event};
use crate::list::{self, ListError};
use crate::render::{render, Action};
use crate::session::{ChatSession, MessageId};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_session: ChatSession,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: ChatSession) -> Self {
        Self {
            new_session: session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// No mutation, nothing to do
    pub fn is_ignored(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("No list has been displayed in this chat")]
    NotDisplayed,
    #[error("Button pressed on message {pressed}, but the list lives on message {current}")]
    StaleSurface {
        pressed: MessageId,
        current: MessageId,
    },
    #[error(transparent)]
    List(#[from] ListError),
}

/// Pure transition function
///
/// Given the same session and event it always produces the same result,
/// with no I/O side effects. Text that does not belong to the displayed list
/// yields an ignored result rather than an error.
pub fn transition(
    session: &ChatSession,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // Fresh list: items reset now, message id recorded once sent
        Event::StartList { thread_id } => {
            let new_session = ChatSession {
                items: list::clear(session.items.clone()),
                ..session.clone()
            };
            let surface = render(&new_session.items);
            Ok(TransitionResult::new(new_session)
                .with_effect(Effect::SendSurface { thread_id, surface }))
        }

        Event::SurfaceSent {
            message_id,
            thread_id,
        } => {
            let previous = session.rendered_message_id;
            let new_session = ChatSession {
                rendered_message_id: message_id,
                rendered_thread_id: thread_id,
                ..session.clone()
            };
            let mut result = TransitionResult::new(new_session).with_effect(Effect::PersistSession);
            if !previous.is_unset() && previous != message_id {
                result = result.with_effect(Effect::RetireSurface {
                    message_id: previous,
                });
            }
            Ok(result)
        }

        Event::IncomingText {
            thread_id,
            message_id,
            text,
        } => {
            if !session.is_displayed() || session.rendered_thread_id != thread_id {
                return Ok(TransitionResult::new(session.clone()));
            }
            let new_session = ChatSession {
                items: list::append_lines(session.items.clone(), &text),
                ..session.clone()
            };
            let surface = render(&new_session.items);
            let target = new_session.rendered_message_id;
            Ok(TransitionResult::new(new_session).with_effects([
                Effect::PersistSession,
                Effect::DeleteMessage { message_id },
                Effect::EditSurface {
                    message_id: target,
                    surface,
                },
            ]))
        }

        Event::Interaction { message_id, action } => {
            if !session.is_displayed() {
                return Err(TransitionError::NotDisplayed);
            }
            if message_id != session.rendered_message_id {
                return Err(TransitionError::StaleSurface {
                    pressed: message_id,
                    current: session.rendered_message_id,
                });
            }

            let items = session.items.clone();
            let items = match action {
                Action::Toggle(index) => list::toggle(items, index)?,
                Action::Empty => list::clear(items),
                Action::Refresh => list::prune_acquired(items),
            };
            let surface = render(&items);
            let new_session = ChatSession {
                items,
                ..session.clone()
            };
            Ok(TransitionResult::new(new_session).with_effects([
                Effect::PersistSession,
                Effect::EditSurface {
                    message_id,
                    surface,
                },
            ]))
        }
    }
}
