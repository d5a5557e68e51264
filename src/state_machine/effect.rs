//! Effects produced by state transitions

use crate::render::ControlSurface;
use crate::session::{MessageId, ThreadId};

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the new session to the store
    PersistSession,

    /// Post a new list message; yields `Event::SurfaceSent`
    SendSurface {
        thread_id: ThreadId,
        surface: ControlSurface,
    },

    /// Redraw the buttons of the tracked list message
    EditSurface {
        message_id: MessageId,
        surface: ControlSurface,
    },

    /// Remove a message from the chat
    DeleteMessage { message_id: MessageId },

    /// Strip the buttons from a list message that is no longer tracked
    RetireSurface { message_id: MessageId },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::PersistSession => "persist_session",
            Effect::SendSurface { .. } => "send_surface",
            Effect::EditSurface { .. } => "edit_surface",
            Effect::DeleteMessage { .. } => "delete_message",
            Effect::RetireSurface { .. } => "retire_surface",
        }
    }
}
