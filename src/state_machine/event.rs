//! Events that can occur in a chat

use crate::render::Action;
use crate::session::{MessageId, ThreadId};

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    /// Start a fresh list in `thread_id`
    StartList { thread_id: ThreadId },
    IncomingText {
        thread_id: ThreadId,
        /// The user's message, removed once its lines are on the list
        message_id: MessageId,
        text: String,
    },
    /// A button press on `message_id`
    Interaction {
        message_id: MessageId,
        action: Action,
    },

    // Transport events
    /// A `SendSurface` effect completed
    SurfaceSent {
        message_id: MessageId,
        thread_id: ThreadId,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::StartList { .. } => "start_list",
            Event::IncomingText { .. } => "incoming_text",
            Event::Interaction { .. } => "interaction",
            Event::SurfaceSent { .. } => "surface_sent",
        }
    }
}
