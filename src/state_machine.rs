//! Per-chat list state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! transition function never performs I/O, it returns the next session plus
//! the effects the controller must carry out.

mod effect;
pub mod event;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use transition::{transition, TransitionError};
