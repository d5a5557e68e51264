//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::render::{render, Action};
use crate::session::{ChatSession, Item, MessageId, ThreadId};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_item() -> impl Strategy<Value = Item> {
    ("[a-z]{1,8}", any::<bool>()).prop_map(|(name, acquired)| Item { name, acquired })
}

fn arb_session() -> impl Strategy<Value = ChatSession> {
    (
        proptest::collection::vec(arb_item(), 0..8),
        prop_oneof![Just(0i64), 1i64..5],
        0i64..3,
    )
        .prop_map(|(items, message_id, thread_id)| ChatSession {
            items,
            rendered_message_id: MessageId(message_id),
            rendered_thread_id: ThreadId(thread_id),
        })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0usize..10).prop_map(Action::Toggle),
        Just(Action::Empty),
        Just(Action::Refresh),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (0i64..3).prop_map(|t| Event::StartList {
            thread_id: ThreadId(t)
        }),
        (0i64..3, 10i64..20, "[a-z\n]{0,20}").prop_map(|(t, m, text)| Event::IncomingText {
            thread_id: ThreadId(t),
            message_id: MessageId(m),
            text,
        }),
        (1i64..5, arb_action()).prop_map(|(m, action)| Event::Interaction {
            message_id: MessageId(m),
            action,
        }),
        (1i64..5, 0i64..3).prop_map(|(m, t)| Event::SurfaceSent {
            message_id: MessageId(m),
            thread_id: ThreadId(t),
        }),
    ]
}

proptest! {
    /// Every redraw shows exactly the list that is persisted alongside it
    #[test]
    fn redraw_matches_new_session(session in arb_session(), event in arb_event()) {
        if let Ok(result) = transition(&session, event) {
            for effect in &result.effects {
                match effect {
                    Effect::EditSurface { surface, .. } | Effect::SendSurface { surface, .. } => {
                        prop_assert_eq!(surface, &render(&result.new_session.items));
                    }
                    _ => {}
                }
            }
        }
    }

    /// Redraws of a displayed list never create a second message
    #[test]
    fn displayed_sessions_are_edited_in_place(session in arb_session(), event in arb_event()) {
        let is_start = matches!(event, Event::StartList { .. });
        if let Ok(result) = transition(&session, event) {
            if !is_start {
                let sends = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::SendSurface { .. }));
                prop_assert!(!sends);
            }
            for effect in &result.effects {
                if let Effect::EditSurface { message_id, .. } = effect {
                    prop_assert_eq!(*message_id, result.new_session.rendered_message_id);
                }
            }
        }
    }

    /// The store is written before anything visible happens
    #[test]
    fn persist_precedes_visible_mutation(session in arb_session(), event in arb_event()) {
        let is_start = matches!(event, Event::StartList { .. });
        if let Ok(result) = transition(&session, event) {
            if !is_start && !result.is_ignored() {
                prop_assert_eq!(&result.effects[0], &Effect::PersistSession);
            }
        }
    }

    /// Button presses never move the tracked message
    #[test]
    fn interactions_keep_surface_identity(session in arb_session(), message in 1i64..5, action in arb_action()) {
        let event = Event::Interaction { message_id: MessageId(message), action };
        if let Ok(result) = transition(&session, event) {
            prop_assert_eq!(result.new_session.rendered_message_id, session.rendered_message_id);
            prop_assert_eq!(result.new_session.rendered_thread_id, session.rendered_thread_id);
        }
    }

    /// Once displayed, only an explicit reset changes the message id
    #[test]
    fn displayed_stays_displayed(session in arb_session(), event in arb_event()) {
        if let Ok(result) = transition(&session, event) {
            if session.is_displayed() {
                prop_assert!(result.new_session.is_displayed());
            }
        }
    }

    /// Ignored events leave the session exactly as it was
    #[test]
    fn ignored_events_do_not_mutate(session in arb_session(), event in arb_event()) {
        if let Ok(result) = transition(&session, event) {
            if result.is_ignored() {
                prop_assert_eq!(result.new_session, session);
            }
        }
    }
}
