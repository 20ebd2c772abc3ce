//! Property-based tests for the send-turn state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::conversation::{ConversationStore, HistoryMode};
use crate::llm::Role;
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Submit(String),
    /// Outcome for the currently pending request (if any)
    Resolve { success: bool },
    /// Outcome for a request that is not the pending one
    Stale { success: bool },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Submit),
        any::<bool>().prop_map(|success| Op::Resolve { success }),
        any::<bool>().prop_map(|success| Op::Stale { success }),
    ]
}

fn arb_mode() -> impl Strategy<Value = HistoryMode> {
    prop_oneof![Just(HistoryMode::Full), Just(HistoryMode::LatestOnly)]
}

/// Minimal effect interpreter tracking what a presentation would show
#[derive(Default)]
struct Harness {
    state: WidgetState,
    store: ConversationStore,
    placeholders: HashSet<RequestId>,
    seen: Vec<RequestId>,
    requests: usize,
    rendered: usize,
}

impl Harness {
    fn event_for(&self, op: &Op) -> Option<Event> {
        match op {
            Op::Submit(text) => Some(Event::user_submit(text.clone())),
            Op::Resolve { success } => {
                let request_id = self.state.pending_request()?;
                Some(outcome(request_id, *success))
            }
            Op::Stale { success } => {
                let pending = self.state.pending_request();
                let request_id = self
                    .seen
                    .iter()
                    .copied()
                    .find(|id| Some(*id) != pending)
                    .unwrap_or_else(RequestId::new);
                Some(outcome(request_id, *success))
            }
        }
    }

    fn apply(&mut self, ctx: &WidgetContext, event: Event) -> Result<(), TransitionError> {
        let result = transition(&self.state, ctx, event)?;
        self.state = result.new_state;
        for effect in result.effects {
            match effect {
                Effect::ShowPlaceholder { request_id, .. } => {
                    self.placeholders.insert(request_id);
                }
                Effect::RemovePlaceholder { request_id } => {
                    assert!(self.placeholders.remove(&request_id), "removed unknown placeholder");
                }
                Effect::AppendTurn { turn } => {
                    self.store.append_turn(turn.role, turn.content).unwrap();
                }
                Effect::RequestCompletion { request_id, .. } => {
                    self.seen.push(request_id);
                    self.requests += 1;
                }
                Effect::RenderMessage { .. } => self.rendered += 1,
                Effect::ClearInput | Effect::ShowPanel | Effect::HidePanel => {}
            }
        }
        Ok(())
    }
}

fn outcome(request_id: RequestId, success: bool) -> Event {
    if success {
        Event::CompletionSucceeded {
            request_id,
            reply: "reply".to_string(),
        }
    } else {
        Event::CompletionFailed { request_id }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// At most one placeholder is ever visible, and it belongs to the pending request
    #[test]
    fn single_placeholder_tracks_pending(mode in arb_mode(), ops in proptest::collection::vec(arb_op(), 0..40)) {
        let ctx = WidgetContext::new(mode);
        let mut h = Harness::default();

        for op in &ops {
            let Some(event) = h.event_for(op) else { continue };
            let _ = h.apply(&ctx, event);

            prop_assert!(h.placeholders.len() <= 1);
            match h.state.pending_request() {
                Some(id) => prop_assert!(h.placeholders.contains(&id)),
                None => prop_assert!(h.placeholders.is_empty()),
            }
        }
    }

    /// Rejected events leave state, store and presentation untouched
    #[test]
    fn rejected_events_have_no_effects(mode in arb_mode(), ops in proptest::collection::vec(arb_op(), 0..40)) {
        let ctx = WidgetContext::new(mode);
        let mut h = Harness::default();

        for op in &ops {
            let Some(event) = h.event_for(op) else { continue };
            let before_state = h.state;
            let before_len = h.store.len();
            let before_requests = h.requests;
            let before_rendered = h.rendered;

            if h.apply(&ctx, event).is_err() {
                prop_assert_eq!(h.state, before_state);
                prop_assert_eq!(h.store.len(), before_len);
                prop_assert_eq!(h.requests, before_requests);
                prop_assert_eq!(h.rendered, before_rendered);
            }
        }
    }

    /// Sequential round-trips in full mode grow the store by two turns per
    /// success, alternating user/assistant after the system turn
    #[test]
    fn full_mode_round_trips_alternate(outcomes in proptest::collection::vec(any::<bool>(), 0..15)) {
        let ctx = WidgetContext::new(HistoryMode::Full);
        let mut h = Harness {
            store: ConversationStore::new(Some("system".to_string())),
            ..Harness::default()
        };

        for (i, success) in outcomes.iter().enumerate() {
            h.apply(&ctx, Event::user_submit(format!("message {i}"))).unwrap();
            let id = h.state.pending_request().unwrap();
            h.apply(&ctx, outcome(id, *success)).unwrap();
            prop_assert_eq!(h.state, WidgetState::Idle);
        }

        let successes = outcomes.iter().filter(|s| **s).count();
        prop_assert_eq!(h.store.len(), 1 + outcomes.len() + successes);
        prop_assert_eq!(h.store.turns()[0].role, Role::System);

        if outcomes.iter().all(|s| *s) {
            for (i, turn) in h.store.turns()[1..].iter().enumerate() {
                let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
                prop_assert_eq!(turn.role, expected);
            }
        }
    }

    /// Latest-only mode never grows the store
    #[test]
    fn latest_only_never_records(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let ctx = WidgetContext::new(HistoryMode::LatestOnly);
        let mut h = Harness::default();

        for op in &ops {
            let Some(event) = h.event_for(op) else { continue };
            let _ = h.apply(&ctx, event);
        }
        prop_assert!(h.store.is_empty());
    }
}
