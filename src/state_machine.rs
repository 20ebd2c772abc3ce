//! Send-turn state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{RequestId, WidgetContext, WidgetState};
pub use transition::{transition, TransitionError};

#[allow(unused_imports)] // Public API re-exports
pub use state::{COMPLETION_ERROR_MESSAGE, PENDING_PLACEHOLDER};
#[allow(unused_imports)] // Public API re-exports
pub use transition::TransitionResult;
