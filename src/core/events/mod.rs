//=========================================================================
// Event System
//=========================================================================
//
// Named events with parameter-aware listeners.
//
// Architecture:
//   EventCenter
//     ├─ events: HashMap<String, Vec<Box<dyn EventListener>>>
//     └─ channel ← EventPoster (other threads)
//
// Pattern: add_listener → broadcast / dispatch_posted → remove_listener
//
//=========================================================================

//=== Module Declarations =================================================

mod event_center;
mod event_poster;
mod listener;

//=== Public API ==========================================================

pub use event_center::{EventCenter, ListenerId, DEFAULT_EVENT_CAPACITY, DEFAULT_MAX_DISPATCH};
pub use event_poster::{EventPoster, PostError};
pub use listener::{CallbackListener, DynamicListener, EventListener, TypedListener};
