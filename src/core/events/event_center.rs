//=========================================================================
// Event Center
//=========================================================================
//
// Named-event registry dispatching to parameter-aware listeners.
//
// Architecture:
//   add_listener(name) → HashMap<String, Vec<Registration>>
//                              ↓
//   broadcast(name) / broadcast_with(name, &param) → listeners, in order
//                              ↑
//   EventPoster (any thread) → channel → dispatch_posted() (UI thread)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::event_poster::{EventPoster, PostedEvent};
use super::EventListener;

//=== Defaults ============================================================

/// Capacity of the cross-thread event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 128;

/// Upper bound of posted events dispatched per `dispatch_posted` call.
pub const DEFAULT_MAX_DISPATCH: usize = 100;

//=== ListenerId ==========================================================

/// Handle returned by [`EventCenter::add_listener`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    listener: Box<dyn EventListener>,
}

//=========================================================================

/// Registry of named events and their listeners.
///
/// Broadcasts run synchronously on the calling thread. Other threads
/// reach the center through an [`EventPoster`]; their events are
/// broadcast on the next [`EventCenter::dispatch_posted`].
pub struct EventCenter {
    events: HashMap<String, Vec<Registration>>,
    next_id: u64,
    sender: Sender<PostedEvent>,
    receiver: Receiver<PostedEvent>,
    max_dispatch: usize,
}

impl EventCenter {
    /// Creates an empty event center with default settings.
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_EVENT_CAPACITY, DEFAULT_MAX_DISPATCH)
    }

    /// Creates an empty event center.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0` or `max_dispatch == 0`.
    pub fn with_settings(capacity: usize, max_dispatch: usize) -> Self {
        assert!(capacity > 0, "Event capacity must be positive");
        assert!(max_dispatch > 0, "Dispatch bound must be positive");

        let (sender, receiver) = bounded(capacity);

        EventCenter {
            events: HashMap::new(),
            next_id: 1,
            sender,
            receiver,
            max_dispatch,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `listener` for `name`. Listeners fire in registration order.
    pub fn add_listener<L>(&mut self, name: impl Into<String>, listener: L) -> ListenerId
    where
        L: EventListener + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        self.events.entry(name.into()).or_default().push(Registration {
            id,
            listener: Box::new(listener),
        });

        id
    }

    /// Removes a listener. Returns false if it was not registered for `name`.
    pub fn remove_listener(&mut self, name: &str, id: ListenerId) -> bool {
        let Some(registrations) = self.events.get_mut(name) else {
            return false;
        };

        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        before != registrations.len()
    }

    /// Removes every listener of `name`, keeping the allocation.
    pub fn clear(&mut self, name: &str) {
        if let Some(registrations) = self.events.get_mut(name) {
            registrations.clear();
        }
    }

    /// Removes every listener of every event.
    pub fn clear_all(&mut self) {
        for registrations in self.events.values_mut() {
            registrations.clear();
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn listener_count(&self, name: &str) -> usize {
        self.events.get(name).map(|r| r.len()).unwrap_or(0)
    }

    pub fn has_listeners(&self, name: &str) -> bool {
        self.listener_count(name) > 0
    }

    /// Number of posted events waiting for dispatch.
    pub fn pending_posted(&self) -> usize {
        self.receiver.len()
    }

    //--- Broadcasting -----------------------------------------------------

    /// Broadcasts `name` without a parameter.
    pub fn broadcast(&mut self, name: &str) {
        match self.events.get_mut(name) {
            Some(registrations) => {
                for registration in registrations.iter_mut() {
                    registration.listener.invoke();
                }
            }
            None => debug!("No listeners for event \"{}\"", name),
        }
    }

    /// Broadcasts `name` carrying `parameter`.
    pub fn broadcast_with<P: Any>(&mut self, name: &str, parameter: &P) {
        self.broadcast_dyn(name, parameter);
    }

    fn broadcast_dyn(&mut self, name: &str, parameter: &dyn Any) {
        match self.events.get_mut(name) {
            Some(registrations) => {
                for registration in registrations.iter_mut() {
                    registration.listener.invoke_with(parameter);
                }
            }
            None => debug!("No listeners for event \"{}\"", name),
        }
    }

    //--- Cross-thread Posting ---------------------------------------------

    /// Returns a handle other threads can post events through.
    pub fn poster(&self) -> EventPoster {
        EventPoster::new(self.sender.clone())
    }

    /// Broadcasts events posted from other threads, oldest first.
    ///
    /// Bounded per call to prevent starvation. Returns the number of
    /// events dispatched.
    pub fn dispatch_posted(&mut self) -> usize {
        let mut dispatched = 0;

        while dispatched < self.max_dispatch {
            match self.receiver.try_recv() {
                Ok(event) => {
                    match event.payload {
                        Some(payload) => self.broadcast_dyn(&event.name, &*payload),
                        None => self.broadcast(&event.name),
                    }
                    dispatched += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if !self.receiver.is_empty() {
            warn!(
                "Event queue backlog: {} left after dispatching {}",
                self.receiver.len(),
                dispatched
            );
        }

        dispatched
    }
}

impl Default for EventCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCenter")
            .field("events", &self.events.len())
            .field("pending", &self.receiver.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================
