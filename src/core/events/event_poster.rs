//=========================================================================
// Event Poster
//=========================================================================
//
// Cross-thread entry point into the event center.
//
// Architecture:
//   worker thread → EventPoster::post() → Sender<PostedEvent>
//                                              ↓ (bounded)
//   UI thread     ← EventCenter::dispatch_posted() ← Receiver
//
// Listeners only ever run on the thread that owns the EventCenter.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt;

use crossbeam_channel::{Sender, TrySendError};

//=== PostedEvent =========================================================

/// Event queued from another thread, broadcast on the next dispatch.
pub(crate) struct PostedEvent {
    pub(crate) name: String,
    pub(crate) payload: Option<Box<dyn Any + Send>>,
}

impl fmt::Debug for PostedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostedEvent")
            .field("name", &self.name)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

//=== PostError ===========================================================

/// Reasons a posted event was not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostError {
    /// The channel is at capacity; the UI thread is falling behind.
    Full,

    /// The owning event center has been dropped.
    Disconnected,
}

impl fmt::Display for PostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "Event queue is full"),
            Self::Disconnected => write!(f, "Event center is gone"),
        }
    }
}

impl std::error::Error for PostError {}

//=== EventPoster =========================================================

/// Cloneable, `Send` handle for queueing events from any thread.
///
/// Obtained from [`EventCenter::poster`](super::EventCenter::poster).
#[derive(Debug, Clone)]
pub struct EventPoster {
    sender: Sender<PostedEvent>,
}

impl EventPoster {
    pub(crate) fn new(sender: Sender<PostedEvent>) -> Self {
        Self { sender }
    }

    /// Queues a parameterless broadcast of `name`.
    pub fn post(&self, name: impl Into<String>) -> Result<(), PostError> {
        self.send(PostedEvent {
            name: name.into(),
            payload: None,
        })
    }

    /// Queues a broadcast of `name` carrying `payload`.
    pub fn post_with<P>(&self, name: impl Into<String>, payload: P) -> Result<(), PostError>
    where
        P: Any + Send,
    {
        self.send(PostedEvent {
            name: name.into(),
            payload: Some(Box::new(payload)),
        })
    }

    fn send(&self, event: PostedEvent) -> Result<(), PostError> {
        match self.sender.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(PostError::Full),
            Err(TrySendError::Disconnected(_)) => Err(PostError::Disconnected),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
