//=========================================================================
// Aetheric UI
//
// Main entry point and coordinator for the UI layer.
//
// Architecture:
// ```text
//     UiBuilder  ──build(host, focus)──>  Ui  ──update()──>  [one tick]
//         │                               │
//         ├─ with_base_draw_order()       ├─ events.dispatch_posted()
//         ├─ with_event_capacity()        └─ panels.process_commands()
//         └─ with_max_dispatch()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventCenter, DEFAULT_EVENT_CAPACITY, DEFAULT_MAX_DISPATCH};
use crate::core::host::{FocusService, PanelHost};
use crate::core::panel::{PanelStack, DEFAULT_BASE_DRAW_ORDER};

//=== UiBuilder ===========================================================

/// Builder for configuring and constructing a [`Ui`].
///
/// # Default Values
///
/// - **Base draw order**: 1 (draw order of a freshly created panel)
/// - **Event capacity**: 128 posted events
/// - **Max dispatch**: 100 posted events and 100 panel commands per tick
///
/// # Examples
///
/// ```rust,ignore
/// let mut ui = UiBuilder::new()
///     .with_base_draw_order(10)
///     .with_event_capacity(256)
///     .build(host, focus);
///
/// let hud = ui.panels.create(Hud);
/// ui.update();
/// ```
pub struct UiBuilder {
    base_draw_order: i32,
    event_capacity: usize,
    max_dispatch: usize,
}

impl UiBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_draw_order: DEFAULT_BASE_DRAW_ORDER,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            max_dispatch: DEFAULT_MAX_DISPATCH,
        }
    }

    /// Sets the draw order given to freshly created panels.
    ///
    /// Each pushed panel draws one above the panel below it.
    ///
    /// Default: 1
    pub fn with_base_draw_order(mut self, order: i32) -> Self {
        self.base_draw_order = order;
        self
    }

    /// Sets the channel capacity for events posted from other threads.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Event capacity must be positive");
        self.event_capacity = capacity;
        self
    }

    /// Sets how many posted events and panel commands one tick handles.
    ///
    /// Anything beyond the bound waits for the next tick.
    ///
    /// Default: 100
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_dispatch(mut self, max: usize) -> Self {
        assert!(max > 0, "Max dispatch must be positive");
        self.max_dispatch = max;
        self
    }

    /// Builds the UI, clearing the host's focus once.
    pub fn build<H: PanelHost, F: FocusService>(self, host: H, focus: F) -> Ui<H, F> {
        info!(
            "Building UI (base draw order: {}, event capacity: {}, max dispatch: {})",
            self.base_draw_order, self.event_capacity, self.max_dispatch
        );

        Ui {
            panels: PanelStack::with_settings(host, focus, self.base_draw_order, self.max_dispatch),
            events: EventCenter::with_settings(self.event_capacity, self.max_dispatch),
        }
    }
}

impl Default for UiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Ui ==================================================================

/// Panel stack plus event center, ticked together on the UI thread.
///
/// # Tick Pipeline
///
/// 1. **Posted events**: broadcasts events queued by other threads
/// 2. **Panel commands**: applies show/activate/close requests queued by hooks
pub struct Ui<H: PanelHost, F: FocusService> {
    /// Layered panels and their lifecycle.
    pub panels: PanelStack<H, F>,

    /// Named events and listeners.
    pub events: EventCenter,
}

impl<H: PanelHost, F: FocusService> Ui<H, F> {
    /// Runs one UI tick.
    pub fn update(&mut self) {
        let events = self.events.dispatch_posted();
        let commands = self.panels.process_commands();

        if events > 0 || commands > 0 {
            debug!("UI tick: {} events, {} panel commands", events, commands);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
