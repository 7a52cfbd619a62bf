//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_ui::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Facade
pub use crate::ui::{Ui, UiBuilder};

// Host contract
pub use crate::core::host::{FocusService, PanelHost};

// Panel system
pub use crate::core::panel::{Panel, PanelCommand, PanelCommands, PanelContext, PanelId, PanelStack};

// Event system
pub use crate::core::events::{
    CallbackListener, DynamicListener, EventCenter, EventListener, EventPoster, ListenerId,
    PostError, TypedListener,
};
