//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the panel core with the GUI host that actually draws, focuses
// and instantiates panels.
//
// The core never talks to a renderer or input system directly. Hosts
// implement these two contracts and are injected into `PanelStack`, so
// a backend can be swapped without touching the stack logic.
//
// Components:
// - `interface`: `PanelHost` and `FocusService` traits (the contract)
//
//=========================================================================

//=== Module Declarations =================================================

mod interface;

//=== Public API ==========================================================

pub use interface::{FocusService, PanelHost};
