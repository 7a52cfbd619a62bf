//=========================================================================
// Aetheric UI — Library Root
//
// This crate defines the public API surface of the Aetheric UI layer.
//
// Responsibilities:
// - Expose the layered panel stack and its lifecycle hooks
// - Expose named events with parameter-aware listeners
// - Stay independent of any renderer or input system: hosts plug in
//   through the `PanelHost` and `FocusService` traits
//
// Typical usage:
// ```rust,ignore
// use aetheric_ui::prelude::*;
//
// let mut ui = UiBuilder::new().build(host, focus);
//
// let hud = ui.panels.create(Hud);
// let pause = ui.panels.create(PauseMenu);
// ui.panels.show(hud, pause);
//
// loop {
//     ui.update();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the panel stack, the event system and the host
// contract. Most applications only need the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `ui` defines the facade tying panels and events together.
//
mod ui;

//--- Public Exports ------------------------------------------------------

pub use ui::{Ui, UiBuilder};
