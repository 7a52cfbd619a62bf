//=========================================================================
// Core Systems
//
// Host-independent UI logic.
//
// Responsibilities:
// - Keep layered panels in chains and drive their lifecycle (`panel`)
// - Dispatch named events to parameter-aware listeners (`events`)
// - Define the contract hosts implement (`host`)
//
// Notes:
// Everything here runs on the host's single UI thread. The only
// cross-thread surface is `events::EventPoster`.
//
//=========================================================================

//=== Public Modules ======================================================

pub mod events;
pub mod host;
pub mod panel;
