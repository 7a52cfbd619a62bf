//=========================================================================
// Panel System
//=========================================================================
//
// Manages layered UI panels with a last-shown-is-active discipline.
//
// Architecture:
//   PanelStack
//     ├─ panels: HashMap<PanelId, PanelRecord>   (arena)
//     │     └─ previous / next: Option<PanelId>  (chain links)
//     └─ commands: PanelCommands                 (deferred requests)
//
// Flow:
//   create() → push() → activate() ... close() → cascade upward
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Module Declarations =================================================

mod command_queue;
mod panel_stack;

//=== Public API ==========================================================

pub use command_queue::{PanelCommand, PanelCommands};
pub use panel_stack::{PanelStack, DEFAULT_BASE_DRAW_ORDER, DEFAULT_MAX_COMMANDS};

//=== PanelId =============================================================

/// Stable identifier of a panel inside a [`PanelStack`].
///
/// Ids are never reused by the stack that issued them, so a stale id
/// simply stops resolving once its panel has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u64);

impl PanelId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== PanelContext ========================================================

/// Handle given to panel hooks while the stack is mid-transition.
///
/// Hooks cannot borrow the stack, so they queue requests here instead.
/// Queued commands run on the next [`PanelStack::process_commands`].
pub struct PanelContext<'a> {
    id: PanelId,
    commands: &'a mut PanelCommands,
}

impl<'a> PanelContext<'a> {
    pub(crate) fn new(id: PanelId, commands: &'a mut PanelCommands) -> Self {
        Self { id, commands }
    }

    /// Id of the panel whose hook is running.
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Direct access to the deferred command queue.
    pub fn commands(&mut self) -> &mut PanelCommands {
        &mut *self.commands
    }

    /// Requests a new panel to be created and shown on top of this panel's stack.
    pub fn show<P: Panel + 'static>(&mut self, panel: P, hide_previous: bool) {
        self.commands.push(PanelCommand::Show {
            anchor: self.id,
            panel: Box::new(panel),
            hide_previous,
        });
    }

    /// Requests activation of this panel.
    pub fn activate_self(&mut self) {
        self.commands.push(PanelCommand::Activate(self.id));
    }

    /// Requests this panel (and everything above it) to be closed.
    pub fn close_self(&mut self) {
        self.commands.push(PanelCommand::Close(self.id));
    }
}

//=== Panel Trait =========================================================

/// Behaviour of one kind of panel: a policy flag plus lifecycle hooks.
///
/// Only `activate_on_create()` is required. Hooks default to no-ops:
///
/// ```rust
/// # use aetheric_ui::prelude::*;
/// struct PauseMenu;
///
/// impl Panel for PauseMenu {
///     fn activate_on_create(&self) -> bool {
///         true
///     }
/// }
/// ```
pub trait Panel {
    /// Whether the panel activates itself as soon as it is created.
    ///
    /// Panels that return `false` start transparent and non-interactive.
    fn activate_on_create(&self) -> bool;

    /// Kind label handed to [`PanelHost::create`](crate::core::host::PanelHost::create).
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once right after the host created the panel.
    fn on_init(&mut self, _context: &mut PanelContext<'_>) {}

    /// Called when the panel becomes the active panel.
    fn on_activate(&mut self, _context: &mut PanelContext<'_>) {}

    /// Called when another panel is pushed over this one.
    ///
    /// Not called for a panel that is being closed.
    fn on_deactivate(&mut self, _context: &mut PanelContext<'_>) {}

    /// Called when the panel is closed, after everything above it is gone.
    fn on_close(&mut self, _context: &mut PanelContext<'_>) {}
}

//=== Tests ===============================================================
