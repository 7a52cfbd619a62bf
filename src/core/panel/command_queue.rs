//=========================================================================
// Panel Command Queue
//=========================================================================
//
// Queue for deferred panel transitions.
//
// Hooks queue commands here while the stack is mid-transition. The stack
// processes this queue at tick boundaries, FIFO.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;

//=== Internal Dependencies ===============================================

use super::{Panel, PanelId};

//=== Panel Command =======================================================

/// A deferred panel stack operation.
pub enum PanelCommand {
    /// Creates `panel` and pushes it on top of `anchor`'s stack.
    Show {
        anchor: PanelId,
        panel: Box<dyn Panel>,
        hide_previous: bool,
    },

    /// Activates a panel (warns if it is not a top panel).
    Activate(PanelId),

    /// Closes a panel and everything above it.
    Close(PanelId),
}

impl fmt::Debug for PanelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show { anchor, panel, hide_previous } => f
                .debug_struct("Show")
                .field("anchor", anchor)
                .field("panel", &panel.kind())
                .field("hide_previous", hide_previous)
                .finish(),
            Self::Activate(id) => f.debug_tuple("Activate").field(id).finish(),
            Self::Close(id) => f.debug_tuple("Close").field(id).finish(),
        }
    }
}

//=== Panel Commands ======================================================

/// FIFO queue of [`PanelCommand`]s.
pub struct PanelCommands {
    queue: VecDeque<PanelCommand>,
}

impl PanelCommands {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    /// Queues a command to be processed at the next tick boundary.
    pub fn push(&mut self, command: PanelCommand) {
        self.queue.push_back(command);
    }

    /// Removes the oldest queued command.
    pub(crate) fn pop(&mut self) -> Option<PanelCommand> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued commands.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drops all queued commands.
    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all commands from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<PanelCommand> {
        std::mem::take(&mut self.queue).into()
    }
}

impl Default for PanelCommands {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
