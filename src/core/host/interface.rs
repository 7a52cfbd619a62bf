//=========================================================================
// Host Interface
//=========================================================================
//
// Host-to-core contract for panel objects and input focus.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;

//=== PanelHost ===========================================================

/// Creates, destroys and presents panel instances on behalf of the stack.
///
/// The stack only decides *when* a panel is shown, hidden or torn down.
/// The host owns the visual object behind each [`PanelHost::Handle`].
pub trait PanelHost {
    /// Host-side reference to one panel object.
    type Handle: Clone + Debug;

    /// Instantiates the visual object for a panel of the given kind.
    fn create(&mut self, kind: &str, activate_on_create: bool) -> Self::Handle;

    /// Destroys the visual object. The handle is not used again afterwards.
    fn destroy(&mut self, handle: &Self::Handle);

    /// Sets the panel fully opaque (`true`) or fully transparent (`false`).
    fn set_visible(&mut self, handle: &Self::Handle, opaque: bool);

    /// Enables or disables input on the panel.
    fn set_interactive(&mut self, handle: &Self::Handle, interactive: bool);

    /// Sets the draw order. Higher values draw on top.
    fn set_draw_order(&mut self, handle: &Self::Handle, order: i32);

    /// Makes sure the panel object is enabled in the host's scene.
    fn enable(&mut self, handle: &Self::Handle);

    /// Human readable host-level name, used in diagnostics.
    fn name(&self, handle: &Self::Handle) -> String {
        format!("{:?}", handle)
    }
}

//=== FocusService ========================================================

/// Tracks the single globally focused interactive element.
pub trait FocusService {
    /// Element type the host can focus.
    type Element;

    /// Drops the current focus, if any.
    fn clear_focus(&mut self);

    /// Focuses the given element.
    fn set_focus(&mut self, element: Self::Element);
}
