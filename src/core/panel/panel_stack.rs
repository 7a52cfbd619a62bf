//=========================================================================
// Panel Stack
//=========================================================================
//
// Manages panel creation, stack operations, and lifecycle.
//
// Panels live in an arena keyed by `PanelId`. Each record links to its
// neighbours by id, so every chain (root → top) is a doubly linked list
// without ownership cycles. Root and top are always found by walking.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Panel, PanelCommand, PanelCommands, PanelContext, PanelId};
use crate::core::host::{FocusService, PanelHost};

//=== Defaults ============================================================

/// Draw order given to a freshly created panel.
pub const DEFAULT_BASE_DRAW_ORDER: i32 = 1;

/// Upper bound of deferred commands applied per `process_commands` call.
pub const DEFAULT_MAX_COMMANDS: usize = 100;

//=== Hook ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hook {
    Init,
    Activate,
    Deactivate,
    Close,
}

//=== Panel Record ========================================================

struct PanelRecord<H> {
    handle: H,
    panel: Box<dyn Panel>,
    active: bool,
    opaque: bool,
    closing: bool,
    draw_order: i32,
    previous: Option<PanelId>,
    next: Option<PanelId>,
}

//=== Panel Stack =========================================================

/// Arena of panels arranged in chains, bottom (root) to top.
///
/// The top panel of a chain is the only one that may be active. Pushing
/// displaces the old top, closing cascades upward and re-activates the
/// panel exposed underneath.
///
/// # Example
///
/// ```rust,ignore
/// let mut stack = PanelStack::new(host, focus);
///
/// let hud = stack.create(Hud);
/// let menu = stack.create(PauseMenu);
/// stack.show(hud, menu);        // hud hidden + deactivated, menu active
///
/// stack.close(menu);            // hud active again
/// ```
pub struct PanelStack<H: PanelHost, F: FocusService> {
    host: H,
    focus: F,
    panels: HashMap<PanelId, PanelRecord<H::Handle>>,
    commands: PanelCommands,
    next_id: u64,
    base_draw_order: i32,
    max_commands: usize,
}

impl<H: PanelHost, F: FocusService> PanelStack<H, F> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty stack with default settings.
    ///
    /// Clears the global focus once; the stack never touches focus again
    /// unless [`PanelStack::select_element`] is called.
    pub fn new(host: H, focus: F) -> Self {
        Self::with_settings(host, focus, DEFAULT_BASE_DRAW_ORDER, DEFAULT_MAX_COMMANDS)
    }

    /// Creates an empty stack with explicit settings.
    ///
    /// # Panics
    ///
    /// Panics if `max_commands == 0`.
    pub fn with_settings(host: H, mut focus: F, base_draw_order: i32, max_commands: usize) -> Self {
        assert!(max_commands > 0, "Command bound must be positive");

        focus.clear_focus();
        debug!("Panel stack ready (base draw order: {})", base_draw_order);

        Self {
            host,
            focus,
            panels: HashMap::new(),
            commands: PanelCommands::new(),
            next_id: 1,
            base_draw_order,
            max_commands,
        }
    }

    //--- Creation ---------------------------------------------------------

    /// Creates a panel through the host and runs its init hook.
    ///
    /// The new panel forms a chain of its own. It is activated right away
    /// if [`Panel::activate_on_create`] says so, otherwise it starts
    /// transparent and non-interactive.
    pub fn create<P: Panel + 'static>(&mut self, panel: P) -> PanelId {
        self.create_boxed(Box::new(panel))
    }

    /// Same as [`PanelStack::create`] for an already boxed panel.
    pub fn create_boxed(&mut self, panel: Box<dyn Panel>) -> PanelId {
        let id = PanelId::new(self.next_id);
        self.next_id += 1;

        let activate_on_create = panel.activate_on_create();
        let handle = self.host.create(panel.kind(), activate_on_create);
        self.host.set_draw_order(&handle, self.base_draw_order);
        self.host.enable(&handle);

        debug!("Created panel {} ({})", id, panel.kind());

        self.panels.insert(
            id,
            PanelRecord {
                handle,
                panel,
                active: false,
                opaque: false,
                closing: false,
                draw_order: self.base_draw_order,
                previous: None,
                next: None,
            },
        );

        self.fire(id, Hook::Init);

        if activate_on_create {
            self.activate(id);
        } else if let Some(record) = self.panels.get_mut(&id) {
            self.host.set_visible(&record.handle, false);
            self.host.set_interactive(&record.handle, false);
            record.opaque = false;
            record.active = false;
        }

        id
    }

    //--- Stack Operations -------------------------------------------------

    /// Pushes `panel` on top of `anchor`'s chain, hiding the old top.
    pub fn show(&mut self, anchor: PanelId, panel: PanelId) {
        self.push(anchor, panel, true);
    }

    /// Pushes `panel` on top of `anchor`'s chain.
    ///
    /// The old top is always deactivated. It is also made fully
    /// transparent when `hide_previous` is set. The pushed panel is
    /// activated if nothing else in the chain is active.
    pub fn push(&mut self, anchor: PanelId, panel: PanelId, hide_previous: bool) {
        let Some(top) = self.top_of(anchor) else {
            warn!("Cannot push panel {} onto unknown panel {}, skipping", panel, anchor);
            return;
        };

        let Some(record) = self.panels.get(&panel) else {
            warn!("Attempted to push unknown panel {}", panel);
            return;
        };

        if record.previous.is_some() || record.next.is_some() || top == panel {
            warn!("Panel {} is already in a stack, skipping push", panel);
            return;
        }

        let Some(top_record) = self.panels.get_mut(&top) else {
            return;
        };

        let Some(draw_order) = top_record.draw_order.checked_add(1) else {
            warn!(
                "Cannot push panel {} above {}: draw order {} is at its limit, skipping",
                panel, top, top_record.draw_order
            );
            return;
        };

        debug!("Pushing panel {} above {} (hide previous: {})", panel, top, hide_previous);

        //--- Link ---------------------------------------------------------
        top_record.next = Some(panel);

        if let Some(record) = self.panels.get_mut(&panel) {
            record.previous = Some(top);
            record.draw_order = draw_order;
            self.host.enable(&record.handle);
            self.host.set_draw_order(&record.handle, draw_order);
        }

        //--- Displace the old top -----------------------------------------
        self.deactivate(top, hide_previous);

        //--- Activate if the chain has nothing active ---------------------
        if self.active_of(panel).is_none() {
            self.activate_unchecked(panel);
        }
    }

    /// Activates `panel` if it is the top of its chain.
    ///
    /// Activating a panel that has something stacked above it only logs a
    /// warning. Activating an already active panel does nothing.
    pub fn activate(&mut self, panel: PanelId) {
        let Some(record) = self.panels.get(&panel) else {
            warn!("Attempted to activate unknown panel {}", panel);
            return;
        };

        if record.next.is_some() {
            warn!(
                "{}",
                not_top_message(record.panel.kind(), &self.host.name(&record.handle))
            );
            return;
        }

        if !record.active {
            self.activate_unchecked(panel);
        }
    }

    /// Closes `panel` together with everything stacked above it.
    ///
    /// Panels close top-down: each one tears down the chain above it,
    /// re-activates the panel below it, then runs its close hook. The
    /// deactivate hook is not fired for closed panels.
    pub fn close(&mut self, panel: PanelId) {
        match self.panels.get(&panel) {
            None => warn!("Cannot close unknown panel {}, skipping", panel),
            Some(record) if record.closing => {
                debug!("Panel {} is already closing, skipping", panel)
            }
            Some(_) => {
                debug!("Closing panel {}", panel);
                self.close_internal(panel);
            }
        }
    }

    //--- Chain Queries ----------------------------------------------------

    /// Returns the bottom panel of `panel`'s chain.
    pub fn root_of(&self, panel: PanelId) -> Option<PanelId> {
        let mut current = self.panels.get(&panel).map(|_| panel)?;
        while let Some(previous) = self.panels.get(&current).and_then(|r| r.previous) {
            current = previous;
        }
        Some(current)
    }

    /// Returns the top panel of `panel`'s chain.
    pub fn top_of(&self, panel: PanelId) -> Option<PanelId> {
        let mut current = self.panels.get(&panel).map(|_| panel)?;
        while let Some(next) = self.panels.get(&current).and_then(|r| r.next) {
            current = next;
        }
        Some(current)
    }

    /// Returns `panel`'s whole chain, root first.
    pub fn chain(&self, panel: PanelId) -> Vec<PanelId> {
        let mut chain = Vec::new();
        let mut current = self.root_of(panel);
        while let Some(id) = current {
            chain.push(id);
            current = self.panels.get(&id).and_then(|r| r.next);
        }
        chain
    }

    /// Returns the active panel of `panel`'s chain, if any.
    pub fn active_of(&self, panel: PanelId) -> Option<PanelId> {
        self.chain(panel)
            .into_iter()
            .find(|id| self.is_active(*id))
    }

    /// Panel directly below `panel`.
    pub fn previous(&self, panel: PanelId) -> Option<PanelId> {
        self.panels.get(&panel).and_then(|r| r.previous)
    }

    /// Panel directly above `panel`.
    pub fn next(&self, panel: PanelId) -> Option<PanelId> {
        self.panels.get(&panel).and_then(|r| r.next)
    }

    //--- Panel Queries ----------------------------------------------------

    /// Returns true if `panel` is alive in this stack.
    pub fn contains(&self, panel: PanelId) -> bool {
        self.panels.contains_key(&panel)
    }

    /// Number of live panels across all chains.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns true if no panel is alive.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn is_active(&self, panel: PanelId) -> bool {
        self.panels.get(&panel).is_some_and(|r| r.active)
    }

    pub fn is_opaque(&self, panel: PanelId) -> bool {
        self.panels.get(&panel).is_some_and(|r| r.opaque)
    }

    pub fn draw_order(&self, panel: PanelId) -> Option<i32> {
        self.panels.get(&panel).map(|r| r.draw_order)
    }

    pub fn kind(&self, panel: PanelId) -> Option<&'static str> {
        self.panels.get(&panel).map(|r| r.panel.kind())
    }

    /// Host handle of `panel`.
    pub fn handle(&self, panel: PanelId) -> Option<&H::Handle> {
        self.panels.get(&panel).map(|r| &r.handle)
    }

    /// Host-level name of `panel`.
    pub fn name(&self, panel: PanelId) -> Option<String> {
        self.panels.get(&panel).map(|r| self.host.name(&r.handle))
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn focus(&self) -> &F {
        &self.focus
    }

    //--- Focus ------------------------------------------------------------

    /// Hands `element` to the focus service as the selected element.
    pub fn select_element(&mut self, element: F::Element) {
        self.focus.set_focus(element);
    }

    //--- Command Processing -----------------------------------------------

    /// Deferred command queue, also reachable from hooks.
    pub fn commands(&mut self) -> &mut PanelCommands {
        &mut self.commands
    }

    /// Applies queued commands in FIFO order.
    ///
    /// Commands queued by hooks while processing run in the same call,
    /// up to the configured bound. Returns the number of commands applied.
    pub fn process_commands(&mut self) -> usize {
        let mut processed = 0;

        while processed < self.max_commands {
            let Some(command) = self.commands.pop() else {
                break;
            };
            self.apply(command);
            processed += 1;
        }

        if !self.commands.is_empty() {
            warn!(
                "Panel command backlog: {} left after applying {}",
                self.commands.len(),
                processed
            );
        }

        processed
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::Show { anchor, panel, hide_previous } => {
                if !self.contains(anchor) {
                    warn!("Anchor panel {} is gone, dropping {}", anchor, panel.kind());
                    return;
                }
                let id = self.create_boxed(panel);
                self.push(anchor, id, hide_previous);
            }
            PanelCommand::Activate(id) => self.activate(id),
            PanelCommand::Close(id) => {
                if self.contains(id) {
                    self.close(id);
                } else {
                    debug!("Panel {} already closed, skipping close", id);
                }
            }
        }
    }

    fn activate_unchecked(&mut self, panel: PanelId) {
        let Some(record) = self.panels.get_mut(&panel) else {
            return;
        };
        self.host.set_visible(&record.handle, true);
        self.host.set_interactive(&record.handle, true);
        record.opaque = true;

        self.fire(panel, Hook::Activate);

        if let Some(record) = self.panels.get_mut(&panel) {
            record.active = true;
        }
        debug!("Activated panel {}", panel);
    }

    fn deactivate(&mut self, panel: PanelId, hide: bool) {
        let Some(record) = self.panels.get_mut(&panel) else {
            return;
        };
        if hide {
            self.host.set_visible(&record.handle, false);
            record.opaque = false;
        }
        self.host.set_interactive(&record.handle, false);

        self.fire(panel, Hook::Deactivate);

        if let Some(record) = self.panels.get_mut(&panel) {
            record.active = false;
        }
        debug!("Deactivated panel {} (hidden: {})", panel, hide);
    }

    fn close_internal(&mut self, panel: PanelId) {
        //--- Mark and destroy, bottom-up ----------------------------------
        let mut doomed = Vec::new();
        let mut current = Some(panel);
        while let Some(id) = current {
            let Some(record) = self.panels.get_mut(&id) else {
                break;
            };
            record.closing = true;
            self.host.destroy(&record.handle);
            doomed.push(id);
            current = record.next;
        }

        //--- Tear down, top-down ------------------------------------------
        for id in doomed.into_iter().rev() {
            let previous = self.panels.get(&id).and_then(|r| r.previous);

            if let Some(previous) = previous {
                let restore = match self.panels.get_mut(&previous) {
                    Some(below) => {
                        below.next = None;
                        !below.closing
                    }
                    None => false,
                };
                if restore {
                    self.activate_unchecked(previous);
                }
            }

            self.fire(id, Hook::Close);
            self.panels.remove(&id);

            debug!("Panel {} closed", id);
        }
    }

    fn fire(&mut self, panel: PanelId, hook: Hook) {
        let Self { panels, commands, .. } = self;
        let Some(record) = panels.get_mut(&panel) else {
            return;
        };

        let mut context = PanelContext::new(panel, commands);
        match hook {
            Hook::Init => record.panel.on_init(&mut context),
            Hook::Activate => record.panel.on_activate(&mut context),
            Hook::Deactivate => record.panel.on_deactivate(&mut context),
            Hook::Close => record.panel.on_close(&mut context),
        }
    }
}

fn not_top_message(kind: &str, name: &str) -> String {
    format!(
        "Cannot activate panel \"{} (host: {})\": it is not the top panel of its stack",
        kind, name
    )
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Mocks ------------------------------------------------------------

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum HostCall {
        Create(String, bool),
        Destroy(u32),
        Visible(u32, bool),
        Interactive(u32, bool),
        DrawOrder(u32, i32),
        Enable(u32),
    }

    #[derive(Default)]
    struct MockHost {
        calls: Rc<RefCell<Vec<HostCall>>>,
        next: u32,
    }

    impl PanelHost for MockHost {
        type Handle = u32;

        fn create(&mut self, kind: &str, activate_on_create: bool) -> u32 {
            self.next += 1;
            self.calls
                .borrow_mut()
                .push(HostCall::Create(kind.to_string(), activate_on_create));
            self.next
        }

        fn destroy(&mut self, handle: &u32) {
            self.calls.borrow_mut().push(HostCall::Destroy(*handle));
        }

        fn set_visible(&mut self, handle: &u32, opaque: bool) {
            self.calls.borrow_mut().push(HostCall::Visible(*handle, opaque));
        }

        fn set_interactive(&mut self, handle: &u32, interactive: bool) {
            self.calls
                .borrow_mut()
                .push(HostCall::Interactive(*handle, interactive));
        }

        fn set_draw_order(&mut self, handle: &u32, order: i32) {
            self.calls.borrow_mut().push(HostCall::DrawOrder(*handle, order));
        }

        fn enable(&mut self, handle: &u32) {
            self.calls.borrow_mut().push(HostCall::Enable(*handle));
        }

        fn name(&self, handle: &u32) -> String {
            format!("panel-object-{}", handle)
        }
    }

    #[derive(Default)]
    struct MockFocus {
        clears: usize,
        focused: Vec<&'static str>,
    }

    impl FocusService for MockFocus {
        type Element = &'static str;

        fn clear_focus(&mut self) {
            self.clears += 1;
        }

        fn set_focus(&mut self, element: &'static str) {
            self.focused.push(element);
        }
    }

    type Log = Rc<RefCell<Vec<String>>>;
    type Action = Box<dyn FnMut(&mut PanelContext<'_>)>;

    struct Probe {
        label: &'static str,
        activate_on_create: bool,
        log: Log,
        on_activate: Option<Action>,
    }

    impl Probe {
        fn new(label: &'static str, activate_on_create: bool, log: &Log) -> Self {
            Self {
                label,
                activate_on_create,
                log: Rc::clone(log),
                on_activate: None,
            }
        }

        fn with_on_activate<A>(mut self, action: A) -> Self
        where
            A: FnMut(&mut PanelContext<'_>) + 'static,
        {
            self.on_activate = Some(Box::new(action));
            self
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.label, hook));
        }
    }

    impl Panel for Probe {
        fn activate_on_create(&self) -> bool {
            self.activate_on_create
        }

        fn kind(&self) -> &'static str {
            self.label
        }

        fn on_init(&mut self, _context: &mut PanelContext<'_>) {
            self.record("init");
        }

        fn on_activate(&mut self, context: &mut PanelContext<'_>) {
            self.record("activate");
            if let Some(action) = self.on_activate.as_mut() {
                action(context);
            }
        }

        fn on_deactivate(&mut self, _context: &mut PanelContext<'_>) {
            self.record("deactivate");
        }

        fn on_close(&mut self, _context: &mut PanelContext<'_>) {
            self.record("close");
        }
    }

    //--- Helpers ----------------------------------------------------------

    struct Fixture {
        stack: PanelStack<MockHost, MockFocus>,
        calls: Rc<RefCell<Vec<HostCall>>>,
        log: Log,
    }

    fn fixture() -> Fixture {
        let host = MockHost::default();
        let calls = Rc::clone(&host.calls);
        Fixture {
            stack: PanelStack::new(host, MockFocus::default()),
            calls,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    impl Fixture {
        fn create(&mut self, label: &'static str, activate_on_create: bool) -> PanelId {
            let probe = Probe::new(label, activate_on_create, &self.log);
            self.stack.create(probe)
        }

        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.borrow_mut())
        }

        fn take_calls(&self) -> Vec<HostCall> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }

        /// Builds A → B → C with A created active.
        fn abc(&mut self) -> (PanelId, PanelId, PanelId) {
            let a = self.create("A", true);
            let b = self.create("B", false);
            let c = self.create("C", false);
            self.stack.show(a, b);
            self.stack.show(a, c);
            self.take_log();
            self.take_calls();
            (a, b, c)
        }
    }

    fn active_count(stack: &PanelStack<MockHost, MockFocus>, any: PanelId) -> usize {
        stack.chain(any).into_iter().filter(|id| stack.is_active(*id)).count()
    }

    //--- Construction -----------------------------------------------------

    #[test]
    fn new_stack_clears_focus_once() {
        let f = fixture();
        assert_eq!(f.stack.focus().clears, 1);
        assert!(f.stack.focus().focused.is_empty());
        assert!(f.stack.is_empty());
    }

    #[test]
    #[should_panic(expected = "Command bound must be positive")]
    fn zero_command_bound_panics() {
        PanelStack::with_settings(MockHost::default(), MockFocus::default(), 1, 0);
    }

    #[test]
    fn select_element_forwards_to_focus() {
        let mut f = fixture();
        f.stack.select_element("ok-button");
        assert_eq!(f.stack.focus().focused, vec!["ok-button"]);
        assert_eq!(f.stack.focus().clears, 1);
    }

    //--- Creation ---------------------------------------------------------

    #[test]
    fn create_with_activation_activates_panel() {
        let mut f = fixture();
        let a = f.create("A", true);

        assert!(f.stack.is_active(a));
        assert!(f.stack.is_opaque(a));
        assert_eq!(f.stack.draw_order(a), Some(1));
        assert_eq!(f.stack.root_of(a), Some(a));
        assert_eq!(f.stack.top_of(a), Some(a));
        assert_eq!(f.take_log(), vec!["A:init", "A:activate"]);
        assert_eq!(
            f.take_calls(),
            vec![
                HostCall::Create("A".into(), true),
                HostCall::DrawOrder(1, 1),
                HostCall::Enable(1),
                HostCall::Visible(1, true),
                HostCall::Interactive(1, true),
            ]
        );
    }

    #[test]
    fn create_without_activation_starts_hidden() {
        let mut f = fixture();
        let a = f.create("A", false);

        assert!(!f.stack.is_active(a));
        assert!(!f.stack.is_opaque(a));
        assert_eq!(f.take_log(), vec!["A:init"]);
        let calls = f.take_calls();
        assert!(calls.contains(&HostCall::Visible(1, false)));
        assert!(calls.contains(&HostCall::Interactive(1, false)));
    }

    #[test]
    fn base_draw_order_is_configurable() {
        let mut stack = PanelStack::with_settings(MockHost::default(), MockFocus::default(), 10, 8);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let a = stack.create(Probe::new("A", true, &log));
        let b = stack.create(Probe::new("B", false, &log));
        stack.show(a, b);

        assert_eq!(stack.draw_order(a), Some(10));
        assert_eq!(stack.draw_order(b), Some(11));
    }

    #[test]
    fn push_at_draw_order_limit_is_skipped() {
        let mut stack =
            PanelStack::with_settings(MockHost::default(), MockFocus::default(), i32::MAX, 8);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let a = stack.create(Probe::new("A", true, &log));
        let b = stack.create(Probe::new("B", false, &log));
        log.borrow_mut().clear();

        stack.show(a, b);

        assert_eq!(stack.chain(a), vec![a]);
        assert_eq!(stack.chain(b), vec![b]);
        assert_eq!(stack.draw_order(a), Some(i32::MAX));
        assert!(stack.is_active(a));
        assert!(!stack.is_active(b));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn push_below_draw_order_limit_reaches_it() {
        let mut stack =
            PanelStack::with_settings(MockHost::default(), MockFocus::default(), i32::MAX - 1, 8);
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let a = stack.create(Probe::new("A", true, &log));
        let b = stack.create(Probe::new("B", false, &log));
        let c = stack.create(Probe::new("C", false, &log));

        stack.show(a, b);
        stack.show(a, c);

        assert_eq!(stack.draw_order(b), Some(i32::MAX));
        assert_eq!(stack.chain(a), vec![a, b]);
        assert!(stack.is_active(b));
        assert!(stack.next(c).is_none() && stack.previous(c).is_none());
    }

    //--- Push -------------------------------------------------------------

    #[test]
    fn push_then_top() {
        let mut f = fixture();
        let a = f.create("A", true);
        let b = f.create("B", false);

        f.stack.show(a, b);

        assert_eq!(f.stack.top_of(a), Some(b));
        assert_eq!(f.stack.root_of(b), Some(a));
        assert_eq!(f.stack.previous(b), Some(a));
        assert_eq!(f.stack.next(a), Some(b));
        assert_eq!(f.stack.chain(b), vec![a, b]);
    }

    #[test]
    fn push_deactivates_and_hides_previous() {
        let mut f = fixture();
        let a = f.create("A", true);
        let b = f.create("B", false);
        f.take_log();
        f.take_calls();

        f.stack.push(a, b, true);

        assert!(!f.stack.is_active(a));
        assert!(!f.stack.is_opaque(a));
        assert!(f.stack.is_active(b));
        assert_eq!(f.take_log(), vec!["A:deactivate", "B:activate"]);

        let calls = f.take_calls();
        assert!(calls.contains(&HostCall::Visible(1, false)));
        assert!(calls.contains(&HostCall::Interactive(1, false)));
        assert!(calls.contains(&HostCall::Enable(2)));
        assert!(calls.contains(&HostCall::DrawOrder(2, 2)));
    }

    #[test]
    fn push_without_hide_keeps_previous_visible() {
        let mut f = fixture();
        let a = f.create("A", true);
        let b = f.create("B", false);
        f.take_log();
        f.take_calls();

        f.stack.push(a, b, false);

        assert!(!f.stack.is_active(a));
        assert!(f.stack.is_opaque(a));
        assert_eq!(f.take_log(), vec!["A:deactivate", "B:activate"]);

        let calls = f.take_calls();
        assert!(!calls.contains(&HostCall::Visible(1, false)));
        assert!(calls.contains(&HostCall::Interactive(1, false)));
    }

    #[test]
    fn push_fires_deactivate_exactly_once() {
        for hide in [true, false] {
            let mut f = fixture();
            let c = f.create("C", true);
            let d = f.create("D", false);
            f.take_log();

            f.stack.push(c, d, hide);

            let deactivations = f
                .take_log()
                .into_iter()
                .filter(|entry| entry == "C:deactivate")
                .count();
            assert_eq!(deactivations, 1);
            assert!(!f.stack.is_active(c));
        }
    }

    #[test]
    fn push_onto_lower_panel_targets_top() {
        let mut f = fixture();
        let (a, _b, c) = f.abc();
        let d = f.create("D", false);

        f.stack.show(a, d);

        assert_eq!(f.stack.previous(d), Some(c));
        assert_eq!(f.stack.top_of(a), Some(d));
        assert_eq!(f.stack.draw_order(d), Some(4));
    }

    #[test]
    fn push_onto_inactive_root_activates_new_panel() {
        let mut f = fixture();
        let a = f.create("A", false);
        let b = f.create("B", false);
        f.take_log();

        f.stack.show(a, b);

        assert!(f.stack.is_active(b));
        assert_eq!(f.take_log(), vec!["A:deactivate", "B:activate"]);
    }

    #[test]
    fn push_of_self_activated_panel_does_not_reactivate() {
        let mut f = fixture();
        let a = f.create("A", true);
        let b = f.create("B", true);
        f.take_log();

        f.stack.show(a, b);

        assert!(f.stack.is_active(b));
        assert_eq!(f.take_log(), vec!["A:deactivate"]);
        assert_eq!(active_count(&f.stack, a), 1);
    }

    #[test]
    fn push_of_linked_panel_is_skipped() {
        let mut f = fixture();
        let (a, b, c) = f.abc();
        let other = f.create("X", true);
        f.take_log();

        f.stack.show(other, b);
        f.stack.show(a, a);

        assert_eq!(f.stack.chain(a), vec![a, b, c]);
        assert_eq!(f.stack.chain(other), vec![other]);
        assert!(f.stack.is_active(other));
        assert!(f.take_log().is_empty());
    }

    #[test]
    fn push_with_unknown_ids_is_skipped() {
        let mut f = fixture();
        let a = f.create("A", true);
        let ghost = PanelId::new(99);

        f.stack.show(ghost, a);
        f.stack.show(a, ghost);

        assert_eq!(f.stack.chain(a), vec![a]);
        assert!(f.stack.is_active(a));
    }

    #[test]
    fn draw_order_increases_along_chain() {
        let mut f = fixture();
        let (a, _, _) = f.abc();
        for _ in 0..3 {
            let p = f.create("P", false);
            f.stack.push(a, p, false);
        }

        let chain = f.stack.chain(a);
        assert_eq!(chain.len(), 6);
        for pair in chain.windows(2) {
            let below = f.stack.draw_order(pair[0]).unwrap_or_default();
            let above = f.stack.draw_order(pair[1]).unwrap_or_default();
            assert!(above > below);
        }
        assert_eq!(active_count(&f.stack, a), 1);
        assert_eq!(f.stack.active_of(a), f.stack.top_of(a));
    }

    //--- Activate ---------------------------------------------------------

    #[test]
    fn activate_is_idempotent() {
        let mut f = fixture();
        let a = f.create("A", false);
        f.take_log();

        f.stack.activate(a);
        f.stack.activate(a);

        assert!(f.stack.is_active(a));
        assert_eq!(f.take_log(), vec!["A:activate"]);
    }

    #[test]
    fn activate_non_top_is_noop() {
        let mut f = fixture();
        let a = f.create("A", true);
        let b = f.create("B", false);
        f.stack.show(a, b);
        f.take_log();
        f.take_calls();

        f.stack.activate(a);

        assert!(!f.stack.is_active(a));
        assert!(f.stack.is_active(b));
        assert!(f.take_log().is_empty());
        assert!(f.take_calls().is_empty());
    }

    #[test]
    fn non_top_warning_names_kind_and_host_object() {
        let mut f = fixture();
        let a = f.create("A", true);

        let kind = f.stack.kind(a).unwrap_or_default();
        let name = f.stack.name(a).unwrap_or_default();
        let message = not_top_message(kind, &name);

        assert_eq!(
            message,
            "Cannot activate panel \"A (host: panel-object-1)\": it is not the top panel of its stack"
        );
    }

    #[test]
    fn activate_unknown_panel_is_noop() {
        let mut f = fixture();
        f.stack.activate(PanelId::new(42));
        assert!(f.take_calls().is_empty());
    }

    //--- Close ------------------------------------------------------------

    #[test]
    fn close_top_reactivates_previous() {
        let mut f = fixture();
        let a = f.create("A", true);
        let b = f.create("B", false);
        f.stack.show(a, b);
        f.take_log();

        f.stack.close(b);

        assert!(!f.stack.contains(b));
        assert!(f.stack.is_active(a));
        assert!(f.stack.is_opaque(a));
        assert_eq!(f.stack.next(a), None);
        assert_eq!(f.take_log(), vec!["A:activate", "B:close"]);
    }

    #[test]
    fn close_root_cascades_top_down() {
        let mut f = fixture();
        let (a, b, c) = f.abc();

        f.stack.close(a);

        assert!(f.stack.is_empty());
        assert!(!f.stack.contains(b));
        assert!(!f.stack.contains(c));
        assert_eq!(f.stack.root_of(a), None);
        assert_eq!(f.take_log(), vec!["C:close", "B:close", "A:close"]);
    }

    #[test]
    fn close_destroys_every_panel_in_cascade() {
        let mut f = fixture();
        let (a, _, _) = f.abc();

        f.stack.close(a);

        let destroyed: Vec<_> = f
            .take_calls()
            .into_iter()
            .filter(|call| matches!(call, HostCall::Destroy(_)))
            .collect();
        assert_eq!(
            destroyed,
            vec![HostCall::Destroy(1), HostCall::Destroy(2), HostCall::Destroy(3)]
        );
    }

    #[test]
    fn close_of_long_chain_runs_top_down() {
        let mut f = fixture();
        let root = f.create("root", true);
        for _ in 0..3_000 {
            let p = f.create("P", false);
            f.stack.push(root, p, true);
        }
        let top = f.stack.top_of(root);
        f.take_log();

        f.stack.close(root);

        assert!(f.stack.is_empty());
        assert!(top.is_some_and(|id| !f.stack.contains(id)));
        let log = f.take_log();
        assert_eq!(log.len(), 3_001);
        assert_eq!(log.last().map(String::as_str), Some("root:close"));
        assert!(log.iter().all(|entry| entry.ends_with(":close")));
    }

    #[test]
    fn close_never_fires_deactivate() {
        let mut f = fixture();
        let (_, b, _) = f.abc();

        f.stack.close(b);

        assert!(f.take_log().iter().all(|entry| !entry.ends_with(":deactivate")));
    }

    #[test]
    fn close_unknown_panel_is_noop() {
        let mut f = fixture();
        let a = f.create("A", true);
        f.take_calls();

        f.stack.close(PanelId::new(77));

        assert!(f.stack.contains(a));
        assert!(f.take_calls().is_empty());
    }

    #[test]
    fn layered_scenario() {
        let mut f = fixture();

        let a = f.create("A", true);
        assert!(f.stack.is_active(a));
        assert_eq!(f.stack.draw_order(a), Some(1));

        let b = f.create("B", false);
        f.stack.push(a, b, true);
        assert!(!f.stack.is_active(a));
        assert!(!f.stack.is_opaque(a));
        assert!(f.stack.is_active(b));
        assert_eq!(f.stack.draw_order(b), Some(2));

        let c = f.create("C", false);
        f.stack.push(b, c, false);
        assert!(!f.stack.is_active(b));
        assert!(f.stack.is_opaque(b));
        assert!(f.stack.is_active(c));
        assert_eq!(f.stack.draw_order(c), Some(3));
        f.take_log();

        f.stack.close(b);

        assert_eq!(f.take_log(), vec!["C:close", "A:activate", "B:close"]);
        assert_eq!(f.stack.chain(a), vec![a]);
        assert!(f.stack.is_active(a));
        assert_eq!(f.stack.len(), 1);
    }

    //--- Commands ---------------------------------------------------------

    #[test]
    fn hook_can_close_its_own_panel() {
        let mut f = fixture();
        let a = f.create("A", true);
        let b = f.stack.create(
            Probe::new("B", false, &f.log).with_on_activate(|ctx| ctx.close_self()),
        );
        f.stack.show(a, b);
        f.take_log();

        assert!(f.stack.contains(b));
        assert_eq!(f.stack.process_commands(), 1);

        assert!(!f.stack.contains(b));
        assert!(f.stack.is_active(a));
        assert_eq!(f.take_log(), vec!["A:activate", "B:close"]);
    }

    #[test]
    fn show_command_creates_and_pushes() {
        let mut f = fixture();
        let log = Rc::clone(&f.log);
        let a = f.stack.create(
            Probe::new("A", true, &f.log)
                .with_on_activate(move |ctx| ctx.show(Probe::new("Popup", false, &log), false)),
        );
        f.take_log();

        assert_eq!(f.stack.process_commands(), 1);

        let chain = f.stack.chain(a);
        assert_eq!(chain.len(), 2);
        assert_eq!(f.stack.kind(chain[1]), Some("Popup"));
        assert!(f.stack.is_active(chain[1]));
        assert!(f.stack.is_opaque(a));
        assert_eq!(f.take_log(), vec!["Popup:init", "A:deactivate", "Popup:activate"]);
    }

    #[test]
    fn commands_for_closed_panels_are_skipped() {
        let mut f = fixture();
        let (a, b, c) = f.abc();

        f.stack.commands().push(PanelCommand::Close(a));
        f.stack.commands().push(PanelCommand::Close(c));
        f.stack.commands().push(PanelCommand::Activate(b));
        f.stack.commands().push(PanelCommand::Show {
            anchor: b,
            panel: Box::new(Probe::new("Late", true, &f.log)),
            hide_previous: true,
        });

        assert_eq!(f.stack.process_commands(), 4);
        assert!(f.stack.is_empty());
    }

    #[test]
    fn command_processing_is_bounded() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = PanelStack::with_settings(MockHost::default(), MockFocus::default(), 1, 2);
        let a = stack.create(Probe::new("A", false, &log));

        for _ in 0..3 {
            stack.commands().push(PanelCommand::Activate(a));
        }

        assert_eq!(stack.process_commands(), 2);
        assert_eq!(stack.commands().len(), 1);
        assert_eq!(stack.process_commands(), 1);
        assert!(stack.commands().is_empty());
    }

    #[test]
    fn name_comes_from_host() {
        let mut f = fixture();
        let a = f.create("A", true);
        assert_eq!(f.stack.name(a), Some("panel-object-1".to_string()));
        assert_eq!(f.stack.handle(a), Some(&1));
        assert_eq!(f.stack.kind(a), Some("A"));
    }
}
