//! Shell controller.
//!
//! Owns [`ShellState`] and reconciles every input (toggle click, overlay
//! click, outside click, Escape, resize, soft navigation) into it.
//!
//! # Binding epochs
//!
//! Each [`ShellController::initialize`] call produces a new binding: the
//! located shell nodes plus the listeners attached to them. The controller
//! holds at most one binding and drops the previous one before asking the
//! DOM for a new one, so re-initializing after any number of soft
//! navigations leaves exactly one listener set active.
//!
//! Listeners reach the controller through [`ShellEvents`], which only holds
//! a weak reference. A stale listener that somehow outlives its binding
//! cannot keep the controller alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::ShellError;
use crate::models::{Breakpoint, ShellState, ShellView};

/// Located shell nodes with their listeners attached.
///
/// Dropping a binding must detach every listener it attached.
pub trait ShellBinding {
    /// Mirror `view` onto the sidebar, overlay, body and toggle.
    fn render(&self, view: ShellView);
}

/// The page the controller is mounted on.
pub trait ShellDom: Sized + 'static {
    type Binding: ShellBinding;

    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Locate the toggle, sidebar and overlay and attach listeners that
    /// forward to `events`.
    ///
    /// Fails with [`ShellError::MissingElement`] when the page renders no
    /// shell markup.
    fn bind(&self, events: ShellEvents<Self>) -> Result<Self::Binding, ShellError>;
}

struct Inner<D: ShellDom> {
    dom: D,
    breakpoint: Breakpoint,
    state: ShellState,
    /// Narrowness at the last initialize/resize, to detect breakpoint crossings.
    last_narrow: Option<bool>,
    binding: Option<D::Binding>,
    epoch: u64,
}

impl<D: ShellDom> Inner<D> {
    fn is_narrow(&self) -> bool {
        self.breakpoint.is_narrow(self.dom.viewport_width())
    }

    fn render(&self) {
        if let Some(binding) = &self.binding {
            binding.render(self.state.view());
        }
    }

    fn toggle(&mut self) {
        let narrow = self.is_narrow();
        self.state.toggle(narrow);
        log::debug!("sidebar toggled: visible={}", self.state.is_visible());
        self.render();
    }

    fn dismiss(&mut self) {
        if self.state.dismiss() {
            log::debug!("sidebar dismissed");
            self.render();
        }
    }

    fn on_resize(&mut self) {
        let narrow = self.is_narrow();
        let crossed = self.last_narrow != Some(narrow);
        self.last_narrow = Some(narrow);

        // Wide viewports always dock the sidebar; narrow ones only close it
        // when arriving from wide, so browser chrome resizes keep it open.
        if !narrow || crossed {
            self.state.reset_for_viewport(narrow);
            self.render();
        }
    }
}

/// Handle to the shell controller. Clones share the same state.
pub struct ShellController<D: ShellDom> {
    inner: Rc<RefCell<Inner<D>>>,
}

impl<D: ShellDom> Clone for ShellController<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: ShellDom> ShellController<D> {
    /// Create an unbound controller. Nothing is attached until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(dom: D, breakpoint: Breakpoint) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                dom,
                breakpoint,
                state: ShellState::CLOSED,
                last_narrow: None,
                binding: None,
                epoch: 0,
            })),
        }
    }

    /// (Re)bind to the shell nodes currently in the document.
    ///
    /// Idempotent: the previous binding is dropped first, so listeners never
    /// accumulate. When the page has no shell markup the controller is left
    /// unbound and closed.
    pub fn initialize(&self) {
        let previous = self.inner.borrow_mut().binding.take();
        if let Some(previous) = previous {
            // `<body>` outlives the epoch; release its scroll lock.
            previous.render(ShellState::CLOSED.view());
        }

        let events = ShellEvents {
            inner: Rc::downgrade(&self.inner),
        };
        let bound = self.inner.borrow().dom.bind(events);

        let mut inner = self.inner.borrow_mut();
        match bound {
            Ok(binding) => {
                let narrow = inner.is_narrow();
                inner.last_narrow = Some(narrow);
                inner.state = ShellState::for_viewport(narrow);
                inner.epoch += 1;
                binding.render(inner.state.view());
                inner.binding = Some(binding);
                log::debug!(
                    "shell bound (epoch {}, narrow={narrow})",
                    inner.epoch
                );
            }
            Err(err) => {
                inner.state = ShellState::CLOSED;
                inner.last_narrow = None;
                if err.is_missing_dom() {
                    log::debug!("no shell on this page: {err}");
                } else {
                    log::warn!("failed to bind shell: {err}");
                }
            }
        }
    }

    /// Flip sidebar visibility.
    pub fn toggle(&self) {
        self.inner.borrow_mut().toggle();
    }

    /// Close the sidebar. Does nothing when it is already closed.
    pub fn dismiss(&self) {
        self.inner.borrow_mut().dismiss();
    }

    /// Apply the viewport policy after a resize.
    pub fn on_resize(&self) {
        self.inner.borrow_mut().on_resize();
    }

    pub fn state(&self) -> ShellState {
        self.inner.borrow().state
    }

    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    /// Whether shell nodes are currently bound.
    pub fn is_bound(&self) -> bool {
        self.inner.borrow().binding.is_some()
    }

    /// Number of successful bindings so far.
    pub fn epoch(&self) -> u64 {
        self.inner.borrow().epoch
    }
}

/// Event sink handed to a binding's listeners.
///
/// Calls after the controller is gone, or while it is already handling an
/// event, are ignored.
pub struct ShellEvents<D: ShellDom> {
    inner: Weak<RefCell<Inner<D>>>,
}

impl<D: ShellDom> Clone for ShellEvents<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<D: ShellDom> ShellEvents<D> {
    fn with(&self, f: impl FnOnce(&mut Inner<D>)) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        match inner.try_borrow_mut() {
            Ok(mut inner) => f(&mut inner),
            Err(_) => log::warn!("shell event ignored: controller busy"),
        };
    }

    pub fn toggle_clicked(&self) {
        self.with(Inner::toggle);
    }

    pub fn overlay_clicked(&self) {
        self.with(Inner::dismiss);
    }

    /// A click anywhere in the document. `outside_shell` is true when the
    /// target is neither inside the sidebar nor inside the toggle.
    ///
    /// Width is checked now rather than at bind time; the viewport may have
    /// changed since.
    pub fn document_clicked(&self, outside_shell: bool) {
        if !outside_shell {
            return;
        }
        self.with(|inner| {
            if inner.is_narrow() {
                inner.dismiss();
            }
        });
    }

    pub fn escape_pressed(&self) {
        self.with(|inner| {
            if inner.is_narrow() {
                inner.dismiss();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Target {
        Toggle,
        Sidebar,
        Overlay,
        Content,
    }

    /// In-memory page: viewport width, shell markup and attached listeners.
    #[derive(Default)]
    struct Page {
        width: Cell<f64>,
        missing_markup: Cell<bool>,
        view: Cell<Option<ShellView>>,
        listeners: RefCell<Vec<(u64, ShellEvents<FakeDom>)>>,
        next_id: Cell<u64>,
    }

    impl Page {
        fn new(width: f64) -> Rc<Self> {
            let page = Rc::new(Self::default());
            page.width.set(width);
            page
        }

        fn listener_count(&self) -> usize {
            self.listeners.borrow().len()
        }

        fn view(&self) -> ShellView {
            self.view.get().expect("shell never rendered")
        }

        /// Dispatch a click the way the browser bubbles it: target listener
        /// first, then the document listener.
        fn click(&self, target: Target) {
            let listeners: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, events)| events.clone())
                .collect();
            for events in &listeners {
                match target {
                    Target::Toggle => events.toggle_clicked(),
                    Target::Overlay => events.overlay_clicked(),
                    Target::Sidebar | Target::Content => {}
                }
            }
            let outside = matches!(target, Target::Overlay | Target::Content);
            for events in &listeners {
                events.document_clicked(outside);
            }
        }

        fn press_escape(&self) {
            let listeners: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, events)| events.clone())
                .collect();
            for events in &listeners {
                events.escape_pressed();
            }
        }
    }

    struct FakeDom {
        page: Rc<Page>,
    }

    struct FakeBinding {
        page: Rc<Page>,
        id: u64,
    }

    impl ShellBinding for FakeBinding {
        fn render(&self, view: ShellView) {
            self.page.view.set(Some(view));
        }
    }

    impl Drop for FakeBinding {
        fn drop(&mut self) {
            self.page
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }

    impl ShellDom for FakeDom {
        type Binding = FakeBinding;

        fn viewport_width(&self) -> f64 {
            self.page.width.get()
        }

        fn bind(&self, events: ShellEvents<Self>) -> Result<FakeBinding, ShellError> {
            if self.page.missing_markup.get() {
                return Err(ShellError::MissingElement("sidebar-toggle".into()));
            }
            let id = self.page.next_id.get();
            self.page.next_id.set(id + 1);
            self.page.listeners.borrow_mut().push((id, events));
            Ok(FakeBinding {
                page: Rc::clone(&self.page),
                id,
            })
        }
    }

    fn mount(width: f64) -> (ShellController<FakeDom>, Rc<Page>) {
        let page = Page::new(width);
        let dom = FakeDom {
            page: Rc::clone(&page),
        };
        (ShellController::new(dom, Breakpoint::default()), page)
    }

    const CLOSED: ShellView = ShellView {
        sidebar_visible: false,
        overlay_visible: false,
        scroll_locked: false,
    };
    const DOCKED: ShellView = ShellView {
        sidebar_visible: true,
        overlay_visible: false,
        scroll_locked: false,
    };
    const MODAL: ShellView = ShellView {
        sidebar_visible: true,
        overlay_visible: true,
        scroll_locked: true,
    };

    #[test]
    fn test_initialize_wide_docks_sidebar() {
        for width in [1024.0, 1280.0, 1920.0] {
            let (shell, page) = mount(width);
            shell.initialize();
            assert!(shell.is_visible());
            assert_eq!(page.view(), DOCKED);
        }
    }

    #[test]
    fn test_initialize_narrow_hides_sidebar() {
        for width in [320.0, 800.0, 1023.0] {
            let (shell, page) = mount(width);
            shell.initialize();
            assert!(!shell.is_visible());
            assert_eq!(page.view(), CLOSED);
        }
    }

    #[test]
    fn test_initialize_without_markup_is_noop() {
        let (shell, page) = mount(800.0);
        page.missing_markup.set(true);
        shell.initialize();
        assert!(!shell.is_bound());
        assert_eq!(shell.epoch(), 0);
        assert_eq!(page.listener_count(), 0);
        assert!(page.view.get().is_none());

        // Toggling an unbound shell only touches state.
        shell.toggle();
        assert!(page.view.get().is_none());
    }

    #[test]
    fn test_repeated_initialize_keeps_one_listener() {
        let (shell, page) = mount(800.0);
        for _ in 0..5 {
            shell.initialize();
        }
        assert_eq!(page.listener_count(), 1);
        assert_eq!(shell.epoch(), 5);

        page.click(Target::Toggle);
        assert!(shell.is_visible());
        assert_eq!(page.view(), MODAL);
    }

    #[test]
    fn test_initialize_after_markup_removed_drops_old_binding() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        assert_eq!(page.listener_count(), 1);

        page.missing_markup.set(true);
        shell.initialize();
        assert!(!shell.is_bound());
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_rebind_onto_page_without_shell_releases_open_drawer() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        page.click(Target::Toggle);
        assert_eq!(page.view(), MODAL);

        // Sidebar link to an auth page: the next page renders no shell.
        page.missing_markup.set(true);
        shell.initialize();

        assert!(!shell.is_visible());
        assert_eq!(shell.state(), ShellState::CLOSED);
        assert_eq!(page.view(), CLOSED);
    }

    #[test]
    fn test_rebind_releases_previous_view_before_new_one() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        page.click(Target::Toggle);

        // Widening without a resize event, then a soft navigation.
        page.width.set(1280.0);
        shell.initialize();
        assert_eq!(page.view(), DOCKED);
        assert_eq!(page.listener_count(), 1);
    }

    #[test]
    fn test_toggle_twice_is_identity_on_narrow() {
        let (shell, page) = mount(600.0);
        shell.initialize();
        let before = (shell.state(), page.view());

        shell.toggle();
        assert_eq!(page.view(), MODAL);
        shell.toggle();
        assert_eq!((shell.state(), page.view()), before);
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        for width in [600.0, 1280.0] {
            let (shell, page) = mount(width);
            shell.initialize();
            shell.toggle();
            shell.dismiss();
            let once = page.view();
            for _ in 0..4 {
                shell.dismiss();
            }
            assert!(!shell.is_visible());
            assert_eq!(page.view(), once);
            assert_eq!(once, CLOSED);
        }
    }

    #[test]
    fn test_resize_to_wide_docks_sidebar() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        shell.toggle();
        assert_eq!(page.view(), MODAL);

        page.width.set(1280.0);
        shell.on_resize();
        assert!(shell.is_visible());
        assert_eq!(page.view(), DOCKED);
    }

    #[test]
    fn test_resize_within_wide_redocks() {
        let (shell, page) = mount(1280.0);
        shell.initialize();
        shell.toggle();
        assert!(!shell.is_visible());

        page.width.set(1440.0);
        shell.on_resize();
        assert!(shell.is_visible());
        assert_eq!(page.view(), DOCKED);
    }

    #[test]
    fn test_resize_to_narrow_closes() {
        let (shell, page) = mount(1280.0);
        shell.initialize();
        assert_eq!(page.view(), DOCKED);

        page.width.set(800.0);
        shell.on_resize();
        assert!(!shell.is_visible());
        assert_eq!(page.view(), CLOSED);
    }

    #[test]
    fn test_resize_within_narrow_keeps_open_drawer() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        page.click(Target::Toggle);

        page.width.set(760.0);
        shell.on_resize();
        assert!(shell.is_visible());
        assert_eq!(page.view(), MODAL);
    }

    #[test]
    fn test_narrow_toggle_then_overlay_click() {
        let (shell, page) = mount(800.0);
        shell.initialize();

        page.click(Target::Toggle);
        assert_eq!(page.view(), MODAL);

        page.click(Target::Overlay);
        assert!(!shell.is_visible());
        assert_eq!(page.view(), CLOSED);
    }

    #[test]
    fn test_outside_click_dismisses_only_when_narrow() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        page.click(Target::Toggle);

        page.click(Target::Sidebar);
        assert!(shell.is_visible());

        page.click(Target::Content);
        assert!(!shell.is_visible());

        let (shell, page) = mount(1280.0);
        shell.initialize();
        page.click(Target::Content);
        assert!(shell.is_visible());
    }

    #[test]
    fn test_outside_click_checks_width_at_click_time() {
        let (shell, page) = mount(1280.0);
        shell.initialize();

        // Viewport narrows without a resize event reaching the controller.
        page.width.set(800.0);
        page.click(Target::Content);
        assert!(!shell.is_visible());
    }

    #[test]
    fn test_escape_dismisses_narrow_drawer() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        page.click(Target::Toggle);
        page.press_escape();
        assert_eq!(page.view(), CLOSED);

        let (shell, page) = mount(1280.0);
        shell.initialize();
        page.press_escape();
        assert!(shell.is_visible());
    }

    #[test]
    fn test_events_after_controller_dropped_are_ignored() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        let events = page.listeners.borrow()[0].1.clone();
        drop(shell);

        // The binding went with the controller.
        assert_eq!(page.listener_count(), 0);
        events.toggle_clicked();
        assert_eq!(page.view(), CLOSED);
    }

    #[test]
    fn test_reinitialize_resets_to_viewport_policy() {
        let (shell, page) = mount(800.0);
        shell.initialize();
        page.click(Target::Toggle);
        assert!(shell.is_visible());

        // Soft navigation re-renders the page; the drawer starts closed again.
        shell.initialize();
        assert!(!shell.is_visible());
        assert_eq!(page.view(), CLOSED);
    }
}
