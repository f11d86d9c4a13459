//! Sidebar visibility state machine.
//!
//! Two states, open and closed. An open sidebar is *modal* when it was opened
//! on a narrow viewport: the overlay is shown and the page behind it is
//! scroll-locked. On wide viewports the sidebar sits beside the content and
//! is never modal.

use crate::config::NARROW_BREAKPOINT_PX;

/// Narrow/wide viewport split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    width_px: f64,
}

impl Breakpoint {
    pub fn new(width_px: f64) -> Self {
        Self { width_px }
    }

    /// Widths strictly below the breakpoint are narrow.
    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width < self.width_px
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::new(NARROW_BREAKPOINT_PX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open { modal: bool },
}

/// Single source of truth for sidebar visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellState {
    visibility: Visibility,
}

impl ShellState {
    pub const CLOSED: Self = Self {
        visibility: Visibility::Closed,
    };

    /// Policy state for a viewport: hidden when narrow, docked open when wide.
    pub fn for_viewport(narrow: bool) -> Self {
        let visibility = if narrow {
            Visibility::Closed
        } else {
            Visibility::Open { modal: false }
        };
        Self { visibility }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.visibility, Visibility::Open { .. })
    }

    /// Flip visibility. Opening on a narrow viewport makes the sidebar modal.
    pub fn toggle(&mut self, narrow: bool) {
        self.visibility = match self.visibility {
            Visibility::Closed => Visibility::Open { modal: narrow },
            Visibility::Open { .. } => Visibility::Closed,
        };
    }

    /// Force the closed state. Returns whether anything changed.
    pub fn dismiss(&mut self) -> bool {
        let changed = self.is_visible();
        self.visibility = Visibility::Closed;
        changed
    }

    /// Replace the state with the viewport policy, ignoring the previous state.
    pub fn reset_for_viewport(&mut self, narrow: bool) {
        *self = Self::for_viewport(narrow);
    }

    /// The DOM artifacts that mirror this state.
    pub fn view(&self) -> ShellView {
        match self.visibility {
            Visibility::Closed => ShellView {
                sidebar_visible: false,
                overlay_visible: false,
                scroll_locked: false,
            },
            Visibility::Open { modal } => ShellView {
                sidebar_visible: true,
                overlay_visible: modal,
                scroll_locked: modal,
            },
        }
    }
}

/// What the DOM must show for a given [`ShellState`].
///
/// Derived, never stored, so the sidebar class, overlay class and body
/// scroll lock cannot disagree with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellView {
    pub sidebar_visible: bool,
    pub overlay_visible: bool,
    pub scroll_locked: bool,
}
