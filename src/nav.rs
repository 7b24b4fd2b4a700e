//! Navigation chrome policy: a pure function of the scroll snapshot plus the
//! one piece of user-toggled state (the mobile menu).

use crate::telemetry::ScrollSnapshot;

/// Derived nav chrome state, recomputed wholesale from the latest snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NavState {
    /// Header swaps from transparent to solid.
    pub scrolled: bool,
    pub menu_open: bool,
    /// The nav bar hides entirely once the reader is past half a viewport
    /// height. Intentional product behavior, preserved from the source page.
    pub nav_visible: bool,
    /// Floating booking CTA shows exactly when the nav hides.
    pub booking_button_visible: bool,
}

/// Derive the nav state. `nav_visible` and `booking_button_visible` are
/// complementary by construction.
pub fn policy(snapshot: ScrollSnapshot, menu_open: bool) -> NavState {
    let past_half = snapshot.past_half_viewport();
    NavState {
        scrolled: snapshot.past_threshold(),
        menu_open,
        nav_visible: !past_half,
        booking_button_visible: past_half,
    }
}

/// Holds the menu toggle so its rules live next to the policy: open/close on
/// explicit user action only, forced closed when a nav link is activated.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavController {
    menu_open: bool,
}

impl NavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn link_activated(&mut self) {
        self.menu_open = false;
    }

    pub fn derive(&self, snapshot: ScrollSnapshot) -> NavState {
        policy(snapshot, self.menu_open)
    }
}
