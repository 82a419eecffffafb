//! Screen routing for the profile tab

use crate::types::Screen;
use tracing::debug;

pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
    focus_pending: bool,
}

impl Navigator {
    /// Starts on the profile screen with a pending focus event
    pub fn new() -> Self {
        Self {
            current: Screen::Profile,
            history: Vec::new(),
            focus_pending: true,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn navigate(&mut self, target: Screen) {
        debug!(from = ?self.current, to = ?target, "Navigate");
        self.history.push(target);
        if target == Screen::Profile && self.current != Screen::Profile {
            self.focus_pending = true;
        }
        self.current = target;
    }

    /// True once each time the profile screen becomes visible
    pub fn take_profile_focus(&mut self) -> bool {
        if self.current == Screen::Profile && self.focus_pending {
            self.focus_pending = false;
            true
        } else {
            false
        }
    }

    /// Every navigation event issued so far, oldest first
    pub fn history(&self) -> &[Screen] {
        &self.history
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
