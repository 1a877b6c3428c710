//! UI preferences independent of the countdown

use serde::{Deserialize, Serialize};

/// Display preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    pub fn new(dark_mode: bool) -> Self {
        Self { dark_mode }
    }

    /// Flip dark mode and return the new value
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Class name a renderer would put on the page body
    pub fn theme_class(&self) -> &'static str {
        if self.dark_mode { "dark-mode" } else { "light-mode" }
    }
}
