//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Raw input (key codes, touches, button ids) -> engine `Input`
//! - Wall-clock seeding

use crate::sim::Input;

/// DOM ids of the control buttons
pub const START_BUTTON_ID: &str = "start-btn";
pub const PAUSE_BUTTON_ID: &str = "pause-btn";
pub const RESTART_BUTTON_ID: &str = "restart-btn";
/// DOM id of the username text field
pub const USERNAME_INPUT_ID: &str = "username";

/// Raw events the browser layer forwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput<'a> {
    /// `KeyboardEvent.code`
    Key(&'a str),
    /// Any touchstart (default scroll is suppressed by the caller)
    Touch,
    /// Click on a control button, by element id
    Button(&'a str),
}

/// Map a raw event to an engine input
///
/// `username` is the current contents of the username field, read only for
/// the start button.
pub fn map_input(raw: RawInput<'_>, username: &str) -> Option<Input> {
    match raw {
        RawInput::Key("Space") | RawInput::Touch => Some(Input::Jump),
        RawInput::Key(_) => None,
        RawInput::Button(START_BUTTON_ID) => Some(Input::Start {
            username: username.to_string(),
        }),
        RawInput::Button(PAUSE_BUTTON_ID) => Some(Input::TogglePause),
        RawInput::Button(RESTART_BUTTON_ID) => Some(Input::Restart),
        RawInput::Button(other) => {
            log::debug!("no input bound to button {:?}", other);
            None
        }
    }
}

/// Seed from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
