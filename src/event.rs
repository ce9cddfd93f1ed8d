//! Change notifications for renderers
//!
//! Events are queued while input is processed and drained by the host with
//! [`Terminal::take_events`](crate::Terminal::take_events).

use serde::{Deserialize, Serialize};

/// Something a renderer may want to react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalEvent {
    /// Audible bell requested
    Bell,
    /// Flash the screen
    VisualBell,
    /// Window title changed
    TitleChanged(String),
    /// Status line changed
    StatusChanged(String),
    /// The current screen changed
    ScreenSwitched { alternate: bool },
    /// The terminal size changed
    Resized { cols: usize, rows: usize },
    /// Reverse video (DECSCNM) toggled
    ReverseVideo(bool),
}
