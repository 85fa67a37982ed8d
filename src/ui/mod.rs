//! UI components
//!
//! Toolkit-independent pieces of the widget: drag handling and a terminal
//! rendering of the display surface.

mod drag;
mod terminal_display;

pub use drag::DragTracker;
pub use terminal_display::TerminalDisplay;
