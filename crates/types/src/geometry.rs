//! Widget placement on screen.

use serde::{Deserialize, Serialize};

/// Gap between the widget and the right screen edge at startup
pub const DEFAULT_RIGHT_MARGIN: i32 = 30;

/// Gap between the widget and the bottom screen edge at startup
/// (leaves room for a taskbar)
pub const DEFAULT_BOTTOM_MARGIN: i32 = 80;

/// Widget size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetGeometry {
    pub width: i32,
    pub height: i32,
}

impl Default for WidgetGeometry {
    fn default() -> Self {
        Self {
            width: 320,
            height: 380,
        }
    }
}

/// Bounding box the widget must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Clamp a widget origin so the whole widget stays on screen
///
/// Returns `(max(0, min(x, screen_w - w)), max(0, min(y, screen_h - h)))`.
/// If the widget is larger than the screen on an axis the upper bound falls
/// below zero and that axis is pinned to 0. Callers should not rely on that
/// case.
pub fn clamp_position(
    x: i32,
    y: i32,
    widget_width: i32,
    widget_height: i32,
    screen_width: i32,
    screen_height: i32,
) -> (i32, i32) {
    let clamped_x = x.min(screen_width.saturating_sub(widget_width)).max(0);
    let clamped_y = y.min(screen_height.saturating_sub(widget_height)).max(0);
    (clamped_x, clamped_y)
}

/// Initial origin: bottom-right corner, inset by the default margins
pub fn default_position(screen: ScreenSize, widget: WidgetGeometry) -> (i32, i32) {
    let x = screen.width - widget.width - DEFAULT_RIGHT_MARGIN;
    let y = screen.height - widget.height - DEFAULT_BOTTOM_MARGIN;
    clamp_position(x, y, widget.width, widget.height, screen.width, screen.height)
}
