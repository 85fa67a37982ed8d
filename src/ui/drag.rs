//! Dragging the widget by its header

use crate::core::DisplaySurface;
use cost_widget_types::{clamp_position, ScreenSize, WidgetGeometry};

/// Tracks a pointer drag and turns motion into clamped window origins
#[derive(Debug, Default, Clone)]
pub struct DragTracker {
    /// Pointer position inside the widget when the button went down
    anchor: Option<(i32, i32)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button pressed at `(pointer_x, pointer_y)`, relative to the widget
    pub fn begin(&mut self, pointer_x: i32, pointer_y: i32) {
        self.anchor = Some((pointer_x, pointer_y));
    }

    /// Button released
    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// New window origin for a motion event
    ///
    /// `window_x`/`window_y` is the current origin, the pointer is relative
    /// to the widget. Returns `None` when no drag is in progress.
    pub fn drag_to(
        &self,
        window_x: i32,
        window_y: i32,
        pointer_x: i32,
        pointer_y: i32,
        widget: WidgetGeometry,
        screen: ScreenSize,
    ) -> Option<(i32, i32)> {
        let (anchor_x, anchor_y) = self.anchor?;
        let x = window_x + (pointer_x - anchor_x);
        let y = window_y + (pointer_y - anchor_y);
        Some(clamp_position(
            x,
            y,
            widget.width,
            widget.height,
            screen.width,
            screen.height,
        ))
    }

    /// Handle a motion event and move the display
    ///
    /// Returns the new origin, if the display was moved.
    pub fn apply(
        &self,
        display: &mut dyn DisplaySurface,
        window: (i32, i32),
        pointer: (i32, i32),
        widget: WidgetGeometry,
        screen: ScreenSize,
    ) -> Option<(i32, i32)> {
        let (x, y) = self.drag_to(window.0, window.1, pointer.0, pointer.1, widget, screen)?;
        display.reposition(x, y);
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DisplayUpdate;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    #[derive(Default)]
    struct PositionOnly {
        moves: Vec<(i32, i32)>,
    }

    impl DisplaySurface for PositionOnly {
        fn render(&mut self, _update: &DisplayUpdate) {}

        fn reposition(&mut self, x: i32, y: i32) {
            self.moves.push((x, y));
        }

        fn close(&mut self) {}

        fn notify_error(&mut self, _title: &str, _message: &str) {}
    }

    #[test]
    fn test_motion_without_press_is_ignored() {
        let tracker = DragTracker::new();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.drag_to(100, 100, 5, 5, WidgetGeometry::default(), SCREEN), None);
    }

    #[test]
    fn test_drag_moves_by_pointer_delta() {
        let mut tracker = DragTracker::new();
        tracker.begin(10, 12);
        let pos = tracker.drag_to(500, 300, 60, 2, WidgetGeometry::default(), SCREEN);
        assert_eq!(pos, Some((550, 290)));
    }

    #[test]
    fn test_drag_is_clamped_to_screen() {
        let mut tracker = DragTracker::new();
        tracker.begin(0, 0);
        let widget = WidgetGeometry::default();
        assert_eq!(tracker.drag_to(1590, 690, 100, 100, widget, SCREEN), Some((1600, 700)));
        assert_eq!(tracker.drag_to(5, 5, -100, -100, widget, SCREEN), Some((0, 0)));
    }

    #[test]
    fn test_apply_repositions_display() {
        let mut tracker = DragTracker::new();
        let mut display = PositionOnly::default();
        let widget = WidgetGeometry::default();

        assert_eq!(tracker.apply(&mut display, (0, 0), (5, 5), widget, SCREEN), None);
        tracker.begin(5, 5);
        assert_eq!(
            tracker.apply(&mut display, (100, 100), (25, 0), widget, SCREEN),
            Some((120, 95))
        );
        tracker.end();
        assert!(!tracker.is_dragging());
        assert_eq!(display.moves, vec![(120, 95)]);
    }
}
