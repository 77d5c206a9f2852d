//! Pointer model for the before/after comparison slider.
//!
//! The slider position is a percentage of the container width. A drag is
//! armed only by a press on the container (or its handle); once armed, every
//! pointer move is tracked regardless of where the pointer is, until the
//! pointer is released anywhere. Toolkit code feeds raw x coordinates in and
//! reads the position out.

pub const DEFAULT_POSITION: f32 = 50.0;

/// Horizontal extent of the comparison container in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f32,
    pub width: f32,
}

impl Span {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    /// Percentage (rounded to a whole number) of `x` across the span,
    /// clamped to `[0, 100]`. None for degenerate spans.
    pub fn percent_at(&self, x: f32) -> Option<f32> {
        if !(self.width > 0.0) || !x.is_finite() {
            return None;
        }
        let offset = (x - self.left).clamp(0.0, self.width);
        Some((offset / self.width * 100.0).round())
    }

    /// Screen x of a percentage position.
    pub fn x_at(&self, percent: f32) -> f32 {
        self.left + self.width * percent / 100.0
    }
}

/// Marker for an armed drag. Held only between press and release, and
/// dropped on every exit path (release, widget teardown).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    moves: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparatorSlider {
    position: f32,
    drag: Option<DragSession>,
}

impl Default for ComparatorSlider {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            drag: None,
        }
    }
}

impl ComparatorSlider {
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer went down on the container or the handle.
    pub fn arm(&mut self) {
        if self.drag.is_none() {
            self.drag = Some(DragSession { moves: 0 });
        }
    }

    /// Pointer moved somewhere in the window. Returns true if the position
    /// changed.
    pub fn track(&mut self, pointer_x: f32, span: Span) -> bool {
        let Some(session) = self.drag.as_mut() else {
            return false;
        };
        let Some(percent) = span.percent_at(pointer_x) else {
            return false;
        };
        session.moves += 1;
        let changed = percent != self.position;
        self.position = percent;
        changed
    }

    /// Pointer released anywhere, or the widget went away. Returns the
    /// number of moves tracked during the drag, if one was armed.
    pub fn disarm(&mut self) -> Option<u32> {
        self.drag.take().map(|session| session.moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: Span = Span {
        left: 100.0,
        width: 400.0,
    };

    fn armed() -> ComparatorSlider {
        let mut slider = ComparatorSlider::default();
        slider.arm();
        slider
    }

    #[test]
    fn starts_centered_and_idle() {
        let slider = ComparatorSlider::default();
        assert_eq!(slider.position(), 50.0);
        assert!(!slider.is_dragging());
    }

    #[test]
    fn tracks_offset_from_left_edge() {
        let mut slider = armed();
        for (x, expected) in [(0.0, 0.0), (100.0, 25.0), (133.0, 33.0), (141.0, 35.0), (400.0, 100.0)] {
            slider.track(SPAN.left + x, SPAN);
            assert_eq!(slider.position(), expected, "x = {x}");
        }
    }

    #[test]
    fn clamps_outside_the_container() {
        let mut slider = armed();
        slider.track(SPAN.left - 250.0, SPAN);
        assert_eq!(slider.position(), 0.0);
        slider.track(SPAN.left + SPAN.width + 1_000.0, SPAN);
        assert_eq!(slider.position(), 100.0);
    }

    #[test]
    fn moves_are_ignored_until_armed() {
        let mut slider = ComparatorSlider::default();
        assert!(!slider.track(SPAN.left, SPAN));
        assert_eq!(slider.position(), 50.0);
    }

    #[test]
    fn moves_after_release_do_not_change_position() {
        let mut slider = armed();
        slider.track(SPAN.left + 40.0, SPAN);
        assert_eq!(slider.disarm(), Some(1));
        assert!(!slider.is_dragging());

        assert!(!slider.track(SPAN.left + 360.0, SPAN));
        assert_eq!(slider.position(), 10.0);
        assert_eq!(slider.disarm(), None);
    }

    #[test]
    fn degenerate_span_keeps_position() {
        let mut slider = armed();
        assert!(!slider.track(10.0, Span::new(0.0, 0.0)));
        assert!(!slider.track(f32::NAN, SPAN));
        assert_eq!(slider.position(), 50.0);
    }

    #[test]
    fn rearming_keeps_the_running_session() {
        let mut slider = armed();
        slider.track(SPAN.left, SPAN);
        slider.arm();
        assert_eq!(slider.disarm(), Some(1));
    }

    #[test]
    fn x_at_inverts_percent() {
        assert_eq!(SPAN.x_at(25.0), 200.0);
        assert_eq!(SPAN.percent_at(SPAN.x_at(75.0)), Some(75.0));
    }
}
