//! Dual-thumb range control state machine
//!
//! The controller sits between raw pointer/keyboard events and the filter
//! state. Dragging only updates a pending pair; a commit is produced on
//! release, on a track click, or when a typed value parses and keeps the
//! thumbs ordered. The frontend dispatches each `RangeCommit` as a
//! `SetRange` command.

use crate::filters::Range;
use crate::filters::fields::{RangeDomain, RangeField};
use crate::scale::{self, clamp, parse_smart_value, position_to_value, round_significant, value_to_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thumb {
    Min,
    Max,
}

/// Bounds to write into the filter state. The thumb that was moved commits
/// `None` when it rests on the domain edge; the other bound is passed through
/// exactly as it was committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeCommit {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl From<RangeCommit> for Range {
    fn from(commit: RangeCommit) -> Self {
        Range::new(commit.min, commit.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { thumb: Thumb, min: f64, max: f64, moved: bool },
}

#[derive(Debug, Clone)]
pub struct RangeSelectionController {
    field: RangeField,
    domain: RangeDomain,
    committed: Range,
    drag: DragState,
    min_text: Option<String>,
    max_text: Option<String>,
}

impl RangeSelectionController {
    pub fn new(field: RangeField, committed: Range) -> Self {
        Self {
            field,
            domain: field.domain(),
            committed,
            drag: DragState::Idle,
            min_text: None,
            max_text: None,
        }
    }

    pub fn field(&self) -> RangeField {
        self.field
    }

    pub fn domain(&self) -> RangeDomain {
        self.domain
    }

    pub fn committed(&self) -> Range {
        self.committed
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn dragging_thumb(&self) -> Option<Thumb> {
        match self.drag {
            DragState::Dragging { thumb, .. } => Some(thumb),
            DragState::Idle => None,
        }
    }

    // ========================================================================
    // Pointer path
    // ========================================================================

    pub fn pointer_down(&mut self, thumb: Thumb) {
        if thumb == Thumb::Max && self.field.is_min_only() {
            return;
        }
        let (min, max) = self.committed_values();
        self.drag = DragState::Dragging {
            thumb,
            min,
            max,
            moved: false,
        };
    }

    /// Move the dragged thumb. Moves that would cross the other thumb are
    /// ignored, leaving the thumb where it last stopped.
    pub fn pointer_move(&mut self, position: f64) {
        let value = self.value_at(position);
        if let DragState::Dragging { thumb, min, max, moved } = &mut self.drag {
            let slot = match thumb {
                Thumb::Min if value <= *max => min,
                Thumb::Max if value >= *min => max,
                _ => return,
            };
            if *slot != value {
                *slot = value;
                *moved = true;
            }
        }
    }

    /// End the drag and commit the dragged thumb. A press and release
    /// without movement commits nothing.
    pub fn pointer_up(&mut self) -> Option<RangeCommit> {
        match std::mem::replace(&mut self.drag, DragState::Idle) {
            DragState::Dragging {
                thumb,
                min,
                max,
                moved: true,
            } => Some(self.commit(thumb, if thumb == Thumb::Min { min } else { max })),
            _ => None,
        }
    }

    /// Abort the drag; the committed pair is untouched.
    pub fn pointer_cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Jump the nearer thumb to the clicked position and commit.
    /// Equidistant clicks move the min thumb.
    pub fn track_click(&mut self, position: f64) -> Option<RangeCommit> {
        if self.is_dragging() {
            return None;
        }
        let value = self.value_at(position);
        let (min, max) = self.committed_values();

        let thumb = if self.field.is_min_only() {
            Thumb::Min
        } else {
            let position = clamp(position, 0.0, 1.0);
            let to_min = (position - self.position_of(min)).abs();
            let to_max = (position - self.position_of(max)).abs();
            if to_min <= to_max { Thumb::Min } else { Thumb::Max }
        };

        Some(match thumb {
            Thumb::Min => self.commit(Thumb::Min, value.min(max)),
            Thumb::Max => self.commit(Thumb::Max, value.max(min)),
        })
    }

    // ========================================================================
    // Text path
    // ========================================================================

    /// Record typed text. Commits when it parses and keeps the pair ordered;
    /// otherwise only the buffer changes.
    pub fn text_input(&mut self, thumb: Thumb, text: &str) -> Option<RangeCommit> {
        if thumb == Thumb::Max && self.field.is_min_only() {
            return None;
        }
        *self.text_slot(thumb) = Some(text.to_string());

        let value = clamp(parse_smart_value(text)?, self.domain.min, self.domain.max);
        let (min, max) = self.committed_values();
        match thumb {
            Thumb::Min if value <= max => Some(self.commit(Thumb::Min, value)),
            Thumb::Max if value >= min => Some(self.commit(Thumb::Max, value)),
            _ => None,
        }
    }

    /// Drop the edit buffer so the input shows the committed value again.
    pub fn text_blur(&mut self, thumb: Thumb) {
        *self.text_slot(thumb) = None;
    }

    /// What the thumb's text input should show
    pub fn text_value(&self, thumb: Thumb) -> String {
        let buffer = match thumb {
            Thumb::Min => &self.min_text,
            Thumb::Max => &self.max_text,
        };
        if let Some(text) = buffer {
            return text.clone();
        }
        let (min, max) = self.display_range();
        let value = match thumb {
            Thumb::Min => min,
            Thumb::Max => max,
        };
        scale::format_with_unit(value, self.domain.unit)
    }

    // ========================================================================
    // State sync and rendering
    // ========================================================================

    /// Adopt a committed pair that changed underneath the control, e.g. after
    /// back/forward navigation. Ignored mid-drag.
    pub fn sync_committed(&mut self, range: Range) {
        if self.is_dragging() || range == self.committed {
            return;
        }
        self.committed = range;
        self.min_text = None;
        self.max_text = None;
    }

    /// Values to render: pending while dragging, committed otherwise
    pub fn display_range(&self) -> (f64, f64) {
        match self.drag {
            DragState::Dragging { min, max, .. } => (min, max),
            DragState::Idle => self.committed_values(),
        }
    }

    /// Thumb positions in `[0, 1]` for the current display values
    pub fn display_positions(&self) -> (f64, f64) {
        let (min, max) = self.display_range();
        (self.position_of(min), self.position_of(max))
    }

    fn committed_values(&self) -> (f64, f64) {
        let min = self
            .committed
            .min
            .map_or(self.domain.min, |v| clamp(v, self.domain.min, self.domain.max));
        let max = self
            .committed
            .max
            .map_or(self.domain.max, |v| clamp(v, self.domain.min, self.domain.max));
        (min, max.max(min))
    }

    /// Pointer-derived value, rounded to three significant digits
    fn value_at(&self, position: f64) -> f64 {
        let value = position_to_value(position, self.domain.min, self.domain.max, self.domain.scale);
        clamp(round_significant(value, 3), self.domain.min, self.domain.max)
    }

    fn position_of(&self, value: f64) -> f64 {
        value_to_position(value, self.domain.min, self.domain.max, self.domain.scale)
    }

    /// Write `value` into the `thumb` side only; the other bound keeps its
    /// committed value, even when it lies outside the slider domain.
    fn commit(&mut self, thumb: Thumb, value: f64) -> RangeCommit {
        let mut commit = RangeCommit {
            min: self.committed.min,
            max: self.committed.max,
        };
        match thumb {
            Thumb::Min => commit.min = (value > self.domain.min).then_some(value),
            Thumb::Max => commit.max = (value < self.domain.max).then_some(value),
        }
        self.committed = commit.into();
        commit
    }

    fn text_slot(&mut self, thumb: Thumb) -> &mut Option<String> {
        match thumb {
            Thumb::Min => &mut self.min_text,
            Thumb::Max => &mut self.max_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price() -> RangeSelectionController {
        // 0..100, linear
        RangeSelectionController::new(RangeField::Price, Range::UNBOUNDED)
    }

    #[test]
    fn test_drag_commits_only_on_release() {
        let mut control = price();
        control.pointer_down(Thumb::Max);
        control.pointer_move(0.5);
        control.pointer_move(0.2);
        assert_eq!(control.display_range(), (0.0, 20.0));
        assert!(control.committed().is_unbounded());

        let commit = control.pointer_up().unwrap();
        assert_eq!(commit, RangeCommit { min: None, max: Some(20.0) });
        assert!(!control.is_dragging());
        assert_eq!(control.committed(), Range::new(None, Some(20.0)));
        assert_eq!(control.pointer_up(), None);
    }

    #[test]
    fn test_drag_to_edge_commits_unbounded() {
        let mut control = RangeSelectionController::new(RangeField::Price, Range::new(Some(10.0), Some(50.0)));
        control.pointer_down(Thumb::Max);
        control.pointer_move(1.4);
        let commit = control.pointer_up().unwrap();
        assert_eq!(commit, RangeCommit { min: Some(10.0), max: None });
    }

    #[test]
    fn test_thumbs_never_cross() {
        let mut control = RangeSelectionController::new(RangeField::Price, Range::new(Some(10.0), Some(40.0)));
        control.pointer_down(Thumb::Min);
        control.pointer_move(0.3);
        control.pointer_move(0.6);
        assert_eq!(control.display_range(), (30.0, 40.0));
        let commit = control.pointer_up().unwrap();
        assert_eq!(commit.min, Some(30.0));
        assert_eq!(commit.max, Some(40.0));
    }

    #[test]
    fn test_drag_keeps_untouched_bound() {
        // A bookmarked max above the slider domain survives a min drag
        let mut control = RangeSelectionController::new(RangeField::Price, Range::new(None, Some(250.0)));
        control.pointer_down(Thumb::Min);
        control.pointer_move(0.1);
        let commit = control.pointer_up().unwrap();
        assert_eq!(commit, RangeCommit { min: Some(10.0), max: Some(250.0) });
        assert_eq!(control.committed(), Range::new(Some(10.0), Some(250.0)));
    }

    #[test]
    fn test_press_and_release_without_move_commits_nothing() {
        let committed = Range::new(None, Some(5e8));
        let mut control = RangeSelectionController::new(RangeField::Owners, committed);
        control.pointer_down(Thumb::Max);
        assert_eq!(control.pointer_up(), None);
        assert_eq!(control.committed(), committed);

        // A move that would cross the other thumb is not movement either
        let mut control = RangeSelectionController::new(RangeField::Price, Range::new(Some(40.0), Some(60.0)));
        control.pointer_down(Thumb::Min);
        control.pointer_move(0.9);
        assert_eq!(control.pointer_up(), None);
    }

    #[test]
    fn test_track_click_keeps_other_bound() {
        let mut control = RangeSelectionController::new(RangeField::Price, Range::new(Some(5.0), Some(250.0)));
        let commit = control.track_click(0.2).unwrap();
        assert_eq!(commit, RangeCommit { min: Some(20.0), max: Some(250.0) });
    }

    #[test]
    fn test_log_drag_values_are_rounded() {
        let mut control = RangeSelectionController::new(RangeField::Ccu, Range::UNBOUNDED);
        control.pointer_down(Thumb::Min);
        // 10^3.1 = 1258.925...
        control.pointer_move(3.1 / 6.0);
        let commit = control.pointer_up().unwrap();
        assert_eq!(commit.min, Some(1_260.0));
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut control = price();
        control.pointer_down(Thumb::Min);
        control.pointer_move(0.5);
        control.pointer_cancel();
        assert_eq!(control.display_range(), (0.0, 100.0));
        assert!(control.committed().is_unbounded());
    }

    #[test]
    fn test_track_click_moves_nearer_thumb() {
        let mut control = RangeSelectionController::new(RangeField::Price, Range::new(Some(20.0), Some(80.0)));
        let commit = control.track_click(0.7).unwrap();
        assert_eq!(commit, RangeCommit { min: Some(20.0), max: Some(70.0) });

        let commit = control.track_click(0.3).unwrap();
        assert_eq!(commit, RangeCommit { min: Some(30.0), max: Some(70.0) });
    }

    #[test]
    fn test_track_click_tie_moves_min() {
        let mut control = RangeSelectionController::new(RangeField::Price, Range::new(Some(25.0), Some(75.0)));
        let commit = control.track_click(0.5).unwrap();
        assert_eq!(commit, RangeCommit { min: Some(50.0), max: Some(75.0) });
    }

    #[test]
    fn test_track_click_ignored_while_dragging() {
        let mut control = price();
        control.pointer_down(Thumb::Min);
        assert_eq!(control.track_click(0.5), None);
    }

    #[test]
    fn test_log_scale_drag() {
        let mut control = RangeSelectionController::new(RangeField::Ccu, Range::UNBOUNDED);
        control.pointer_down(Thumb::Min);
        control.pointer_move(0.5);
        let commit = control.pointer_up().unwrap();
        let min = commit.min.unwrap();
        assert!((min - 1_000.0).abs() < 1e-6, "got {min}");
        assert_eq!(commit.max, None);
    }

    #[test]
    fn test_text_input_commits_when_ordered() {
        let mut control = RangeSelectionController::new(RangeField::Ccu, Range::new(None, Some(5_000.0)));
        assert_eq!(
            control.text_input(Thumb::Min, "1.2k"),
            Some(RangeCommit { min: Some(1_200.0), max: Some(5_000.0) })
        );

        // Would cross the max: buffer only
        assert_eq!(control.text_input(Thumb::Min, "10k"), None);
        assert_eq!(control.text_value(Thumb::Min), "10k");
        assert_eq!(control.committed().min, Some(1_200.0));

        control.text_blur(Thumb::Min);
        assert_eq!(control.text_value(Thumb::Min), "1.2K");
    }

    #[test]
    fn test_text_input_clamps_and_ignores_garbage() {
        let mut control = price();
        assert_eq!(control.text_input(Thumb::Max, "abc"), None);
        assert_eq!(control.text_value(Thumb::Max), "abc");

        let commit = control.text_input(Thumb::Max, "$250").unwrap();
        assert_eq!(commit.max, None);

        let commit = control.text_input(Thumb::Max, "$19.99").unwrap();
        assert_eq!(commit.max, Some(19.99));
        control.text_blur(Thumb::Max);
        assert_eq!(control.text_value(Thumb::Max), "$19.99");
    }

    #[test]
    fn test_min_only_field_has_no_max_thumb() {
        let mut control = RangeSelectionController::new(RangeField::ActivePct, Range::UNBOUNDED);
        control.pointer_down(Thumb::Max);
        assert!(!control.is_dragging());
        assert_eq!(control.text_input(Thumb::Max, "50"), None);

        let commit = control.track_click(0.9).unwrap();
        assert_eq!(commit, RangeCommit { min: Some(90.0), max: None });
    }

    #[test]
    fn test_sync_committed_ignored_while_dragging() {
        let mut control = price();
        control.pointer_down(Thumb::Min);
        control.pointer_move(0.4);
        control.sync_committed(Range::new(Some(5.0), None));
        assert_eq!(control.display_range(), (40.0, 100.0));
        control.pointer_cancel();

        control.sync_committed(Range::new(Some(5.0), None));
        assert_eq!(control.display_range(), (5.0, 100.0));
    }

    #[test]
    fn test_sync_committed_resets_stale_text() {
        let mut control = price();
        control.text_input(Thumb::Min, "1");
        control.sync_committed(Range::new(Some(1.0), None));
        assert_eq!(control.text_value(Thumb::Min), "1");

        control.sync_committed(Range::new(Some(12.0), None));
        assert_eq!(control.text_value(Thumb::Min), "$12");
    }
}
