//! Canvas drag-reorder state machine
//!
//! Gesture handling belongs to the UI host; it reports a drag start, each
//! hover over another element (with the hovered element's vertical bounds
//! and the pointer position) and the final drop or cancel. The controller
//! decides when the dragged element has moved far enough to change places.
//!
//! Reordering is live: every [`Reorder`] returned from [`DragController::hover`]
//! must be applied to the schema right away, because the next hover decision
//! reads the index the dragged element has just moved to.
//!
//! ```text
//! Idle -> Dragging(source) -> Hovering(target, Above|Below) -> Idle
//!                 \______________________/
//!                        cancel -> Idle (origin restored)
//! ```

/// Which half of the hovered element the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPosition {
    Above,
    Below,
}

/// Move the element at `from` so it ends up at `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `source` is the current index of the dragged element
    Dragging { source: usize },
    Hovering {
        source: usize,
        target: usize,
        position: HoverPosition,
    },
}

impl DragState {
    fn source(&self) -> Option<usize> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { source } | DragState::Hovering { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    origin: Option<usize>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Start dragging the element at `source`. Restarts any drag in progress.
    pub fn begin(&mut self, source: usize) {
        if self.is_dragging() {
            tracing::debug!(state = ?self.state, "drag restarted before drop");
        }
        self.state = DragState::Dragging { source };
        self.origin = Some(source);
    }

    /// Pointer moved over the element at `target`, whose bounds are
    /// `rect_top..rect_bottom`.
    ///
    /// The dragged element only swaps past `target` once the pointer crosses
    /// the target's vertical midpoint in the direction of travel: moving down
    /// requires the lower half, moving up the upper half. This keeps two
    /// elements of different heights from flickering back and forth.
    pub fn hover(
        &mut self,
        target: usize,
        rect_top: f64,
        rect_bottom: f64,
        pointer_y: f64,
    ) -> Option<Reorder> {
        let source = self.state.source()?;
        if target == source {
            return None;
        }

        let middle = (rect_bottom - rect_top) / 2.0;
        let offset = pointer_y - rect_top;
        let position = if offset < middle {
            HoverPosition::Above
        } else {
            HoverPosition::Below
        };

        let moving_down = source < target;
        let crossed = match position {
            HoverPosition::Below => moving_down,
            HoverPosition::Above => !moving_down,
        };

        if !crossed {
            self.state = DragState::Hovering {
                source,
                target,
                position,
            };
            return None;
        }

        self.state = DragState::Hovering {
            source: target,
            target,
            position,
        };
        Some(Reorder {
            from: source,
            to: target,
        })
    }

    /// Finish the drag over a valid target.
    ///
    /// Returns the net move this drag performed, if any. The individual
    /// hover reorders have already been applied; the result is for callers
    /// that persist or announce the change.
    pub fn drop(&mut self) -> Option<Reorder> {
        let source = self.state.source();
        let origin = self.origin.take();
        self.state = DragState::Idle;

        match (origin, source) {
            (Some(from), Some(to)) if from != to => Some(Reorder { from, to }),
            _ => None,
        }
    }

    /// Abandon the drag (dropped outside any valid target).
    ///
    /// Returns the move that puts the dragged element back where it started;
    /// after applying it the schema is exactly as before `begin`.
    pub fn cancel(&mut self) -> Option<Reorder> {
        let source = self.state.source();
        let origin = self.origin.take();
        self.state = DragState::Idle;

        match (source, origin) {
            (Some(from), Some(to)) if from != to => Some(Reorder { from, to }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementFactory, FormElementType, FormSchema};
    use pretty_assertions::assert_eq;

    fn schema(labels: &[&str]) -> FormSchema {
        let mut schema = FormSchema::new("t", "");
        for label in labels {
            schema.add(ElementFactory::create(FormElementType::Text).with_label(*label));
        }
        schema
    }

    fn labels(schema: &FormSchema) -> Vec<&str> {
        schema.elements().iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_hover_without_drag_is_ignored() {
        let mut drag = DragController::new();
        assert_eq!(drag.hover(1, 0.0, 40.0, 30.0), None);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_moving_down_waits_for_lower_half() {
        let mut drag = DragController::new();
        drag.begin(0);

        assert_eq!(drag.hover(1, 100.0, 140.0, 110.0), None);
        assert_eq!(
            drag.state(),
            DragState::Hovering {
                source: 0,
                target: 1,
                position: HoverPosition::Above
            }
        );

        assert_eq!(
            drag.hover(1, 100.0, 140.0, 130.0),
            Some(Reorder { from: 0, to: 1 })
        );
        assert_eq!(
            drag.state(),
            DragState::Hovering {
                source: 1,
                target: 1,
                position: HoverPosition::Below
            }
        );
    }

    #[test]
    fn test_moving_up_waits_for_upper_half() {
        let mut drag = DragController::new();
        drag.begin(2);

        assert_eq!(drag.hover(1, 40.0, 80.0, 70.0), None);
        assert_eq!(drag.hover(1, 40.0, 80.0, 50.0), Some(Reorder { from: 2, to: 1 }));
    }

    #[test]
    fn test_drop_reports_net_move() {
        let mut schema = schema(&["a", "b", "c"]);
        let mut drag = DragController::new();

        drag.begin(0);
        for (target, top) in [(1, 40.0), (2, 80.0)] {
            if let Some(Reorder { from, to }) = drag.hover(target, top, top + 40.0, top + 35.0) {
                schema.move_element(from, to);
            }
        }

        assert_eq!(labels(&schema), vec!["b", "c", "a"]);
        assert_eq!(drag.drop(), Some(Reorder { from: 0, to: 2 }));
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_cancel_restores_order() {
        let mut schema = schema(&["a", "b", "c"]);
        let before = labels(&schema).into_iter().map(String::from).collect::<Vec<_>>();
        let mut drag = DragController::new();

        drag.begin(2);
        if let Some(Reorder { from, to }) = drag.hover(0, 0.0, 40.0, 5.0) {
            schema.move_element(from, to);
        }
        assert_eq!(labels(&schema), vec!["c", "a", "b"]);

        if let Some(Reorder { from, to }) = drag.cancel() {
            schema.move_element(from, to);
        }
        assert_eq!(labels(&schema), before);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_in_place_is_no_move() {
        let mut drag = DragController::new();
        drag.begin(1);
        assert_eq!(drag.hover(1, 0.0, 40.0, 39.0), None);
        assert_eq!(drag.drop(), None);
        assert_eq!(drag.cancel(), None);
    }
}
