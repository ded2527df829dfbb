//! Interaction state owned by the presentation layer: the store, the tool
//! size, whether placement mode is on, and the marker being dragged.

use crate::store::MarkerStore;
use crate::tool::{ResizeDirection, ToolSize};
use egui::{Pos2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    index: usize,
    origin: Pos2,
}

#[derive(Debug, Default)]
pub struct Board {
    pub store: MarkerStore,
    pub tool: ToolSize,
    pub placing: bool,
    drag: Option<Drag>,
}

impl Board {
    pub fn new(store: MarkerStore, tool: ToolSize) -> Self {
        Self {
            store,
            tool,
            placing: false,
            drag: None,
        }
    }

    pub fn toggle_placing(&mut self) -> bool {
        self.placing = !self.placing;
        self.placing
    }

    /// Drop a marker at `p` with the current tool size. Returns its id.
    pub fn place(&mut self, p: Pos2) -> usize {
        let size = self.tool.get();
        self.store.add(p, size, None).id
    }

    pub fn resize(&mut self, direction: ResizeDirection, only_x: bool) -> Vec2 {
        self.tool.resize(direction, only_x);
        log::debug!("tool size now {:?}", self.tool.get());
        self.tool.get()
    }

    /// Arm a drag on the currently selected marker, if any.
    pub fn drag_start(&mut self, p: Pos2) -> bool {
        self.drag = self
            .store
            .selected()
            .map(|index| Drag { index, origin: p });
        self.drag.is_some()
    }

    /// Move the dragged marker by the distance since the last call.
    pub fn drag_move(&mut self, p: Pos2) -> Option<Vec2> {
        let drag = self.drag.as_mut()?;
        let delta = p - drag.origin;
        drag.origin = p;
        let index = drag.index;
        self.store.translate(index, delta);
        Some(delta)
    }

    pub fn drag_end(&mut self) -> Option<usize> {
        let drag = self.drag.take()?;
        self.store.settle(drag.index);
        Some(drag.index)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn remove_last(&mut self) -> bool {
        self.drag = None;
        self.store.remove_last().is_some()
    }

    pub fn remove_closest_to(&mut self, p: Pos2) -> bool {
        self.drag = None;
        self.store.remove_closest_to(p).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn board_with_marker() -> Board {
        let mut board = Board::default();
        board.store.add(pos2(10.0, 10.0), vec2(5.0, 5.0), None);
        board
    }

    #[test]
    fn drag_accumulates_incremental_deltas() {
        let mut board = board_with_marker();
        board.store.select_at(pos2(10.0, 10.0));
        assert!(board.drag_start(pos2(10.0, 10.0)));
        assert_eq!(board.drag_move(pos2(15.0, 15.0)), Some(vec2(5.0, 5.0)));
        assert_eq!(board.drag_move(pos2(20.0, 15.0)), Some(vec2(5.0, 0.0)));
        assert_eq!(board.drag_end(), Some(0));

        let m = &board.store.all()[0];
        assert_eq!(m.pos - pos2(10.0, 10.0), vec2(10.0, 5.0));
        assert_eq!(m.bbox(), m.visual_rect());
        assert!(!board.is_dragging());
    }

    #[test]
    fn bbox_waits_for_drag_end() {
        let mut board = board_with_marker();
        board.store.select_at(pos2(10.0, 10.0));
        board.drag_start(pos2(10.0, 10.0));
        board.drag_move(pos2(40.0, 10.0));
        let m = &board.store.all()[0];
        assert_eq!(m.bbox().center(), pos2(10.0, 10.0));
        assert_eq!(m.visual_rect().center(), pos2(40.0, 10.0));
    }

    #[test]
    fn unselected_marker_cannot_be_dragged() {
        let mut board = board_with_marker();
        assert!(!board.drag_start(pos2(10.0, 10.0)));
        assert_eq!(board.drag_move(pos2(30.0, 30.0)), None);
        assert_eq!(board.drag_end(), None);
        assert_eq!(board.store.all()[0].pos, pos2(10.0, 10.0));
    }

    #[test]
    fn place_uses_tool_size() {
        let mut board = Board::default();
        board.resize(ResizeDirection::Grow, true);
        let id = board.place(pos2(100.0, 100.0));
        assert_eq!(id, 0);
        assert_eq!(board.store.all()[0].size, vec2(11.0, 10.0));
    }

    #[test]
    fn removing_cancels_drag() {
        let mut board = board_with_marker();
        board.store.select_at(pos2(10.0, 10.0));
        board.drag_start(pos2(10.0, 10.0));
        assert!(board.remove_last());
        assert!(!board.is_dragging());
        assert!(!board.remove_last());
    }
}
