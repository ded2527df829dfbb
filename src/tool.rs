use crate::marker::{SIZE_MAX, SIZE_MIN};
use egui::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeDirection {
    Grow,
    Shrink,
}

impl ResizeDirection {
    /// Positive wheel motion grows the tool, negative shrinks it.
    pub fn from_scroll(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Grow)
        } else if delta < 0.0 {
            Some(Self::Shrink)
        } else {
            None
        }
    }

    fn step(self) -> f32 {
        match self {
            Self::Grow => 1.0,
            Self::Shrink => -1.0,
        }
    }
}

/// Half-extent given to the next placed marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolSize(Vec2);

impl Default for ToolSize {
    fn default() -> Self {
        Self(Vec2::splat(10.0))
    }
}

impl ToolSize {
    pub fn new(size: Vec2) -> Self {
        Self(Vec2::new(
            size.x.clamp(SIZE_MIN, SIZE_MAX),
            size.y.clamp(SIZE_MIN, SIZE_MAX),
        ))
    }

    pub fn get(&self) -> Vec2 {
        self.0
    }

    pub fn resize(&mut self, direction: ResizeDirection, only_x: bool) {
        let step = direction.step();
        self.0.x = (self.0.x + step).clamp(SIZE_MIN, SIZE_MAX);
        if !only_x {
            self.0.y = (self.0.y + step).clamp(SIZE_MIN, SIZE_MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn grow_saturates_at_max() {
        let mut tool = ToolSize::new(vec2(98.0, 98.0));
        for _ in 0..5 {
            tool.resize(ResizeDirection::Grow, false);
        }
        assert_eq!(tool.get(), vec2(SIZE_MAX, SIZE_MAX));
    }

    #[test]
    fn shrink_saturates_at_min() {
        let mut tool = ToolSize::new(vec2(3.0, 3.0));
        for _ in 0..10 {
            tool.resize(ResizeDirection::Shrink, false);
        }
        assert_eq!(tool.get(), vec2(SIZE_MIN, SIZE_MIN));
    }

    #[test]
    fn axes_clamp_independently() {
        let mut tool = ToolSize::new(vec2(99.0, 50.0));
        tool.resize(ResizeDirection::Grow, false);
        tool.resize(ResizeDirection::Grow, false);
        assert_eq!(tool.get(), vec2(100.0, 52.0));
    }

    #[test]
    fn only_x_leaves_y_alone() {
        let mut tool = ToolSize::default();
        tool.resize(ResizeDirection::Shrink, true);
        assert_eq!(tool.get(), vec2(9.0, 10.0));
    }

    #[test]
    fn scroll_sign_picks_direction() {
        assert_eq!(ResizeDirection::from_scroll(3.5), Some(ResizeDirection::Grow));
        assert_eq!(ResizeDirection::from_scroll(-0.1), Some(ResizeDirection::Shrink));
        assert_eq!(ResizeDirection::from_scroll(0.0), None);
    }
}
