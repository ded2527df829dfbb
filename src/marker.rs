use egui::{Pos2, Rect, Vec2};

/// Smallest half-extent a marker may have on either axis.
pub const SIZE_MIN: f32 = 1.0;
/// Largest half-extent a marker may have on either axis.
pub const SIZE_MAX: f32 = 100.0;
/// Margin added around the geometric rectangle when hit-testing.
pub const SELECT_PADDING: f32 = 2.0;

// ── Marker ──────────────────────────────────────────────────────────────────

/// A rectangular annotation centered on `pos`, extending `size` on each side.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: usize,
    pub pos: Pos2,
    pub size: Vec2,
    pub selected: bool,
    bbox: Rect,
}

impl Marker {
    pub fn new(id: usize, pos: Pos2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            size,
            selected: false,
            bbox: geometric_bbox(pos, size),
        }
    }

    /// The cached bounding box. It lags behind `pos` while a drag is in
    /// progress and catches up on `refresh_bbox`.
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// The rectangle the pointer must fall strictly inside to select this marker.
    pub fn hit_box(&self) -> Rect {
        self.bbox.expand(SELECT_PADDING)
    }

    /// Where the marker is drawn right now, following `pos`.
    pub fn visual_rect(&self) -> Rect {
        geometric_bbox(self.pos, self.size)
    }

    pub fn refresh_bbox(&mut self) {
        self.bbox = geometric_bbox(self.pos, self.size);
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = clamp_size(size);
        self.refresh_bbox();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    pub fn strictly_contains(&self, p: Pos2) -> bool {
        strictly_inside(self.hit_box(), p)
    }

    /// Distance from `p` to the cached bbox, zero when `p` is inside it.
    pub fn distance_to(&self, p: Pos2) -> f32 {
        self.bbox.distance_to_pos(p)
    }
}

pub fn geometric_bbox(pos: Pos2, size: Vec2) -> Rect {
    Rect::from_min_max(pos - size, pos + size)
}

pub fn clamp_size(size: Vec2) -> Vec2 {
    Vec2::new(
        size.x.clamp(SIZE_MIN, SIZE_MAX),
        size.y.clamp(SIZE_MIN, SIZE_MAX),
    )
}

/// Like `Rect::contains` but a point on the edge is outside.
pub fn strictly_inside(rect: Rect, p: Pos2) -> bool {
    rect.min.x < p.x && p.x < rect.max.x && rect.min.y < p.y && p.y < rect.max.y
}
