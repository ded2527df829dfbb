//! Ordered marker collection with change listeners.
//!
//! After every add or remove, a marker's `id` equals its index. Listeners
//! registered through [`MarkerStore::on_change`] run synchronously after
//! each mutation, so a list view can stay in step without polling.

use crate::marker::Marker;
use egui::{Pos2, Vec2};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    Added { id: usize },
    Removed { id: usize },
    Moved { id: usize },
    SelectionChanged { selected: Option<usize> },
    Replaced { count: usize },
}

pub type Listener = Box<dyn FnMut(&StoreEvent)>;

#[derive(Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for MarkerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerStore")
            .field("markers", &self.markers)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from restored markers, renumbering ids by position.
    pub fn from_markers(markers: Vec<Marker>) -> Self {
        let mut store = Self {
            markers,
            listeners: Vec::new(),
        };
        store.renumber();
        store
    }

    pub fn on_change(&mut self, listener: impl FnMut(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Append a marker. Without an explicit `id` it takes the next index.
    pub fn add(&mut self, pos: Pos2, size: Vec2, id: Option<usize>) -> &Marker {
        let id = id.unwrap_or(self.markers.len());
        self.markers.push(Marker::new(id, pos, size));
        self.notify(StoreEvent::Added { id });
        let index = self.markers.len() - 1;
        &self.markers[index]
    }

    pub fn remove_last(&mut self) -> Option<Marker> {
        let removed = self.markers.pop()?;
        self.notify(StoreEvent::Removed { id: removed.id });
        Some(removed)
    }

    /// Remove whichever marker is nearest to `p`, then renumber the rest.
    pub fn remove_closest_to(&mut self, p: Pos2) -> Option<Marker> {
        let index = self.closest_to(p)?;
        let removed = self.markers.remove(index);
        self.renumber();
        self.notify(StoreEvent::Removed { id: removed.id });
        Some(removed)
    }

    /// Index of the marker whose bbox lies nearest to `p`. On a tie the
    /// later (topmost) marker wins.
    pub fn closest_to(&self, p: Pos2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, m) in self.markers.iter().enumerate() {
            let d = m.distance_to(p);
            if best.map_or(true, |(_, bd)| d <= bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Select the nearest marker if `p` is strictly inside its padded
    /// hit box. Every other marker is deselected either way.
    pub fn select_at(&mut self, p: Pos2) -> Option<&Marker> {
        let hit = self
            .closest_to(p)
            .filter(|&i| self.markers[i].strictly_contains(p));
        self.set_selection(hit);
        hit.map(|i| &self.markers[i])
    }

    pub fn select(&mut self, index: usize) -> Option<&Marker> {
        if index >= self.markers.len() {
            return None;
        }
        self.set_selection(Some(index));
        self.markers.get(index)
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    pub fn selected(&self) -> Option<usize> {
        self.markers.iter().position(|m| m.selected)
    }

    /// Move a marker's drawn position. The bbox is left as it was.
    pub fn translate(&mut self, index: usize, delta: Vec2) {
        if let Some(m) = self.markers.get_mut(index) {
            m.translate(delta);
        }
    }

    /// Bring a marker's bbox up to its current position and announce the move.
    pub fn settle(&mut self, index: usize) {
        let Some(m) = self.markers.get_mut(index) else {
            return;
        };
        m.refresh_bbox();
        let id = m.id;
        self.notify(StoreEvent::Moved { id });
    }

    pub fn replace(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
        self.renumber();
        let count = self.markers.len();
        self.notify(StoreEvent::Replaced { count });
    }

    fn set_selection(&mut self, target: Option<usize>) {
        let before = self.selected();
        for (i, m) in self.markers.iter_mut().enumerate() {
            m.selected = Some(i) == target;
        }
        if before != target {
            self.notify(StoreEvent::SelectionChanged { selected: target });
        }
    }

    fn renumber(&mut self) {
        for (i, m) in self.markers.iter_mut().enumerate() {
            m.id = i;
        }
    }

    fn notify(&mut self, event: StoreEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
