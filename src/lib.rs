pub mod app;
pub mod board;
pub mod config;
pub mod logview;
pub mod marker;
pub mod persist;
pub mod store;
pub mod tool;

pub use board::Board;
pub use marker::Marker;
pub use store::{MarkerStore, StoreEvent};
