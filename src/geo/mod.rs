//! Geographic position shared by every geotagged sensor record.

pub mod position;

pub use position::Position;
