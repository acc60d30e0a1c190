//! Optional drawing extensions layered on top of the core.
//!
//! Markers and decorations only read the draw context; they never mutate
//! chart state.

pub mod decorations;
pub mod markers;

pub use decorations::{
    Decoration, DecorationLabel, DecorationLabelAlign, HorizontalBox, HorizontalLine,
};
pub use markers::{DefaultMarker, EntryLocationMap, EntryModel, Marker};
