//! Multi-field search over the paper graph.
//!
//! Field edits flow through the matchers in [`predicate`], are intersected in
//! [`aggregate`], and resolved into a selection or a suggestion set by
//! [`SearchState`].

mod aggregate;
mod field;
mod index;
mod predicate;
mod state;

pub use field::SearchField;
pub use index::SearchIndex;
pub use state::{CameraRequest, SearchEdit, SearchState};
