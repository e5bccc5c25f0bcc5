mod camera;
mod component;
mod reducers;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::PaperDetails;
