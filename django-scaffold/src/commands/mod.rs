//! CLI command implementations

pub mod render;
pub mod view;

pub use render::RenderCommand;
pub use view::ViewCommand;
