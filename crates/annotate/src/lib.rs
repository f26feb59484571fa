pub mod draw;
pub mod errors;

pub use draw::Annotator;
pub use errors::RenderError;
