pub mod form;
pub mod media;
pub mod prelude;

pub use form::{FormEngine, FormOptions};
pub use media::{ImageBlock, ImageLoadTracker};
