mod block;
mod tracker;


pub use block::{
    FAILED_IMAGE_MESSAGE, ImageBlock, ImageContent, ImageLoading, ImageShadow, ImageSize,
    ImageView,
};
pub use tracker::{ImageLoadState, ImageLoadTracker};
