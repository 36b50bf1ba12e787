use serde::{Deserialize, Serialize};

use super::tracker::{ImageLoadState, ImageLoadTracker};

pub const FAILED_IMAGE_MESSAGE: &str = "Failed to load image";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageShadow {
    Sm,
    Md,
    Lg,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLoading {
    Eager,
    #[default]
    Lazy,
}

/// Width or height as either pixels or a raw CSS length.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSize {
    Pixels(u32),
    Css(String),
}

impl From<u32> for ImageSize {
    fn from(value: u32) -> Self {
        ImageSize::Pixels(value)
    }
}

impl From<&str> for ImageSize {
    fn from(value: &str) -> Self {
        ImageSize::Css(value.to_owned())
    }
}

/// Display properties of the media block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ImageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<ImageSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(default)]
    pub rounded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ImageShadow>,
    #[serde(default)]
    pub border: bool,
    #[serde(default)]
    pub loading: ImageLoading,
    #[serde(default)]
    pub zoomable: bool,
}

impl ImageBlock {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: String::new(),
            caption: None,
            width: None,
            height: None,
            src_set: None,
            sizes: None,
            rounded: false,
            shadow: None,
            border: false,
            loading: ImageLoading::Lazy,
            zoomable: false,
        }
    }

    pub fn alt(mut self, value: impl Into<String>) -> Self {
        self.alt = value.into();
        self
    }

    pub fn caption(mut self, value: impl Into<String>) -> Self {
        self.caption = Some(value.into());
        self
    }

    pub fn width(mut self, value: impl Into<ImageSize>) -> Self {
        self.width = Some(value.into());
        self
    }

    pub fn height(mut self, value: impl Into<ImageSize>) -> Self {
        self.height = Some(value.into());
        self
    }

    pub fn src_set(mut self, value: impl Into<String>) -> Self {
        self.src_set = Some(value.into());
        self
    }

    pub fn sizes(mut self, value: impl Into<String>) -> Self {
        self.sizes = Some(value.into());
        self
    }

    pub fn rounded(mut self, value: bool) -> Self {
        self.rounded = value;
        self
    }

    pub fn shadow(mut self, value: ImageShadow) -> Self {
        self.shadow = Some(value);
        self
    }

    pub fn border(mut self, value: bool) -> Self {
        self.border = value;
        self
    }

    pub fn loading(mut self, value: ImageLoading) -> Self {
        self.loading = value;
        self
    }

    pub fn zoomable(mut self, value: bool) -> Self {
        self.zoomable = value;
        self
    }

    pub fn tracker(&self) -> ImageLoadTracker {
        ImageLoadTracker::new(self.src.clone())
    }

    /// What to show for this block given the tracker's state. A tracker
    /// pointed at another source is treated as pending.
    pub fn view(&self, tracker: &ImageLoadTracker) -> ImageView {
        let state = if tracker.source() == self.src {
            tracker.state()
        } else {
            ImageLoadState::Pending
        };
        let content = match state {
            ImageLoadState::Pending => ImageContent::Loading,
            ImageLoadState::Loaded => ImageContent::Image,
            ImageLoadState::Errored => ImageContent::Failed {
                message: FAILED_IMAGE_MESSAGE,
            },
        };
        ImageView {
            content,
            caption: self.caption.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageContent {
    /// The image element is mounted but hidden until it reports back.
    Loading,
    Image,
    Failed { message: &'static str },
}

impl ImageContent {
    /// Whether the image element should be in the tree; it has to be while
    /// loading so its load and error signals can arrive.
    pub const fn mounts_image(self) -> bool {
        !matches!(self, ImageContent::Failed { .. })
    }

    pub const fn is_visible(self) -> bool {
        matches!(self, ImageContent::Image)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageView {
    pub content: ImageContent,
    pub caption: Option<String>,
}
