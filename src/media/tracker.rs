use tracing::debug;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ImageLoadState {
    #[default]
    Pending,
    Loaded,
    Errored,
}

impl ImageLoadState {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, ImageLoadState::Pending)
    }
}

/// Load lifecycle of one image resource reference.
///
/// Only the first terminal signal counts. There is no timeout: a resource that
/// never reports back simply stays pending.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageLoadTracker {
    source: String,
    state: ImageLoadState,
}

impl ImageLoadTracker {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            state: ImageLoadState::Pending,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn state(&self) -> ImageLoadState {
        self.state
    }

    pub fn on_load_succeeded(&mut self) -> bool {
        self.settle(ImageLoadState::Loaded)
    }

    pub fn on_load_failed(&mut self) -> bool {
        self.settle(ImageLoadState::Errored)
    }

    /// Points the tracker at `source`. A different reference restarts the
    /// lifecycle; the same one keeps its state.
    pub fn set_source(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if source == self.source {
            return false;
        }
        debug!(%source, "image source changed, load state reset");
        self.source = source;
        self.state = ImageLoadState::Pending;
        true
    }

    fn settle(&mut self, next: ImageLoadState) -> bool {
        if self.state.is_terminal() {
            debug!(
                source = %self.source,
                current = ?self.state,
                ignored = ?next,
                "ignoring load signal after terminal state"
            );
            return false;
        }
        self.state = next;
        true
    }
}
