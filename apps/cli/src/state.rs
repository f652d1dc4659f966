//! Application state.

use microlearn_core::{BlobStore, IntervalLadder, ProgressStore, Result};

/// Everything a command needs: the progress store and the module source.
pub struct AppState<B, G> {
    pub store: ProgressStore<B, IntervalLadder>,
    pub generator: G,
}

impl<B: BlobStore, G> AppState<B, G> {
    pub fn new(store: ProgressStore<B, IntervalLadder>, generator: G) -> Self {
        Self { store, generator }
    }

    /// Make a topic current, failing if it is not tracked.
    pub fn select_topic(&mut self, topic: &str) -> Result<()> {
        self.store.set_current_topic(topic)
    }
}
