//! Collaborators provided by the embedding page.
//!
//! The engine never talks to a browser directly. A host adapter implements these traits and
//! forwards its raw events into [`crate::Choreographer`].

/// Opaque token for a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Source of raw vertical scroll positions and resize notifications.
pub trait ScrollSource {
    /// Register the scroll/resize listeners. Called once, on the sampler's first start.
    fn attach(&mut self) -> ListenerHandle;

    /// Release listeners registered by [`ScrollSource::attach`].
    fn detach(&mut self, handle: ListenerHandle);

    /// Current raw (unsmoothed) scroll position in px.
    fn position(&self) -> f64;
}

/// Measures the rendered height of the tagline block.
pub trait BlockMeasure {
    /// `None` while the block is not laid out yet.
    fn block_height(&self) -> Option<f64>;
}

/// The hero media element.
pub trait MediaElement {
    /// True once the element already holds enough data to start playing.
    fn has_playable_data(&self) -> bool;
}

/// Whole-document readiness.
pub trait DocumentState {
    /// True when the document and its subresources finished loading.
    fn is_loaded(&self) -> bool;
}

impl<F> BlockMeasure for F
where
    F: Fn() -> Option<f64>,
{
    fn block_height(&self) -> Option<f64> {
        self()
    }
}

/// In-process scroll source: positions are pushed by the caller, listeners are only counted.
///
/// Used by the command line simulator and by tests.
#[derive(Debug, Default)]
pub struct ManualScrollSource {
    position: f64,
    next_handle: u64,
    attached: Vec<ListenerHandle>,
}

impl ManualScrollSource {
    pub fn new(position: f64) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn set_position(&mut self, y: f64) {
        self.position = y;
    }

    /// Number of live listener registrations.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Total registrations ever made, detached ones included.
    pub fn attach_calls(&self) -> u64 {
        self.next_handle
    }
}

impl ScrollSource for ManualScrollSource {
    fn attach(&mut self) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.attached.push(handle);
        handle
    }

    fn detach(&mut self, handle: ListenerHandle) {
        self.attached.retain(|h| *h != handle);
    }

    fn position(&self) -> f64 {
        self.position
    }
}

/// Media and document readiness with fixed answers.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticReadiness {
    pub loaded: bool,
    pub playable: bool,
}

impl MediaElement for StaticReadiness {
    fn has_playable_data(&self) -> bool {
        self.playable
    }
}

impl DocumentState for StaticReadiness {
    fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
