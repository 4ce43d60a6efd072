use super::CaptureProvider;
use crate::record::{KeyboardRecord, MouseButtonRecord, MouseMoveRecord, MouseScrollRecord};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// In-process provider fed with records by the host.
///
/// Clones share the same queues, so one clone can be handed to a poller
/// while another keeps feeding it.
#[derive(Clone, Default, Debug)]
pub struct VirtualProvider {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default, Debug)]
struct Inner {
    mouse_move: VecDeque<MouseMoveRecord>,
    mouse_button: VecDeque<MouseButtonRecord>,
    mouse_scroll: VecDeque<MouseScrollRecord>,
    keyboard: VecDeque<KeyboardRecord>,
    /// Makes the next initialization report failure.
    fail_initialize: bool,
    stats: ProviderStats,
}

/// Lifecycle counters of a [VirtualProvider].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ProviderStats {
    pub initialize_calls: usize,
    pub cleanup_calls: usize,
    /// Number of mouse move pulls, which is one per poller tick.
    pub ticks: usize,
}

impl VirtualProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes subsequent initializations fail.
    pub fn fail_initialize(&self, fail: bool) {
        self.lock().fail_initialize = fail;
    }

    pub fn feed_mouse_move(&self, record: MouseMoveRecord) {
        self.lock().mouse_move.push_back(record);
    }

    pub fn feed_mouse_button(&self, record: MouseButtonRecord) {
        self.lock().mouse_button.push_back(record);
    }

    pub fn feed_mouse_scroll(&self, record: MouseScrollRecord) {
        self.lock().mouse_scroll.push_back(record);
    }

    pub fn feed_keyboard(&self, record: KeyboardRecord) {
        self.lock().keyboard.push_back(record);
    }

    pub fn stats(&self) -> ProviderStats {
        self.lock().stats
    }

    /// Number of records not yet pulled, over all kinds.
    pub fn pending(&self) -> usize {
        let inner = self.lock();
        inner.mouse_move.len()
            + inner.mouse_button.len()
            + inner.mouse_scroll.len()
            + inner.keyboard.len()
    }
}

impl CaptureProvider for VirtualProvider {
    fn initialize(&mut self) -> bool {
        let mut inner = self.lock();
        inner.stats.initialize_calls += 1;
        !inner.fail_initialize
    }

    fn try_get_mouse_move(&mut self) -> Option<MouseMoveRecord> {
        let mut inner = self.lock();
        inner.stats.ticks += 1;
        inner.mouse_move.pop_front()
    }

    fn try_get_mouse_button(&mut self) -> Option<MouseButtonRecord> {
        self.lock().mouse_button.pop_front()
    }

    fn try_get_mouse_scroll(&mut self) -> Option<MouseScrollRecord> {
        self.lock().mouse_scroll.pop_front()
    }

    fn try_get_keyboard(&mut self) -> Option<KeyboardRecord> {
        self.lock().keyboard.pop_front()
    }

    fn cleanup(&mut self) {
        self.lock().stats.cleanup_calls += 1;
    }
}
