use super::CaptureProvider;
use crate::{
    error::Error,
    record::{KeyboardRecord, MouseButtonRecord, MouseMoveRecord, MouseScrollRecord},
};
use std::{
    os::raw::c_int,
    sync::atomic::{AtomicBool, Ordering},
};
use tracing::debug;

#[link(name = "rawinputlib")]
extern "C" {
    fn initialize_raw_input() -> c_int;
    fn get_mouse_move_input(data: *mut MouseMoveRecord) -> c_int;
    fn get_mouse_button_input(data: *mut MouseButtonRecord) -> c_int;
    fn get_mouse_scroll_input(data: *mut MouseScrollRecord) -> c_int;
    fn get_keyboard_input(data: *mut KeyboardRecord) -> c_int;
    fn cleanup_raw_input();
}

/// The library keeps its hooks in process globals.
static IN_USE: AtomicBool = AtomicBool::new(false);

/// Provider backed by the native `rawinputlib` library.
///
/// The library owns a message-only window, so every call after
/// initialization must come from the thread that initialized it. The poller
/// guarantees this by keeping the provider on its own thread.
#[derive(Debug)]
pub struct NativeProvider {
    _priv: (),
}

impl NativeProvider {
    pub fn new() -> Result<Self, Error> {
        IN_USE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::ProviderInUse)?;
        Ok(Self { _priv: () })
    }
}

impl Drop for NativeProvider {
    fn drop(&mut self) {
        IN_USE.store(false, Ordering::Release);
    }
}

/// Calls a pull function with a zeroed out record.
fn pull<T: Default>(f: unsafe extern "C" fn(*mut T) -> c_int) -> Option<T> {
    let mut record = T::default();
    // the library writes a whole record through the pointer, or nothing
    let written = unsafe { f(&mut record) };
    (written != 0).then_some(record)
}

impl CaptureProvider for NativeProvider {
    fn initialize(&mut self) -> bool {
        let ok = unsafe { initialize_raw_input() };
        debug!(ok, "initialize_raw_input returned");
        ok != 0
    }

    fn try_get_mouse_move(&mut self) -> Option<MouseMoveRecord> {
        pull(get_mouse_move_input)
    }

    fn try_get_mouse_button(&mut self) -> Option<MouseButtonRecord> {
        pull(get_mouse_button_input)
    }

    fn try_get_mouse_scroll(&mut self) -> Option<MouseScrollRecord> {
        pull(get_mouse_scroll_input)
    }

    fn try_get_keyboard(&mut self) -> Option<KeyboardRecord> {
        pull(get_keyboard_input)
    }

    fn cleanup(&mut self) {
        unsafe { cleanup_raw_input() };
        debug!("cleanup_raw_input returned");
    }
}
