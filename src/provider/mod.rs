//! Capture providers.
//!
//! A provider owns the OS level hooks and buffers raw records until they are
//! pulled. Pulls never block; `None` only means nothing is pending.

mod virtual_provider;

pub use self::virtual_provider::{ProviderStats, VirtualProvider};

use crate::record::{KeyboardRecord, MouseButtonRecord, MouseMoveRecord, MouseScrollRecord};
use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(all(target_os = "windows", feature = "native"))] {
        mod native;
        pub use self::native::NativeProvider;
    }
}

pub trait CaptureProvider {
    /// Acquires the provider's hooks. Returns `false` on failure.
    ///
    /// Not guaranteed to be idempotent, call it at most once per run.
    fn initialize(&mut self) -> bool;

    fn try_get_mouse_move(&mut self) -> Option<MouseMoveRecord>;

    fn try_get_mouse_button(&mut self) -> Option<MouseButtonRecord>;

    fn try_get_mouse_scroll(&mut self) -> Option<MouseScrollRecord>;

    fn try_get_keyboard(&mut self) -> Option<KeyboardRecord>;

    /// Releases the hooks acquired by [CaptureProvider::initialize].
    ///
    /// Must be called exactly once for every successful initialization.
    fn cleanup(&mut self);
}

impl<P> CaptureProvider for Box<P>
where
    P: CaptureProvider + ?Sized,
{
    fn initialize(&mut self) -> bool {
        (**self).initialize()
    }

    fn try_get_mouse_move(&mut self) -> Option<MouseMoveRecord> {
        (**self).try_get_mouse_move()
    }

    fn try_get_mouse_button(&mut self) -> Option<MouseButtonRecord> {
        (**self).try_get_mouse_button()
    }

    fn try_get_mouse_scroll(&mut self) -> Option<MouseScrollRecord> {
        (**self).try_get_mouse_scroll()
    }

    fn try_get_keyboard(&mut self) -> Option<KeyboardRecord> {
        (**self).try_get_keyboard()
    }

    fn cleanup(&mut self) {
        (**self).cleanup()
    }
}
