//! Fixed layout records exchanged with the native capture provider.
//!
//! Every struct here mirrors a C struct from `rawinputlib.h`. Field order,
//! width, and padding are part of the provider's ABI and must not change:
//!
//! | field                      | native type | Rust type |
//! |----------------------------|-------------|-----------|
//! | `timestamp`                | `ULONGLONG` | `u64`     |
//! | `dx`, `dy`, `scroll_amount`| `LONG`      | `c_long`  |
//! | `button`, `key_code`       | `UINT`      | `u32`     |
//! | `down`                     | `BOOL`      | `c_int`   |
//!
//! Decoding into event values happens here too. It performs no validation:
//! whatever the provider wrote is passed through as is.

use crate::event::{KeyboardEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent};
use std::os::raw::{c_int, c_long};

#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct MouseMoveRecord {
    pub timestamp: u64,
    pub dx: c_long,
    pub dy: c_long,
}

#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct MouseButtonRecord {
    pub timestamp: u64,
    /// Which button changed.
    pub button: u32,
    /// Nonzero for button down.
    pub down: c_int,
}

#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct MouseScrollRecord {
    pub timestamp: u64,
    /// Negative is scroll down, positive is scroll up.
    pub scroll_amount: c_long,
}

#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct KeyboardRecord {
    pub timestamp: u64,
    pub key_code: u32,
    /// Nonzero for key down.
    pub down: c_int,
}

/// Converts a native `BOOL` into `bool`.
fn native_bool(x: c_int) -> bool {
    x != 0
}

/// Converts `bool` into a native `BOOL`.
fn to_native_bool(x: bool) -> c_int {
    x as c_int
}

impl MouseMoveRecord {
    pub fn decode(self) -> MouseMoveEvent {
        MouseMoveEvent {
            timestamp: self.timestamp,
            dx: self.dx.into(),
            dy: self.dy.into(),
        }
    }
}

impl MouseButtonRecord {
    pub fn new(timestamp: u64, button: u32, down: bool) -> Self {
        Self {
            timestamp,
            button,
            down: to_native_bool(down),
        }
    }

    pub fn decode(self) -> MouseButtonEvent {
        MouseButtonEvent {
            timestamp: self.timestamp,
            button: self.button,
            down: native_bool(self.down),
        }
    }
}

impl MouseScrollRecord {
    pub fn decode(self) -> MouseScrollEvent {
        MouseScrollEvent {
            timestamp: self.timestamp,
            scroll_amount: self.scroll_amount.into(),
        }
    }
}

impl KeyboardRecord {
    pub fn new(timestamp: u64, key_code: u32, down: bool) -> Self {
        Self {
            timestamp,
            key_code,
            down: to_native_bool(down),
        }
    }

    pub fn decode(self) -> KeyboardEvent {
        KeyboardEvent {
            timestamp: self.timestamp,
            key_code: self.key_code,
            down: native_bool(self.down),
        }
    }
}
