//! Input state for presentation.
//!
//! Owned by whichever loop presents it and only ever updated through the
//! events it is given.

use crate::{
    event::{InputEvent, KeyboardEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent},
    handler::InputHandler,
};
use std::{collections::BTreeSet, fmt};
use strum::Display;

#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
#[strum(serialize_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct InputState {
    /// Last reported mouse movement.
    pub mouse_vector: (i64, i64),
    /// Direction of the last scroll, `None` until the wheel is used.
    pub scroll: Option<ScrollDirection>,
    /// Held mouse buttons.
    pub buttons: BTreeSet<u32>,
    /// Held keys.
    pub keys: BTreeSet<u32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds an event into the state. Returns `true` if the state changed.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::MouseMove(MouseMoveEvent { dx, dy, .. }) => {
                replace(&mut self.mouse_vector, (dx, dy))
            }
            InputEvent::MouseButton(MouseButtonEvent { button, down, .. }) => {
                toggle(&mut self.buttons, button, down)
            }
            InputEvent::MouseScroll(MouseScrollEvent { scroll_amount, .. }) => {
                let direction = if scroll_amount > 0 {
                    ScrollDirection::Up
                } else {
                    ScrollDirection::Down
                };
                replace(&mut self.scroll, Some(direction))
            }
            InputEvent::Keyboard(KeyboardEvent { key_code, down, .. }) => {
                toggle(&mut self.keys, key_code, down)
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn toggle(set: &mut BTreeSet<u32>, id: u32, down: bool) -> bool {
    if down {
        set.insert(id)
    } else {
        set.remove(&id)
    }
}

impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dx, dy) = self.mouse_vector;
        write!(f, "move ({}, {})", dx, dy)?;
        if let Some(scroll) = self.scroll {
            write!(f, " scroll {}", scroll)?;
        }
        write!(f, " buttons {:?} keys {:?}", self.buttons, self.keys)
    }
}

impl InputHandler for InputState {
    fn on_mouse_move(&mut self, event: MouseMoveEvent) -> Result<(), anyhow::Error> {
        self.apply(&event.into());
        Ok(())
    }

    fn on_mouse_button(&mut self, event: MouseButtonEvent) -> Result<(), anyhow::Error> {
        self.apply(&event.into());
        Ok(())
    }

    fn on_mouse_scroll(&mut self, event: MouseScrollEvent) -> Result<(), anyhow::Error> {
        self.apply(&event.into());
        Ok(())
    }

    fn on_keyboard(&mut self, event: KeyboardEvent) -> Result<(), anyhow::Error> {
        self.apply(&event.into());
        Ok(())
    }
}
