use crate::typing::event_variants;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

/// Relative mouse movement since the previous report.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub struct MouseMoveEvent {
    pub timestamp: u64,
    pub dx: i64,
    pub dy: i64,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub struct MouseButtonEvent {
    pub timestamp: u64,
    /// Button id, as defined by the provider.
    pub button: u32,
    pub down: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub struct MouseScrollEvent {
    pub timestamp: u64,
    /// Sign denotes direction, positive is up.
    pub scroll_amount: i64,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
pub struct KeyboardEvent {
    pub timestamp: u64,
    /// Key id, as defined by the provider.
    pub key_code: u32,
    pub down: bool,
}

/// Sum type of the decoded events.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    MouseMove(MouseMoveEvent),
    MouseButton(MouseButtonEvent),
    MouseScroll(MouseScrollEvent),
    Keyboard(KeyboardEvent),
}

event_variants!(InputEvent, {
    MouseMove(MouseMoveEvent),
    MouseButton(MouseButtonEvent),
    MouseScroll(MouseScrollEvent),
    Keyboard(KeyboardEvent),
});

/// Identifier of the four event kinds.
///
/// Variants are declared in dispatch order, iterating with
/// [strum::IntoEnumIterator] yields move, button, scroll, keyboard.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumIter, Serialize, Debug,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    MouseMove,
    MouseButton,
    MouseScroll,
    Keyboard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_identifiers() {
        let names: Vec<_> = EventKind::iter().map(|x| x.to_string()).collect();
        assert_eq!(names, ["mouse_move", "mouse_button", "mouse_scroll", "keyboard"]);
        assert_eq!(EventKind::MouseScroll.as_ref(), "mouse_scroll");
    }

    #[test]
    fn test_event_kind_and_timestamp() {
        let event: InputEvent = KeyboardEvent {
            timestamp: 5,
            key_code: 65,
            down: true,
        }
        .into();
        assert_eq!(event.kind(), EventKind::Keyboard);
        assert_eq!(event.timestamp(), 5);

        let event: InputEvent = MouseScrollEvent {
            timestamp: 9,
            scroll_amount: -1,
        }
        .into();
        assert_eq!(event.kind(), EventKind::MouseScroll);
        assert_eq!(event.timestamp(), 9);
    }

    #[test]
    fn test_serialized_event_is_tagged_with_kind() {
        let event: InputEvent = MouseButtonEvent {
            timestamp: 1000,
            button: 2,
            down: true,
        }
        .into();

        let value = toml::Value::try_from(event).unwrap();
        assert_eq!(value["kind"].as_str(), Some("mouse_button"));
        assert_eq!(value["timestamp"].as_integer(), Some(1000));
        assert_eq!(value["button"].as_integer(), Some(2));
        assert_eq!(value["down"].as_bool(), Some(true));

        let value = toml::Value::try_from(EventKind::MouseScroll).unwrap();
        assert_eq!(value.as_str(), Some("mouse_scroll"));
    }
}
