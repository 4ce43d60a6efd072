//! Event handlers.
//!
//! Every event kind has exactly one handler. [InputHandler] expresses this
//! statically; [Callbacks] is the closure based registration surface and
//! checks the same rule when it is built.

use crate::{
    error::Error,
    event::{EventKind, InputEvent, KeyboardEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent},
};
use anyhow::anyhow;
use std::fmt;
use tokio::sync::mpsc;

/// Dispatch target of the poller.
///
/// Methods are invoked synchronously on the polling thread. A method that
/// blocks stalls polling.
pub trait InputHandler {
    fn on_mouse_move(&mut self, event: MouseMoveEvent) -> Result<(), anyhow::Error>;

    fn on_mouse_button(&mut self, event: MouseButtonEvent) -> Result<(), anyhow::Error>;

    fn on_mouse_scroll(&mut self, event: MouseScrollEvent) -> Result<(), anyhow::Error>;

    fn on_keyboard(&mut self, event: KeyboardEvent) -> Result<(), anyhow::Error>;
}

impl<H> InputHandler for Box<H>
where
    H: InputHandler + ?Sized,
{
    fn on_mouse_move(&mut self, event: MouseMoveEvent) -> Result<(), anyhow::Error> {
        (**self).on_mouse_move(event)
    }

    fn on_mouse_button(&mut self, event: MouseButtonEvent) -> Result<(), anyhow::Error> {
        (**self).on_mouse_button(event)
    }

    fn on_mouse_scroll(&mut self, event: MouseScrollEvent) -> Result<(), anyhow::Error> {
        (**self).on_mouse_scroll(event)
    }

    fn on_keyboard(&mut self, event: KeyboardEvent) -> Result<(), anyhow::Error> {
        (**self).on_keyboard(event)
    }
}

/// Routes an event to the handler method of its kind.
pub fn dispatch<H>(handler: &mut H, event: InputEvent) -> Result<(), anyhow::Error>
where
    H: InputHandler + ?Sized,
{
    match event {
        InputEvent::MouseMove(x) => handler.on_mouse_move(x),
        InputEvent::MouseButton(x) => handler.on_mouse_button(x),
        InputEvent::MouseScroll(x) => handler.on_mouse_scroll(x),
        InputEvent::Keyboard(x) => handler.on_keyboard(x),
    }
}

type Callback = Box<dyn FnMut(InputEvent) -> Result<(), anyhow::Error> + Send>;

/// One callback per event kind.
///
/// Construct it with [Callbacks::builder].
pub struct Callbacks {
    /// Indexed by [EventKind] discriminant.
    table: [Callback; 4],
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

impl Callbacks {
    pub fn builder() -> CallbacksBuilder {
        CallbacksBuilder::default()
    }

    fn call(&mut self, event: InputEvent) -> Result<(), anyhow::Error> {
        (self.table[event.kind() as usize])(event)
    }
}

impl InputHandler for Callbacks {
    fn on_mouse_move(&mut self, event: MouseMoveEvent) -> Result<(), anyhow::Error> {
        self.call(event.into())
    }

    fn on_mouse_button(&mut self, event: MouseButtonEvent) -> Result<(), anyhow::Error> {
        self.call(event.into())
    }

    fn on_mouse_scroll(&mut self, event: MouseScrollEvent) -> Result<(), anyhow::Error> {
        self.call(event.into())
    }

    fn on_keyboard(&mut self, event: KeyboardEvent) -> Result<(), anyhow::Error> {
        self.call(event.into())
    }
}

/// Collects callbacks keyed by [EventKind].
///
/// Registration errors are deferred to [CallbacksBuilder::build] so calls can
/// be chained.
#[derive(Default)]
pub struct CallbacksBuilder {
    table: [Option<Callback>; 4],
    /// First registration error.
    error: Option<Error>,
}

impl CallbacksBuilder {
    /// Registers `f` as the sole handler of `kind`.
    ///
    /// `f` only ever receives events of `kind`.
    pub fn on<F>(mut self, kind: EventKind, f: F) -> Self
    where
        F: FnMut(InputEvent) -> Result<(), anyhow::Error> + Send + 'static,
    {
        let slot = &mut self.table[kind as usize];
        if slot.is_some() {
            self.error.get_or_insert(Error::DuplicateHandler(kind));
        } else {
            *slot = Some(Box::new(f));
        }
        self
    }

    pub fn on_mouse_move<F>(self, mut f: F) -> Self
    where
        F: FnMut(MouseMoveEvent) -> Result<(), anyhow::Error> + Send + 'static,
    {
        self.on(EventKind::MouseMove, move |event| match event {
            InputEvent::MouseMove(x) => f(x),
            other => Err(unexpected(EventKind::MouseMove, other)),
        })
    }

    pub fn on_mouse_button<F>(self, mut f: F) -> Self
    where
        F: FnMut(MouseButtonEvent) -> Result<(), anyhow::Error> + Send + 'static,
    {
        self.on(EventKind::MouseButton, move |event| match event {
            InputEvent::MouseButton(x) => f(x),
            other => Err(unexpected(EventKind::MouseButton, other)),
        })
    }

    pub fn on_mouse_scroll<F>(self, mut f: F) -> Self
    where
        F: FnMut(MouseScrollEvent) -> Result<(), anyhow::Error> + Send + 'static,
    {
        self.on(EventKind::MouseScroll, move |event| match event {
            InputEvent::MouseScroll(x) => f(x),
            other => Err(unexpected(EventKind::MouseScroll, other)),
        })
    }

    pub fn on_keyboard<F>(self, mut f: F) -> Self
    where
        F: FnMut(KeyboardEvent) -> Result<(), anyhow::Error> + Send + 'static,
    {
        self.on(EventKind::Keyboard, move |event| match event {
            InputEvent::Keyboard(x) => f(x),
            other => Err(unexpected(EventKind::Keyboard, other)),
        })
    }

    /// Fails unless every kind has exactly one callback.
    pub fn build(self) -> Result<Callbacks, Error> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let [mouse_move, mouse_button, mouse_scroll, keyboard] = self.table;
        let table = [
            mouse_move.ok_or(Error::MissingHandler(EventKind::MouseMove))?,
            mouse_button.ok_or(Error::MissingHandler(EventKind::MouseButton))?,
            mouse_scroll.ok_or(Error::MissingHandler(EventKind::MouseScroll))?,
            keyboard.ok_or(Error::MissingHandler(EventKind::Keyboard))?,
        ];
        Ok(Callbacks { table })
    }
}

fn unexpected(expected: EventKind, event: InputEvent) -> anyhow::Error {
    anyhow!("{} callback received {} event", expected, event.kind())
}

/// Forwards every event to a host loop through a channel.
///
/// Fails once the receiving side is dropped, which ends a propagating run.
#[derive(Clone, Debug)]
pub struct Forwarder {
    event_tx: mpsc::UnboundedSender<InputEvent>,
}

impl Forwarder {
    pub fn new(event_tx: mpsc::UnboundedSender<InputEvent>) -> Self {
        Self { event_tx }
    }

    /// Creates a forwarder along with its receiving side.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<InputEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self::new(event_tx), event_rx)
    }

    fn forward(&self, event: InputEvent) -> Result<(), anyhow::Error> {
        self.event_tx
            .send(event)
            .map_err(|_| anyhow!("event receiver was dropped"))
    }
}

impl InputHandler for Forwarder {
    fn on_mouse_move(&mut self, event: MouseMoveEvent) -> Result<(), anyhow::Error> {
        self.forward(event.into())
    }

    fn on_mouse_button(&mut self, event: MouseButtonEvent) -> Result<(), anyhow::Error> {
        self.forward(event.into())
    }

    fn on_mouse_scroll(&mut self, event: MouseScrollEvent) -> Result<(), anyhow::Error> {
        self.forward(event.into())
    }

    fn on_keyboard(&mut self, event: KeyboardEvent) -> Result<(), anyhow::Error> {
        self.forward(event.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn noop<E>(_: E) -> Result<(), anyhow::Error> {
        Ok(())
    }

    #[test]
    fn test_build_requires_every_kind() {
        let err = Callbacks::builder()
            .on_mouse_move(noop)
            .on_mouse_button(noop)
            .on_keyboard(noop)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingHandler(EventKind::MouseScroll)));

        let err = Callbacks::builder().build().unwrap_err();
        assert!(matches!(err, Error::MissingHandler(EventKind::MouseMove)));
    }

    #[test]
    fn test_build_rejects_second_handler() {
        let err = Callbacks::builder()
            .on_mouse_move(noop)
            .on_mouse_button(noop)
            .on_mouse_scroll(noop)
            .on_keyboard(noop)
            .on(EventKind::Keyboard, noop)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateHandler(EventKind::Keyboard)));
    }

    #[test]
    fn test_callbacks_route_by_kind() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = |kind: EventKind| {
            let seen = seen.clone();
            move |event: InputEvent| {
                seen.lock().unwrap().push((kind, event));
                Ok::<_, anyhow::Error>(())
            }
        };

        let mut callbacks = Callbacks::builder()
            .on(EventKind::MouseMove, record(EventKind::MouseMove))
            .on(EventKind::MouseButton, record(EventKind::MouseButton))
            .on(EventKind::MouseScroll, record(EventKind::MouseScroll))
            .on(EventKind::Keyboard, record(EventKind::Keyboard))
            .build()
            .unwrap();

        let scroll = InputEvent::from(MouseScrollEvent {
            timestamp: 1,
            scroll_amount: 120,
        });
        let key = InputEvent::from(KeyboardEvent {
            timestamp: 2,
            key_code: 65,
            down: false,
        });
        dispatch(&mut callbacks, scroll).unwrap();
        dispatch(&mut callbacks, key).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [(EventKind::MouseScroll, scroll), (EventKind::Keyboard, key)]
        );
    }

    #[test]
    fn test_forwarder_fails_after_receiver_dropped() {
        let (mut forwarder, mut event_rx) = Forwarder::channel();
        let event = MouseMoveEvent {
            timestamp: 1000,
            dx: 5,
            dy: -3,
        };

        forwarder.on_mouse_move(event).unwrap();
        assert_eq!(event_rx.try_recv().unwrap(), InputEvent::MouseMove(event));

        drop(event_rx);
        assert!(forwarder.on_mouse_move(event).is_err());
    }
}
