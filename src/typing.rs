/// Wires the variants of an event sum type to their payloads.
///
/// Every `Variant(Payload)` pair gets a `From<Payload>` impl, and the sum type
/// gets `kind()` and `timestamp()`. Variant names must match [EventKind]
/// variants and every payload must carry a `timestamp: u64`.
///
/// [EventKind]: crate::event::EventKind
///
/// # Example.
///
/// ```ignore
/// event_variants!(InputEvent, {
///     Keyboard(KeyboardEvent),
/// });
/// ```
macro_rules! event_variants {
    ($dst:ident, { $($variant:ident($src:ty),)* }) => {
        $(
            impl From<$src> for $dst {
                fn from(x: $src) -> Self {
                    Self::$variant(x)
                }
            }
        )*

        impl $dst {
            pub fn kind(&self) -> $crate::event::EventKind {
                match self {
                    $(Self::$variant(_) => $crate::event::EventKind::$variant,)*
                }
            }

            pub fn timestamp(&self) -> u64 {
                match self {
                    $(Self::$variant(x) => x.timestamp,)*
                }
            }
        }
    };
}

pub(crate) use event_variants;
