/// Keyboard key identifier.
///
/// Intentionally minimal: only the keys the frame loop acts on are named.
/// For anything else the runtime maps to `Key::Unknown(u32)` with the
/// platform keycode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Shift,
    Control,

    A,
    D,
    S,
    W,

    Unknown(u32),
}
