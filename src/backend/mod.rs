//! Input backends
//!
//! The platform side of keysim: keysym/keycode tables, the modifier slot
//! mapping, synthetic key events and the raw key event stream.
//! - `x11`: X server via XTEST (synthesis) and RECORD (capture)
//! - `loopback`: in-process keyboard, synthetic events come back as captured events
//! - `xkb`: builds a loopback keymap from XKB rules/model/layout names

pub mod loopback;
mod mapping;
#[cfg(feature = "x11")]
pub mod x11;
#[cfg(feature = "xkb")]
pub mod xkb;

pub use loopback::{LoopbackBackend, LoopbackOp};
pub use mapping::{KeyMapping, ModifierSlots};
#[cfg(feature = "x11")]
pub use x11::X11Backend;

use crate::error::BackendError;
use crate::keysym::{Keysym, SymbolGroup};

/// Platform keycode
pub type Keycode = u32;

/// Key event direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Press,
    Release,
}

/// Key event as delivered by a backend, before decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub keycode: Keycode,
    /// Core-protocol modifier state at the time of the event (before it applies)
    pub state: u16,
    pub kind: EventKind,
}

impl RawKeyEvent {
    pub fn is_press(&self) -> bool {
        self.kind == EventKind::Press
    }
}

/// Platform input subsystem
///
/// Lookups never fail: unknown keysyms map to `None`, unknown keycodes to
/// NoSymbol (0). Everything that talks to the platform returns `BackendError`.
///
/// Capture is pull-based: after `register_event_capture`, `next_event` blocks
/// until the next key event and returns `Ok(None)` once the stream has ended.
pub trait InputBackend {
    /// Primary keycode for a keysym (lowest level first, then lowest keycode)
    fn keysym_to_keycode(&self, keysym: Keysym) -> Option<Keycode>;

    /// Keysym at a shift level of a keycode, 0 if there is none
    fn keycode_to_keysym(&self, keycode: Keycode, level: usize) -> Keysym;

    /// Inject a synthetic key press or release
    fn send_synthetic_event(&mut self, kind: EventKind, keycode: Keycode)
        -> Result<(), BackendError>;

    /// Keycodes bound to each of the 8 modifier slots (Shift, Lock, Control, Mod1..Mod5)
    fn modifier_slot_mapping(&self) -> Result<ModifierSlots, BackendError>;

    /// Named keysyms of a symbol group
    fn symbol_group(&self, group: SymbolGroup) -> &'static [(&'static str, Keysym)] {
        group.symbols()
    }

    /// Start streaming key events of the given kinds
    fn register_event_capture(&mut self, kinds: &[EventKind]) -> Result<(), BackendError>;

    /// Next captured event; `None` once capture has ended
    fn next_event(&mut self) -> Result<Option<RawKeyEvent>, BackendError>;

    /// Stop streaming key events
    fn deregister_event_capture(&mut self) -> Result<(), BackendError>;

    /// Take the keyboard away from every other client
    fn grab_exclusive_input(&mut self) -> Result<(), BackendError>;

    /// Give the keyboard back
    fn release_exclusive_input(&mut self) -> Result<(), BackendError>;
}

impl<B: InputBackend + ?Sized> InputBackend for Box<B> {
    fn keysym_to_keycode(&self, keysym: Keysym) -> Option<Keycode> {
        (**self).keysym_to_keycode(keysym)
    }

    fn keycode_to_keysym(&self, keycode: Keycode, level: usize) -> Keysym {
        (**self).keycode_to_keysym(keycode, level)
    }

    fn send_synthetic_event(
        &mut self,
        kind: EventKind,
        keycode: Keycode,
    ) -> Result<(), BackendError> {
        (**self).send_synthetic_event(kind, keycode)
    }

    fn modifier_slot_mapping(&self) -> Result<ModifierSlots, BackendError> {
        (**self).modifier_slot_mapping()
    }

    fn symbol_group(&self, group: SymbolGroup) -> &'static [(&'static str, Keysym)] {
        (**self).symbol_group(group)
    }

    fn register_event_capture(&mut self, kinds: &[EventKind]) -> Result<(), BackendError> {
        (**self).register_event_capture(kinds)
    }

    fn next_event(&mut self) -> Result<Option<RawKeyEvent>, BackendError> {
        (**self).next_event()
    }

    fn deregister_event_capture(&mut self) -> Result<(), BackendError> {
        (**self).deregister_event_capture()
    }

    fn grab_exclusive_input(&mut self) -> Result<(), BackendError> {
        (**self).grab_exclusive_input()
    }

    fn release_exclusive_input(&mut self) -> Result<(), BackendError> {
        (**self).release_exclusive_input()
    }
}
