//! Raw key event decoding
//!
//! Turns a keycode plus core modifier state into the character or keysym
//! name it stands for, tracking live modifier state along the way.

use log::warn;
use smol_str::SmolStr;

use super::modifiers::{Modifier, ModifierConfig, ModifierState};
use crate::backend::{InputBackend, Keycode, RawKeyEvent};
use crate::constants::{ASCII_CASE_OFFSET, LOCK_KEYSYMS, NO_SYMBOL};
use crate::keysym::{is_ascii_lower, is_ascii_upper, keysym_to_ascii, Keysym, SymbolTable};

/// Decoded key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub keycode: Keycode,
    /// Printable character, or keysym name for everything else;
    /// `None` when the keycode maps to nothing known
    pub character: Option<SmolStr>,
    pub is_press: bool,
}

/// Stateful decoder for one keyboard
#[derive(Debug, Clone)]
pub struct EventDecoder {
    symbols: SymbolTable,
    modifiers: ModifierConfig,
    state: ModifierState,
    escape: Option<Keycode>,
}

impl EventDecoder {
    pub fn new(symbols: SymbolTable, modifiers: ModifierConfig, escape: Option<Keycode>) -> Self {
        Self {
            symbols,
            modifiers,
            state: ModifierState::default(),
            escape,
        }
    }

    pub fn modifiers(&self) -> &ModifierConfig {
        &self.modifiers
    }

    pub fn state(&self) -> &ModifierState {
        &self.state
    }

    /// Whether a keycode is the Escape key
    pub fn is_escape(&self, keycode: Keycode) -> bool {
        self.escape == Some(keycode)
    }

    /// Live state of a modifier, `None` when the modifier is not bound on this keyboard
    pub fn modifier_state(&self, modifier: Modifier) -> Option<bool> {
        self.modifiers
            .is_tracked(modifier)
            .then(|| self.state.is_active(modifier))
    }

    /// Decode one raw event
    ///
    /// Modifier keys report their own unshifted name ("Shift_L"). Other keys
    /// use the live Shift and Caps_Lock state to pick the keysym.
    pub fn decode<B: InputBackend + ?Sized>(&mut self, backend: &B, raw: &RawKeyEvent) -> KeyEvent {
        self.state.update(&self.modifiers, raw.state);

        let keysym = if self.modifiers.is_modifier_keycode(raw.keycode) {
            let keysym = backend.keycode_to_keysym(raw.keycode, 0);
            let lock = LOCK_KEYSYMS.contains(&keysym);
            self.state
                .apply_key(&self.modifiers, raw.keycode, raw.is_press(), lock);
            keysym
        } else {
            self.effective_keysym(backend, raw.keycode)
        };

        let character = self.describe(keysym);
        if character.is_none() {
            warn!(
                "Unable to determine character (keycode {}, keysym {:#x})",
                raw.keycode, keysym
            );
        }

        KeyEvent {
            keycode: raw.keycode,
            character,
            is_press: raw.is_press(),
        }
    }

    /// Keysym a non-modifier key produces under the live modifier state
    fn effective_keysym<B: InputBackend + ?Sized>(&self, backend: &B, keycode: Keycode) -> Keysym {
        let base = backend.keycode_to_keysym(keycode, 0);
        let shifted = self.state.is_active(Modifier::Shift);
        let mut keysym = if shifted {
            match backend.keycode_to_keysym(keycode, 1) {
                NO_SYMBOL => base,
                upper => upper,
            }
        } else {
            base
        };
        // Caps_Lock inverts letter case; Shift and Caps_Lock together give lowercase
        if self.state.is_active(Modifier::CapsLock) {
            if !shifted && is_ascii_lower(keysym) {
                keysym -= ASCII_CASE_OFFSET;
            } else if shifted && is_ascii_upper(keysym) {
                keysym += ASCII_CASE_OFFSET;
            }
        }
        keysym
    }

    /// Printable ASCII as the character itself, anything else by name
    fn describe(&self, keysym: Keysym) -> Option<SmolStr> {
        if let Some(c) = keysym_to_ascii(keysym) {
            let mut buf = [0u8; 4];
            return Some(SmolStr::new(&*c.encode_utf8(&mut buf)));
        }
        self.symbols.keysym_to_name(keysym).map(SmolStr::new)
    }
}
