//! Synthetic keyboard input
//!
//! Press, release and tap keys by character, keysym name or raw keycode.
//! Characters that live on the shifted level (uppercase letters, `!`, `{`, ...)
//! are wrapped in a Shift press/release automatically.

pub mod named;
pub mod resolver;

use std::thread;
use std::time::Duration;

use log::{info, warn};
use smol_str::SmolStr;

use crate::backend::{EventKind, InputBackend, Keycode};
use crate::error::Result;
use crate::keysym::SymbolTable;
pub use named::{KeypadKey, NamedKey, NamedKeys};
pub use resolver::KeycodeResolver;

/// What to press: a character/keysym name, or a raw keycode sent as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Symbol(SmolStr),
    Keycode(Keycode),
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        KeyInput::Symbol(SmolStr::new(c.encode_utf8(&mut buf)))
    }
}

impl From<&str> for KeyInput {
    fn from(s: &str) -> Self {
        KeyInput::Symbol(SmolStr::new(s))
    }
}

impl From<String> for KeyInput {
    fn from(s: String) -> Self {
        KeyInput::Symbol(SmolStr::from(s))
    }
}

impl From<Keycode> for KeyInput {
    fn from(keycode: Keycode) -> Self {
        KeyInput::Keycode(keycode)
    }
}

/// Keyboard input simulation
pub struct Keyboard<B: InputBackend> {
    backend: B,
    symbols: SymbolTable,
    keys: NamedKeys,
}

impl<B: InputBackend> Keyboard<B> {
    /// Build the symbol table and resolve every named key
    pub fn new(backend: B) -> Self {
        let symbols = SymbolTable::load(&backend);
        let keys = NamedKeys::resolve(&KeycodeResolver::new(&symbols, &backend));
        info!(
            "Keyboard initialized ({} keysym names, escape={:?}, shift={:?})",
            symbols.len(),
            keys.escape(),
            keys.shift()
        );
        Self {
            backend,
            symbols,
            keys,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn resolver(&self) -> KeycodeResolver<'_, B> {
        KeycodeResolver::new(&self.symbols, &self.backend)
    }

    /// Keycode for a character or keysym name
    pub fn lookup_character_keycode(&self, symbol: &str) -> Option<Keycode> {
        self.resolver().resolve(symbol)
    }

    pub fn named_keys(&self) -> &NamedKeys {
        &self.keys
    }

    /// Keycode of a named key
    pub fn key(&self, key: NamedKey) -> Option<Keycode> {
        self.keys.get(key)
    }

    /// F1-F35
    pub fn function_key(&self, n: u8) -> Option<Keycode> {
        self.keys.function(n)
    }

    /// L1-L10
    pub fn l_key(&self, n: u8) -> Option<Keycode> {
        self.keys.l(n)
    }

    /// R1-R15
    pub fn r_key(&self, n: u8) -> Option<Keycode> {
        self.keys.r(n)
    }

    pub fn keypad(&self, key: KeypadKey) -> Option<Keycode> {
        self.keys.keypad(key)
    }

    /// Whether typing `symbol` needs Shift held
    ///
    /// True for uppercase characters and for keysyms that only exist on the
    /// shifted level of their key.
    pub fn is_shifted(&self, symbol: &str) -> bool {
        let mut chars = symbol.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_uppercase() {
                return true;
            }
        }
        let Some(keysym) = self.resolver().keysym(symbol) else {
            return false;
        };
        let Some(keycode) = self.backend.keysym_to_keycode(keysym) else {
            return false;
        };
        self.backend.keycode_to_keysym(keycode, 0) != keysym
            && self.backend.keycode_to_keysym(keycode, 1) == keysym
    }

    /// Press a key
    ///
    /// Returns the keycode pressed, or `None` when the symbol did not resolve
    /// and nothing was sent.
    pub fn press<I: Into<KeyInput>>(&mut self, input: I) -> Result<Option<Keycode>> {
        self.send(EventKind::Press, input.into())
    }

    /// Release a key
    pub fn release<I: Into<KeyInput>>(&mut self, input: I) -> Result<Option<Keycode>> {
        self.send(EventKind::Release, input.into())
    }

    /// Press and release a key
    pub fn tap<I: Into<KeyInput>>(&mut self, input: I) -> Result<Option<Keycode>> {
        let input = input.into();
        let keycode = self.press(input.clone())?;
        if keycode.is_some() {
            self.release(input)?;
        }
        Ok(keycode)
    }

    /// Tap a key `n` times, pausing `interval` between taps
    pub fn tap_n<I: Into<KeyInput>>(
        &mut self,
        input: I,
        n: usize,
        interval: Duration,
    ) -> Result<Option<Keycode>> {
        let input = input.into();
        let mut keycode = None;
        for i in 0..n {
            if i > 0 && !interval.is_zero() {
                thread::sleep(interval);
            }
            keycode = self.tap(input.clone())?;
            if keycode.is_none() {
                break;
            }
        }
        Ok(keycode)
    }

    /// Press every key in order, then release them in reverse (key chords)
    pub fn press_keys(&mut self, inputs: &[KeyInput]) -> Result<()> {
        for input in inputs {
            self.press(input.clone())?;
        }
        for input in inputs.iter().rev() {
            self.release(input.clone())?;
        }
        Ok(())
    }

    /// Tap every character of `text`
    ///
    /// Returns how many characters were typed; unresolved ones are skipped.
    pub fn type_string(&mut self, text: &str, interval: Duration) -> Result<usize> {
        let mut typed = 0;
        for (i, c) in text.chars().enumerate() {
            if i > 0 && !interval.is_zero() {
                thread::sleep(interval);
            }
            if self.tap(c)?.is_some() {
                typed += 1;
            }
        }
        Ok(typed)
    }

    fn send(&mut self, kind: EventKind, input: KeyInput) -> Result<Option<Keycode>> {
        let symbol = match input {
            KeyInput::Keycode(keycode) => {
                self.backend.send_synthetic_event(kind, keycode)?;
                return Ok(Some(keycode));
            }
            KeyInput::Symbol(symbol) => symbol,
        };

        let Some(keycode) = self.lookup_character_keycode(&symbol) else {
            warn!("No keycode for {:?}, {:?} not sent", symbol, kind);
            return Ok(None);
        };

        let shift = if self.is_shifted(&symbol) {
            let shift = self.keys.shift();
            if shift.is_none() {
                warn!("No Shift key on this keyboard, sending {:?} unshifted", symbol);
            }
            shift
        } else {
            None
        };

        match kind {
            EventKind::Press => {
                if let Some(shift) = shift {
                    self.backend.send_synthetic_event(EventKind::Press, shift)?;
                }
                self.backend.send_synthetic_event(EventKind::Press, keycode)?;
            }
            EventKind::Release => {
                self.backend.send_synthetic_event(EventKind::Release, keycode)?;
                if let Some(shift) = shift {
                    self.backend.send_synthetic_event(EventKind::Release, shift)?;
                }
            }
        }
        Ok(Some(keycode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LoopbackBackend;
    use EventKind::{Press, Release};

    fn keyboard() -> Keyboard<LoopbackBackend> {
        Keyboard::new(LoopbackBackend::us_layout())
    }

    #[test]
    fn test_tap_lowercase() {
        let mut kb = keyboard();
        assert_eq!(kb.tap('a').unwrap(), Some(38));
        assert_eq!(kb.backend().sent(), &[(Press, 38), (Release, 38)]);
    }

    #[test]
    fn test_tap_uppercase_wraps_shift() {
        let mut kb = keyboard();
        assert_eq!(kb.tap('A').unwrap(), Some(38));
        assert_eq!(
            kb.backend().sent(),
            &[(Press, 50), (Press, 38), (Release, 38), (Release, 50)]
        );
    }

    #[test]
    fn test_shifted_punctuation() {
        let kb = keyboard();
        assert!(kb.is_shifted("!"));
        assert!(kb.is_shifted("{"));
        assert!(kb.is_shifted("A"));
        assert!(!kb.is_shifted("1"));
        assert!(!kb.is_shifted("a"));
        assert!(!kb.is_shifted(" "));
        assert!(!kb.is_shifted("Escape"));
        assert!(!kb.is_shifted("NoSuchKey"));
    }

    #[test]
    fn test_raw_keycode_bypasses_shift() {
        let mut kb = keyboard();
        kb.press(38u32).unwrap();
        kb.release(38u32).unwrap();
        assert_eq!(kb.backend().sent(), &[(Press, 38), (Release, 38)]);
    }

    #[test]
    fn test_unresolved_symbol_sends_nothing() {
        let mut kb = keyboard();
        assert_eq!(kb.tap("Greek_alpha").unwrap(), None);
        assert_eq!(kb.tap('€').unwrap(), None);
        assert!(kb.backend().sent().is_empty());
    }

    #[test]
    fn test_named_keys_by_name() {
        let mut kb = keyboard();
        assert_eq!(kb.tap("Escape").unwrap(), kb.key(NamedKey::Escape));
        assert_eq!(kb.key(NamedKey::Escape), Some(9));
    }

    #[test]
    fn test_type_string_skips_unknown() {
        let mut kb = keyboard();
        let typed = kb.type_string("Hi!\n€", Duration::ZERO).unwrap();
        assert_eq!(typed, 4);
        let presses: Vec<_> = kb
            .backend()
            .sent()
            .iter()
            .filter(|(kind, _)| *kind == Press)
            .map(|(_, k)| *k)
            .collect();
        // H = shift+h, i, ! = shift+1, Return
        assert_eq!(presses, vec![50, 43, 31, 50, 10, 36]);
    }

    #[test]
    fn test_press_keys_releases_in_reverse() {
        let mut kb = keyboard();
        let chord = [
            KeyInput::from("Control_L"),
            KeyInput::from("Alt_L"),
            KeyInput::from('t'),
        ];
        kb.press_keys(&chord).unwrap();
        assert_eq!(
            kb.backend().sent(),
            &[
                (Press, 37),
                (Press, 64),
                (Press, 28),
                (Release, 28),
                (Release, 64),
                (Release, 37)
            ]
        );
    }

    #[test]
    fn test_tap_n() {
        let mut kb = keyboard();
        kb.tap_n("BackSpace", 3, Duration::ZERO).unwrap();
        assert_eq!(kb.backend().sent().len(), 6);
    }

    #[test]
    fn test_unsupported_key_needs_no_lookup() {
        let kb = keyboard();
        let before = kb.backend().lookup_count();
        assert_eq!(kb.key(NamedKey::Kana), None);
        assert_eq!(kb.backend().lookup_count(), before);
    }
}
