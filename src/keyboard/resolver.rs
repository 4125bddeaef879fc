//! Character/name → keycode resolution

use log::debug;

use crate::backend::{InputBackend, Keycode};
use crate::keysym::{special, Keysym, SymbolTable};

/// Resolves characters and keysym names against a symbol table and a backend
pub struct KeycodeResolver<'a, B: ?Sized> {
    symbols: &'a SymbolTable,
    backend: &'a B,
}

impl<'a, B: InputBackend + ?Sized> KeycodeResolver<'a, B> {
    pub fn new(symbols: &'a SymbolTable, backend: &'a B) -> Self {
        Self { symbols, backend }
    }

    pub fn symbols(&self) -> &'a SymbolTable {
        self.symbols
    }

    pub fn backend(&self) -> &'a B {
        self.backend
    }

    /// Keysym for a character or keysym name
    ///
    /// Tries the input as a name first ("Escape", "a"), then a single special
    /// character through its keysym name ('#' → "numbersign").
    pub fn keysym(&self, input: &str) -> Option<Keysym> {
        self.symbols.name_to_keysym(input).or_else(|| {
            special::keysym_name_for_str(input)
                .and_then(|name| self.symbols.name_to_keysym(name))
        })
    }

    /// Keycode for a character or keysym name, `None` if either step fails
    pub fn resolve(&self, input: &str) -> Option<Keycode> {
        let keycode = self
            .keysym(input)
            .and_then(|keysym| self.backend.keysym_to_keycode(keysym));
        debug!("resolve {:?} -> {:?}", input, keycode);
        keycode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LoopbackBackend;

    #[test]
    fn test_resolve_direct_names() {
        let symbols = SymbolTable::standard();
        let backend = LoopbackBackend::us_layout();
        let resolver = KeycodeResolver::new(&symbols, &backend);
        assert_eq!(resolver.resolve("a"), Some(38));
        assert_eq!(resolver.resolve("Escape"), Some(9));
        assert_eq!(resolver.resolve("F5"), Some(71));
        assert_eq!(resolver.resolve("KP_7"), Some(79));
    }

    #[test]
    fn test_special_characters_match_their_names() {
        let symbols = SymbolTable::standard();
        let backend = LoopbackBackend::us_layout();
        let resolver = KeycodeResolver::new(&symbols, &backend);
        for (c, name) in special::entries() {
            let via_char = resolver.resolve(&c.to_string());
            assert!(via_char.is_some(), "{:?} did not resolve", c);
            assert_eq!(via_char, resolver.resolve(name), "{:?}", c);
        }
    }

    #[test]
    fn test_printable_ascii_letters_and_digits_resolve() {
        let symbols = SymbolTable::standard();
        let backend = LoopbackBackend::us_layout();
        let resolver = KeycodeResolver::new(&symbols, &backend);
        for c in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
            assert!(resolver.resolve(&c.to_string()).is_some(), "{:?}", c);
        }
    }

    #[test]
    fn test_unknown_input_is_absent() {
        let symbols = SymbolTable::standard();
        let backend = LoopbackBackend::us_layout();
        let resolver = KeycodeResolver::new(&symbols, &backend);
        assert_eq!(resolver.resolve("NoSuchKey"), None);
        assert_eq!(resolver.resolve(""), None);
        // Named in the table but not on this keyboard
        assert_eq!(resolver.resolve("Greek_alpha"), None);
        assert_eq!(resolver.resolve("Hyper_L"), None);
    }
}
