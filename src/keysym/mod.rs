//! Keysym names
//!
//! Bidirectional name/keysym table built from the symbol groups a backend
//! exposes, plus the special-character fallback table.
//!
//! The reverse map is lossy: several names can share one keysym
//! (`Prior`/`Page_Up`, `F11`/`L1`). The first name loaded wins, with groups
//! loaded in the order Miscellany, Latin-1, Latin-2, Latin-3, Latin-4, Greek.

pub mod keysymdef;
pub mod special;

use std::collections::HashMap;

use log::debug;

use crate::backend::InputBackend;
use crate::constants::{ASCII_MAX, NO_SYMBOL};
pub use keysymdef::SymbolGroup;

/// Platform keysym value
pub type Keysym = u32;

/// Name ↔ keysym lookup
#[derive(Debug, Clone)]
pub struct SymbolTable {
    by_name: HashMap<&'static str, Keysym>,
    by_keysym: HashMap<Keysym, &'static str>,
}

impl SymbolTable {
    /// Build from `(name, keysym)` groups, earlier groups taking priority
    pub fn from_groups<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = &'a [(&'static str, Keysym)]>,
    {
        let mut by_name = HashMap::new();
        let mut by_keysym = HashMap::new();
        for group in groups {
            for &(name, keysym) in group {
                by_name.entry(name).or_insert(keysym);
                by_keysym.entry(keysym).or_insert(name);
            }
        }
        debug!(
            "Symbol table: {} names, {} keysyms",
            by_name.len(),
            by_keysym.len()
        );
        Self { by_name, by_keysym }
    }

    /// Default groups plus the explicitly loaded Latin-2/3/4 and Greek groups
    pub fn standard() -> Self {
        Self::from_groups(
            SymbolGroup::DEFAULT
                .iter()
                .chain(SymbolGroup::EXTENDED.iter())
                .map(|g| g.symbols()),
        )
    }

    /// Default groups plus the extended ones, as exposed by the backend
    pub fn load<B: InputBackend + ?Sized>(backend: &B) -> Self {
        Self::from_groups(
            SymbolGroup::DEFAULT
                .iter()
                .chain(SymbolGroup::EXTENDED.iter())
                .map(|g| backend.symbol_group(*g)),
        )
    }

    /// Keysym for a name
    pub fn name_to_keysym(&self, name: &str) -> Option<Keysym> {
        self.by_name.get(name).copied()
    }

    /// Preferred name for a keysym
    pub fn keysym_to_name(&self, keysym: Keysym) -> Option<&'static str> {
        self.by_keysym.get(&keysym).copied()
    }

    /// Number of names in the table
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whether a keysym is a printable ASCII code
///
/// Excludes 0-8, 11, 12, 14-31 and everything above 126.
/// Tab (9), Linefeed (10) and Return (13) count as printable.
pub fn ascii_printable(keysym: Keysym) -> bool {
    match keysym {
        0..=8 => false,
        11 | 12 => false,
        14..=31 => false,
        k if k > 126 => false,
        _ => true,
    }
}

/// Character for a keysym when its value is a printable ASCII code
pub fn keysym_to_ascii(keysym: Keysym) -> Option<char> {
    if keysym != NO_SYMBOL && keysym & ASCII_MAX == keysym && ascii_printable(keysym) {
        char::from_u32(keysym)
    } else {
        None
    }
}

/// Lowercase Latin letter keysym
pub(crate) fn is_ascii_lower(keysym: Keysym) -> bool {
    (0x61..=0x7a).contains(&keysym)
}

/// Uppercase Latin letter keysym
pub(crate) fn is_ascii_upper(keysym: Keysym) -> bool {
    (0x41..=0x5a).contains(&keysym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_printable_boundaries() {
        assert!(!ascii_printable(5));
        assert!(!ascii_printable(7));
        assert!(ascii_printable(9));
        assert!(ascii_printable(10));
        assert!(!ascii_printable(11));
        assert!(!ascii_printable(12));
        assert!(ascii_printable(13));
        assert!(!ascii_printable(20));
        assert!(ascii_printable(32));
        assert!(ascii_printable(65));
        assert!(ascii_printable(126));
        assert!(!ascii_printable(127));
    }

    #[test]
    fn test_standard_table_lookups() {
        let table = SymbolTable::standard();
        assert_eq!(table.name_to_keysym("Escape"), Some(0xff1b));
        assert_eq!(table.name_to_keysym("a"), Some(0x61));
        assert_eq!(table.name_to_keysym("Greek_alpha"), Some(0x7e1));
        assert_eq!(table.name_to_keysym("Aogonek"), Some(0x1a1));
        assert_eq!(table.name_to_keysym("#"), None);
        assert_eq!(table.keysym_to_name(0x7e1), Some("Greek_alpha"));
    }

    #[test]
    fn test_reverse_map_first_name_wins() {
        let table = SymbolTable::standard();
        assert_eq!(table.keysym_to_name(0xff55), Some("Prior"));
        assert_eq!(table.keysym_to_name(0xffc8), Some("F11"));
        // Mode_switch (Miscellany) is loaded before Greek_switch
        assert_eq!(table.keysym_to_name(0xff7e), Some("Mode_switch"));
        // Both names still resolve forward
        assert_eq!(table.name_to_keysym("Page_Up"), Some(0xff55));
        assert_eq!(table.name_to_keysym("Greek_switch"), Some(0xff7e));
    }

    #[test]
    fn test_default_groups_only() {
        let table =
            SymbolTable::from_groups(SymbolGroup::DEFAULT.iter().map(|g| g.symbols()));
        assert!(table.name_to_keysym("Greek_alpha").is_none());
        assert!(table.name_to_keysym("space").is_some());
    }

    #[test]
    fn test_keysym_to_ascii() {
        assert_eq!(keysym_to_ascii(0x61), Some('a'));
        assert_eq!(keysym_to_ascii(0x20), Some(' '));
        assert_eq!(keysym_to_ascii(0x7f), None);
        assert_eq!(keysym_to_ascii(0xff1b), None);
        assert_eq!(keysym_to_ascii(NO_SYMBOL), None);
    }
}
