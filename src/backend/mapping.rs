//! Keyboard mapping tables
//!
//! Core-protocol layout: `keysyms_per_keycode` keysyms for every keycode from
//! `min_keycode` upward, plus the keycodes bound to each modifier slot.

use super::Keycode;
use crate::constants::{MODIFIER_SLOT_COUNT, NO_SYMBOL};
use crate::keysym::Keysym;

/// Keycodes per modifier slot, indexed Shift, Lock, Control, Mod1..Mod5
pub type ModifierSlots = [Vec<Keycode>; MODIFIER_SLOT_COUNT];

/// Keycode ↔ keysym table of one keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapping {
    min_keycode: Keycode,
    keysyms_per_keycode: usize,
    keysyms: Vec<Keysym>,
    modifiers: ModifierSlots,
}

impl KeyMapping {
    /// `keysyms` holds `keysyms_per_keycode` entries per keycode, starting at `min_keycode`.
    /// A trailing partial row is dropped.
    pub fn new(
        min_keycode: Keycode,
        keysyms_per_keycode: usize,
        mut keysyms: Vec<Keysym>,
        modifiers: ModifierSlots,
    ) -> Self {
        if keysyms_per_keycode == 0 {
            keysyms.clear();
        } else {
            let rows = keysyms.len() / keysyms_per_keycode;
            keysyms.truncate(rows * keysyms_per_keycode);
        }
        Self {
            min_keycode,
            keysyms_per_keycode,
            keysyms,
            modifiers,
        }
    }

    /// Same keysyms with a different modifier slot assignment
    pub fn with_modifier_slots(mut self, modifiers: ModifierSlots) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn min_keycode(&self) -> Keycode {
        self.min_keycode
    }

    /// Highest keycode with a row in the table
    pub fn max_keycode(&self) -> Keycode {
        match self.keycodes().last() {
            Some(keycode) => keycode,
            None => self.min_keycode,
        }
    }

    pub fn keysyms_per_keycode(&self) -> usize {
        self.keysyms_per_keycode
    }

    /// Every keycode with a row in the table
    pub fn keycodes(&self) -> impl Iterator<Item = Keycode> + '_ {
        let rows = match self.keysyms_per_keycode {
            0 => 0,
            n => self.keysyms.len() / n,
        };
        (0..rows).map(move |i| self.min_keycode + i as Keycode)
    }

    /// Keycode for a keysym, searching level 0 of every key before level 1
    pub fn keysym_to_keycode(&self, keysym: Keysym) -> Option<Keycode> {
        if keysym == NO_SYMBOL || self.keysyms_per_keycode == 0 {
            return None;
        }
        let per = self.keysyms_per_keycode;
        (0..per).find_map(|level| {
            self.keysyms
                .chunks(per)
                .position(|row| row[level] == keysym)
                .map(|row| self.min_keycode + row as Keycode)
        })
    }

    /// Keysym at `level` of `keycode`, NoSymbol when out of range
    pub fn keycode_to_keysym(&self, keycode: Keycode, level: usize) -> Keysym {
        if keycode < self.min_keycode || level >= self.keysyms_per_keycode {
            return NO_SYMBOL;
        }
        let index = (keycode - self.min_keycode) as usize * self.keysyms_per_keycode + level;
        self.keysyms.get(index).copied().unwrap_or(NO_SYMBOL)
    }

    pub fn modifier_slots(&self) -> &ModifierSlots {
        &self.modifiers
    }

    /// Index of the first modifier slot holding `keycode`
    pub fn modifier_slot_of(&self, keycode: Keycode) -> Option<usize> {
        self.modifiers.iter().position(|slot| slot.contains(&keycode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KeyMapping {
        // keycode 8: a/A, 9: b/B, 10: A only at level 0
        KeyMapping::new(
            8,
            2,
            vec![0x61, 0x41, 0x62, 0x42, 0x41, 0],
            Default::default(),
        )
    }

    #[test]
    fn test_lowest_level_wins() {
        let map = sample();
        assert_eq!(map.keysym_to_keycode(0x61), Some(8));
        // 'A' sits at level 1 of keycode 8 and level 0 of keycode 10
        assert_eq!(map.keysym_to_keycode(0x41), Some(10));
        assert_eq!(map.keysym_to_keycode(0x42), Some(9));
        assert_eq!(map.keysym_to_keycode(0x63), None);
        assert_eq!(map.keysym_to_keycode(NO_SYMBOL), None);
    }

    #[test]
    fn test_keycode_to_keysym_out_of_range() {
        let map = sample();
        assert_eq!(map.keycode_to_keysym(9, 1), 0x42);
        assert_eq!(map.keycode_to_keysym(7, 0), NO_SYMBOL);
        assert_eq!(map.keycode_to_keysym(11, 0), NO_SYMBOL);
        assert_eq!(map.keycode_to_keysym(8, 2), NO_SYMBOL);
        assert_eq!(map.max_keycode(), 10);
        assert_eq!(map.keycodes().collect::<Vec<_>>(), vec![8, 9, 10]);
    }

    #[test]
    fn test_partial_row_dropped() {
        let map = KeyMapping::new(8, 2, vec![0x61, 0x41, 0x62], Default::default());
        assert_eq!(map.max_keycode(), 8);
        assert_eq!(map.keysym_to_keycode(0x62), None);
    }
}
