//! Modifier configuration and live modifier state
//!
//! Shift, Lock and Control sit on fixed bits of the core event state. Alt,
//! Num_Lock and Super live on whichever of Mod1-Mod5 the platform binds their
//! keys to, so they are discovered by matching slot keycodes against the
//! keycodes of Alt_L/Alt_R, Num_Lock and Super_L/Super_R. A named modifier no
//! slot carries keeps an empty mask: its state is not tracked at all.

use std::collections::{HashMap, HashSet};

use bitflags::bitflags;
use log::{debug, info};

use crate::backend::{InputBackend, Keycode};
use crate::error::BackendError;
use crate::keyboard::KeycodeResolver;

bitflags! {
    /// Core-protocol modifier mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        const MOD1 = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const MOD4 = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

/// Modifier names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    CapsLock,
    Control,
    Mod1,
    Mod2,
    Mod3,
    Mod4,
    Mod5,
    Alt,
    NumLock,
    Super,
}

impl Modifier {
    /// The 8 hardware slots, in protocol order
    pub const SLOTS: [Modifier; 8] = [
        Modifier::Shift,
        Modifier::CapsLock,
        Modifier::Control,
        Modifier::Mod1,
        Modifier::Mod2,
        Modifier::Mod3,
        Modifier::Mod4,
        Modifier::Mod5,
    ];

    /// Slots plus the dynamically bound names
    pub const ALL: [Modifier; 11] = [
        Modifier::Shift,
        Modifier::CapsLock,
        Modifier::Control,
        Modifier::Mod1,
        Modifier::Mod2,
        Modifier::Mod3,
        Modifier::Mod4,
        Modifier::Mod5,
        Modifier::Alt,
        Modifier::NumLock,
        Modifier::Super,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Modifier::Shift => "Shift",
            Modifier::CapsLock => "Caps_Lock",
            Modifier::Control => "Control",
            Modifier::Mod1 => "Mod1",
            Modifier::Mod2 => "Mod2",
            Modifier::Mod3 => "Mod3",
            Modifier::Mod4 => "Mod4",
            Modifier::Mod5 => "Mod5",
            Modifier::Alt => "Alt",
            Modifier::NumLock => "Num_Lock",
            Modifier::Super => "Super",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Modifier::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Protocol bit of a slot; empty for Alt, Num_Lock and Super
    pub fn slot_mask(self) -> ModMask {
        match self {
            Modifier::Shift => ModMask::SHIFT,
            Modifier::CapsLock => ModMask::LOCK,
            Modifier::Control => ModMask::CONTROL,
            Modifier::Mod1 => ModMask::MOD1,
            Modifier::Mod2 => ModMask::MOD2,
            Modifier::Mod3 => ModMask::MOD3,
            Modifier::Mod4 => ModMask::MOD4,
            Modifier::Mod5 => ModMask::MOD5,
            Modifier::Alt | Modifier::NumLock | Modifier::Super => ModMask::empty(),
        }
    }
}

/// Named modifiers discovered on Mod slots, with the keysyms that identify them
const DISCOVERED: [(Modifier, &[&str]); 3] = [
    (Modifier::Alt, &["Alt_L", "Alt_R"]),
    (Modifier::NumLock, &["Num_Lock"]),
    (Modifier::Super, &["Super_L", "Super_R"]),
];

/// Modifier bit table and modifier keycodes of one keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierConfig {
    bits: HashMap<Modifier, ModMask>,
    keycodes: HashMap<Modifier, Vec<Keycode>>,
    all_keycodes: HashSet<Keycode>,
}

impl ModifierConfig {
    /// Query the backend's modifier slots and bind Alt, Num_Lock and Super
    ///
    /// When one named modifier appears on several slots the later slot wins.
    pub fn configure<B: InputBackend + ?Sized>(
        resolver: &KeycodeResolver<'_, B>,
    ) -> Result<Self, BackendError> {
        let slots = resolver.backend().modifier_slot_mapping()?;

        let mut bits: HashMap<Modifier, ModMask> =
            Modifier::ALL.iter().map(|m| (*m, m.slot_mask())).collect();
        let mut keycodes = HashMap::new();
        let mut all_keycodes = HashSet::new();

        for (slot, codes) in Modifier::SLOTS.iter().zip(slots.iter()) {
            let codes: Vec<Keycode> = codes.iter().copied().filter(|&k| k != 0).collect();
            all_keycodes.extend(codes.iter().copied());
            keycodes.insert(*slot, codes);
        }

        let candidates: Vec<(Modifier, Vec<Keycode>)> = DISCOVERED
            .iter()
            .map(|(named, names)| {
                let codes = names.iter().filter_map(|n| resolver.resolve(n)).collect();
                (*named, codes)
            })
            .collect();

        for slot in Modifier::SLOTS {
            let codes = keycodes.get(&slot).cloned().unwrap_or_default();
            for (named, wanted) in &candidates {
                if wanted.iter().any(|k| codes.contains(k)) {
                    debug!("{} bound to {}", named.name(), slot.name());
                    keycodes.insert(*named, codes.clone());
                    bits.insert(*named, slot.slot_mask());
                }
            }
        }

        let config = Self {
            bits,
            keycodes,
            all_keycodes,
        };
        info!(
            "Modifiers configured (Alt={:?}, Num_Lock={:?}, Super={:?})",
            config.bit(Modifier::Alt),
            config.bit(Modifier::NumLock),
            config.bit(Modifier::Super)
        );
        Ok(config)
    }

    /// Event-state bit of a modifier, empty when untracked
    pub fn bit(&self, modifier: Modifier) -> ModMask {
        self.bits
            .get(&modifier)
            .copied()
            .unwrap_or_else(ModMask::empty)
    }

    /// Whether the modifier is bound to a slot on this keyboard
    pub fn is_tracked(&self, modifier: Modifier) -> bool {
        !self.bit(modifier).is_empty()
    }

    /// Keycodes that drive a modifier
    pub fn keycodes(&self, modifier: Modifier) -> &[Keycode] {
        self.keycodes
            .get(&modifier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a keycode is itself a modifier key
    pub fn is_modifier_keycode(&self, keycode: Keycode) -> bool {
        self.all_keycodes.contains(&keycode)
    }

    pub fn all_keycodes(&self) -> &HashSet<Keycode> {
        &self.all_keycodes
    }
}

/// Live on/off state of every modifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierState {
    active: HashMap<Modifier, bool>,
    /// Non-lock modifier keys currently held down
    held: HashSet<Keycode>,
}

impl ModifierState {
    /// Overwrite every modifier from a raw event state
    pub fn update(&mut self, config: &ModifierConfig, state: u16) {
        let state = ModMask::from_bits_truncate(state);
        for modifier in Modifier::ALL {
            let bit = config.bit(modifier);
            self.active
                .insert(modifier, !bit.is_empty() && state.intersects(bit));
        }
    }

    /// Apply a modifier key's own press/release on top of the event state
    ///
    /// Lock keys toggle on press and ignore release. A slot stays active
    /// while any other key of the slot is still held.
    pub fn apply_key(
        &mut self,
        config: &ModifierConfig,
        keycode: Keycode,
        is_press: bool,
        is_lock: bool,
    ) {
        if !is_lock {
            if is_press {
                self.held.insert(keycode);
            } else {
                self.held.remove(&keycode);
            }
        }
        for modifier in Modifier::ALL {
            let keycodes = config.keycodes(modifier);
            if !config.is_tracked(modifier) || !keycodes.contains(&keycode) {
                continue;
            }
            let current = self.is_active(modifier);
            let next = match (is_lock, is_press) {
                (true, true) => !current,
                (true, false) => current,
                (false, _) => keycodes.iter().any(|k| self.held.contains(k)),
            };
            self.active.insert(modifier, next);
        }
    }

    pub fn is_active(&self, modifier: Modifier) -> bool {
        self.active.get(&modifier).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::loopback::us_mapping;
    use crate::backend::LoopbackBackend;
    use crate::keysym::SymbolTable;

    fn configure(backend: &LoopbackBackend) -> ModifierConfig {
        let symbols = SymbolTable::standard();
        ModifierConfig::configure(&KeycodeResolver::new(&symbols, backend)).unwrap()
    }

    #[test]
    fn test_us_layout_discovery() {
        let config = configure(&LoopbackBackend::us_layout());
        assert_eq!(config.bit(Modifier::Shift), ModMask::SHIFT);
        assert_eq!(config.bit(Modifier::Alt), ModMask::MOD1);
        assert_eq!(config.bit(Modifier::NumLock), ModMask::MOD2);
        assert_eq!(config.bit(Modifier::Super), ModMask::MOD4);
        assert_eq!(config.keycodes(Modifier::Alt), &[64, 108]);
        assert_eq!(config.keycodes(Modifier::Shift), &[50, 62]);
        assert!(config.is_modifier_keycode(66));
        assert!(!config.is_modifier_keycode(38));
    }

    #[test]
    fn test_configure_is_idempotent() {
        let backend = LoopbackBackend::us_layout();
        assert_eq!(configure(&backend), configure(&backend));
    }

    #[test]
    fn test_missing_modifier_stays_untracked() {
        let slots = [
            vec![50, 62],
            vec![66],
            vec![37, 105],
            vec![64, 108],
            vec![77],
            vec![],
            vec![],
            vec![],
        ];
        let backend = LoopbackBackend::new(us_mapping().with_modifier_slots(slots));
        let config = configure(&backend);
        assert!(!config.is_tracked(Modifier::Super));
        assert!(config.keycodes(Modifier::Super).is_empty());

        let mut state = ModifierState::default();
        state.update(&config, 0xff);
        assert!(!state.is_active(Modifier::Super));
        assert!(state.is_active(Modifier::Alt));
    }

    #[test]
    fn test_slot_held_by_other_key() {
        let config = configure(&LoopbackBackend::us_layout());
        let mut state = ModifierState::default();
        state.apply_key(&config, 50, true, false);
        state.apply_key(&config, 62, true, false);
        state.apply_key(&config, 62, false, false);
        assert!(state.is_active(Modifier::Shift));
        state.apply_key(&config, 50, false, false);
        assert!(!state.is_active(Modifier::Shift));
    }

    #[test]
    fn test_later_slot_wins() {
        let slots = [
            vec![50, 62],
            vec![66],
            vec![37, 105],
            vec![64],
            vec![77],
            vec![],
            vec![133, 134],
            vec![108],
        ];
        let backend = LoopbackBackend::new(us_mapping().with_modifier_slots(slots));
        let config = configure(&backend);
        assert_eq!(config.bit(Modifier::Alt), ModMask::MOD5);
        assert_eq!(config.keycodes(Modifier::Alt), &[108]);
    }

    #[test]
    fn test_zero_keycodes_dropped() {
        let slots = [vec![50, 0], vec![0], vec![], vec![], vec![], vec![], vec![], vec![]];
        let backend = LoopbackBackend::new(us_mapping().with_modifier_slots(slots));
        let config = configure(&backend);
        assert_eq!(config.keycodes(Modifier::Shift), &[50]);
        assert!(config.keycodes(Modifier::CapsLock).is_empty());
        assert!(!config.is_modifier_keycode(0));
    }

    #[test]
    fn test_state_overwrites() {
        let config = configure(&LoopbackBackend::us_layout());
        let mut state = ModifierState::default();
        state.update(&config, (ModMask::SHIFT | ModMask::MOD1).bits());
        assert!(state.is_active(Modifier::Shift));
        assert!(state.is_active(Modifier::Alt));
        assert!(state.is_active(Modifier::Mod1));
        state.update(&config, ModMask::CONTROL.bits());
        assert!(!state.is_active(Modifier::Shift));
        assert!(!state.is_active(Modifier::Alt));
        assert!(state.is_active(Modifier::Control));
    }

    #[test]
    fn test_apply_key() {
        let config = configure(&LoopbackBackend::us_layout());
        let mut state = ModifierState::default();
        state.apply_key(&config, 64, true, false);
        assert!(state.is_active(Modifier::Alt));
        assert!(state.is_active(Modifier::Mod1));
        state.apply_key(&config, 64, false, false);
        assert!(!state.is_active(Modifier::Alt));

        state.apply_key(&config, 66, true, true);
        state.apply_key(&config, 66, false, true);
        assert!(state.is_active(Modifier::CapsLock));
    }

    #[test]
    fn test_modifier_names() {
        assert_eq!(Modifier::from_name("num_lock"), Some(Modifier::NumLock));
        assert_eq!(Modifier::from_name("Alt"), Some(Modifier::Alt));
        assert_eq!(Modifier::from_name("Hyper"), None);
    }
}
