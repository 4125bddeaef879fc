//! Keymaps compiled by xkbcommon
//!
//! Builds a `KeyMapping` from XKB model/layout/variant/options names so the
//! loopback keyboard can stand in for any layout without a display server.
//! Modifier slots are derived by pressing each key on a fresh state and
//! reading back the effective real modifiers.

use log::info;
use xkbcommon::xkb;

use super::{KeyMapping, Keycode, LoopbackBackend, ModifierSlots};
use crate::config::KeyboardInputConfig;
use crate::constants::{MAX_X11_KEYCODE, NO_SYMBOL};
use crate::error::BackendError;
use crate::keysym::Keysym;

/// Shift levels read per key (plain and shifted)
const LEVELS: u32 = 2;

/// Compile a keymap from RMLVO names (empty = system default)
pub fn compile_keymap(config: &KeyboardInputConfig) -> Result<xkb::Keymap, BackendError> {
    let context = xkb::Context::new(xkb::CONTEXT_NO_FLAGS);

    let rules = ""; // Always use default rules
    let options = if config.xkb_options.is_empty() {
        None
    } else {
        Some(config.xkb_options.clone())
    };

    xkb::Keymap::new_from_names(
        &context,
        rules,
        &config.xkb_model,
        &config.xkb_layout,
        &config.xkb_variant,
        options,
        xkb::COMPILE_NO_FLAGS,
    )
    .ok_or_else(|| {
        BackendError::Keymap(format!(
            "Failed to create xkb keymap (model={}, layout={}, variant={}, options={})",
            config.xkb_model, config.xkb_layout, config.xkb_variant, config.xkb_options
        ))
    })
}

/// Core-style mapping of a compiled keymap: first layout, two levels per key
pub fn mapping_from_keymap(keymap: &xkb::Keymap) -> KeyMapping {
    let min = keymap.min_keycode().raw();
    let max = keymap.max_keycode().raw().min(MAX_X11_KEYCODE);

    let mut keysyms: Vec<Keysym> = Vec::new();
    let mut slots: ModifierSlots = Default::default();
    for raw in min..=max {
        let key = xkb::Keycode::new(raw);
        for level in 0..LEVELS {
            let sym = keymap
                .key_get_syms_by_level(key, 0, level)
                .first()
                .map(|s| s.raw())
                .unwrap_or(NO_SYMBOL);
            keysyms.push(sym);
        }

        let mut state = xkb::State::new(keymap);
        state.update_key(key, xkb::KeyDirection::Down);
        let mods = state.serialize_mods(xkb::STATE_MODS_EFFECTIVE);
        for (slot, codes) in slots.iter_mut().enumerate() {
            if mods & (1 << slot) != 0 {
                codes.push(raw as Keycode);
            }
        }
    }

    KeyMapping::new(min as Keycode, LEVELS as usize, keysyms, slots)
}

/// Loopback keyboard running the keymap named in `config`
pub fn backend_from_names(config: &KeyboardInputConfig) -> Result<LoopbackBackend, BackendError> {
    let keymap = compile_keymap(config)?;
    info!(
        "xkb keymap compiled (layout={})",
        if config.xkb_layout.is_empty() {
            "default"
        } else {
            &config.xkb_layout
        }
    );
    Ok(LoopbackBackend::new(mapping_from_keymap(&keymap)))
}
