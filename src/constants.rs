//! Global constants for keysim
//!
//! Consolidates protocol values shared by the resolver, the modifier engine
//! and the backends.

// ============================================================================
// Keysyms
// ============================================================================

/// Keysym value meaning "no symbol" (X11 NoSymbol)
pub const NO_SYMBOL: u32 = 0;

/// Largest keysym whose value is a plain ASCII code
pub const ASCII_MAX: u32 = 0x7f;

/// Distance between a Latin letter keysym and its other case
pub const ASCII_CASE_OFFSET: u32 = 0x20;

pub const XK_CAPS_LOCK: u32 = 0xffe5;
pub const XK_SHIFT_LOCK: u32 = 0xffe6;
pub const XK_NUM_LOCK: u32 = 0xff7f;

/// Keysyms that toggle their modifier on press and ignore release
pub const LOCK_KEYSYMS: [u32; 3] = [XK_CAPS_LOCK, XK_SHIFT_LOCK, XK_NUM_LOCK];

// ============================================================================
// Modifier Slots
// ============================================================================

/// Number of core-protocol modifier slots (Shift, Lock, Control, Mod1..Mod5)
pub const MODIFIER_SLOT_COUNT: usize = 8;

// ============================================================================
// Keycodes
// ============================================================================

/// Smallest keycode the X11 core protocol allows
pub const MIN_X11_KEYCODE: u32 = 8;

/// Largest keycode the X11 core protocol allows
pub const MAX_X11_KEYCODE: u32 = 255;

// ============================================================================
// Timing
// ============================================================================

/// Default pause between typed characters in milliseconds
pub const DEFAULT_TYPING_INTERVAL_MS: u64 = 0;
