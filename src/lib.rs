//! keysim - keysym-oriented synthetic keyboard input and key capture
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  Keyboard (press/release/tap)   KeyboardListener │
//! │        ↓                                ↑        │
//! │  KeycodeResolver ← SymbolTable → EventDecoder    │
//! │        ↓            NamedKeys    ModifierConfig  │
//! ├──────────────────────────────────────────────────┤
//! │  InputBackend: X11 (XTEST/RECORD) | loopback     │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Characters and keysym names resolve to keycodes through the symbol table,
//! falling back to the special-character table for punctuation. Captured
//! events are decoded back into characters using live modifier state.

pub mod backend;
pub mod config;
pub mod constants;
pub mod error;
pub mod keyboard;
pub mod keysym;
pub mod listener;

pub use backend::{EventKind, InputBackend, Keycode, LoopbackBackend, RawKeyEvent};
#[cfg(feature = "x11")]
pub use backend::X11Backend;
pub use config::Config;
pub use error::{BackendError, KeysimError, Result};
pub use keyboard::{KeyInput, Keyboard, KeypadKey, NamedKey};
pub use keysym::{ascii_printable, Keysym, SymbolTable};
pub use listener::{KeyEvent, KeyboardListener, ListenerState, Modifier};
