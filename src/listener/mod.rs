//! Keyboard event capture
//!
//! `KeyboardListener` pulls raw events from a backend, decodes them and hands
//! each one to a callback until the callback asks to stop, Escape is seen, or
//! the backend ends the stream.
//!
//! States: Idle → Listening → Stopped. `start` is valid from Idle or Stopped,
//! `stop` only from Listening.

pub mod decoder;
pub mod modifiers;

use log::{debug, info, warn};

use crate::backend::{EventKind, InputBackend, Keycode};
use crate::config::ListenConfig;
use crate::error::{KeysimError, Result};
use crate::keyboard::KeycodeResolver;
use crate::keysym::SymbolTable;
pub use decoder::{EventDecoder, KeyEvent};
pub use modifiers::{ModMask, Modifier, ModifierConfig, ModifierState};

/// Listener lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Listening,
    Stopped,
}

/// Captures and decodes key events from a backend
pub struct KeyboardListener<B: InputBackend> {
    backend: B,
    decoder: EventDecoder,
    state: ListenerState,
    /// Grab the keyboard exclusively while listening
    capture: bool,
    /// Stop on Escape
    escape_stops: bool,
}

impl<B: InputBackend> KeyboardListener<B> {
    /// Load symbols, discover modifier slots and resolve Escape
    pub fn new(backend: B) -> Result<Self> {
        let symbols = SymbolTable::load(&backend);
        let resolver = KeycodeResolver::new(&symbols, &backend);
        let modifiers = ModifierConfig::configure(&resolver)?;
        let escape = resolver.resolve("Escape");
        if escape.is_none() {
            warn!("No Escape key on this keyboard, Escape will not stop listening");
        }
        let decoder = EventDecoder::new(symbols, modifiers, escape);
        Ok(Self {
            backend,
            decoder,
            state: ListenerState::Idle,
            capture: false,
            escape_stops: true,
        })
    }

    pub fn with_config(backend: B, config: &ListenConfig) -> Result<Self> {
        Ok(Self::new(backend)?
            .capture(config.capture)
            .escape_stops(config.escape_stops))
    }

    /// Grab the keyboard while listening so other clients see no key events
    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    /// Whether the Escape key ends listening
    pub fn escape_stops(mut self, escape_stops: bool) -> Self {
        self.escape_stops = escape_stops;
        self
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == ListenerState::Listening
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

    pub fn modifier_config(&self) -> &ModifierConfig {
        self.decoder.modifiers()
    }

    /// Live state of a modifier
    ///
    /// `None` when the modifier is not bound to any slot on this keyboard,
    /// which is different from `Some(false)` (bound but released).
    pub fn modifier_state(&self, modifier: Modifier) -> Option<bool> {
        self.decoder.modifier_state(modifier)
    }

    /// Keycodes that drive a modifier
    pub fn modifier_keycodes(&self, modifier: Modifier) -> &[Keycode] {
        self.decoder.modifiers().keycodes(modifier)
    }

    /// Listen until stopped
    ///
    /// Blocks, calling `on_event` for every decoded event. Returning `false`
    /// from `on_event` stops listening. When Escape stopping is enabled the
    /// Escape event is still delivered, then listening ends.
    pub fn start<F>(&mut self, mut on_event: F) -> Result<()>
    where
        F: FnMut(&KeyEvent) -> bool,
    {
        if self.is_listening() {
            return Err(KeysimError::AlreadyListening);
        }

        self.backend
            .register_event_capture(&[EventKind::Press, EventKind::Release])?;
        if self.capture {
            if let Err(e) = self.backend.grab_exclusive_input() {
                if let Err(e) = self.backend.deregister_event_capture() {
                    warn!("Failed to deregister capture: {}", e);
                }
                return Err(e.into());
            }
        }
        self.state = ListenerState::Listening;
        info!(
            "Listening (capture={}, escape_stops={})",
            self.capture, self.escape_stops
        );

        let result = self.run(&mut on_event);
        let stopped = self.stop();
        result.and(stopped)
    }

    fn run<F>(&mut self, on_event: &mut F) -> Result<()>
    where
        F: FnMut(&KeyEvent) -> bool,
    {
        while let Some(raw) = self.backend.next_event()? {
            let event = self.decoder.decode(&self.backend, &raw);
            let escape = self.escape_stops && self.decoder.is_escape(event.keycode);
            if escape {
                debug!("Escape seen, stopping");
            }
            let keep_going = on_event(&event);
            if escape || !keep_going {
                return Ok(());
            }
        }
        debug!("Event stream ended");
        Ok(())
    }

    /// Deregister capture and release any keyboard grab
    pub fn stop(&mut self) -> Result<()> {
        if !self.is_listening() {
            return Err(KeysimError::NotListening);
        }
        self.state = ListenerState::Stopped;

        let deregistered = self.backend.deregister_event_capture();
        if self.capture {
            if let Err(e) = self.backend.release_exclusive_input() {
                if let Err(e) = deregistered {
                    warn!("Failed to deregister capture: {}", e);
                }
                return Err(e.into());
            }
        }
        deregistered?;
        info!("Listening stopped");
        Ok(())
    }
}
