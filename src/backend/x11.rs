//! X11 backend
//!
//! Keyboard mapping comes from the core protocol, synthetic events go through
//! XTEST, and capture uses a RECORD context. RECORD delivers intercepted data
//! on a connection of its own that blocks inside `RecordEnableContext`, so a
//! reader thread owns that connection and forwards parsed key events over an
//! mpsc channel.

use std::sync::mpsc;
use std::thread::JoinHandle;

use log::{debug, info, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};
use x11rb::protocol::record::{self, ConnectionExt as _};
use x11rb::protocol::xproto::{
    ConnectionExt as _, GrabMode, GrabStatus, KeyPressEvent, Window, KEY_PRESS_EVENT,
    KEY_RELEASE_EVENT,
};
use x11rb::protocol::xtest::{self, ConnectionExt as _};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;
use x11rb::x11_utils::TryParse;
use x11rb::CURRENT_TIME;

use super::{EventKind, InputBackend, KeyMapping, Keycode, ModifierSlots, RawKeyEvent};
use crate::constants::{MAX_X11_KEYCODE, MIN_X11_KEYCODE, MODIFIER_SLOT_COUNT};
use crate::error::BackendError;
use crate::keysym::Keysym;

/// Size of a core protocol event
const EVENT_SIZE: usize = 32;

/// Intercepted data category: data from the server
const CATEGORY_FROM_SERVER: u8 = 0;
/// Intercepted data category: context disabled, no more data follows
const CATEGORY_END_OF_DATA: u8 = 5;

type CapturedEvent = Result<RawKeyEvent, BackendError>;

/// Running RECORD capture
struct Capture {
    context: record::Context,
    kinds: Vec<EventKind>,
    events: mpsc::Receiver<CapturedEvent>,
    thread: Option<JoinHandle<()>>,
}

/// X server keyboard
pub struct X11Backend {
    conn: RustConnection,
    /// Display name used to open the capture connection
    display: Option<String>,
    root: Window,
    mapping: KeyMapping,
    capture: Option<Capture>,
    grabbed: bool,
}

impl X11Backend {
    /// Connect to `display` (`None` = $DISPLAY) and read the keyboard mapping
    ///
    /// Fails when the server lacks XTEST or RECORD.
    pub fn connect(display: Option<&str>) -> Result<Self, BackendError> {
        let (conn, screen_num) = x11rb::connect(display)?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| BackendError::Connect(format!("no screen {}", screen_num)))?;

        for name in [xtest::X11_EXTENSION_NAME, record::X11_EXTENSION_NAME] {
            conn.extension_information(name)?
                .ok_or(BackendError::MissingExtension(name))?;
        }
        let xtest_version = conn.xtest_get_version(2, 2)?.reply()?;
        let record_version = conn.record_query_version(1, 13)?.reply()?;
        debug!(
            "XTEST {}.{}, RECORD {}.{}",
            xtest_version.major_version,
            xtest_version.minor_version,
            record_version.major_version,
            record_version.minor_version
        );

        let mapping = query_mapping(&conn)?;
        info!(
            "Connected to X display {} (keycodes {}-{}, {} keysyms per keycode)",
            display.unwrap_or("$DISPLAY"),
            mapping.min_keycode(),
            mapping.max_keycode(),
            mapping.keysyms_per_keycode()
        );

        Ok(Self {
            conn,
            display: display.map(str::to_owned),
            root,
            mapping,
            capture: None,
            grabbed: false,
        })
    }

    pub fn mapping(&self) -> &KeyMapping {
        &self.mapping
    }

    fn stop_capture(&mut self, mut capture: Capture) -> Result<(), BackendError> {
        self.conn.record_disable_context(capture.context)?;
        self.conn.sync()?;
        if let Some(thread) = capture.thread.take() {
            if thread.join().is_err() {
                warn!("Record thread panicked");
            }
        }
        self.conn.record_free_context(capture.context)?;
        self.conn.sync()?;
        debug!("Record context {:#x} freed", capture.context);
        Ok(())
    }
}

impl InputBackend for X11Backend {
    fn keysym_to_keycode(&self, keysym: Keysym) -> Option<Keycode> {
        self.mapping.keysym_to_keycode(keysym)
    }

    fn keycode_to_keysym(&self, keycode: Keycode, level: usize) -> Keysym {
        self.mapping.keycode_to_keysym(keycode, level)
    }

    fn send_synthetic_event(
        &mut self,
        kind: EventKind,
        keycode: Keycode,
    ) -> Result<(), BackendError> {
        if !(MIN_X11_KEYCODE..=MAX_X11_KEYCODE).contains(&keycode) {
            return Err(BackendError::KeycodeOutOfRange(keycode));
        }
        let event_type = match kind {
            EventKind::Press => KEY_PRESS_EVENT,
            EventKind::Release => KEY_RELEASE_EVENT,
        };
        self.conn
            .xtest_fake_input(event_type, keycode as u8, CURRENT_TIME, self.root, 0, 0, 0)?;
        self.conn.sync()?;
        debug!("XTEST: {:?} keycode {}", kind, keycode);
        Ok(())
    }

    fn modifier_slot_mapping(&self) -> Result<ModifierSlots, BackendError> {
        query_modifier_slots(&self.conn)
    }

    fn register_event_capture(&mut self, kinds: &[EventKind]) -> Result<(), BackendError> {
        if let Some(capture) = self.capture.take() {
            self.stop_capture(capture)?;
        }

        let context = self.conn.generate_id()?;
        let empty = record::Range8 { first: 0, last: 0 };
        let empty_ext = record::ExtRange {
            major: empty,
            minor: record::Range16 { first: 0, last: 0 },
        };
        let range = record::Range {
            core_requests: empty,
            core_replies: empty,
            ext_requests: empty_ext,
            ext_replies: empty_ext,
            delivered_events: empty,
            device_events: record::Range8 {
                first: KEY_PRESS_EVENT,
                last: KEY_RELEASE_EVENT,
            },
            errors: empty,
            client_started: false,
            client_died: false,
        };
        self.conn
            .record_create_context(context, 0, &[record::CS::ALL_CLIENTS.into()], &[range])?
            .check()?;

        // RecordEnableContext blocks its connection, so it gets a second one
        let (data_conn, _) = x11rb::connect(self.display.as_deref())?;
        let (tx, rx) = mpsc::channel();
        let thread = std::thread::Builder::new()
            .name("keysim-record".into())
            .spawn(move || record_thread(data_conn, context, tx))
            .map_err(|e| BackendError::Connection(format!("Failed to start record thread: {}", e)))?;

        info!("Record context {:#x} enabled", context);
        self.capture = Some(Capture {
            context,
            kinds: kinds.to_vec(),
            events: rx,
            thread: Some(thread),
        });
        Ok(())
    }

    fn next_event(&mut self) -> Result<Option<RawKeyEvent>, BackendError> {
        let capture = self
            .capture
            .as_ref()
            .ok_or(BackendError::CaptureNotRegistered)?;
        loop {
            match capture.events.recv() {
                Ok(Ok(event)) if capture.kinds.contains(&event.kind) => return Ok(Some(event)),
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => return Err(e),
                // Reader thread is gone: the context was disabled
                Err(_) => return Ok(None),
            }
        }
    }

    fn deregister_event_capture(&mut self) -> Result<(), BackendError> {
        match self.capture.take() {
            Some(capture) => self.stop_capture(capture),
            None => Ok(()),
        }
    }

    fn grab_exclusive_input(&mut self) -> Result<(), BackendError> {
        let reply = self
            .conn
            .grab_keyboard(true, self.root, CURRENT_TIME, GrabMode::ASYNC, GrabMode::ASYNC)?
            .reply()?;
        if reply.status != GrabStatus::SUCCESS {
            return Err(BackendError::GrabDenied(format!("{:?}", reply.status)));
        }
        self.grabbed = true;
        info!("Keyboard grabbed");
        Ok(())
    }

    fn release_exclusive_input(&mut self) -> Result<(), BackendError> {
        self.conn.ungrab_keyboard(CURRENT_TIME)?;
        self.conn.flush()?;
        if self.grabbed {
            info!("Keyboard released");
        }
        self.grabbed = false;
        Ok(())
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        if let Err(e) = self.deregister_event_capture() {
            warn!("Failed to stop capture: {}", e);
        }
        if self.grabbed {
            if let Err(e) = self.release_exclusive_input() {
                warn!("Failed to release keyboard: {}", e);
            }
        }
    }
}

/// Core keyboard mapping plus modifier slots
fn query_mapping(conn: &RustConnection) -> Result<KeyMapping, BackendError> {
    let setup = conn.setup();
    let (min, max) = (setup.min_keycode, setup.max_keycode);
    let reply = conn.get_keyboard_mapping(min, max - min + 1)?.reply()?;
    let keysyms: Vec<Keysym> = reply.keysyms;
    Ok(KeyMapping::new(
        Keycode::from(min),
        usize::from(reply.keysyms_per_keycode),
        keysyms,
        query_modifier_slots(conn)?,
    ))
}

/// Keycodes of the 8 modifier slots
fn query_modifier_slots(conn: &RustConnection) -> Result<ModifierSlots, BackendError> {
    let reply = conn.get_modifier_mapping()?.reply()?;
    let per_slot = reply.keycodes.len() / MODIFIER_SLOT_COUNT;
    let mut slots: ModifierSlots = Default::default();
    if per_slot == 0 {
        return Ok(slots);
    }
    for (slot, codes) in slots.iter_mut().zip(reply.keycodes.chunks(per_slot)) {
        *slot = codes.iter().map(|&k| Keycode::from(k)).collect();
    }
    Ok(slots)
}

/// Reader thread: stream intercepted key events until the context is disabled
fn record_thread(conn: RustConnection, context: record::Context, tx: mpsc::Sender<CapturedEvent>) {
    let replies = match conn.record_enable_context(context) {
        Ok(replies) => replies,
        Err(e) => {
            let _ = tx.send(Err(e.into()));
            return;
        }
    };
    for reply in replies {
        let reply = match reply {
            Ok(reply) => reply,
            Err(e) => {
                let _ = tx.send(Err(e.into()));
                return;
            }
        };
        if reply.client_swapped {
            warn!("Ignoring data from byte-swapped client");
            continue;
        }
        match reply.category {
            CATEGORY_FROM_SERVER => {
                for event in parse_key_events(&reply.data) {
                    if tx.send(Ok(event)).is_err() {
                        return;
                    }
                }
            }
            CATEGORY_END_OF_DATA => break,
            _ => {}
        }
    }
    debug!("Record thread finished");
}

/// Key events packed in intercepted device-event data
fn parse_key_events(mut data: &[u8]) -> Vec<RawKeyEvent> {
    let mut events = Vec::new();
    while data.len() >= EVENT_SIZE {
        let kind = match data[0] & 0x7f {
            KEY_PRESS_EVENT => Some(EventKind::Press),
            KEY_RELEASE_EVENT => Some(EventKind::Release),
            _ => None,
        };
        if let Some(kind) = kind {
            match KeyPressEvent::try_parse(data) {
                Ok((event, _)) => events.push(RawKeyEvent {
                    keycode: Keycode::from(event.detail),
                    state: u16::from(event.state),
                    kind,
                }),
                Err(e) => warn!("Malformed key event: {:?}", e),
            }
        }
        data = &data[EVENT_SIZE..];
    }
    events
}

impl From<ConnectError> for BackendError {
    fn from(e: ConnectError) -> Self {
        BackendError::Connect(e.to_string())
    }
}

impl From<ConnectionError> for BackendError {
    fn from(e: ConnectionError) -> Self {
        BackendError::Connection(e.to_string())
    }
}

impl From<ReplyError> for BackendError {
    fn from(value: ReplyError) -> Self {
        match value {
            ReplyError::ConnectionError(e) => e.into(),
            ReplyError::X11Error(e) => BackendError::Protocol(format!("{:?}", e)),
        }
    }
}

impl From<ReplyOrIdError> for BackendError {
    fn from(value: ReplyOrIdError) -> Self {
        match value {
            ReplyOrIdError::ConnectionError(e) => e.into(),
            ReplyOrIdError::X11Error(e) => BackendError::Protocol(format!("{:?}", e)),
            ReplyOrIdError::IdsExhausted => BackendError::Protocol("XIDs exhausted".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(response_type: u8, detail: u8, state: u16) -> [u8; EVENT_SIZE] {
        let mut buf = [0u8; EVENT_SIZE];
        buf[0] = response_type;
        buf[1] = detail;
        buf[28..30].copy_from_slice(&state.to_ne_bytes());
        buf[30] = 1; // same_screen
        buf
    }

    #[test]
    fn test_parse_key_events() {
        let mut data = Vec::new();
        data.extend_from_slice(&key_event(KEY_PRESS_EVENT, 38, 0x1));
        // Synthetic flag (0x80) is ignored
        data.extend_from_slice(&key_event(KEY_RELEASE_EVENT | 0x80, 38, 0x1));
        // Not a key event
        data.extend_from_slice(&key_event(12, 0, 0));
        // Trailing partial event
        data.extend_from_slice(&[KEY_PRESS_EVENT, 9]);

        let events = parse_key_events(&data);
        assert_eq!(
            events,
            vec![
                RawKeyEvent {
                    keycode: 38,
                    state: 0x1,
                    kind: EventKind::Press
                },
                RawKeyEvent {
                    keycode: 38,
                    state: 0x1,
                    kind: EventKind::Release
                },
            ]
        );
    }

    #[test]
    #[ignore] // Requires a running X server with XTEST and RECORD
    fn test_connect_and_resolve() {
        let backend = X11Backend::connect(None).unwrap();
        assert!(backend.keysym_to_keycode(0xff1b).is_some());
        let slots = backend.modifier_slot_mapping().unwrap();
        assert!(!slots[0].is_empty());
    }

    #[test]
    #[ignore] // Requires a running X server with XTEST and RECORD
    fn test_synthetic_event_is_captured() {
        let mut backend = X11Backend::connect(None).unwrap();
        let keycode = backend.keysym_to_keycode(0xffe1).unwrap();
        backend.register_event_capture(&[EventKind::Press]).unwrap();
        backend.send_synthetic_event(EventKind::Press, keycode).unwrap();
        backend.send_synthetic_event(EventKind::Release, keycode).unwrap();
        let event = backend.next_event().unwrap().unwrap();
        assert_eq!(event.keycode, keycode);
        backend.deregister_event_capture().unwrap();
    }
}
