//! Loopback backend
//!
//! An in-process keyboard driven by a `KeyMapping`. Synthetic events are
//! applied to an internal modifier state and, while capture is registered,
//! come back out of `next_event` the way an X server would echo them.
//! Events can also be injected directly to stand in for hardware.
//!
//! `next_event` never blocks: an empty queue ends the capture stream.
//! Individual operations can be switched to fail with `fail_on`.

use std::cell::Cell;
use std::collections::{HashSet, VecDeque};

use log::{debug, info};

use super::{EventKind, InputBackend, KeyMapping, Keycode, ModifierSlots, RawKeyEvent};
use crate::constants::LOCK_KEYSYMS;
use crate::error::BackendError;
use crate::keysym::Keysym;

/// Lock modifier slot index
const LOCK_SLOT: usize = 1;

/// Loopback operations that can be switched to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopbackOp {
    Send,
    NextEvent,
    Register,
    Deregister,
    Grab,
    Release,
}

/// In-process keyboard
pub struct LoopbackBackend {
    mapping: KeyMapping,
    /// Current core modifier mask
    mod_state: u16,
    /// Non-lock modifier keys held down
    held: HashSet<Keycode>,
    /// Kinds being captured, `None` when capture is not registered
    capture: Option<Vec<EventKind>>,
    /// Pending events
    queue: VecDeque<RawKeyEvent>,
    /// Every synthetic event sent, in order
    sent: Vec<(EventKind, Keycode)>,
    grabbed: bool,
    /// keysym → keycode queries answered
    lookups: Cell<usize>,
    failing: HashSet<LoopbackOp>,
}

impl LoopbackBackend {
    pub fn new(mapping: KeyMapping) -> Self {
        info!(
            "Loopback keyboard: keycodes {}-{}, {} keysyms per keycode",
            mapping.min_keycode(),
            mapping.max_keycode(),
            mapping.keysyms_per_keycode()
        );
        Self {
            mapping,
            mod_state: 0,
            held: HashSet::new(),
            capture: None,
            queue: VecDeque::new(),
            sent: Vec::new(),
            grabbed: false,
            lookups: Cell::new(0),
            failing: HashSet::new(),
        }
    }

    /// Loopback keyboard with the built-in US pc105 layout
    pub fn us_layout() -> Self {
        Self::new(us_mapping())
    }

    pub fn mapping(&self) -> &KeyMapping {
        &self.mapping
    }

    /// Queue a hardware key event, stamping it with the current modifier state
    pub fn inject(&mut self, kind: EventKind, keycode: Keycode) {
        let event = RawKeyEvent {
            keycode,
            state: self.mod_state,
            kind,
        };
        self.apply(&event);
        self.queue.push_back(event);
    }

    /// Queue a raw event as-is, without touching the modifier state
    pub fn inject_raw(&mut self, event: RawKeyEvent) {
        self.queue.push_back(event);
    }

    /// Synthetic events sent so far
    pub fn sent(&self) -> &[(EventKind, Keycode)] {
        &self.sent
    }

    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }

    /// Number of keysym → keycode queries answered so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.get()
    }

    pub fn modifier_mask(&self) -> u16 {
        self.mod_state
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Make every later call of `op` fail
    pub fn fail_on(&mut self, op: LoopbackOp) {
        self.failing.insert(op);
    }

    /// Let `op` succeed again
    pub fn recover(&mut self, op: LoopbackOp) {
        self.failing.remove(&op);
    }

    fn check(&self, op: LoopbackOp) -> Result<(), BackendError> {
        if !self.failing.contains(&op) {
            return Ok(());
        }
        Err(match op {
            LoopbackOp::Grab => BackendError::GrabDenied("keyboard already grabbed".into()),
            op => BackendError::Connection(format!("loopback {:?} failed", op)),
        })
    }

    /// Update the modifier mask for a key event
    fn apply(&mut self, event: &RawKeyEvent) {
        let Some(slot) = self.mapping.modifier_slot_of(event.keycode) else {
            return;
        };
        let bit = 1u16 << slot;
        let keysym = self.mapping.keycode_to_keysym(event.keycode, 0);
        let lock = slot == LOCK_SLOT || LOCK_KEYSYMS.contains(&keysym);
        match (event.kind, lock) {
            (EventKind::Press, true) => self.mod_state ^= bit,
            (EventKind::Press, false) => {
                self.held.insert(event.keycode);
                self.mod_state |= bit;
            }
            (EventKind::Release, false) => {
                self.held.remove(&event.keycode);
                let slot_keys = &self.mapping.modifier_slots()[slot];
                if !slot_keys.iter().any(|k| self.held.contains(k)) {
                    self.mod_state &= !bit;
                }
            }
            (EventKind::Release, true) => {}
        }
    }
}

impl InputBackend for LoopbackBackend {
    fn keysym_to_keycode(&self, keysym: Keysym) -> Option<Keycode> {
        self.lookups.set(self.lookups.get() + 1);
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
        self.check(LoopbackOp::Send)?;
        debug!("loopback: {:?} keycode {}", kind, keycode);
        self.sent.push((kind, keycode));
        let event = RawKeyEvent {
            keycode,
            state: self.mod_state,
            kind,
        };
        self.apply(&event);
        if self.capture.is_some() {
            self.queue.push_back(event);
        }
        Ok(())
    }

    fn modifier_slot_mapping(&self) -> Result<ModifierSlots, BackendError> {
        Ok(self.mapping.modifier_slots().clone())
    }

    fn register_event_capture(&mut self, kinds: &[EventKind]) -> Result<(), BackendError> {
        self.check(LoopbackOp::Register)?;
        self.capture = Some(kinds.to_vec());
        Ok(())
    }

    fn next_event(&mut self) -> Result<Option<RawKeyEvent>, BackendError> {
        self.check(LoopbackOp::NextEvent)?;
        let kinds = self
            .capture
            .as_ref()
            .ok_or(BackendError::CaptureNotRegistered)?;
        while let Some(event) = self.queue.pop_front() {
            if kinds.contains(&event.kind) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn deregister_event_capture(&mut self) -> Result<(), BackendError> {
        self.check(LoopbackOp::Deregister)?;
        self.capture = None;
        Ok(())
    }

    fn grab_exclusive_input(&mut self) -> Result<(), BackendError> {
        self.check(LoopbackOp::Grab)?;
        self.grabbed = true;
        Ok(())
    }

    fn release_exclusive_input(&mut self) -> Result<(), BackendError> {
        self.check(LoopbackOp::Release)?;
        self.grabbed = false;
        Ok(())
    }
}

// ============================================================================
// Built-in US layout
// ============================================================================

/// (keycode, level 0, level 1) of a US pc105 keyboard on an X server
#[rustfmt::skip]
static US_KEYS: &[(Keycode, Keysym, Keysym)] = &[
    (9, 0xff1b, 0),             // Escape
    (10, 0x31, 0x21), (11, 0x32, 0x40), (12, 0x33, 0x23), (13, 0x34, 0x24),
    (14, 0x35, 0x25), (15, 0x36, 0x5e), (16, 0x37, 0x26), (17, 0x38, 0x2a),
    (18, 0x39, 0x28), (19, 0x30, 0x29),
    (20, 0x2d, 0x5f), (21, 0x3d, 0x2b),
    (22, 0xff08, 0),            // BackSpace
    (23, 0xff09, 0),            // Tab
    (24, 0x71, 0x51), (25, 0x77, 0x57), (26, 0x65, 0x45), (27, 0x72, 0x52),
    (28, 0x74, 0x54), (29, 0x79, 0x59), (30, 0x75, 0x55), (31, 0x69, 0x49),
    (32, 0x6f, 0x4f), (33, 0x70, 0x50),
    (34, 0x5b, 0x7b), (35, 0x5d, 0x7d),
    (36, 0xff0d, 0),            // Return
    (37, 0xffe3, 0),            // Control_L
    (38, 0x61, 0x41), (39, 0x73, 0x53), (40, 0x64, 0x44), (41, 0x66, 0x46),
    (42, 0x67, 0x47), (43, 0x68, 0x48), (44, 0x6a, 0x4a), (45, 0x6b, 0x4b),
    (46, 0x6c, 0x4c),
    (47, 0x3b, 0x3a), (48, 0x27, 0x22), (49, 0x60, 0x7e),
    (50, 0xffe1, 0),            // Shift_L
    (51, 0x5c, 0x7c),
    (52, 0x7a, 0x5a), (53, 0x78, 0x58), (54, 0x63, 0x43), (55, 0x76, 0x56),
    (56, 0x62, 0x42), (57, 0x6e, 0x4e), (58, 0x6d, 0x4d),
    (59, 0x2c, 0x3c), (60, 0x2e, 0x3e), (61, 0x2f, 0x3f),
    (62, 0xffe2, 0),            // Shift_R
    (63, 0xffaa, 0),            // KP_Multiply
    (64, 0xffe9, 0xffe7),       // Alt_L / Meta_L
    (65, 0x20, 0),              // space
    (66, 0xffe5, 0),            // Caps_Lock
    (67, 0xffbe, 0), (68, 0xffbf, 0), (69, 0xffc0, 0), (70, 0xffc1, 0),
    (71, 0xffc2, 0), (72, 0xffc3, 0), (73, 0xffc4, 0), (74, 0xffc5, 0),
    (75, 0xffc6, 0), (76, 0xffc7, 0),
    (77, 0xff7f, 0),            // Num_Lock
    (78, 0xff14, 0),            // Scroll_Lock
    (79, 0xff95, 0xffb7), (80, 0xff97, 0xffb8), (81, 0xff9a, 0xffb9),
    (82, 0xffad, 0),
    (83, 0xff96, 0xffb4), (84, 0xff9d, 0xffb5), (85, 0xff98, 0xffb6),
    (86, 0xffab, 0),
    (87, 0xff9c, 0xffb1), (88, 0xff99, 0xffb2), (89, 0xff9b, 0xffb3),
    (90, 0xff9e, 0xffb0), (91, 0xff9f, 0xffae),
    (95, 0xffc8, 0), (96, 0xffc9, 0),   // F11, F12
    (104, 0xff8d, 0),           // KP_Enter
    (105, 0xffe4, 0),           // Control_R
    (106, 0xffaf, 0),           // KP_Divide
    (107, 0xff61, 0xff15),      // Print / Sys_Req
    (108, 0xffea, 0xffe8),      // Alt_R / Meta_R
    (110, 0xff50, 0), (111, 0xff52, 0), (112, 0xff55, 0), (113, 0xff51, 0),
    (114, 0xff53, 0), (115, 0xff57, 0), (116, 0xff54, 0), (117, 0xff56, 0),
    (118, 0xff63, 0), (119, 0xffff, 0),
    (127, 0xff13, 0xff6b),      // Pause / Break
    (133, 0xffeb, 0),           // Super_L
    (134, 0xffec, 0),           // Super_R
    (135, 0xff67, 0),           // Menu
];

/// Built-in US pc105 mapping: keycodes 8-255, two levels
pub fn us_mapping() -> KeyMapping {
    const MIN: Keycode = 8;
    const MAX: Keycode = 255;
    let mut keysyms = vec![0; ((MAX - MIN + 1) * 2) as usize];
    for &(keycode, level0, level1) in US_KEYS {
        let row = ((keycode - MIN) * 2) as usize;
        keysyms[row] = level0;
        keysyms[row + 1] = level1;
    }
    let modifiers: ModifierSlots = [
        vec![50, 62],   // Shift
        vec![66],       // Lock
        vec![37, 105],  // Control
        vec![64, 108],  // Mod1: Alt
        vec![77],       // Mod2: Num_Lock
        vec![],         // Mod3
        vec![133, 134], // Mod4: Super
        vec![],         // Mod5
    ];
    KeyMapping::new(MIN, 2, keysyms, modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_mapping_basics() {
        let map = us_mapping();
        assert_eq!(map.keysym_to_keycode(0x61), Some(38));
        assert_eq!(map.keysym_to_keycode(0x41), Some(38));
        assert_eq!(map.keysym_to_keycode(0xff1b), Some(9));
        assert_eq!(map.keycode_to_keysym(10, 1), 0x21);
        assert_eq!(map.max_keycode(), 255);
    }

    #[test]
    fn test_modifier_state_tracking() {
        let mut kb = LoopbackBackend::us_layout();
        kb.inject(EventKind::Press, 50);
        assert_eq!(kb.modifier_mask(), 0x1);
        kb.inject(EventKind::Release, 50);
        assert_eq!(kb.modifier_mask(), 0);

        // Caps_Lock toggles
        kb.inject(EventKind::Press, 66);
        kb.inject(EventKind::Release, 66);
        assert_eq!(kb.modifier_mask(), 0x2);
        kb.inject(EventKind::Press, 66);
        assert_eq!(kb.modifier_mask(), 0);
    }

    #[test]
    fn test_shared_slot_stays_set_while_held() {
        let mut kb = LoopbackBackend::us_layout();
        kb.inject(EventKind::Press, 50);
        kb.inject(EventKind::Press, 62);
        kb.inject(EventKind::Release, 62);
        assert_eq!(kb.modifier_mask(), 0x1);
        kb.inject(EventKind::Release, 50);
        assert_eq!(kb.modifier_mask(), 0);
    }

    #[test]
    fn test_failing_operations() {
        let mut kb = LoopbackBackend::us_layout();
        kb.fail_on(LoopbackOp::Send);
        assert!(matches!(
            kb.send_synthetic_event(EventKind::Press, 38),
            Err(BackendError::Connection(_))
        ));
        assert!(kb.sent().is_empty());
        kb.recover(LoopbackOp::Send);
        kb.send_synthetic_event(EventKind::Press, 38).unwrap();

        kb.fail_on(LoopbackOp::Grab);
        assert!(matches!(kb.grab_exclusive_input(), Err(BackendError::GrabDenied(_))));
        assert!(!kb.is_grabbed());
    }

    #[test]
    fn test_event_state_is_before_event() {
        let mut kb = LoopbackBackend::us_layout();
        kb.register_event_capture(&[EventKind::Press, EventKind::Release])
            .unwrap();
        kb.send_synthetic_event(EventKind::Press, 50).unwrap();
        kb.send_synthetic_event(EventKind::Press, 38).unwrap();
        let shift = kb.next_event().unwrap().unwrap();
        let a = kb.next_event().unwrap().unwrap();
        assert_eq!(shift.state, 0);
        assert_eq!(a.state, 0x1);
        assert!(kb.next_event().unwrap().is_none());
    }

    #[test]
    fn test_capture_filters_kinds() {
        let mut kb = LoopbackBackend::us_layout();
        kb.register_event_capture(&[EventKind::Press]).unwrap();
        kb.send_synthetic_event(EventKind::Press, 38).unwrap();
        kb.send_synthetic_event(EventKind::Release, 38).unwrap();
        assert_eq!(kb.next_event().unwrap().map(|e| e.kind), Some(EventKind::Press));
        assert!(kb.next_event().unwrap().is_none());
    }

    #[test]
    fn test_next_event_requires_capture() {
        let mut kb = LoopbackBackend::us_layout();
        assert!(matches!(
            kb.next_event(),
            Err(BackendError::CaptureNotRegistered)
        ));
    }

    #[test]
    fn test_synthetic_events_not_queued_without_capture() {
        let mut kb = LoopbackBackend::us_layout();
        kb.send_synthetic_event(EventKind::Press, 38).unwrap();
        kb.register_event_capture(&[EventKind::Press]).unwrap();
        assert!(kb.next_event().unwrap().is_none());
        assert_eq!(kb.sent(), &[(EventKind::Press, 38)]);
    }
}
