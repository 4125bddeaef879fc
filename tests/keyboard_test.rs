//! End-to-end tests over the loopback keyboard
//!
//! Synthetic input goes in through `Keyboard`, comes back out of the
//! loopback capture stream and is decoded by `KeyboardListener`.

use std::time::Duration;

use keysim::backend::{EventKind, InputBackend, LoopbackBackend, LoopbackOp};
use keysim::error::{BackendError, KeysimError};
use keysim::keyboard::{KeyInput, Keyboard, KeypadKey, NamedKey};
use keysim::keysym::{ascii_printable, special};
use keysim::listener::{KeyEvent, KeyboardListener, ListenerState, Modifier};

/// Loopback keyboard with capture already registered, so every synthetic
/// event is queued for the listener
fn capturing_backend() -> LoopbackBackend {
    let mut backend = LoopbackBackend::us_layout();
    backend
        .register_event_capture(&[EventKind::Press, EventKind::Release])
        .unwrap();
    backend
}

fn listen(backend: LoopbackBackend) -> (Vec<KeyEvent>, KeyboardListener<LoopbackBackend>) {
    let mut listener = KeyboardListener::new(backend).unwrap();
    let mut events = Vec::new();
    listener
        .start(|event| {
            events.push(event.clone());
            true
        })
        .unwrap();
    (events, listener)
}

#[test]
fn typed_text_decodes_back() {
    let mut kb = Keyboard::new(capturing_backend());
    let typed = kb
        .type_string("Hello, World!", Duration::ZERO)
        .unwrap();
    assert_eq!(typed, 13);

    let (events, listener) = listen(kb.into_backend());
    let text: String = events
        .iter()
        .filter(|e| e.is_press)
        .filter_map(|e| e.character.as_deref())
        .filter(|c| *c != "Shift_L")
        .collect();
    assert_eq!(text, "Hello, World!");
    assert_eq!(listener.state(), ListenerState::Stopped);
    assert_eq!(listener.modifier_state(Modifier::Shift), Some(false));
}

#[test]
fn escape_ends_listening() {
    let mut kb = Keyboard::new(capturing_backend());
    kb.tap('a').unwrap();
    kb.tap("Escape").unwrap();
    kb.tap('b').unwrap();

    let (events, _) = listen(kb.into_backend());
    let presses: Vec<_> = events
        .iter()
        .filter(|e| e.is_press)
        .map(|e| e.character.as_deref().unwrap_or("?"))
        .collect();
    assert_eq!(presses, vec!["a", "Escape"]);
}

#[test]
fn letters_and_digits_resolve_directly() {
    let kb = Keyboard::new(LoopbackBackend::us_layout());
    for c in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
        let s = c.to_string();
        assert!(
            kb.lookup_character_keycode(&s).is_some(),
            "{:?} did not resolve",
            c
        );
    }
}

#[test]
fn special_characters_resolve_like_their_names() {
    let kb = Keyboard::new(LoopbackBackend::us_layout());
    for (c, name) in special::entries() {
        let by_char = kb.lookup_character_keycode(&c.to_string());
        assert!(by_char.is_some(), "{:?} did not resolve", c);
        assert_eq!(by_char, kb.lookup_character_keycode(name), "{:?}", c);
    }
}

#[test]
fn named_key_aliases() {
    let kb = Keyboard::new(LoopbackBackend::us_layout());
    let alias_pairs = [
        (NamedKey::Enter, NamedKey::Return),
        (NamedKey::WindowsL, NamedKey::SuperL),
        (NamedKey::WindowsR, NamedKey::SuperR),
        (NamedKey::Apps, NamedKey::Menu),
        (NamedKey::PrintScreen, NamedKey::Print),
        (NamedKey::Snapshot, NamedKey::Print),
        (NamedKey::Capital, NamedKey::CapsLock),
        (NamedKey::Shift, NamedKey::ShiftL),
        (NamedKey::Alt, NamedKey::AltL),
        (NamedKey::Control, NamedKey::ControlL),
    ];
    for (alias, key) in alias_pairs {
        assert_eq!(kb.key(alias), kb.key(key), "{} != {}", alias, key);
        assert!(kb.key(key).is_some(), "{} unresolved", key);
    }
    assert_eq!(NamedKey::from_role("enter"), Some(NamedKey::Enter));
    assert_eq!(kb.function_key(12), Some(96));
    assert_eq!(kb.keypad(KeypadKey::Digit(7)), Some(79));
    assert_eq!(kb.function_key(35), None);
}

#[test]
fn unsupported_keys_skip_the_backend() {
    let kb = Keyboard::new(LoopbackBackend::us_layout());
    let before = kb.backend().lookup_count();
    for key in [NamedKey::Kana, NamedKey::Hangul, NamedKey::Kanji, NamedKey::Sleep] {
        assert_eq!(kb.key(key), None);
    }
    assert_eq!(kb.backend().lookup_count(), before);
}

#[test]
fn raw_keycodes_are_forwarded() {
    let mut kb = Keyboard::new(LoopbackBackend::us_layout());
    assert_eq!(kb.tap(KeyInput::Keycode(200)).unwrap(), Some(200));
    assert_eq!(
        kb.backend().sent(),
        &[(EventKind::Press, 200), (EventKind::Release, 200)]
    );
}

#[test]
fn send_failure_reaches_the_caller() {
    let mut backend = LoopbackBackend::us_layout();
    backend.fail_on(LoopbackOp::Send);
    let mut kb = Keyboard::new(backend);
    assert!(matches!(
        kb.press('a'),
        Err(KeysimError::Backend(BackendError::Connection(_)))
    ));
    assert!(matches!(
        kb.tap(KeyInput::Keycode(38)),
        Err(KeysimError::Backend(_))
    ));
    assert!(kb.type_string("abc", Duration::ZERO).is_err());
    assert!(kb.backend().sent().is_empty());
}

#[test]
fn undecodable_keycode_still_delivered() {
    let mut kb = Keyboard::new(capturing_backend());
    kb.tap(KeyInput::Keycode(200)).unwrap();
    let (events, _) = listen(kb.into_backend());
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.keycode == 200 && e.character.is_none()));
}

#[test]
fn caps_lock_is_tracked() {
    let mut kb = Keyboard::new(capturing_backend());
    kb.tap("Caps_Lock").unwrap();
    kb.tap('q').unwrap();
    let (events, listener) = listen(kb.into_backend());
    let q: Vec<_> = events.iter().filter(|e| e.keycode == 24).collect();
    assert_eq!(q[0].character.as_deref(), Some("Q"));
    assert_eq!(listener.modifier_state(Modifier::CapsLock), Some(true));
}

#[test]
fn ascii_printable_table() {
    assert!(!ascii_printable(5));
    assert!(ascii_printable(13));
    assert!(!ascii_printable(20));
    assert!(ascii_printable(65));
    assert!(!ascii_printable(127));
}
