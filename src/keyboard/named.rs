//! Named keys
//!
//! Closed catalog of key roles (modifiers, navigation, F1-F35, L1-L10,
//! R1-R15, keypad, misc) and the per-keyboard cache of their keycodes.
//!
//! Some roles are aliases of others (`Enter` is `Return`, `WindowsL` is
//! `SuperL`). Keys with no X11 equivalent (Kana, Hangul, Sleep, ...) are part
//! of the catalog but always resolve to `None` without asking the backend.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::resolver::KeycodeResolver;
use crate::backend::{InputBackend, Keycode};

/// Keypad keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadKey {
    Space,
    Tab,
    Enter,
    F1,
    F2,
    F3,
    F4,
    Home,
    Left,
    Up,
    Right,
    Down,
    Prior,
    PageUp,
    Next,
    PageDown,
    End,
    Begin,
    Insert,
    Delete,
    Equal,
    Multiply,
    Add,
    Separator,
    Subtract,
    Decimal,
    Divide,
    /// Digit 0-9
    Digit(u8),
}

static KP_DIGITS: [&str; 10] = [
    "KP_0", "KP_1", "KP_2", "KP_3", "KP_4", "KP_5", "KP_6", "KP_7", "KP_8", "KP_9",
];

impl KeypadKey {
    /// Every keypad key
    pub fn all() -> impl Iterator<Item = KeypadKey> {
        use KeypadKey::*;
        [
            Space, Tab, Enter, F1, F2, F3, F4, Home, Left, Up, Right, Down, Prior, PageUp, Next,
            PageDown, End, Begin, Insert, Delete, Equal, Multiply, Add, Separator, Subtract,
            Decimal, Divide,
        ]
        .into_iter()
        .chain((0..10).map(Digit))
    }

    /// Keysym name (`KP_...`)
    pub fn keysym_name(self) -> Option<&'static str> {
        use KeypadKey::*;
        Some(match self {
            Space => "KP_Space",
            Tab => "KP_Tab",
            Enter => "KP_Enter",
            F1 => "KP_F1",
            F2 => "KP_F2",
            F3 => "KP_F3",
            F4 => "KP_F4",
            Home => "KP_Home",
            Left => "KP_Left",
            Up => "KP_Up",
            Right => "KP_Right",
            Down => "KP_Down",
            Prior => "KP_Prior",
            PageUp => "KP_Page_Up",
            Next => "KP_Next",
            PageDown => "KP_Page_Down",
            End => "KP_End",
            Begin => "KP_Begin",
            Insert => "KP_Insert",
            Delete => "KP_Delete",
            Equal => "KP_Equal",
            Multiply => "KP_Multiply",
            Add => "KP_Add",
            Separator => "KP_Separator",
            Subtract => "KP_Subtract",
            Decimal => "KP_Decimal",
            Divide => "KP_Divide",
            Digit(n) => return KP_DIGITS.get(n as usize).copied(),
        })
    }
}

/// Key roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    // TTY function keys
    BackSpace,
    Tab,
    Linefeed,
    Clear,
    Return,
    /// Alias of `Return`
    Enter,
    Pause,
    ScrollLock,
    SysReq,
    Escape,
    Delete,

    // Modifiers
    ShiftL,
    ShiftR,
    /// Alias of `ShiftL`
    Shift,
    AltL,
    AltR,
    /// Alias of `AltL`
    Alt,
    ControlL,
    ControlR,
    /// Alias of `ControlL`
    Control,
    CapsLock,
    /// Alias of `CapsLock`
    Capital,
    ShiftLock,
    MetaL,
    MetaR,
    SuperL,
    SuperR,
    /// Alias of `SuperL`
    WindowsL,
    /// Alias of `SuperR`
    WindowsR,
    HyperL,
    HyperR,

    // Cursor control & motion
    Home,
    Up,
    Down,
    Left,
    Right,
    End,
    Begin,
    PageUp,
    PageDown,
    Prior,
    Next,

    // Misc functions
    Select,
    Print,
    /// Alias of `Print`
    PrintScreen,
    /// Alias of `Print`
    Snapshot,
    Execute,
    Insert,
    Undo,
    Redo,
    Menu,
    /// Alias of `Menu`
    Apps,
    Find,
    Cancel,
    Help,
    Break,
    ModeSwitch,
    ScriptSwitch,
    NumLock,

    /// F1-F35
    Function(u8),
    /// L1-L10
    L(u8),
    /// R1-R15
    R(u8),
    Keypad(KeypadKey),

    // No X11 equivalent
    Kana,
    Hangeul,
    Hangul,
    Junja,
    Final,
    Hanja,
    Kanji,
    Convert,
    NonConvert,
    Accept,
    ModeChange,
    Sleep,
}

/// Role names of the fixed (non-numbered) keys
static ROLES: &[(&str, NamedKey)] = &[
    ("backspace", NamedKey::BackSpace),
    ("tab", NamedKey::Tab),
    ("linefeed", NamedKey::Linefeed),
    ("clear", NamedKey::Clear),
    ("return", NamedKey::Return),
    ("enter", NamedKey::Enter),
    ("pause", NamedKey::Pause),
    ("scroll_lock", NamedKey::ScrollLock),
    ("sys_req", NamedKey::SysReq),
    ("escape", NamedKey::Escape),
    ("delete", NamedKey::Delete),
    ("shift_l", NamedKey::ShiftL),
    ("shift_r", NamedKey::ShiftR),
    ("shift", NamedKey::Shift),
    ("alt_l", NamedKey::AltL),
    ("alt_r", NamedKey::AltR),
    ("alt", NamedKey::Alt),
    ("control_l", NamedKey::ControlL),
    ("control_r", NamedKey::ControlR),
    ("control", NamedKey::Control),
    ("caps_lock", NamedKey::CapsLock),
    ("capital", NamedKey::Capital),
    ("shift_lock", NamedKey::ShiftLock),
    ("meta_l", NamedKey::MetaL),
    ("meta_r", NamedKey::MetaR),
    ("super_l", NamedKey::SuperL),
    ("super_r", NamedKey::SuperR),
    ("windows_l", NamedKey::WindowsL),
    ("windows_r", NamedKey::WindowsR),
    ("hyper_l", NamedKey::HyperL),
    ("hyper_r", NamedKey::HyperR),
    ("home", NamedKey::Home),
    ("up", NamedKey::Up),
    ("down", NamedKey::Down),
    ("left", NamedKey::Left),
    ("right", NamedKey::Right),
    ("end", NamedKey::End),
    ("begin", NamedKey::Begin),
    ("page_up", NamedKey::PageUp),
    ("page_down", NamedKey::PageDown),
    ("prior", NamedKey::Prior),
    ("next", NamedKey::Next),
    ("select", NamedKey::Select),
    ("print", NamedKey::Print),
    ("print_screen", NamedKey::PrintScreen),
    ("snapshot", NamedKey::Snapshot),
    ("execute", NamedKey::Execute),
    ("insert", NamedKey::Insert),
    ("undo", NamedKey::Undo),
    ("redo", NamedKey::Redo),
    ("menu", NamedKey::Menu),
    ("apps", NamedKey::Apps),
    ("find", NamedKey::Find),
    ("cancel", NamedKey::Cancel),
    ("help", NamedKey::Help),
    ("break", NamedKey::Break),
    ("mode_switch", NamedKey::ModeSwitch),
    ("script_switch", NamedKey::ScriptSwitch),
    ("num_lock", NamedKey::NumLock),
    ("kana", NamedKey::Kana),
    ("hangeul", NamedKey::Hangeul),
    ("hangul", NamedKey::Hangul),
    ("junja", NamedKey::Junja),
    ("final", NamedKey::Final),
    ("hanja", NamedKey::Hanja),
    ("kanji", NamedKey::Kanji),
    ("convert", NamedKey::Convert),
    ("nonconvert", NamedKey::NonConvert),
    ("accept", NamedKey::Accept),
    ("modechange", NamedKey::ModeChange),
    ("sleep", NamedKey::Sleep),
];

static F_KEYS: [&str; 35] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "F13", "F14",
    "F15", "F16", "F17", "F18", "F19", "F20", "F21", "F22", "F23", "F24", "F25", "F26", "F27",
    "F28", "F29", "F30", "F31", "F32", "F33", "F34", "F35",
];

static L_KEYS: [&str; 10] = ["L1", "L2", "L3", "L4", "L5", "L6", "L7", "L8", "L9", "L10"];

static R_KEYS: [&str; 15] = [
    "R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8", "R9", "R10", "R11", "R12", "R13", "R14",
    "R15",
];

/// Numbered key name, 1-based
fn numbered(names: &'static [&'static str], n: u8) -> Option<&'static str> {
    (n as usize).checked_sub(1).and_then(|i| names.get(i)).copied()
}

impl NamedKey {
    /// The role an alias stands for; non-aliases map to themselves
    pub fn canonical(self) -> NamedKey {
        use NamedKey::*;
        match self {
            Enter => Return,
            Shift => ShiftL,
            Alt => AltL,
            Control => ControlL,
            Capital => CapsLock,
            WindowsL => SuperL,
            WindowsR => SuperR,
            PrintScreen | Snapshot => Print,
            Apps => Menu,
            other => other,
        }
    }

    /// Keys that never exist on X11
    pub fn is_supported(self) -> bool {
        use NamedKey::*;
        !matches!(
            self,
            Kana | Hangeul
                | Hangul
                | Junja
                | Final
                | Hanja
                | Kanji
                | Convert
                | NonConvert
                | Accept
                | ModeChange
                | Sleep
        )
    }

    /// Keysym name the role resolves through, `None` for unsupported or out-of-range keys
    pub fn keysym_name(self) -> Option<&'static str> {
        use NamedKey::*;
        Some(match self.canonical() {
            BackSpace => "BackSpace",
            Tab => "Tab",
            Linefeed => "Linefeed",
            Clear => "Clear",
            Return => "Return",
            Pause => "Pause",
            ScrollLock => "Scroll_Lock",
            SysReq => "Sys_Req",
            Escape => "Escape",
            Delete => "Delete",
            ShiftL => "Shift_L",
            ShiftR => "Shift_R",
            AltL => "Alt_L",
            AltR => "Alt_R",
            ControlL => "Control_L",
            ControlR => "Control_R",
            CapsLock => "Caps_Lock",
            ShiftLock => "Shift_Lock",
            MetaL => "Meta_L",
            MetaR => "Meta_R",
            SuperL => "Super_L",
            SuperR => "Super_R",
            HyperL => "Hyper_L",
            HyperR => "Hyper_R",
            Home => "Home",
            Up => "Up",
            Down => "Down",
            Left => "Left",
            Right => "Right",
            End => "End",
            Begin => "Begin",
            PageUp => "Page_Up",
            PageDown => "Page_Down",
            Prior => "Prior",
            Next => "Next",
            Select => "Select",
            Print => "Print",
            Execute => "Execute",
            Insert => "Insert",
            Undo => "Undo",
            Redo => "Redo",
            Menu => "Menu",
            Find => "Find",
            Cancel => "Cancel",
            Help => "Help",
            Break => "Break",
            ModeSwitch => "Mode_switch",
            ScriptSwitch => "script_switch",
            NumLock => "Num_Lock",
            Function(n) => return numbered(&F_KEYS, n),
            L(n) => return numbered(&L_KEYS, n),
            R(n) => return numbered(&R_KEYS, n),
            Keypad(k) => return k.keysym_name(),
            _ => return None,
        })
    }

    /// Parse a role name: `"escape"`, `"windows_l"`, `"f5"`, `"l3"`, `"r12"`, `"kp_7"`, `"kp_enter"`
    pub fn from_role(role: &str) -> Option<NamedKey> {
        let role = role.to_ascii_lowercase();
        if let Some((_, key)) = ROLES.iter().find(|(name, _)| *name == role) {
            return Some(*key);
        }
        if let Some(rest) = role.strip_prefix("kp_") {
            return KeypadKey::all()
                .find(|k| {
                    k.keysym_name()
                        .map(|n| n["KP_".len()..].eq_ignore_ascii_case(rest))
                        .unwrap_or(false)
                })
                .map(NamedKey::Keypad);
        }
        let mut chars = role.chars();
        let prefix = chars.next()?;
        let n: u8 = chars.as_str().parse().ok()?;
        let key = match prefix {
            'f' => NamedKey::Function(n),
            'l' => NamedKey::L(n),
            'r' => NamedKey::R(n),
            _ => return None,
        };
        key.keysym_name().map(|_| key)
    }

    /// Role name, the inverse of `from_role`
    pub fn role(self) -> String {
        match self {
            NamedKey::Function(n) => format!("f{}", n),
            NamedKey::L(n) => format!("l{}", n),
            NamedKey::R(n) => format!("r{}", n),
            NamedKey::Keypad(k) => match k.keysym_name() {
                Some(name) => name.to_ascii_lowercase(),
                None => "kp_?".to_string(),
            },
            other => ROLES
                .iter()
                .find(|(_, key)| *key == other)
                .map(|(name, _)| name.to_string())
                .unwrap_or_default(),
        }
    }

    /// Every role, aliases included
    pub fn catalog() -> impl Iterator<Item = NamedKey> {
        ROLES
            .iter()
            .map(|(_, key)| *key)
            .chain((1..=35).map(NamedKey::Function))
            .chain((1..=10).map(NamedKey::L))
            .chain((1..=15).map(NamedKey::R))
            .chain(KeypadKey::all().map(NamedKey::Keypad))
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.role())
    }
}

/// Keycodes of every named key, resolved once per keyboard
///
/// Not refreshed on layout changes; build a new one instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedKeys {
    keycodes: HashMap<NamedKey, Option<Keycode>>,
}

impl NamedKeys {
    pub fn resolve<B: InputBackend + ?Sized>(resolver: &KeycodeResolver<'_, B>) -> Self {
        let mut keycodes = HashMap::new();
        for key in NamedKey::catalog() {
            if key.canonical() != key {
                continue;
            }
            if let Some(name) = key.keysym_name() {
                keycodes.insert(key, resolver.resolve(name));
            }
        }
        let found = keycodes.values().filter(|k| k.is_some()).count();
        debug!("Named keys: {} of {} resolved", found, keycodes.len());
        Self { keycodes }
    }

    /// Keycode of a role, following aliases
    pub fn get(&self, key: NamedKey) -> Option<Keycode> {
        let key = key.canonical();
        if !key.is_supported() {
            return None;
        }
        self.keycodes.get(&key).copied().flatten()
    }

    pub fn escape(&self) -> Option<Keycode> {
        self.get(NamedKey::Escape)
    }

    /// Default Shift key (left)
    pub fn shift(&self) -> Option<Keycode> {
        self.get(NamedKey::Shift)
    }

    /// F1-F35
    pub fn function(&self, n: u8) -> Option<Keycode> {
        self.get(NamedKey::Function(n))
    }

    /// L1-L10
    pub fn l(&self, n: u8) -> Option<Keycode> {
        self.get(NamedKey::L(n))
    }

    /// R1-R15
    pub fn r(&self, n: u8) -> Option<Keycode> {
        self.get(NamedKey::R(n))
    }

    pub fn keypad(&self, key: KeypadKey) -> Option<Keycode> {
        self.get(NamedKey::Keypad(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LoopbackBackend;
    use crate::keysym::SymbolTable;

    fn named_keys() -> NamedKeys {
        let symbols = SymbolTable::standard();
        let backend = LoopbackBackend::us_layout();
        NamedKeys::resolve(&KeycodeResolver::new(&symbols, &backend))
    }

    #[test]
    fn test_aliases() {
        let keys = named_keys();
        assert_eq!(keys.get(NamedKey::Enter), keys.get(NamedKey::Return));
        assert_eq!(keys.get(NamedKey::WindowsL), keys.get(NamedKey::SuperL));
        assert_eq!(keys.get(NamedKey::WindowsR), keys.get(NamedKey::SuperR));
        assert_eq!(keys.get(NamedKey::Apps), keys.get(NamedKey::Menu));
        assert_eq!(keys.get(NamedKey::PrintScreen), keys.get(NamedKey::Print));
        assert_eq!(keys.get(NamedKey::Snapshot), keys.get(NamedKey::Print));
        assert_eq!(keys.get(NamedKey::Capital), keys.get(NamedKey::CapsLock));
        assert_eq!(keys.get(NamedKey::Shift), keys.get(NamedKey::ShiftL));
        assert_eq!(keys.get(NamedKey::Alt), keys.get(NamedKey::AltL));
        assert_eq!(keys.get(NamedKey::Control), keys.get(NamedKey::ControlL));
        assert_eq!(keys.get(NamedKey::Enter), Some(36));
    }

    #[test]
    fn test_unsupported_keys_are_absent() {
        let keys = named_keys();
        for key in [NamedKey::Kana, NamedKey::Hangul, NamedKey::Sleep, NamedKey::ModeChange] {
            assert!(!key.is_supported());
            assert_eq!(key.keysym_name(), None);
            assert_eq!(keys.get(key), None);
        }
    }

    #[test]
    fn test_numbered_keys() {
        let keys = named_keys();
        assert_eq!(keys.function(1), Some(67));
        assert_eq!(keys.function(12), Some(96));
        assert_eq!(keys.function(0), None);
        assert_eq!(keys.function(36), None);
        // L1 shares F11's keysym
        assert_eq!(keys.l(1), keys.function(11));
        assert_eq!(keys.keypad(KeypadKey::Digit(7)), Some(79));
        assert_eq!(keys.keypad(KeypadKey::Digit(10)), None);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(NamedKey::from_role("enter"), Some(NamedKey::Enter));
        assert_eq!(NamedKey::from_role("F5"), Some(NamedKey::Function(5)));
        assert_eq!(NamedKey::from_role("l10"), Some(NamedKey::L(10)));
        assert_eq!(NamedKey::from_role("r16"), None);
        assert_eq!(
            NamedKey::from_role("kp_7"),
            Some(NamedKey::Keypad(KeypadKey::Digit(7)))
        );
        assert_eq!(
            NamedKey::from_role("kp_page_up"),
            Some(NamedKey::Keypad(KeypadKey::PageUp))
        );
        assert_eq!(NamedKey::from_role("nope"), None);
        assert_eq!(NamedKey::from_role(""), None);
    }

    #[test]
    fn test_role_round_trip() {
        for key in NamedKey::catalog() {
            assert_eq!(NamedKey::from_role(&key.role()), Some(key), "{:?}", key);
        }
    }
}
