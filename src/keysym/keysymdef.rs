//! Keysym symbol groups
//!
//! Name/value pairs from X11 keysymdef.h, split into the groups X clients
//! load on demand. Names are listed without the `XK_` prefix.
//! Within a group, the first name listed for a value is its preferred name.

use super::Keysym;

/// A loadable keysym group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolGroup {
    /// TTY function keys, cursor keys, keypad, F/L/R keys, modifiers
    Miscellany,
    /// ISO 8859-1
    Latin1,
    /// ISO 8859-2
    Latin2,
    /// ISO 8859-3
    Latin3,
    /// ISO 8859-4
    Latin4,
    /// ISO 8859-7
    Greek,
}

impl SymbolGroup {
    /// Groups available without an explicit load step
    pub const DEFAULT: [SymbolGroup; 2] = [SymbolGroup::Miscellany, SymbolGroup::Latin1];

    /// Groups loaded explicitly on top of the defaults
    pub const EXTENDED: [SymbolGroup; 4] = [
        SymbolGroup::Latin2,
        SymbolGroup::Latin3,
        SymbolGroup::Latin4,
        SymbolGroup::Greek,
    ];

    /// Group name as used by X client libraries
    pub fn name(self) -> &'static str {
        match self {
            SymbolGroup::Miscellany => "miscellany",
            SymbolGroup::Latin1 => "latin1",
            SymbolGroup::Latin2 => "latin2",
            SymbolGroup::Latin3 => "latin3",
            SymbolGroup::Latin4 => "latin4",
            SymbolGroup::Greek => "greek",
        }
    }

    /// Look up a group by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "miscellany" => Some(SymbolGroup::Miscellany),
            "latin1" => Some(SymbolGroup::Latin1),
            "latin2" => Some(SymbolGroup::Latin2),
            "latin3" => Some(SymbolGroup::Latin3),
            "latin4" => Some(SymbolGroup::Latin4),
            "greek" => Some(SymbolGroup::Greek),
            _ => None,
        }
    }

    /// All `(name, keysym)` pairs of this group
    pub fn symbols(self) -> &'static [(&'static str, Keysym)] {
        match self {
            SymbolGroup::Miscellany => MISCELLANY,
            SymbolGroup::Latin1 => LATIN1,
            SymbolGroup::Latin2 => LATIN2,
            SymbolGroup::Latin3 => LATIN3,
            SymbolGroup::Latin4 => LATIN4,
            SymbolGroup::Greek => GREEK,
        }
    }
}

// ============================================================================
// Miscellany
// ============================================================================

static MISCELLANY: &[(&str, Keysym)] = &[
    // TTY function keys
    ("BackSpace", 0xff08),
    ("Tab", 0xff09),
    ("Linefeed", 0xff0a),
    ("Clear", 0xff0b),
    ("Return", 0xff0d),
    ("Pause", 0xff13),
    ("Scroll_Lock", 0xff14),
    ("Sys_Req", 0xff15),
    ("Escape", 0xff1b),
    ("Delete", 0xffff),
    // International & multi-key character composition
    ("Multi_key", 0xff20),
    ("Codeinput", 0xff37),
    ("SingleCandidate", 0xff3c),
    ("MultipleCandidate", 0xff3d),
    ("PreviousCandidate", 0xff3e),
    // Japanese keyboard support
    ("Kanji", 0xff21),
    ("Muhenkan", 0xff22),
    ("Henkan_Mode", 0xff23),
    ("Henkan", 0xff23),
    ("Romaji", 0xff24),
    ("Hiragana", 0xff25),
    ("Katakana", 0xff26),
    ("Hiragana_Katakana", 0xff27),
    ("Zenkaku", 0xff28),
    ("Hankaku", 0xff29),
    ("Zenkaku_Hankaku", 0xff2a),
    ("Touroku", 0xff2b),
    ("Massyo", 0xff2c),
    ("Kana_Lock", 0xff2d),
    ("Kana_Shift", 0xff2e),
    ("Eisu_Shift", 0xff2f),
    ("Eisu_toggle", 0xff30),
    // Cursor control & motion
    ("Home", 0xff50),
    ("Left", 0xff51),
    ("Up", 0xff52),
    ("Right", 0xff53),
    ("Down", 0xff54),
    ("Prior", 0xff55),
    ("Page_Up", 0xff55),
    ("Next", 0xff56),
    ("Page_Down", 0xff56),
    ("End", 0xff57),
    ("Begin", 0xff58),
    // Misc functions
    ("Select", 0xff60),
    ("Print", 0xff61),
    ("Execute", 0xff62),
    ("Insert", 0xff63),
    ("Undo", 0xff65),
    ("Redo", 0xff66),
    ("Menu", 0xff67),
    ("Find", 0xff68),
    ("Cancel", 0xff69),
    ("Help", 0xff6a),
    ("Break", 0xff6b),
    ("Mode_switch", 0xff7e),
    ("script_switch", 0xff7e),
    ("Num_Lock", 0xff7f),
    // Keypad functions
    ("KP_Space", 0xff80),
    ("KP_Tab", 0xff89),
    ("KP_Enter", 0xff8d),
    ("KP_F1", 0xff91),
    ("KP_F2", 0xff92),
    ("KP_F3", 0xff93),
    ("KP_F4", 0xff94),
    ("KP_Home", 0xff95),
    ("KP_Left", 0xff96),
    ("KP_Up", 0xff97),
    ("KP_Right", 0xff98),
    ("KP_Down", 0xff99),
    ("KP_Prior", 0xff9a),
    ("KP_Page_Up", 0xff9a),
    ("KP_Next", 0xff9b),
    ("KP_Page_Down", 0xff9b),
    ("KP_End", 0xff9c),
    ("KP_Begin", 0xff9d),
    ("KP_Insert", 0xff9e),
    ("KP_Delete", 0xff9f),
    ("KP_Equal", 0xffbd),
    ("KP_Multiply", 0xffaa),
    ("KP_Add", 0xffab),
    ("KP_Separator", 0xffac),
    ("KP_Subtract", 0xffad),
    ("KP_Decimal", 0xffae),
    ("KP_Divide", 0xffaf),
    ("KP_0", 0xffb0),
    ("KP_1", 0xffb1),
    ("KP_2", 0xffb2),
    ("KP_3", 0xffb3),
    ("KP_4", 0xffb4),
    ("KP_5", 0xffb5),
    ("KP_6", 0xffb6),
    ("KP_7", 0xffb7),
    ("KP_8", 0xffb8),
    ("KP_9", 0xffb9),
    // Auxiliary functions (F11..F35 double as L1..L10 and R1..R15)
    ("F1", 0xffbe),
    ("F2", 0xffbf),
    ("F3", 0xffc0),
    ("F4", 0xffc1),
    ("F5", 0xffc2),
    ("F6", 0xffc3),
    ("F7", 0xffc4),
    ("F8", 0xffc5),
    ("F9", 0xffc6),
    ("F10", 0xffc7),
    ("F11", 0xffc8),
    ("L1", 0xffc8),
    ("F12", 0xffc9),
    ("L2", 0xffc9),
    ("F13", 0xffca),
    ("L3", 0xffca),
    ("F14", 0xffcb),
    ("L4", 0xffcb),
    ("F15", 0xffcc),
    ("L5", 0xffcc),
    ("F16", 0xffcd),
    ("L6", 0xffcd),
    ("F17", 0xffce),
    ("L7", 0xffce),
    ("F18", 0xffcf),
    ("L8", 0xffcf),
    ("F19", 0xffd0),
    ("L9", 0xffd0),
    ("F20", 0xffd1),
    ("L10", 0xffd1),
    ("F21", 0xffd2),
    ("R1", 0xffd2),
    ("F22", 0xffd3),
    ("R2", 0xffd3),
    ("F23", 0xffd4),
    ("R3", 0xffd4),
    ("F24", 0xffd5),
    ("R4", 0xffd5),
    ("F25", 0xffd6),
    ("R5", 0xffd6),
    ("F26", 0xffd7),
    ("R6", 0xffd7),
    ("F27", 0xffd8),
    ("R7", 0xffd8),
    ("F28", 0xffd9),
    ("R8", 0xffd9),
    ("F29", 0xffda),
    ("R9", 0xffda),
    ("F30", 0xffdb),
    ("R10", 0xffdb),
    ("F31", 0xffdc),
    ("R11", 0xffdc),
    ("F32", 0xffdd),
    ("R12", 0xffdd),
    ("F33", 0xffde),
    ("R13", 0xffde),
    ("F34", 0xffdf),
    ("R14", 0xffdf),
    ("F35", 0xffe0),
    ("R15", 0xffe0),
    // Modifiers
    ("Shift_L", 0xffe1),
    ("Shift_R", 0xffe2),
    ("Control_L", 0xffe3),
    ("Control_R", 0xffe4),
    ("Caps_Lock", 0xffe5),
    ("Shift_Lock", 0xffe6),
    ("Meta_L", 0xffe7),
    ("Meta_R", 0xffe8),
    ("Alt_L", 0xffe9),
    ("Alt_R", 0xffea),
    ("Super_L", 0xffeb),
    ("Super_R", 0xffec),
    ("Hyper_L", 0xffed),
    ("Hyper_R", 0xffee),
];

// ============================================================================
// Latin-1
// ============================================================================

static LATIN1: &[(&str, Keysym)] = &[
    ("space", 0x020),
    ("exclam", 0x021),
    ("quotedbl", 0x022),
    ("numbersign", 0x023),
    ("dollar", 0x024),
    ("percent", 0x025),
    ("ampersand", 0x026),
    ("apostrophe", 0x027),
    ("quoteright", 0x027),
    ("parenleft", 0x028),
    ("parenright", 0x029),
    ("asterisk", 0x02a),
    ("plus", 0x02b),
    ("comma", 0x02c),
    ("minus", 0x02d),
    ("period", 0x02e),
    ("slash", 0x02f),
    ("0", 0x030), ("1", 0x031), ("2", 0x032), ("3", 0x033), ("4", 0x034),
    ("5", 0x035), ("6", 0x036), ("7", 0x037), ("8", 0x038), ("9", 0x039),
    ("colon", 0x03a),
    ("semicolon", 0x03b),
    ("less", 0x03c),
    ("equal", 0x03d),
    ("greater", 0x03e),
    ("question", 0x03f),
    ("at", 0x040),
    ("A", 0x041), ("B", 0x042), ("C", 0x043), ("D", 0x044), ("E", 0x045),
    ("F", 0x046), ("G", 0x047), ("H", 0x048), ("I", 0x049), ("J", 0x04a),
    ("K", 0x04b), ("L", 0x04c), ("M", 0x04d), ("N", 0x04e), ("O", 0x04f),
    ("P", 0x050), ("Q", 0x051), ("R", 0x052), ("S", 0x053), ("T", 0x054),
    ("U", 0x055), ("V", 0x056), ("W", 0x057), ("X", 0x058), ("Y", 0x059),
    ("Z", 0x05a),
    ("bracketleft", 0x05b),
    ("backslash", 0x05c),
    ("bracketright", 0x05d),
    ("asciicircum", 0x05e),
    ("underscore", 0x05f),
    ("grave", 0x060),
    ("quoteleft", 0x060),
    ("a", 0x061), ("b", 0x062), ("c", 0x063), ("d", 0x064), ("e", 0x065),
    ("f", 0x066), ("g", 0x067), ("h", 0x068), ("i", 0x069), ("j", 0x06a),
    ("k", 0x06b), ("l", 0x06c), ("m", 0x06d), ("n", 0x06e), ("o", 0x06f),
    ("p", 0x070), ("q", 0x071), ("r", 0x072), ("s", 0x073), ("t", 0x074),
    ("u", 0x075), ("v", 0x076), ("w", 0x077), ("x", 0x078), ("y", 0x079),
    ("z", 0x07a),
    ("braceleft", 0x07b),
    ("bar", 0x07c),
    ("braceright", 0x07d),
    ("asciitilde", 0x07e),
    ("nobreakspace", 0x0a0),
    ("exclamdown", 0x0a1),
    ("cent", 0x0a2),
    ("sterling", 0x0a3),
    ("currency", 0x0a4),
    ("yen", 0x0a5),
    ("brokenbar", 0x0a6),
    ("section", 0x0a7),
    ("diaeresis", 0x0a8),
    ("copyright", 0x0a9),
    ("ordfeminine", 0x0aa),
    ("guillemotleft", 0x0ab),
    ("notsign", 0x0ac),
    ("hyphen", 0x0ad),
    ("registered", 0x0ae),
    ("macron", 0x0af),
    ("degree", 0x0b0),
    ("plusminus", 0x0b1),
    ("twosuperior", 0x0b2),
    ("threesuperior", 0x0b3),
    ("acute", 0x0b4),
    ("mu", 0x0b5),
    ("paragraph", 0x0b6),
    ("periodcentered", 0x0b7),
    ("cedilla", 0x0b8),
    ("onesuperior", 0x0b9),
    ("masculine", 0x0ba),
    ("guillemotright", 0x0bb),
    ("onequarter", 0x0bc),
    ("onehalf", 0x0bd),
    ("threequarters", 0x0be),
    ("questiondown", 0x0bf),
    ("Agrave", 0x0c0),
    ("Aacute", 0x0c1),
    ("Acircumflex", 0x0c2),
    ("Atilde", 0x0c3),
    ("Adiaeresis", 0x0c4),
    ("Aring", 0x0c5),
    ("AE", 0x0c6),
    ("Ccedilla", 0x0c7),
    ("Egrave", 0x0c8),
    ("Eacute", 0x0c9),
    ("Ecircumflex", 0x0ca),
    ("Ediaeresis", 0x0cb),
    ("Igrave", 0x0cc),
    ("Iacute", 0x0cd),
    ("Icircumflex", 0x0ce),
    ("Idiaeresis", 0x0cf),
    ("ETH", 0x0d0),
    ("Eth", 0x0d0),
    ("Ntilde", 0x0d1),
    ("Ograve", 0x0d2),
    ("Oacute", 0x0d3),
    ("Ocircumflex", 0x0d4),
    ("Otilde", 0x0d5),
    ("Odiaeresis", 0x0d6),
    ("multiply", 0x0d7),
    ("Ooblique", 0x0d8),
    ("Oslash", 0x0d8),
    ("Ugrave", 0x0d9),
    ("Uacute", 0x0da),
    ("Ucircumflex", 0x0db),
    ("Udiaeresis", 0x0dc),
    ("Yacute", 0x0dd),
    ("THORN", 0x0de),
    ("Thorn", 0x0de),
    ("ssharp", 0x0df),
    ("agrave", 0x0e0),
    ("aacute", 0x0e1),
    ("acircumflex", 0x0e2),
    ("atilde", 0x0e3),
    ("adiaeresis", 0x0e4),
    ("aring", 0x0e5),
    ("ae", 0x0e6),
    ("ccedilla", 0x0e7),
    ("egrave", 0x0e8),
    ("eacute", 0x0e9),
    ("ecircumflex", 0x0ea),
    ("ediaeresis", 0x0eb),
    ("igrave", 0x0ec),
    ("iacute", 0x0ed),
    ("icircumflex", 0x0ee),
    ("idiaeresis", 0x0ef),
    ("eth", 0x0f0),
    ("ntilde", 0x0f1),
    ("ograve", 0x0f2),
    ("oacute", 0x0f3),
    ("ocircumflex", 0x0f4),
    ("otilde", 0x0f5),
    ("odiaeresis", 0x0f6),
    ("division", 0x0f7),
    ("oslash", 0x0f8),
    ("ooblique", 0x0f8),
    ("ugrave", 0x0f9),
    ("uacute", 0x0fa),
    ("ucircumflex", 0x0fb),
    ("udiaeresis", 0x0fc),
    ("yacute", 0x0fd),
    ("thorn", 0x0fe),
    ("ydiaeresis", 0x0ff),
];

// ============================================================================
// Latin-2
// ============================================================================

static LATIN2: &[(&str, Keysym)] = &[
    ("Aogonek", 0x1a1),
    ("breve", 0x1a2),
    ("Lstroke", 0x1a3),
    ("Lcaron", 0x1a5),
    ("Sacute", 0x1a6),
    ("Scaron", 0x1a9),
    ("Scedilla", 0x1aa),
    ("Tcaron", 0x1ab),
    ("Zacute", 0x1ac),
    ("Zcaron", 0x1ae),
    ("Zabovedot", 0x1af),
    ("aogonek", 0x1b1),
    ("ogonek", 0x1b2),
    ("lstroke", 0x1b3),
    ("lcaron", 0x1b5),
    ("sacute", 0x1b6),
    ("caron", 0x1b7),
    ("scaron", 0x1b9),
    ("scedilla", 0x1ba),
    ("tcaron", 0x1bb),
    ("zacute", 0x1bc),
    ("doubleacute", 0x1bd),
    ("zcaron", 0x1be),
    ("zabovedot", 0x1bf),
    ("Racute", 0x1c0),
    ("Abreve", 0x1c3),
    ("Lacute", 0x1c5),
    ("Cacute", 0x1c6),
    ("Ccaron", 0x1c8),
    ("Eogonek", 0x1ca),
    ("Ecaron", 0x1cc),
    ("Dcaron", 0x1cf),
    ("Dstroke", 0x1d0),
    ("Nacute", 0x1d1),
    ("Ncaron", 0x1d2),
    ("Odoubleacute", 0x1d5),
    ("Rcaron", 0x1d8),
    ("Uring", 0x1d9),
    ("Udoubleacute", 0x1db),
    ("Tcedilla", 0x1de),
    ("racute", 0x1e0),
    ("abreve", 0x1e3),
    ("lacute", 0x1e5),
    ("cacute", 0x1e6),
    ("ccaron", 0x1e8),
    ("eogonek", 0x1ea),
    ("ecaron", 0x1ec),
    ("dcaron", 0x1ef),
    ("dstroke", 0x1f0),
    ("nacute", 0x1f1),
    ("ncaron", 0x1f2),
    ("odoubleacute", 0x1f5),
    ("rcaron", 0x1f8),
    ("uring", 0x1f9),
    ("udoubleacute", 0x1fb),
    ("tcedilla", 0x1fe),
    ("abovedot", 0x1ff),
];

// ============================================================================
// Latin-3
// ============================================================================

static LATIN3: &[(&str, Keysym)] = &[
    ("Hstroke", 0x2a1),
    ("Hcircumflex", 0x2a6),
    ("Iabovedot", 0x2a9),
    ("Gbreve", 0x2ab),
    ("Jcircumflex", 0x2ac),
    ("hstroke", 0x2b1),
    ("hcircumflex", 0x2b6),
    ("idotless", 0x2b9),
    ("gbreve", 0x2bb),
    ("jcircumflex", 0x2bc),
    ("Cabovedot", 0x2c5),
    ("Ccircumflex", 0x2c6),
    ("Gabovedot", 0x2d5),
    ("Gcircumflex", 0x2d8),
    ("Ubreve", 0x2dd),
    ("Scircumflex", 0x2de),
    ("cabovedot", 0x2e5),
    ("ccircumflex", 0x2e6),
    ("gabovedot", 0x2f5),
    ("gcircumflex", 0x2f8),
    ("ubreve", 0x2fd),
    ("scircumflex", 0x2fe),
];

// ============================================================================
// Latin-4
// ============================================================================

static LATIN4: &[(&str, Keysym)] = &[
    ("kra", 0x3a2),
    ("kappa", 0x3a2),
    ("Rcedilla", 0x3a3),
    ("Itilde", 0x3a5),
    ("Lcedilla", 0x3a6),
    ("Emacron", 0x3aa),
    ("Gcedilla", 0x3ab),
    ("Tslash", 0x3ac),
    ("rcedilla", 0x3b3),
    ("itilde", 0x3b5),
    ("lcedilla", 0x3b6),
    ("emacron", 0x3ba),
    ("gcedilla", 0x3bb),
    ("tslash", 0x3bc),
    ("ENG", 0x3bd),
    ("eng", 0x3bf),
    ("Amacron", 0x3c0),
    ("Iogonek", 0x3c7),
    ("Eabovedot", 0x3cc),
    ("Imacron", 0x3cf),
    ("Ncedilla", 0x3d1),
    ("Omacron", 0x3d2),
    ("Kcedilla", 0x3d3),
    ("Uogonek", 0x3d9),
    ("Utilde", 0x3dd),
    ("Umacron", 0x3de),
    ("amacron", 0x3e0),
    ("iogonek", 0x3e7),
    ("eabovedot", 0x3ec),
    ("imacron", 0x3ef),
    ("ncedilla", 0x3f1),
    ("omacron", 0x3f2),
    ("kcedilla", 0x3f3),
    ("uogonek", 0x3f9),
    ("utilde", 0x3fd),
    ("umacron", 0x3fe),
];

// ============================================================================
// Greek
// ============================================================================

static GREEK: &[(&str, Keysym)] = &[
    ("Greek_ALPHAaccent", 0x7a1),
    ("Greek_EPSILONaccent", 0x7a2),
    ("Greek_ETAaccent", 0x7a3),
    ("Greek_IOTAaccent", 0x7a4),
    ("Greek_IOTAdieresis", 0x7a5),
    ("Greek_OMICRONaccent", 0x7a7),
    ("Greek_UPSILONaccent", 0x7a8),
    ("Greek_UPSILONdieresis", 0x7a9),
    ("Greek_OMEGAaccent", 0x7ab),
    ("Greek_accentdieresis", 0x7ae),
    ("Greek_horizbar", 0x7af),
    ("Greek_alphaaccent", 0x7b1),
    ("Greek_epsilonaccent", 0x7b2),
    ("Greek_etaaccent", 0x7b3),
    ("Greek_iotaaccent", 0x7b4),
    ("Greek_iotadieresis", 0x7b5),
    ("Greek_iotaaccentdieresis", 0x7b6),
    ("Greek_omicronaccent", 0x7b7),
    ("Greek_upsilonaccent", 0x7b8),
    ("Greek_upsilondieresis", 0x7b9),
    ("Greek_upsilonaccentdieresis", 0x7ba),
    ("Greek_omegaaccent", 0x7bb),
    ("Greek_ALPHA", 0x7c1),
    ("Greek_BETA", 0x7c2),
    ("Greek_GAMMA", 0x7c3),
    ("Greek_DELTA", 0x7c4),
    ("Greek_EPSILON", 0x7c5),
    ("Greek_ZETA", 0x7c6),
    ("Greek_ETA", 0x7c7),
    ("Greek_THETA", 0x7c8),
    ("Greek_IOTA", 0x7c9),
    ("Greek_KAPPA", 0x7ca),
    ("Greek_LAMDA", 0x7cb),
    ("Greek_LAMBDA", 0x7cb),
    ("Greek_MU", 0x7cc),
    ("Greek_NU", 0x7cd),
    ("Greek_XI", 0x7ce),
    ("Greek_OMICRON", 0x7cf),
    ("Greek_PI", 0x7d0),
    ("Greek_RHO", 0x7d1),
    ("Greek_SIGMA", 0x7d2),
    ("Greek_TAU", 0x7d4),
    ("Greek_UPSILON", 0x7d5),
    ("Greek_PHI", 0x7d6),
    ("Greek_CHI", 0x7d7),
    ("Greek_PSI", 0x7d8),
    ("Greek_OMEGA", 0x7d9),
    ("Greek_alpha", 0x7e1),
    ("Greek_beta", 0x7e2),
    ("Greek_gamma", 0x7e3),
    ("Greek_delta", 0x7e4),
    ("Greek_epsilon", 0x7e5),
    ("Greek_zeta", 0x7e6),
    ("Greek_eta", 0x7e7),
    ("Greek_theta", 0x7e8),
    ("Greek_iota", 0x7e9),
    ("Greek_kappa", 0x7ea),
    ("Greek_lamda", 0x7eb),
    ("Greek_lambda", 0x7eb),
    ("Greek_mu", 0x7ec),
    ("Greek_nu", 0x7ed),
    ("Greek_xi", 0x7ee),
    ("Greek_omicron", 0x7ef),
    ("Greek_pi", 0x7f0),
    ("Greek_rho", 0x7f1),
    ("Greek_sigma", 0x7f2),
    ("Greek_finalsmallsigma", 0x7f3),
    ("Greek_tau", 0x7f4),
    ("Greek_upsilon", 0x7f5),
    ("Greek_phi", 0x7f6),
    ("Greek_chi", 0x7f7),
    ("Greek_psi", 0x7f8),
    ("Greek_omega", 0x7f9),
    ("Greek_switch", 0xff7e),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_group_names_round_trip() {
        for group in SymbolGroup::DEFAULT.iter().chain(SymbolGroup::EXTENDED.iter()) {
            assert_eq!(SymbolGroup::from_name(group.name()), Some(*group));
        }
        assert_eq!(SymbolGroup::from_name("cyrillic"), None);
    }

    #[test]
    fn test_names_unique_within_group() {
        for group in SymbolGroup::DEFAULT.iter().chain(SymbolGroup::EXTENDED.iter()) {
            let mut seen = HashSet::new();
            for (name, _) in group.symbols() {
                assert!(seen.insert(*name), "duplicate {} in {}", name, group.name());
            }
        }
    }

    #[test]
    fn test_function_key_range() {
        let f = |name: &str| {
            MISCELLANY
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, k)| *k)
        };
        assert_eq!(f("F1"), Some(0xffbe));
        assert_eq!(f("F35"), Some(0xffe0));
        assert_eq!(f("L1"), f("F11"));
        assert_eq!(f("R15"), f("F35"));
    }
}
