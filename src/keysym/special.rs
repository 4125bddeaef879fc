//! Special characters
//!
//! Printable characters whose keysym name is not the character itself.
//! Used as a fallback when a character has no keysym under its own spelling.

/// Character → keysym name
static SPECIAL_CHARACTERS: &[(char, &str)] = &[
    (' ', "space"),
    ('\t', "Tab"),
    // Typing a newline means pressing Return, not Linefeed
    ('\n', "Return"),
    ('\r', "Return"),
    ('\u{1b}', "Escape"),
    ('!', "exclam"),
    ('#', "numbersign"),
    ('%', "percent"),
    ('$', "dollar"),
    ('&', "ampersand"),
    ('"', "quotedbl"),
    ('\'', "apostrophe"),
    ('(', "parenleft"),
    (')', "parenright"),
    ('*', "asterisk"),
    ('=', "equal"),
    ('+', "plus"),
    (',', "comma"),
    ('-', "minus"),
    ('.', "period"),
    ('/', "slash"),
    (':', "colon"),
    (';', "semicolon"),
    ('<', "less"),
    ('>', "greater"),
    ('?', "question"),
    ('@', "at"),
    ('[', "bracketleft"),
    (']', "bracketright"),
    ('\\', "backslash"),
    ('^', "asciicircum"),
    ('_', "underscore"),
    ('`', "grave"),
    ('{', "braceleft"),
    ('|', "bar"),
    ('}', "braceright"),
    ('~', "asciitilde"),
];

/// Keysym name for a special character
pub fn keysym_name(c: char) -> Option<&'static str> {
    SPECIAL_CHARACTERS
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, name)| *name)
}

/// Keysym name for a single-character string
pub fn keysym_name_for_str(s: &str) -> Option<&'static str> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => keysym_name(c),
        _ => None,
    }
}

/// Every special character with its keysym name
pub fn entries() -> impl Iterator<Item = (char, &'static str)> {
    SPECIAL_CHARACTERS.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(keysym_name('#'), Some("numbersign"));
        assert_eq!(keysym_name('\n'), Some("Return"));
        assert_eq!(keysym_name('a'), None);
    }

    #[test]
    fn test_lookup_str_requires_single_char() {
        assert_eq!(keysym_name_for_str(" "), Some("space"));
        assert_eq!(keysym_name_for_str("##"), None);
        assert_eq!(keysym_name_for_str(""), None);
    }
}
