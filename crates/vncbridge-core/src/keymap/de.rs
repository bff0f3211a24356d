//! German (QWERTZ, ISO) layout.
//!
//! Y and Z swap positions relative to US, the umlauts sit on the US
//! punctuation keys, and a number of ASCII symbols move to the AltGr level.

use std::collections::HashMap;

use super::evdev_codes::*;
use super::keysym;
use super::us::{insert_letters, DIGITS, QWERTY_LETTERS};
use super::KeyMapping;

/// Keysym → mapping entries specific to the German layout.
const SYMBOLS: &[(u32, KeyMapping)] = &[
    // Digit row
    (keysym::DEAD_CIRCUMFLEX, KeyMapping::plain(KEY_GRAVE)),
    ('^' as u32, KeyMapping::plain(KEY_GRAVE)),
    (keysym::DEGREE, KeyMapping::shifted(KEY_GRAVE)),
    ('!' as u32, KeyMapping::shifted(KEY_1)),
    ('"' as u32, KeyMapping::shifted(KEY_2)),
    (keysym::TWO_SUPERIOR, KeyMapping::altgr(KEY_2)),
    (keysym::SECTION, KeyMapping::shifted(KEY_3)),
    (keysym::THREE_SUPERIOR, KeyMapping::altgr(KEY_3)),
    ('$' as u32, KeyMapping::shifted(KEY_4)),
    ('%' as u32, KeyMapping::shifted(KEY_5)),
    ('&' as u32, KeyMapping::shifted(KEY_6)),
    ('/' as u32, KeyMapping::shifted(KEY_7)),
    ('{' as u32, KeyMapping::altgr(KEY_7)),
    ('(' as u32, KeyMapping::shifted(KEY_8)),
    ('[' as u32, KeyMapping::altgr(KEY_8)),
    (')' as u32, KeyMapping::shifted(KEY_9)),
    (']' as u32, KeyMapping::altgr(KEY_9)),
    ('=' as u32, KeyMapping::shifted(KEY_0)),
    ('}' as u32, KeyMapping::altgr(KEY_0)),
    (keysym::SSHARP, KeyMapping::plain(KEY_MINUS)),
    ('?' as u32, KeyMapping::shifted(KEY_MINUS)),
    ('\\' as u32, KeyMapping::altgr(KEY_MINUS)),
    (keysym::DEAD_ACUTE, KeyMapping::plain(KEY_EQUAL)),
    (keysym::ACUTE, KeyMapping::plain(KEY_EQUAL)),
    (keysym::DEAD_GRAVE, KeyMapping::shifted(KEY_EQUAL)),
    ('`' as u32, KeyMapping::shifted(KEY_EQUAL)),
    // Top letter row
    ('@' as u32, KeyMapping::altgr(KEY_Q)),
    (keysym::EURO_SIGN, KeyMapping::altgr(KEY_E)),
    (keysym::U_DIAERESIS, KeyMapping::plain(KEY_LEFTBRACE)),
    (keysym::U_DIAERESIS_UPPER, KeyMapping::shifted(KEY_LEFTBRACE)),
    ('+' as u32, KeyMapping::plain(KEY_RIGHTBRACE)),
    ('*' as u32, KeyMapping::shifted(KEY_RIGHTBRACE)),
    ('~' as u32, KeyMapping::altgr(KEY_RIGHTBRACE)),
    // Home row
    (keysym::O_DIAERESIS, KeyMapping::plain(KEY_SEMICOLON)),
    (keysym::O_DIAERESIS_UPPER, KeyMapping::shifted(KEY_SEMICOLON)),
    (keysym::A_DIAERESIS, KeyMapping::plain(KEY_APOSTROPHE)),
    (keysym::A_DIAERESIS_UPPER, KeyMapping::shifted(KEY_APOSTROPHE)),
    ('#' as u32, KeyMapping::plain(KEY_BACKSLASH)),
    ('\'' as u32, KeyMapping::shifted(KEY_BACKSLASH)),
    // Bottom row
    ('<' as u32, KeyMapping::plain(KEY_102ND)),
    ('>' as u32, KeyMapping::shifted(KEY_102ND)),
    ('|' as u32, KeyMapping::altgr(KEY_102ND)),
    (keysym::MU, KeyMapping::altgr(KEY_M)),
    (',' as u32, KeyMapping::plain(KEY_COMMA)),
    (';' as u32, KeyMapping::shifted(KEY_COMMA)),
    ('.' as u32, KeyMapping::plain(KEY_DOT)),
    (':' as u32, KeyMapping::shifted(KEY_DOT)),
    ('-' as u32, KeyMapping::plain(KEY_SLASH)),
    ('_' as u32, KeyMapping::shifted(KEY_SLASH)),
];

pub(super) fn insert_layout(table: &mut HashMap<u32, KeyMapping>) {
    let mut letters = QWERTY_LETTERS;
    letters.swap(usize::from(b'y' - b'a'), usize::from(b'z' - b'a'));
    insert_letters(table, &letters);

    for (offset, &code) in (0u32..).zip(DIGITS.iter()) {
        table.insert(u32::from('0') + offset, KeyMapping::plain(code));
    }
    for &(sym, mapping) in SYMBOLS {
        table.insert(sym, mapping);
    }
}
