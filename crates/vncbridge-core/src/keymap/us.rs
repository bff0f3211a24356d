//! US ANSI (QWERTY) layout.  No symbol on this layout needs AltGr.

use std::collections::HashMap;

use super::evdev_codes::*;
use super::KeyMapping;

/// Letter key codes in alphabetical order.
pub(super) const QWERTY_LETTERS: [u16; 26] = [
    KEY_A, KEY_B, KEY_C, KEY_D, KEY_E, KEY_F, KEY_G, KEY_H, KEY_I, KEY_J, KEY_K, KEY_L, KEY_M,
    KEY_N, KEY_O, KEY_P, KEY_Q, KEY_R, KEY_S, KEY_T, KEY_U, KEY_V, KEY_W, KEY_X, KEY_Y, KEY_Z,
];

/// Digit row key codes for '0'..='9'.
pub(super) const DIGITS: [u16; 10] = [
    KEY_0, KEY_1, KEY_2, KEY_3, KEY_4, KEY_5, KEY_6, KEY_7, KEY_8, KEY_9,
];

/// (unshifted, shifted, key) triples for the US punctuation keys.
const PUNCTUATION: &[(char, char, u16)] = &[
    ('1', '!', KEY_1),
    ('2', '@', KEY_2),
    ('3', '#', KEY_3),
    ('4', '$', KEY_4),
    ('5', '%', KEY_5),
    ('6', '^', KEY_6),
    ('7', '&', KEY_7),
    ('8', '*', KEY_8),
    ('9', '(', KEY_9),
    ('0', ')', KEY_0),
    ('-', '_', KEY_MINUS),
    ('=', '+', KEY_EQUAL),
    ('[', '{', KEY_LEFTBRACE),
    (']', '}', KEY_RIGHTBRACE),
    ('\\', '|', KEY_BACKSLASH),
    (';', ':', KEY_SEMICOLON),
    ('\'', '"', KEY_APOSTROPHE),
    ('`', '~', KEY_GRAVE),
    (',', '<', KEY_COMMA),
    ('.', '>', KEY_DOT),
    ('/', '?', KEY_SLASH),
];

/// Inserts letters: lowercase plain, uppercase with Shift.
pub(super) fn insert_letters(table: &mut HashMap<u32, KeyMapping>, letters: &[u16; 26]) {
    for (offset, &code) in (0u32..).zip(letters.iter()) {
        table.insert(u32::from('a') + offset, KeyMapping::plain(code));
        table.insert(u32::from('A') + offset, KeyMapping::shifted(code));
    }
}

pub(super) fn insert_layout(table: &mut HashMap<u32, KeyMapping>) {
    insert_letters(table, &QWERTY_LETTERS);
    for &(plain, shifted, code) in PUNCTUATION {
        table.insert(u32::from(plain), KeyMapping::plain(code));
        table.insert(u32::from(shifted), KeyMapping::shifted(code));
    }
}
