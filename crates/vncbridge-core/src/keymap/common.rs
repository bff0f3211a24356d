//! Layout-independent keysyms: editing, navigation, function, keypad and
//! modifier keys.  These never need a synthesized modifier.

use std::collections::HashMap;

use super::evdev_codes::*;
use super::keysym;
use super::KeyMapping;

const NAMED_KEYS: &[(u32, u16)] = &[
    (keysym::BACKSPACE, KEY_BACKSPACE),
    (keysym::TAB, KEY_TAB),
    (keysym::RETURN, KEY_ENTER),
    (keysym::PAUSE, KEY_PAUSE),
    (keysym::SCROLL_LOCK, KEY_SCROLLLOCK),
    (keysym::SYS_REQ, KEY_SYSRQ),
    (keysym::PRINT, KEY_SYSRQ),
    (keysym::ESCAPE, KEY_ESC),
    (keysym::DELETE, KEY_DELETE),
    (keysym::HOME, KEY_HOME),
    (keysym::LEFT, KEY_LEFT),
    (keysym::UP, KEY_UP),
    (keysym::RIGHT, KEY_RIGHT),
    (keysym::DOWN, KEY_DOWN),
    (keysym::PAGE_UP, KEY_PAGEUP),
    (keysym::PAGE_DOWN, KEY_PAGEDOWN),
    (keysym::END, KEY_END),
    (keysym::INSERT, KEY_INSERT),
    (keysym::MENU, KEY_COMPOSE),
    (keysym::NUM_LOCK, KEY_NUMLOCK),
    (keysym::KP_ENTER, KEY_KPENTER),
    (keysym::KP_MULTIPLY, KEY_KPASTERISK),
    (keysym::KP_ADD, KEY_KPPLUS),
    (keysym::KP_SUBTRACT, KEY_KPMINUS),
    (keysym::KP_DECIMAL, KEY_KPDOT),
    (keysym::KP_DIVIDE, KEY_KPSLASH),
    (keysym::SHIFT_L, KEY_LEFTSHIFT),
    (keysym::SHIFT_R, KEY_RIGHTSHIFT),
    (keysym::CONTROL_L, KEY_LEFTCTRL),
    (keysym::CONTROL_R, KEY_RIGHTCTRL),
    (keysym::CAPS_LOCK, KEY_CAPSLOCK),
    (keysym::META_L, KEY_LEFTMETA),
    (keysym::META_R, KEY_RIGHTMETA),
    (keysym::SUPER_L, KEY_LEFTMETA),
    (keysym::SUPER_R, KEY_RIGHTMETA),
    (keysym::ALT_L, KEY_LEFTALT),
    (keysym::ALT_R, KEY_RIGHTALT),
    (keysym::ISO_LEVEL3_SHIFT, KEY_RIGHTALT),
    (0x0020, KEY_SPACE),
];

const KEYPAD_DIGITS: [u16; 10] = [
    KEY_KP0, KEY_KP1, KEY_KP2, KEY_KP3, KEY_KP4, KEY_KP5, KEY_KP6, KEY_KP7, KEY_KP8, KEY_KP9,
];

/// Adds the layout-independent entries to `table`.
pub(super) fn insert_common(table: &mut HashMap<u32, KeyMapping>) {
    for &(sym, code) in NAMED_KEYS {
        table.insert(sym, KeyMapping::plain(code));
    }
    for (offset, &code) in (0u32..).zip(KEYPAD_DIGITS.iter()) {
        table.insert(keysym::KP_0 + offset, KeyMapping::plain(code));
    }
    // F1..F10 are contiguous in both numbering schemes; F11/F12 are not.
    for offset in 0u16..10 {
        table.insert(keysym::F1 + u32::from(offset), KeyMapping::plain(KEY_F1 + offset));
    }
    table.insert(keysym::F1 + 10, KeyMapping::plain(KEY_F11));
    table.insert(keysym::F1 + 11, KeyMapping::plain(KEY_F12));
}
