//! KeySym → Linux key code translation tables.
//!
//! A remote viewer sends *what it typed* as an X11 KeySym (the letter `A`,
//! the `@` sign, `Return`).  A virtual input device only understands *which
//! physical key* went down.  A [`Keymap`] bridges the two for one keyboard
//! layout: every keysym resolves to a [`KeyMapping`] naming the physical key
//! plus the modifiers that must be held to produce that symbol.
//!
//! | KeySym | Layout | Key       | Shift | AltGr |
//! |--------|--------|-----------|-------|-------|
//! | `a`    | us     | `KEY_A`   | no    | no    |
//! | `A`    | us     | `KEY_A`   | yes   | no    |
//! | `@`    | us     | `KEY_2`   | yes   | no    |
//! | `@`    | de     | `KEY_Q`   | no    | yes   |
//!
//! A table is built once per process and never mutated afterwards; share it
//! with `Arc<Keymap>`.

mod common;
mod de;
pub mod evdev_codes;
pub mod keysym;
mod us;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Physical key plus the modifiers needed to produce a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyMapping {
    /// Linux input key code (`KEY_*`).
    pub scancode: u16,
    /// Shift must be held while `scancode` is pressed.
    pub needs_shift: bool,
    /// AltGr (ISO level 3) must be held while `scancode` is pressed.
    pub needs_altgr: bool,
}

impl KeyMapping {
    pub const fn plain(scancode: u16) -> Self {
        Self {
            scancode,
            needs_shift: false,
            needs_altgr: false,
        }
    }

    pub const fn shifted(scancode: u16) -> Self {
        Self {
            scancode,
            needs_shift: true,
            needs_altgr: false,
        }
    }

    pub const fn altgr(scancode: u16) -> Self {
        Self {
            scancode,
            needs_shift: false,
            needs_altgr: true,
        }
    }

    /// Modifier key codes to hold, in press order (Shift before AltGr).
    pub fn modifiers(&self) -> impl Iterator<Item = u16> {
        let shift = self.needs_shift.then_some(evdev_codes::SHIFT_MODIFIER);
        let altgr = self.needs_altgr.then_some(evdev_codes::ALTGR_MODIFIER);
        shift.into_iter().chain(altgr)
    }
}

/// Keyboard layouts the local session may be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardLayout {
    /// US ANSI QWERTY.
    #[default]
    Us,
    /// German QWERTZ.
    De,
}

/// Error returned when parsing an unknown layout name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown keyboard layout: {0:?} (expected \"us\" or \"de\")")]
pub struct UnknownLayout(pub String);

impl FromStr for KeyboardLayout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "us" => Ok(KeyboardLayout::Us),
            "de" => Ok(KeyboardLayout::De),
            _ => Err(UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for KeyboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyboardLayout::Us => f.write_str("us"),
            KeyboardLayout::De => f.write_str("de"),
        }
    }
}

/// Immutable keysym lookup table for one layout.
#[derive(Debug, Clone)]
pub struct Keymap {
    layout: KeyboardLayout,
    table: HashMap<u32, KeyMapping>,
}

impl Keymap {
    /// Builds the table for `layout`.
    pub fn new(layout: KeyboardLayout) -> Self {
        let mut table = HashMap::new();
        common::insert_common(&mut table);
        match layout {
            KeyboardLayout::Us => us::insert_layout(&mut table),
            KeyboardLayout::De => de::insert_layout(&mut table),
        }
        Self { layout, table }
    }

    pub fn layout(&self) -> KeyboardLayout {
        self.layout
    }

    /// Resolves `keysym`, or `None` if this layout cannot type it.
    pub fn lookup(&self, keysym: u32) -> Option<KeyMapping> {
        self.table.get(&keysym).copied()
    }

    /// Number of keysyms in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Every key code a device must advertise to type this layout, including
    /// the synthesized modifiers.
    pub fn key_codes(&self) -> BTreeSet<u16> {
        self.table
            .values()
            .map(|m| m.scancode)
            .chain([evdev_codes::SHIFT_MODIFIER, evdev_codes::ALTGR_MODIFIER])
            .collect()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(KeyboardLayout::default())
    }
}
