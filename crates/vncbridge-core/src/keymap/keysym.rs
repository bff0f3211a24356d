//! X11 KeySym values used by the RFB `KeyEvent` message.
//!
//! Reference: `X11/keysymdef.h` from xorgproto.  Printable ASCII keysyms
//! (0x20–0x7E) equal their ASCII code and Latin-1 keysyms (0xA0–0xFF) equal
//! their ISO 8859-1 code, so only the values this crate needs by name are
//! listed here.

// TTY function keys
pub const BACKSPACE: u32 = 0xFF08;
pub const TAB: u32 = 0xFF09;
pub const RETURN: u32 = 0xFF0D;
pub const PAUSE: u32 = 0xFF13;
pub const SCROLL_LOCK: u32 = 0xFF14;
pub const SYS_REQ: u32 = 0xFF15;
pub const ESCAPE: u32 = 0xFF1B;
pub const DELETE: u32 = 0xFFFF;

// Cursor control
pub const HOME: u32 = 0xFF50;
pub const LEFT: u32 = 0xFF51;
pub const UP: u32 = 0xFF52;
pub const RIGHT: u32 = 0xFF53;
pub const DOWN: u32 = 0xFF54;
pub const PAGE_UP: u32 = 0xFF55;
pub const PAGE_DOWN: u32 = 0xFF56;
pub const END: u32 = 0xFF57;

// Misc functions
pub const PRINT: u32 = 0xFF61;
pub const INSERT: u32 = 0xFF63;
pub const MENU: u32 = 0xFF67;
pub const NUM_LOCK: u32 = 0xFF7F;

// Keypad
pub const KP_ENTER: u32 = 0xFF8D;
pub const KP_MULTIPLY: u32 = 0xFFAA;
pub const KP_ADD: u32 = 0xFFAB;
pub const KP_SUBTRACT: u32 = 0xFFAD;
pub const KP_DECIMAL: u32 = 0xFFAE;
pub const KP_DIVIDE: u32 = 0xFFAF;
pub const KP_0: u32 = 0xFFB0;

// Function keys F1..F12 are contiguous
pub const F1: u32 = 0xFFBE;

// Modifiers
pub const SHIFT_L: u32 = 0xFFE1;
pub const SHIFT_R: u32 = 0xFFE2;
pub const CONTROL_L: u32 = 0xFFE3;
pub const CONTROL_R: u32 = 0xFFE4;
pub const CAPS_LOCK: u32 = 0xFFE5;
pub const META_L: u32 = 0xFFE7;
pub const META_R: u32 = 0xFFE8;
pub const ALT_L: u32 = 0xFFE9;
pub const ALT_R: u32 = 0xFFEA;
pub const SUPER_L: u32 = 0xFFEB;
pub const SUPER_R: u32 = 0xFFEC;
pub const ISO_LEVEL3_SHIFT: u32 = 0xFE03;

// Dead keys
pub const DEAD_GRAVE: u32 = 0xFE50;
pub const DEAD_ACUTE: u32 = 0xFE51;
pub const DEAD_CIRCUMFLEX: u32 = 0xFE52;

// Latin-1 supplement
pub const SECTION: u32 = 0x00A7;
pub const DEGREE: u32 = 0x00B0;
pub const TWO_SUPERIOR: u32 = 0x00B2;
pub const THREE_SUPERIOR: u32 = 0x00B3;
pub const ACUTE: u32 = 0x00B4;
pub const MU: u32 = 0x00B5;
pub const A_DIAERESIS_UPPER: u32 = 0x00C4;
pub const O_DIAERESIS_UPPER: u32 = 0x00D6;
pub const U_DIAERESIS_UPPER: u32 = 0x00DC;
pub const SSHARP: u32 = 0x00DF;
pub const A_DIAERESIS: u32 = 0x00E4;
pub const O_DIAERESIS: u32 = 0x00F6;
pub const U_DIAERESIS: u32 = 0x00FC;

// Unicode-range keysyms
pub const EURO_SIGN: u32 = 0x20AC;
