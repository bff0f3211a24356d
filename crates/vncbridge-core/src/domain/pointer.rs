//! Pointer position and button-mask tracking.
//!
//! A remote viewer reports its pointer as an absolute `(x, y)` position plus an
//! 8-bit button mask on every message.  [`PointerState::update`] turns that
//! level-triggered report into the edge-triggered changes a virtual input
//! device needs: a move (only if the position changed) and one
//! [`ButtonChange`] per bit that flipped, in ascending bit order.
//!
//! # RFB button mask bits
//!
//! | Bit | Meaning            |
//! |-----|--------------------|
//! | 0   | Left               |
//! | 1   | Middle             |
//! | 2   | Right              |
//! | 3   | Wheel up           |
//! | 4   | Wheel down         |
//! | 5   | Wheel left         |
//! | 6   | Wheel right        |
//! | 7   | Side (back)        |

/// Logical pointer button identified by its bit in the RFB button mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    Side,
}

impl PointerButton {
    /// All buttons in ascending bit order.
    pub const ALL: [PointerButton; 8] = [
        PointerButton::Left,
        PointerButton::Middle,
        PointerButton::Right,
        PointerButton::WheelUp,
        PointerButton::WheelDown,
        PointerButton::WheelLeft,
        PointerButton::WheelRight,
        PointerButton::Side,
    ];

    /// Bit index of this button in the mask.
    pub fn bit(self) -> u8 {
        match self {
            PointerButton::Left => 0,
            PointerButton::Middle => 1,
            PointerButton::Right => 2,
            PointerButton::WheelUp => 3,
            PointerButton::WheelDown => 4,
            PointerButton::WheelLeft => 5,
            PointerButton::WheelRight => 6,
            PointerButton::Side => 7,
        }
    }

    /// Returns `true` for the four wheel pseudo-buttons.
    pub fn is_wheel(self) -> bool {
        matches!(
            self,
            PointerButton::WheelUp
                | PointerButton::WheelDown
                | PointerButton::WheelLeft
                | PointerButton::WheelRight
        )
    }
}

/// RFB pointer button mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn is_pressed(self, button: PointerButton) -> bool {
        self.0 & (1 << button.bit()) != 0
    }

    /// Buttons whose state differs between `self` and `next`, ascending bit order.
    pub fn changes_to(self, next: ButtonMask) -> Vec<ButtonChange> {
        let flipped = self.0 ^ next.0;
        PointerButton::ALL
            .iter()
            .copied()
            .filter(|b| flipped & (1 << b.bit()) != 0)
            .map(|button| ButtonChange {
                button,
                pressed: next.is_pressed(button),
            })
            .collect()
    }
}

/// One button edge produced by [`PointerState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonChange {
    pub button: PointerButton,
    pub pressed: bool,
}

/// A pointer move produced by [`PointerState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerMove {
    /// Previous position, `None` for the first report of a session.
    pub from: Option<(i32, i32)>,
    /// New, clamped position.
    pub to: (i32, i32),
}

impl PointerMove {
    /// Relative displacement from the previous position (zero for the first move).
    pub fn delta(&self) -> (i32, i32) {
        match self.from {
            Some((fx, fy)) => (self.to.0 - fx, self.to.1 - fy),
            None => (0, 0),
        }
    }
}

/// Everything one pointer report changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerUpdate {
    pub movement: Option<PointerMove>,
    pub buttons: Vec<ButtonChange>,
}

impl PointerUpdate {
    pub fn is_empty(&self) -> bool {
        self.movement.is_none() && self.buttons.is_empty()
    }
}

/// Last known pointer position and buttons for one session.
#[derive(Debug, Clone)]
pub struct PointerState {
    width: u32,
    height: u32,
    position: Option<(i32, i32)>,
    buttons: ButtonMask,
}

impl PointerState {
    /// Creates pointer state bounded to a `width` × `height` display.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            position: None,
            buttons: ButtonMask::default(),
        }
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.position
    }

    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    /// Clamps a coordinate pair into `[0, width) × [0, height)`.
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        let max_x = i32::try_from(self.width - 1).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.height - 1).unwrap_or(i32::MAX);
        (x.clamp(0, max_x), y.clamp(0, max_y))
    }

    /// Applies a viewer report and returns the resulting edges.
    ///
    /// Repeating an identical report yields an empty update.
    pub fn update(&mut self, mask: ButtonMask, x: i32, y: i32) -> PointerUpdate {
        let to = self.clamp(x, y);
        let movement = if self.position == Some(to) {
            None
        } else {
            Some(PointerMove {
                from: self.position,
                to,
            })
        };
        self.position = Some(to);

        let buttons = self.buttons.changes_to(mask);
        self.buttons = mask;

        PointerUpdate { movement, buttons }
    }

    /// Forgets every held button without producing edges.  Used once the
    /// caller has released the buttons on the device itself.
    pub fn clear_buttons(&mut self) {
        self.buttons = ButtonMask::default();
    }
}
