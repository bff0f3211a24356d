//! InputInjector: replays viewer keyboard and pointer input on a virtual device.
//!
//! The injector owns the virtual input device for the duration of a session.
//! It is started on the first viewer connect and stopped on the last
//! disconnect by the session coordinator, while the transport calls
//! [`InputInjector::key_event`] and [`InputInjector::pointer_event`] directly
//! from its own threads.  A single mutex serializes every device write so a
//! press/sync pair from one thread can never interleave with another's.
//!
//! # Event sequences
//!
//! Every state change is followed by a `SYN_REPORT`.  Typing `A` on a US
//! layout produces:
//!
//! ```text
//! key_event(down, 'A')   press(LEFTSHIFT) SYN  press(A) SYN
//! key_event(up,   'A')   release(A) SYN  release(LEFTSHIFT) SYN
//! ```
//!
//! A synthesized modifier belongs to the physical key it was pressed for and
//! is released with that key, whichever symbol the key-up names (viewers
//! often report `up 'a'` after `down 'A'` when Shift is let go first).
//! [`InputInjector::stop`] releases everything still held before the device
//! is destroyed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use vncbridge_core::keymap::evdev_codes::{
    ABS_X, ABS_Y, BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, BTN_SIDE, REL_HWHEEL, REL_WHEEL, REL_X, REL_Y,
};
use vncbridge_core::{
    ButtonMask, DeviceBackend, DeviceCapabilities, DeviceError, DeviceEvent, Keymap,
    PointerButton, PointerState, VirtualDevice,
};

/// Error type for input injection.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The keysym has no mapping on the configured layout.
    #[error("unknown key symbol: {0:#06x}")]
    UnknownSymbol(u32),
    /// No session is active, so there is no device to write to.
    #[error("input injector not started")]
    NotStarted,
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// How pointer motion is reported to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerMode {
    /// `ABS_X`/`ABS_Y` positions; the device behaves like a tablet.
    #[default]
    Absolute,
    /// `REL_X`/`REL_Y` deltas; the device behaves like a mouse.
    Relative,
}

/// Static injector settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectorSettings {
    pub device_name: String,
    pub pointer_mode: PointerMode,
}

impl Default for InjectorSettings {
    fn default() -> Self {
        Self {
            device_name: "vncbridge virtual input".to_string(),
            pointer_mode: PointerMode::default(),
        }
    }
}

/// What a pointer button becomes on the device.
enum ButtonAction {
    Key(u16),
    Wheel { axis: u16, delta: i32 },
}

fn button_action(button: PointerButton) -> ButtonAction {
    match button {
        PointerButton::Left => ButtonAction::Key(BTN_LEFT),
        PointerButton::Middle => ButtonAction::Key(BTN_MIDDLE),
        PointerButton::Right => ButtonAction::Key(BTN_RIGHT),
        PointerButton::Side => ButtonAction::Key(BTN_SIDE),
        PointerButton::WheelUp => ButtonAction::Wheel {
            axis: REL_WHEEL,
            delta: 1,
        },
        PointerButton::WheelDown => ButtonAction::Wheel {
            axis: REL_WHEEL,
            delta: -1,
        },
        PointerButton::WheelLeft => ButtonAction::Wheel {
            axis: REL_HWHEEL,
            delta: -1,
        },
        PointerButton::WheelRight => ButtonAction::Wheel {
            axis: REL_HWHEEL,
            delta: 1,
        },
    }
}

/// Device plus per-session input state.  Only reachable through the
/// injector's mutex.
struct DeviceSession {
    device: Box<dyn VirtualDevice>,
    pointer: PointerState,
    /// Codes currently pressed on the device, in press order.
    held: Vec<u16>,
    /// Modifiers pressed on behalf of a key code, released with that code.
    synthesized: HashMap<u16, Vec<u16>>,
}

impl DeviceSession {
    fn new(device: Box<dyn VirtualDevice>, width: u32, height: u32) -> Self {
        Self {
            device,
            pointer: PointerState::new(width, height),
            held: Vec::new(),
            synthesized: HashMap::new(),
        }
    }

    fn is_held(&self, code: u16) -> bool {
        self.held.contains(&code)
    }

    /// Writes `event` followed by its `SYN_REPORT`.
    fn emit(&mut self, event: DeviceEvent) -> Result<(), DeviceError> {
        self.device.write(event)?;
        self.device.write(DeviceEvent::Sync)
    }

    fn press(&mut self, code: u16) -> Result<(), DeviceError> {
        self.emit(DeviceEvent::press(code))?;
        if !self.is_held(code) {
            self.held.push(code);
        }
        Ok(())
    }

    fn release(&mut self, code: u16) -> Result<(), DeviceError> {
        self.emit(DeviceEvent::release(code))?;
        self.held.retain(|&c| c != code);
        Ok(())
    }

    fn move_pointer(
        &mut self,
        mode: PointerMode,
        from: Option<(i32, i32)>,
        to: (i32, i32),
    ) -> Result<(), DeviceError> {
        match mode {
            PointerMode::Absolute => {
                self.device.write(DeviceEvent::Absolute {
                    axis: ABS_X,
                    value: to.0,
                })?;
                self.device.write(DeviceEvent::Absolute {
                    axis: ABS_Y,
                    value: to.1,
                })?;
            }
            PointerMode::Relative => {
                // A relative device has no notion of where the first report is.
                let Some(from) = from else {
                    return Ok(());
                };
                let (dx, dy) = (to.0 - from.0, to.1 - from.1);
                if dx != 0 {
                    self.device.write(DeviceEvent::Relative {
                        axis: REL_X,
                        delta: dx,
                    })?;
                }
                if dy != 0 {
                    self.device.write(DeviceEvent::Relative {
                        axis: REL_Y,
                        delta: dy,
                    })?;
                }
            }
        }
        self.device.write(DeviceEvent::Sync)
    }

    /// Releases everything still held, most recent first.  Keeps going on
    /// write errors so as many keys as possible come back up.
    fn release_all(&mut self) {
        while let Some(code) = self.held.last().copied() {
            if let Err(e) = self.release(code) {
                warn!(code, "failed to release held key during shutdown: {e}");
                self.held.pop();
            }
        }
        self.synthesized.clear();
        self.pointer.clear_buttons();
    }
}

/// The input injection service.
///
/// Cheap to share: wrap in an `Arc` and hand clones to the coordinator and to
/// the transport hooks.
pub struct InputInjector {
    backend: Arc<dyn DeviceBackend>,
    keymap: Arc<Keymap>,
    settings: InjectorSettings,
    session: Mutex<Option<DeviceSession>>,
}

impl InputInjector {
    pub fn new(
        backend: Arc<dyn DeviceBackend>,
        keymap: Arc<Keymap>,
        settings: InjectorSettings,
    ) -> Self {
        Self {
            backend,
            keymap,
            settings,
            session: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<DeviceSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Returns `true` while a device is open.
    pub fn is_started(&self) -> bool {
        self.lock().is_some()
    }

    /// Codes currently held on the device, in press order.
    pub fn held_codes(&self) -> Vec<u16> {
        self.lock().as_ref().map(|s| s.held.clone()).unwrap_or_default()
    }

    /// The capability set a device needs for a `width` × `height` session.
    pub fn capabilities(&self, width: u32, height: u32) -> DeviceCapabilities {
        let mut keys = self.keymap.key_codes();
        keys.extend([BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, BTN_SIDE]);

        let mut relative_axes: std::collections::BTreeSet<u16> = [REL_WHEEL, REL_HWHEEL].into();
        let mut absolute_axes = Vec::new();
        match self.settings.pointer_mode {
            PointerMode::Absolute => {
                let max_x = i32::try_from(width.max(1) - 1).unwrap_or(i32::MAX);
                let max_y = i32::try_from(height.max(1) - 1).unwrap_or(i32::MAX);
                absolute_axes.push((ABS_X, max_x));
                absolute_axes.push((ABS_Y, max_y));
            }
            PointerMode::Relative => {
                relative_axes.extend([REL_X, REL_Y]);
            }
        }

        DeviceCapabilities {
            name: self.settings.device_name.clone(),
            keys,
            relative_axes,
            absolute_axes,
        }
    }

    /// Opens the virtual device for a `width` × `height` display.
    ///
    /// Calling `start` while already started is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unavailable`] if the device cannot be created.
    pub fn start(&self, width: u32, height: u32) -> Result<(), DeviceError> {
        let mut guard = self.lock();
        if guard.is_some() {
            debug!("input injector already started");
            return Ok(());
        }

        let capabilities = self.capabilities(width, height);
        let device = self.backend.open(&capabilities)?;
        *guard = Some(DeviceSession::new(device, width, height));

        info!(
            width,
            height,
            layout = %self.keymap.layout(),
            mode = ?self.settings.pointer_mode,
            "input injector started"
        );
        Ok(())
    }

    /// Releases every held key and button, then closes the device.
    /// Idempotent.
    pub fn stop(&self) {
        let Some(mut session) = self.lock().take() else {
            return;
        };
        if !session.held.is_empty() {
            debug!(held = ?session.held, "releasing held keys before closing device");
        }
        session.release_all();
        drop(session);
        info!("input injector stopped");
    }

    /// Injects a key press (`down == true`) or release for `keysym`.
    ///
    /// # Errors
    ///
    /// - [`InjectError::UnknownSymbol`] if the layout cannot type `keysym`;
    ///   nothing is written.
    /// - [`InjectError::NotStarted`] outside an active session.
    /// - [`InjectError::Device`] if a write fails.
    pub fn key_event(&self, down: bool, keysym: u32) -> Result<(), InjectError> {
        let mapping = self
            .keymap
            .lookup(keysym)
            .ok_or(InjectError::UnknownSymbol(keysym))?;

        let mut guard = self.lock();
        let session = guard.as_mut().ok_or(InjectError::NotStarted)?;
        trace!(keysym, down, scancode = mapping.scancode, "key event");

        let code = mapping.scancode;
        if down {
            for modifier in mapping.modifiers() {
                if !session.is_held(modifier) {
                    session.press(modifier)?;
                    // Recorded per press so a failed target press still
                    // leaves the modifier releasable with this key.
                    session.synthesized.entry(code).or_default().push(modifier);
                }
            }
            session.press(code)?;
        } else {
            if session.is_held(code) {
                session.release(code)?;
            } else {
                debug!(keysym, "release for a key that is not held");
            }
            if let Some(modifiers) = session.synthesized.remove(&code) {
                for &modifier in modifiers.iter().rev() {
                    if session.is_held(modifier) {
                        session.release(modifier)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Injects a pointer report: `x`/`y` are clamped to the display and each
    /// changed button is applied in ascending bit order.
    ///
    /// # Errors
    ///
    /// [`InjectError::NotStarted`] outside an active session, or
    /// [`InjectError::Device`] if a write fails.
    pub fn pointer_event(&self, button_mask: u8, x: i32, y: i32) -> Result<(), InjectError> {
        let mode = self.settings.pointer_mode;
        let mut guard = self.lock();
        let session = guard.as_mut().ok_or(InjectError::NotStarted)?;

        let update = session.pointer.update(ButtonMask::new(button_mask), x, y);
        if let Some(movement) = update.movement {
            session.move_pointer(mode, movement.from, movement.to)?;
        }

        for change in update.buttons {
            match button_action(change.button) {
                ButtonAction::Key(code) if change.pressed => session.press(code)?,
                ButtonAction::Key(code) => session.release(code)?,
                // One notch per press edge; the release edge carries nothing.
                ButtonAction::Wheel { axis, delta } if change.pressed => {
                    session.emit(DeviceEvent::Relative { axis, delta })?
                }
                ButtonAction::Wheel { .. } => {}
            }
        }
        Ok(())
    }

    /// Presses and immediately releases `code` as two complete, separately
    /// synced state changes.
    ///
    /// # Errors
    ///
    /// [`InjectError::NotStarted`] outside an active session, or
    /// [`InjectError::Device`] if a write fails.
    pub fn click(&self, code: u16) -> Result<(), InjectError> {
        let mut guard = self.lock();
        let session = guard.as_mut().ok_or(InjectError::NotStarted)?;
        session.press(code)?;
        session.release(code)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::input_device::mock::MockDeviceBackend;
    use vncbridge_core::keymap::evdev_codes::{
        KEY_2, KEY_A, KEY_B, KEY_LEFTSHIFT, KEY_Q, KEY_RIGHTALT,
    };
    use vncbridge_core::keymap::keysym;
    use vncbridge_core::KeyboardLayout;

    use vncbridge_core::DeviceEvent::Sync;

    fn press(code: u16) -> DeviceEvent {
        DeviceEvent::press(code)
    }

    fn release(code: u16) -> DeviceEvent {
        DeviceEvent::release(code)
    }

    fn abs(axis: u16, value: i32) -> DeviceEvent {
        DeviceEvent::Absolute { axis, value }
    }

    fn rel(axis: u16, delta: i32) -> DeviceEvent {
        DeviceEvent::Relative { axis, delta }
    }

    fn make_injector_with(
        layout: KeyboardLayout,
        mode: PointerMode,
    ) -> (InputInjector, Arc<MockDeviceBackend>) {
        let backend = Arc::new(MockDeviceBackend::new());
        let injector = InputInjector::new(
            Arc::clone(&backend) as Arc<dyn DeviceBackend>,
            Arc::new(Keymap::new(layout)),
            InjectorSettings {
                pointer_mode: mode,
                ..InjectorSettings::default()
            },
        );
        injector.start(1920, 1080).unwrap();
        (injector, backend)
    }

    fn make_injector() -> (InputInjector, Arc<MockDeviceBackend>) {
        make_injector_with(KeyboardLayout::Us, PointerMode::Absolute)
    }

    // ── Keyboard ──────────────────────────────────────────────────────────────

    #[test]
    fn test_plain_key_press_and_release_are_each_synced() {
        // Arrange
        let (injector, backend) = make_injector();

        // Act
        injector.key_event(true, 'a' as u32).unwrap();
        injector.key_event(false, 'a' as u32).unwrap();

        // Assert
        assert_eq!(backend.events(), vec![press(KEY_A), Sync, release(KEY_A), Sync]);
    }

    #[test]
    fn test_shifted_symbol_presses_shift_first_and_releases_it_last() {
        // Arrange
        let (injector, backend) = make_injector();

        // Act
        injector.key_event(true, 'A' as u32).unwrap();

        // Assert – modifier press, sync, target press, sync
        assert_eq!(
            backend.take_events(),
            vec![press(KEY_LEFTSHIFT), Sync, press(KEY_A), Sync]
        );

        // Act
        injector.key_event(false, 'A' as u32).unwrap();

        // Assert – target release before modifier release
        assert_eq!(
            backend.take_events(),
            vec![release(KEY_A), Sync, release(KEY_LEFTSHIFT), Sync]
        );
        assert!(injector.held_codes().is_empty());
    }

    #[test]
    fn test_altgr_symbol_on_german_layout() {
        let (injector, backend) = make_injector_with(KeyboardLayout::De, PointerMode::Absolute);

        injector.key_event(true, '@' as u32).unwrap();
        injector.key_event(false, '@' as u32).unwrap();

        assert_eq!(
            backend.events(),
            vec![
                press(KEY_RIGHTALT),
                Sync,
                press(KEY_Q),
                Sync,
                release(KEY_Q),
                Sync,
                release(KEY_RIGHTALT),
                Sync,
            ]
        );
    }

    #[test]
    fn test_explicitly_held_shift_is_not_synthesized_or_released() {
        // Arrange – viewer holds Shift_L itself
        let (injector, backend) = make_injector();
        injector.key_event(true, keysym::SHIFT_L).unwrap();
        backend.take_events();

        // Act
        injector.key_event(true, '@' as u32).unwrap();
        injector.key_event(false, '@' as u32).unwrap();

        // Assert – only the target key moves; Shift stays down
        assert_eq!(
            backend.events(),
            vec![press(KEY_2), Sync, release(KEY_2), Sync]
        );
        assert_eq!(injector.held_codes(), vec![KEY_LEFTSHIFT]);
    }

    #[test]
    fn test_shift_synthesized_for_upper_case_is_released_by_lower_case_key_up() {
        // Arrange – viewer reports the release unshifted after letting go of Shift
        let (injector, backend) = make_injector();
        injector.key_event(true, 'A' as u32).unwrap();
        backend.take_events();

        // Act
        injector.key_event(false, 'a' as u32).unwrap();

        // Assert
        assert_eq!(
            backend.take_events(),
            vec![release(KEY_A), Sync, release(KEY_LEFTSHIFT), Sync]
        );
        assert!(injector.held_codes().is_empty());

        // Act – the next plain letter is not shifted
        injector.key_event(true, 'b' as u32).unwrap();

        // Assert
        assert_eq!(backend.events(), vec![press(KEY_B), Sync]);
        assert_eq!(injector.held_codes(), vec![KEY_B]);
    }

    #[test]
    fn test_failed_target_press_leaves_synthesized_shift_releasable() {
        // Arrange – Shift press and its sync succeed, the target press fails
        let (injector, backend) = make_injector();
        backend.fail_writes_after(2);

        // Act
        let result = injector.key_event(true, 'A' as u32);

        // Assert
        assert!(matches!(result, Err(InjectError::Device(DeviceError::Closed))));
        assert_eq!(injector.held_codes(), vec![KEY_LEFTSHIFT]);

        // Act
        backend.set_fail_writes(false);
        backend.take_events();
        injector.key_event(false, 'a' as u32).unwrap();

        // Assert – the key never went down, its modifier still comes up
        assert_eq!(backend.events(), vec![release(KEY_LEFTSHIFT), Sync]);
        assert!(injector.held_codes().is_empty());
    }

    #[test]
    fn test_failed_release_reaches_caller_and_keeps_key_held() {
        // Arrange
        let (injector, backend) = make_injector();
        injector.key_event(true, 'a' as u32).unwrap();
        backend.set_fail_writes(true);

        // Act
        let result = injector.key_event(false, 'a' as u32);

        // Assert
        assert!(matches!(result, Err(InjectError::Device(DeviceError::Closed))));
        assert_eq!(injector.held_codes(), vec![KEY_A]);
    }

    #[test]
    fn test_unknown_symbol_is_rejected_without_writing() {
        let (injector, backend) = make_injector();
        let result = injector.key_event(true, 0x0100_0000);
        assert!(matches!(result, Err(InjectError::UnknownSymbol(0x0100_0000))));
        assert!(backend.events().is_empty());
    }

    #[test]
    fn test_key_event_before_start_is_not_started() {
        let backend = Arc::new(MockDeviceBackend::new());
        let injector = InputInjector::new(
            backend,
            Arc::new(Keymap::default()),
            InjectorSettings::default(),
        );
        assert!(matches!(
            injector.key_event(true, 'a' as u32),
            Err(InjectError::NotStarted)
        ));
    }

    #[test]
    fn test_release_of_key_not_held_writes_nothing() {
        let (injector, backend) = make_injector();
        injector.key_event(false, 'a' as u32).unwrap();
        assert!(backend.events().is_empty());
    }

    // ── Stop ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_stop_releases_every_held_key_before_closing() {
        // Arrange
        let (injector, backend) = make_injector();
        injector.key_event(true, 'A' as u32).unwrap();
        injector.pointer_event(0b001, 5, 5).unwrap();
        backend.take_events();

        // Act
        injector.stop();

        // Assert – most recent first, each synced, then the device is closed
        assert_eq!(
            backend.events(),
            vec![
                release(BTN_LEFT),
                Sync,
                release(KEY_A),
                Sync,
                release(KEY_LEFTSHIFT),
                Sync,
            ]
        );
        assert_eq!(backend.close_count(), 1);
        assert!(!injector.is_started());
    }

    #[test]
    fn test_stop_drains_held_keys_and_closes_when_releases_fail() {
        // Arrange – Shift, A and the left button held; only one release gets through
        let (injector, backend) = make_injector();
        injector.key_event(true, 'A' as u32).unwrap();
        injector.pointer_event(0b001, 5, 5).unwrap();
        backend.take_events();
        backend.fail_writes_after(2);

        // Act
        injector.stop();

        // Assert
        assert_eq!(backend.events(), vec![release(BTN_LEFT), Sync]);
        assert_eq!(backend.close_count(), 1);
        assert!(!injector.is_started());
        assert!(injector.held_codes().is_empty());
    }

    #[test]
    fn test_restart_after_failed_stop_starts_with_nothing_held() {
        // Arrange
        let (injector, backend) = make_injector();
        injector.key_event(true, 'A' as u32).unwrap();
        injector.pointer_event(0b001, 5, 5).unwrap();
        backend.set_fail_writes(true);
        injector.stop();
        backend.set_fail_writes(false);
        backend.take_events();

        // Act
        injector.start(1920, 1080).unwrap();
        injector.pointer_event(0b001, 5, 5).unwrap();

        // Assert – the button is pressed afresh, nothing carried over
        assert_eq!(backend.open_count(), 2);
        assert_eq!(backend.close_count(), 1);
        assert_eq!(injector.held_codes(), vec![BTN_LEFT]);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (injector, backend) = make_injector();
        injector.stop();
        injector.stop();
        assert_eq!(backend.close_count(), 1);
    }

    #[test]
    fn test_start_twice_opens_one_device() {
        let (injector, backend) = make_injector();
        injector.start(1920, 1080).unwrap();
        assert_eq!(backend.open_count(), 1);
    }

    #[test]
    fn test_start_surfaces_unavailable_device() {
        let backend = Arc::new(MockDeviceBackend::failing());
        let injector = InputInjector::new(
            backend,
            Arc::new(Keymap::default()),
            InjectorSettings::default(),
        );
        assert!(matches!(injector.start(800, 600), Err(DeviceError::Unavailable(_))));
        assert!(!injector.is_started());
    }

    // ── Pointer ───────────────────────────────────────────────────────────────

    #[test]
    fn test_button_press_without_motion_emits_only_button() {
        // Arrange
        let (injector, backend) = make_injector();
        injector.pointer_event(0, 10, 10).unwrap();
        assert_eq!(
            backend.take_events(),
            vec![
                abs(ABS_X, 10),
                abs(ABS_Y, 10),
                Sync,
            ]
        );

        // Act
        injector.pointer_event(1, 10, 10).unwrap();

        // Assert
        assert_eq!(backend.events(), vec![press(BTN_LEFT), Sync]);
    }

    #[test]
    fn test_repeated_identical_pointer_report_emits_nothing() {
        let (injector, backend) = make_injector();
        injector.pointer_event(0b101, 300, 200).unwrap();
        backend.take_events();

        injector.pointer_event(0b101, 300, 200).unwrap();

        assert!(backend.events().is_empty());
    }

    #[test]
    fn test_pointer_position_is_clamped() {
        let (injector, backend) = make_injector();
        injector.pointer_event(0, 4000, -3).unwrap();
        assert_eq!(
            backend.events(),
            vec![
                abs(ABS_X, 1919),
                abs(ABS_Y, 0),
                Sync,
            ]
        );
    }

    #[test]
    fn test_multi_button_change_applies_in_ascending_bit_order() {
        let (injector, backend) = make_injector();
        injector.pointer_event(0b001, 0, 0).unwrap();
        backend.take_events();

        injector.pointer_event(0b110, 0, 0).unwrap();

        assert_eq!(
            backend.events(),
            vec![
                release(BTN_LEFT),
                Sync,
                press(BTN_MIDDLE),
                Sync,
                press(BTN_RIGHT),
                Sync,
            ]
        );
    }

    #[test]
    fn test_wheel_bits_emit_one_notch_on_press_edge_only() {
        let (injector, backend) = make_injector();
        injector.pointer_event(0, 0, 0).unwrap();
        backend.take_events();

        injector.pointer_event(0b0000_1000, 0, 0).unwrap(); // wheel up pressed
        injector.pointer_event(0, 0, 0).unwrap(); // wheel up released
        injector.pointer_event(0b0001_0000, 0, 0).unwrap(); // wheel down pressed

        assert_eq!(
            backend.events(),
            vec![
                rel(REL_WHEEL, 1),
                Sync,
                rel(REL_WHEEL, -1),
                Sync,
            ]
        );
    }

    #[test]
    fn test_relative_mode_emits_deltas_after_first_report() {
        let (injector, backend) = make_injector_with(KeyboardLayout::Us, PointerMode::Relative);

        injector.pointer_event(0, 100, 100).unwrap(); // establishes origin
        injector.pointer_event(0, 110, 100).unwrap();
        injector.pointer_event(0, 105, 90).unwrap();

        assert_eq!(
            backend.events(),
            vec![
                rel(REL_X, 10),
                Sync,
                rel(REL_X, -5),
                rel(REL_Y, -10),
                Sync,
            ]
        );
    }

    #[test]
    fn test_click_emits_two_synced_state_changes() {
        let (injector, backend) = make_injector();
        injector.click(BTN_RIGHT).unwrap();
        assert_eq!(
            backend.events(),
            vec![press(BTN_RIGHT), Sync, release(BTN_RIGHT), Sync]
        );
        assert!(injector.held_codes().is_empty());
    }

    // ── Capabilities ──────────────────────────────────────────────────────────

    #[test]
    fn test_capabilities_match_pointer_mode() {
        let (absolute, _) = make_injector();
        let caps = absolute.capabilities(800, 600);
        assert_eq!(caps.absolute_axes, vec![(ABS_X, 799), (ABS_Y, 599)]);
        assert!(caps.keys.contains(&BTN_LEFT));
        assert!(caps.keys.contains(&KEY_LEFTSHIFT));
        assert!(!caps.relative_axes.contains(&REL_X));

        let (relative, _) = make_injector_with(KeyboardLayout::Us, PointerMode::Relative);
        let caps = relative.capabilities(800, 600);
        assert!(caps.absolute_axes.is_empty());
        assert!(caps.relative_axes.contains(&REL_X));
        assert!(caps.relative_axes.contains(&REL_WHEEL));
    }
}
