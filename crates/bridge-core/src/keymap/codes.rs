//! Scan codes and virtual key codes for the controller hardware.
//!
//! The hardware side is whatever the gpio-keys device tree assigns to the
//! physical buttons. The virtual side is the code space shared with the UI
//! service that consumes forwarded reports; those values never change
//! without coordinating both ends.

// ── Hardware scan codes (gpio-keys button matrix) ─────────────────────────────

/// Back button.
pub const KEY_ESC: u16 = 1;

/// Preset button 1.
pub const KEY_1: u16 = 2;

/// Preset button 2.
pub const KEY_2: u16 = 3;

/// Preset button 3.
pub const KEY_3: u16 = 4;

/// Preset button 4.
pub const KEY_4: u16 = 5;

/// Dial push-click. Wired into the button matrix, not the encoder.
pub const KEY_ENTER: u16 = 28;

// ── Virtual key codes (UI service contract) ───────────────────────────────────

/// Navigate back.
pub const VK_BACK: u16 = 158;

/// Confirm / dial click.
pub const VK_ENTER: u16 = 28;

/// One rotary tick counter-clockwise.
pub const VK_LEFT: u16 = 105;

/// One rotary tick clockwise.
pub const VK_RIGHT: u16 = 106;

/// Preset slot 1.
pub const VK_BTN_0: u16 = 256;

/// Preset slot 2.
pub const VK_BTN_1: u16 = 257;

/// Preset slot 3.
pub const VK_BTN_2: u16 = 258;

/// Preset slot 4.
pub const VK_BTN_3: u16 = 259;
