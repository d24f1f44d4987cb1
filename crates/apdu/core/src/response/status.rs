//! Status words (SW1/SW2) trailing every APDU response

use std::fmt;

/// A two byte status word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte
    pub sw1: u8,
    /// Second status byte
    pub sw2: u8,
}

impl StatusWord {
    /// Create a status word from its two bytes
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Whether this is `90 00`
    pub const fn is_success(self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}", self.sw1, self.sw2)
    }
}

/// Status words seen from PC/SC contactless readers
pub mod common {
    use super::StatusWord;

    /// Command completed
    pub const SW_NO_ERROR: StatusWord = StatusWord::new(0x90, 0x00);
    /// Operation failed (authentication rejected, key not loaded, ...)
    pub const SW_OPERATION_FAILED: StatusWord = StatusWord::new(0x63, 0x00);
    /// Wrong length
    pub const SW_WRONG_LENGTH: StatusWord = StatusWord::new(0x67, 0x00);
    /// Security status not satisfied (sector not authenticated)
    pub const SW_SECURITY_STATUS_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x82);
    /// Command not allowed
    pub const SW_COMMAND_NOT_ALLOWED: StatusWord = StatusWord::new(0x69, 0x86);
    /// Incorrect P1/P2 (block address out of range)
    pub const SW_INCORRECT_P1P2: StatusWord = StatusWord::new(0x6A, 0x86);
    /// Function not supported
    pub const SW_FUNC_NOT_SUPPORTED: StatusWord = StatusWord::new(0x6A, 0x81);
}
