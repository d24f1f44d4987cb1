use std::time::Duration;

use crate::types::Key;

/// Bytes per block
pub const BLOCK_SIZE: usize = 16;
/// Blocks on a MIFARE Classic 1K card
pub const BLOCK_COUNT: u8 = 64;
/// Blocks per sector, trailer included
pub const BLOCKS_PER_SECTOR: u8 = 4;
/// Sectors on a MIFARE Classic 1K card
pub const SECTOR_COUNT: u8 = BLOCK_COUNT / BLOCKS_PER_SECTOR;
/// Manufacturer block, never read or written
pub const MANUFACTURER_BLOCK: u8 = 0;
/// First block eligible for payload data (sector 0 is never written)
pub const FIRST_DATA_BLOCK: u8 = 4;

/// Volatile reader key slot used for every authentication
pub const DEFAULT_KEY_SLOT: u8 = 0x00;

/// Well-known transport keys, in the order they are tried
pub const DEFAULT_KEYS: [Key; 6] = [
    Key::new([0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]),
    Key::new([0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5]),
    Key::new([0xD3, 0xF7, 0xD3, 0xF7, 0xD3, 0xF7]),
    Key::new([0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    Key::new([0xB0, 0xB1, 0xB2, 0xB3, 0xB4, 0xB5]),
    Key::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
];

/// Repeat reads of the same UID inside this window are ignored
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);
/// Presence waits are cut into slices of this length so cancellation is observed
pub const DEFAULT_POLL_SLICE: Duration = Duration::from_millis(100);
/// Best-effort wait for card removal at the end of a read
pub const DEFAULT_READ_ABSENT_TIMEOUT: Duration = Duration::from_millis(500);
/// Wait for card removal at the end of an erase
pub const DEFAULT_ERASE_ABSENT_TIMEOUT: Duration = Duration::from_secs(3);

/// PC/SC part 3 pseudo-APDU class
pub const CLA_PCSC: u8 = 0xFF;

/// Instruction bytes of the PC/SC storage card commands
pub mod ins {
    /// LOAD KEYS into the reader's volatile memory
    pub const LOAD_KEYS: u8 = 0x82;
    /// GENERAL AUTHENTICATE against a block
    pub const GENERAL_AUTHENTICATE: u8 = 0x86;
    /// READ BINARY of one block
    pub const READ_BINARY: u8 = 0xB0;
    /// UPDATE BINARY of one block
    pub const UPDATE_BINARY: u8 = 0xD6;
    /// GET DATA (UID when P1 = 0)
    pub const GET_DATA: u8 = 0xCA;
}
