//! Utility functions for PC/SC operations

use std::fmt;

/// Match an ATR against a pattern with an optional mask
///
/// If a mask is provided, only the bits set in the mask are compared.
pub(crate) fn match_atr(atr: &[u8], pattern: &[u8], mask: Option<&[u8]>) -> bool {
    // If pattern is longer than ATR, it can't match
    if pattern.len() > atr.len() {
        return false;
    }

    match mask {
        Some(mask) => {
            if mask.len() < pattern.len() {
                return false;
            }
            atr.iter()
                .zip(pattern)
                .zip(mask)
                .all(|((a, p), m)| (a & m) == (p & m))
        }
        None => atr.iter().zip(pattern).all(|(a, p)| a == p),
    }
}

/// Storage card families announced in a PC/SC part 3 ATR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardName {
    /// MIFARE Classic 1K
    MifareClassic1K,
    /// MIFARE Classic 4K
    MifareClassic4K,
    /// MIFARE Ultralight
    MifareUltralight,
    /// MIFARE Mini
    MifareMini,
    /// Any other card name code
    Other(u16),
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MifareClassic1K => f.write_str("MIFARE Classic 1K"),
            Self::MifareClassic4K => f.write_str("MIFARE Classic 4K"),
            Self::MifareUltralight => f.write_str("MIFARE Ultralight"),
            Self::MifareMini => f.write_str("MIFARE Mini"),
            Self::Other(code) => write!(f, "storage card {code:04X}"),
        }
    }
}

/// ATR prefix of a contactless storage card (RID A0 00 00 03 06), bytes 4-11
const STORAGE_CARD_PATTERN: [u8; 12] = [
    0x3B, 0x8F, 0x80, 0x01, 0x80, 0x4F, 0x0C, 0xA0, 0x00, 0x00, 0x03, 0x06,
];
const STORAGE_CARD_MASK: [u8; 12] = [
    0xFF, 0xF0, 0x00, 0x00, 0xFF, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// Decode the card name from a PC/SC part 3 ATR, if it is one
pub fn card_name_from_atr(atr: &[u8]) -> Option<CardName> {
    if atr.len() < 15 || !match_atr(atr, &STORAGE_CARD_PATTERN, Some(&STORAGE_CARD_MASK)) {
        return None;
    }

    let name = u16::from_be_bytes([atr[13], atr[14]]);
    Some(match name {
        0x0001 => CardName::MifareClassic1K,
        0x0002 => CardName::MifareClassic4K,
        0x0003 => CardName::MifareUltralight,
        0x0026 => CardName::MifareMini,
        other => CardName::Other(other),
    })
}
