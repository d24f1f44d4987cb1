//! MIFARE Classic 1K block addressing
//!
//! 64 blocks in 16 sectors of 4. The last block of every sector is the
//! sector trailer holding the keys and access bits; block 0 holds
//! manufacturer data. Neither is ever written.

use std::ops::Range;

use crate::constants::{
    BLOCK_COUNT, BLOCKS_PER_SECTOR, FIRST_DATA_BLOCK, MANUFACTURER_BLOCK, SECTOR_COUNT,
};

/// Whether `block` exists on a 1K card
pub const fn is_valid_block(block: u8) -> bool {
    block < BLOCK_COUNT
}

/// Whether `block` is a sector trailer
pub const fn is_trailer(block: u8) -> bool {
    block % BLOCKS_PER_SECTOR == BLOCKS_PER_SECTOR - 1
}

/// Whether `block` is the manufacturer block
pub const fn is_manufacturer_block(block: u8) -> bool {
    block == MANUFACTURER_BLOCK
}

/// Sector containing `block`
pub const fn sector_of(block: u8) -> u8 {
    block / BLOCKS_PER_SECTOR
}

/// First block of `sector`
pub const fn first_block(sector: u8) -> u8 {
    sector * BLOCKS_PER_SECTOR
}

/// Trailer block of `sector`
pub const fn trailer_of(sector: u8) -> u8 {
    first_block(sector) + BLOCKS_PER_SECTOR - 1
}

/// Block used to authenticate a whole sector for reading
///
/// Sector 0 is authenticated through block 1 so the manufacturer block is never touched.
pub const fn representative_block(sector: u8) -> u8 {
    if sector == 0 { 1 } else { first_block(sector) }
}

/// All sectors of a 1K card
pub const fn sectors() -> Range<u8> {
    0..SECTOR_COUNT
}

/// Data blocks of `sector`, excluding the trailer and the manufacturer block
pub fn data_blocks(sector: u8) -> impl Iterator<Item = u8> {
    let first = first_block(sector);
    (first..trailer_of(sector)).filter(|&block| !is_manufacturer_block(block))
}

/// Blocks that may carry payload, ascending: 4..=62 minus trailers
pub fn writable_blocks() -> impl Iterator<Item = u8> {
    (FIRST_DATA_BLOCK..BLOCK_COUNT).filter(|&block| !is_trailer(block))
}
