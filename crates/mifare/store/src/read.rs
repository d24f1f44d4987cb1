//! Text extraction
//!
//! Each sector is tried once through its representative block. Every data
//! block of a sector that opens is read and decoded on its own; non-empty
//! texts are joined with single spaces. A record spanning two blocks
//! therefore comes back with a space at the block boundary.

use tagstore_apdu_core::{Executor, TransportError};
use tracing::{debug, instrument, trace};

use crate::addressing;
use crate::auth;
use crate::codec;
use crate::commands::ReadBinaryCommand;
use crate::types::Key;

/// Printable text of every block that can be authenticated
///
/// Sectors no key opens, and blocks that fail to read, are skipped. Losing
/// the card or reader is an error.
#[instrument(level = "debug", skip(executor, keys))]
pub fn extract_text<E: Executor>(
    executor: &mut E,
    keys: &[Key],
    slot: u8,
) -> Result<String, TransportError> {
    let mut parts = Vec::new();

    for sector in addressing::sectors() {
        let representative = addressing::representative_block(sector);
        if auth::authorize_block(executor, representative, keys, slot)?.is_none() {
            trace!(sector, "sector not readable");
            continue;
        }

        for block in addressing::data_blocks(sector) {
            match executor.execute(&ReadBinaryCommand::new(block)) {
                Ok(raw) => {
                    let text = codec::decode_block(&raw);
                    if !text.is_empty() {
                        trace!(block, %text, "block text");
                        parts.push(text);
                    }
                }
                Err(e) => match e.transport() {
                    Some(lost) if lost.is_channel_lost() => return Err(lost.clone()),
                    _ => debug!(block, error = %e, "skipping unreadable block"),
                },
            }
        }
    }

    Ok(parts.join(" "))
}
