//! Best-effort erase
//!
//! Zeroes every payload-eligible block that some known key opens. Blocks
//! that do not authenticate, or refuse the write, are skipped. Losing the
//! card or reader aborts the erase.

use tagstore_apdu_core::{Executor, TransportError};
use tracing::{debug, instrument, warn};

use crate::addressing;
use crate::auth;
use crate::codec::EMPTY_CHUNK;
use crate::commands::UpdateBinaryCommand;
use crate::types::Key;

/// Blocks erased and blocks skipped, both ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraseOutcome {
    /// Blocks zeroed
    pub erased: Vec<u8>,
    /// Blocks left untouched
    pub skipped: Vec<u8>,
}

/// Zero every writable block that can be authenticated
#[instrument(level = "debug", skip(executor, keys))]
pub fn erase_blocks<E: Executor>(
    executor: &mut E,
    keys: &[Key],
    slot: u8,
) -> Result<EraseOutcome, TransportError> {
    let mut outcome = EraseOutcome::default();

    for block in addressing::writable_blocks() {
        if auth::authorize_block(executor, block, keys, slot)?.is_none() {
            outcome.skipped.push(block);
            continue;
        }

        match executor.execute(&UpdateBinaryCommand::new(block, EMPTY_CHUNK)) {
            Ok(()) => outcome.erased.push(block),
            Err(e) => {
                if let Some(lost) = e.transport().filter(|t| t.is_channel_lost()) {
                    return Err(lost.clone());
                }
                warn!(block, error = %e, "failed to erase block");
                outcome.skipped.push(block);
            }
        }
    }

    debug!(
        erased = outcome.erased.len(),
        skipped = outcome.skipped.len(),
        "erase finished"
    );
    Ok(outcome)
}
