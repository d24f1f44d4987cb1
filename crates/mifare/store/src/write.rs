//! Verified block writes
//!
//! Chunks go onto the discovered blocks in order. Each block is
//! re-authenticated with the credentials discovery found, written, and read
//! back; the first failure stops the write.

use tagstore_apdu_core::Executor;
use tracing::{debug, instrument};

use crate::auth;
use crate::codec::Chunk;
use crate::commands::{ReadBinaryCommand, UpdateBinaryCommand};
use crate::error::{BlockFailure, Error, Result};
use crate::types::BlockAuthorization;

/// Re-authenticate and write one block
fn write_block<E: Executor>(
    executor: &mut E,
    authorization: &BlockAuthorization,
    chunk: &Chunk,
    slot: u8,
) -> Result<(), BlockFailure> {
    if !auth::reauthenticate(executor, authorization, slot)? {
        return Err(BlockFailure::Authentication {
            key_type: authorization.key_type,
        });
    }

    Ok(executor.execute(&UpdateBinaryCommand::new(authorization.block, *chunk))?)
}

/// Write `chunks` onto the blocks of `plan`, in order, verifying each one
///
/// Returns the blocks written. On failure the error lists every block whose
/// UPDATE BINARY was accepted, including one that then failed verification.
#[instrument(level = "debug", skip_all, fields(chunks = chunks.len(), writable = plan.len()))]
pub fn write_chunks<E: Executor>(
    executor: &mut E,
    plan: &[BlockAuthorization],
    chunks: &[Chunk],
    slot: u8,
) -> Result<Vec<u8>> {
    if chunks.len() > plan.len() {
        return Err(Error::InsufficientCapacity {
            required: chunks.len(),
            available: plan.len(),
        });
    }

    let mut written = Vec::with_capacity(chunks.len());
    for (authorization, chunk) in plan.iter().zip(chunks) {
        let block = authorization.block;
        if let Err(source) = write_block(executor, authorization, chunk, slot) {
            return Err(Error::WriteAborted {
                block,
                written,
                source,
            });
        }
        written.push(block);

        let actual = match executor.execute(&ReadBinaryCommand::new(block)) {
            Ok(actual) => actual,
            Err(e) => {
                return Err(Error::WriteAborted {
                    block,
                    written,
                    source: e.into(),
                });
            }
        };

        if actual != *chunk {
            return Err(Error::WriteVerification {
                block,
                expected: *chunk,
                actual,
                written,
            });
        }

        debug!(block, "block written and verified");
    }

    Ok(written)
}
