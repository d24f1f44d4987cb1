//! Writable block discovery
//!
//! Walks every payload-eligible block in ascending order and records the
//! first known key that opens it. Blocks no key opens are left out, so the
//! resulting plan may have gaps. Losing the card stops the walk with an
//! error instead of yielding a shorter plan.

use tagstore_apdu_core::{Executor, TransportError};
use tracing::{debug, instrument};

use crate::addressing;
use crate::auth;
use crate::types::{BlockAuthorization, Key};

/// Authorizations for every writable block, ascending by block index
#[instrument(level = "debug", skip(executor, keys))]
pub fn discover<E: Executor>(
    executor: &mut E,
    keys: &[Key],
    slot: u8,
) -> Result<Vec<BlockAuthorization>, TransportError> {
    let plan = addressing::writable_blocks()
        .filter_map(|block| auth::authorize_block(executor, block, keys, slot).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        writable = plan.len(),
        blocks = ?plan.iter().map(|a| a.block).collect::<Vec<_>>(),
        "discovered writable blocks"
    );
    Ok(plan)
}
