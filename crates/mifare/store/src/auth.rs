//! Key loading and block authentication
//!
//! A rejected key (status word other than `90 00`) is an ordinary `false`;
//! only a broken channel is an error. Candidate keys are tried through
//! [`first_success`], which stops at the first candidate that opens the
//! block.

use std::fmt;

use tagstore_apdu_core::{Executor, TransportError};
use tracing::{debug, trace};

use crate::commands::{AuthenticateCommand, CommandError, LoadKeyCommand};
use crate::types::{BlockAuthorization, Key, KeyType};

/// Turn a command outcome into accepted / rejected / channel failure
fn accepted(result: Result<(), CommandError>) -> Result<bool, TransportError> {
    match result {
        Ok(()) => Ok(true),
        Err(e) => match e.transport() {
            Some(transport) => Err(transport.clone()),
            None => {
                trace!(error = %e, "command rejected");
                Ok(false)
            }
        },
    }
}

/// Load `key` into the reader's volatile `slot`
pub fn load_key<E: Executor>(
    executor: &mut E,
    slot: u8,
    key: &Key,
) -> Result<bool, TransportError> {
    accepted(executor.execute(&LoadKeyCommand::new(slot, *key)))
}

/// Authenticate `block` with the key already loaded in `slot`
pub fn authenticate<E: Executor>(
    executor: &mut E,
    block: u8,
    key_type: KeyType,
    slot: u8,
) -> Result<bool, TransportError> {
    accepted(executor.execute(&AuthenticateCommand::new(block, key_type, slot)))
}

/// Why a candidate key did not open a block
#[derive(Debug)]
pub(crate) enum Rejection {
    KeyNotLoaded,
    NotAuthenticated,
    Transport(TransportError),
}

impl Rejection {
    /// The card or reader is gone; later candidates cannot succeed either
    const fn is_fatal(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_channel_lost(),
            Self::KeyNotLoaded | Self::NotAuthenticated => false,
        }
    }

    fn into_transport(self) -> TransportError {
        match self {
            Self::Transport(e) => e,
            other => TransportError::Other(other.to_string()),
        }
    }
}

impl From<TransportError> for Rejection {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotLoaded => f.write_str("reader refused the key"),
            Self::NotAuthenticated => f.write_str("neither key type authenticated"),
            Self::Transport(e) => write!(f, "transport failure: {e}"),
        }
    }
}

/// Evaluate candidates in order, returning the first success
///
/// Failures are logged and skipped unless `is_fatal` holds for them, in
/// which case evaluation stops and the failure is returned. `Ok(None)` means
/// every candidate failed.
pub fn first_success<I, T, R, F, P>(
    candidates: I,
    mut evaluate: F,
    is_fatal: P,
) -> Result<Option<T>, R>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<T, R>,
    P: Fn(&R) -> bool,
    R: fmt::Display,
{
    for candidate in candidates {
        match evaluate(candidate) {
            Ok(value) => return Ok(Some(value)),
            Err(reason) if is_fatal(&reason) => return Err(reason),
            Err(reason) => debug!(%reason, "candidate failed"),
        }
    }
    Ok(None)
}

/// Load `key` and try key A, then key B, against `block`
fn try_key<E: Executor>(
    executor: &mut E,
    block: u8,
    key: Key,
    slot: u8,
) -> Result<BlockAuthorization, Rejection> {
    if !load_key(executor, slot, &key)? {
        return Err(Rejection::KeyNotLoaded);
    }

    for key_type in KeyType::ALL {
        if authenticate(executor, block, key_type, slot)? {
            return Ok(BlockAuthorization::new(block, key_type, key));
        }
    }

    Err(Rejection::NotAuthenticated)
}

/// Find the first key and key type that authenticate `block`
///
/// On success the block's sector is left authenticated. `Ok(None)` means no
/// known key opens the block; an error means the card or reader went away.
pub fn authorize_block<E: Executor>(
    executor: &mut E,
    block: u8,
    keys: &[Key],
    slot: u8,
) -> Result<Option<BlockAuthorization>, TransportError> {
    let authorization = first_success(
        keys.iter().copied(),
        |key| try_key(executor, block, key, slot),
        Rejection::is_fatal,
    )
    .map_err(Rejection::into_transport)?;

    if authorization.is_none() {
        debug!(block, "no known key authenticates block");
    }
    Ok(authorization)
}

/// Re-establish a previously discovered authorization
pub fn reauthenticate<E: Executor>(
    executor: &mut E,
    authorization: &BlockAuthorization,
    slot: u8,
) -> Result<bool, TransportError> {
    Ok(load_key(executor, slot, &authorization.key)?
        && authenticate(executor, authorization.block, authorization.key_type, slot)?)
}
