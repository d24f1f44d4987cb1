//! Simulated MIFARE Classic 1K card, reader and enumerator
#![allow(dead_code, unreachable_pub)]

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tagstore_apdu_core::prelude::*;
use tagstore_mifare::{DEFAULT_KEYS, Key, KeyType, StoreConfig, TagStore, addressing};

pub const OK: [u8; 2] = [0x90, 0x00];
pub const AUTH_FAILED: [u8; 2] = [0x63, 0x00];
pub const NOT_AUTHENTICATED: [u8; 2] = [0x69, 0x82];
pub const NOT_SUPPORTED: [u8; 2] = [0x6A, 0x81];

pub const UID: [u8; 4] = [0x04, 0xA2, 0x3B, 0x91];

/// Commands the card has seen, for ordering assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    LoadKey,
    Auth(u8, KeyType),
    Read(u8),
    Write(u8),
    GetUid,
}

/// Card memory and behaviour knobs
#[derive(Debug)]
pub struct CardState {
    pub uid: Vec<u8>,
    pub memory: [[u8; 16]; 64],
    pub key_a: [Option<Key>; 16],
    pub key_b: [Option<Key>; 16],
    /// Blocks that refuse authentication whatever the key
    pub deny_auth: HashSet<u8>,
    /// Blocks that authenticate once, then refuse
    pub auth_once: HashSet<u8>,
    /// Blocks whose UPDATE BINARY answers 63 00
    pub reject_writes: HashSet<u8>,
    /// Blocks whose data is altered on the way in
    pub corrupt_writes: HashSet<u8>,
    /// The card leaves the field right after this block is written
    pub leave_after_write: Option<u8>,
    /// The card leaves the field right after this block authenticates
    pub leave_after_auth: Option<u8>,
    pub present: bool,
    /// The card leaves the field once a removal wait starts
    pub leaves_on_removal_wait: bool,
    pub connected: bool,
    pub connects: usize,
    pub disconnects: usize,
    pub log: Vec<Op>,
    loaded: Option<[u8; 6]>,
    authenticated: Option<u8>,
}

impl CardState {
    fn new(uid: &[u8]) -> Self {
        let mut memory = [[0u8; 16]; 64];
        memory[0][..uid.len()].copy_from_slice(uid);
        memory[0][8..].copy_from_slice(b"NXPMFC1K");
        for sector in addressing::sectors() {
            let trailer = addressing::trailer_of(sector) as usize;
            memory[trailer][..6].fill(0xFF);
            memory[trailer][6..10].copy_from_slice(&[0xFF, 0x07, 0x80, 0x69]);
            memory[trailer][10..].fill(0xFF);
        }

        Self {
            uid: uid.to_vec(),
            memory,
            key_a: [Some(DEFAULT_KEYS[0]); 16],
            key_b: [None; 16],
            deny_auth: HashSet::new(),
            auth_once: HashSet::new(),
            reject_writes: HashSet::new(),
            corrupt_writes: HashSet::new(),
            leave_after_write: None,
            leave_after_auth: None,
            present: true,
            leaves_on_removal_wait: false,
            connected: false,
            connects: 0,
            disconnects: 0,
            log: Vec::new(),
            loaded: None,
            authenticated: None,
        }
    }

    /// Blocks written, in order
    pub fn writes(&self) -> Vec<u8> {
        self.log
            .iter()
            .filter_map(|op| match op {
                Op::Write(block) => Some(*block),
                _ => None,
            })
            .collect()
    }

    fn respond(&mut self, apdu: &[u8]) -> Vec<u8> {
        match apdu {
            [0xFF, 0xCA, 0x00, 0x00, ..] => {
                self.log.push(Op::GetUid);
                let mut response = self.uid.clone();
                response.extend_from_slice(&OK);
                response
            }
            [0xFF, 0x82, 0x00, 0x00, 0x06, key @ ..] if key.len() == 6 => {
                self.log.push(Op::LoadKey);
                let mut bytes = [0u8; 6];
                bytes.copy_from_slice(key);
                self.loaded = Some(bytes);
                OK.to_vec()
            }
            [0xFF, 0x86, 0x00, 0x00, 0x05, 0x01, 0x00, block, key_type, 0x00] => {
                let key_type = if *key_type == 0x60 { KeyType::A } else { KeyType::B };
                self.log.push(Op::Auth(*block, key_type));
                self.authenticated = None;

                let sector = addressing::sector_of(*block) as usize;
                let expected = match key_type {
                    KeyType::A => self.key_a[sector],
                    KeyType::B => self.key_b[sector],
                };
                let matches = expected
                    .zip(self.loaded)
                    .is_some_and(|(expected, loaded)| *expected.as_bytes() == loaded);
                if matches && !self.deny_auth.contains(block) {
                    if self.auth_once.remove(block) {
                        self.deny_auth.insert(*block);
                    }
                    self.authenticated = Some(sector as u8);
                    if self.leave_after_auth == Some(*block) {
                        self.present = false;
                    }
                    OK.to_vec()
                } else {
                    AUTH_FAILED.to_vec()
                }
            }
            [0xFF, 0xB0, 0x00, block, 0x10] => {
                self.log.push(Op::Read(*block));
                if self.authenticated != Some(addressing::sector_of(*block)) {
                    return NOT_AUTHENTICATED.to_vec();
                }
                let mut response = self.memory[*block as usize].to_vec();
                response.extend_from_slice(&OK);
                response
            }
            [0xFF, 0xD6, 0x00, block, 0x10, data @ ..] if data.len() == 16 => {
                self.log.push(Op::Write(*block));
                if self.authenticated != Some(addressing::sector_of(*block)) {
                    return NOT_AUTHENTICATED.to_vec();
                }
                if self.reject_writes.contains(block) {
                    return AUTH_FAILED.to_vec();
                }
                let cell = &mut self.memory[*block as usize];
                cell.copy_from_slice(data);
                if self.corrupt_writes.contains(block) {
                    cell[0] ^= 0xFF;
                }
                if self.leave_after_write == Some(*block) {
                    self.present = false;
                }
                OK.to_vec()
            }
            _ => NOT_SUPPORTED.to_vec(),
        }
    }
}

/// Shared handle on a simulated card
#[derive(Debug, Clone)]
pub struct SimCard(Arc<Mutex<CardState>>);

impl SimCard {
    /// Blank card, every sector opened by key A = FFFFFFFFFFFF
    pub fn new() -> Self {
        Self::with_uid(&UID)
    }

    pub fn with_uid(uid: &[u8]) -> Self {
        Self(Arc::new(Mutex::new(CardState::new(uid))))
    }

    /// Only `blocks` authenticate; everything else refuses
    pub fn with_authenticatable(blocks: &[u8]) -> Self {
        let card = Self::new();
        card.update(|state| {
            state.deny_auth = (0..64).filter(|block| !blocks.contains(block)).collect();
        });
        card
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut CardState) -> T) -> T {
        f(&mut self.0.lock())
    }

    pub fn state(&self) -> parking_lot::MutexGuard<'_, CardState> {
        self.0.lock()
    }

    pub fn block(&self, block: u8) -> [u8; 16] {
        self.0.lock().memory[block as usize]
    }

    pub fn set_present(&self, present: bool) {
        self.0.lock().present = present;
    }

    pub fn replace_uid(&self, uid: &[u8]) {
        self.0.lock().uid = uid.to_vec();
    }
}

/// Connection to a [`SimCard`]
#[derive(Debug)]
pub struct SimTransport {
    card: SimCard,
    connected: bool,
}

impl CardTransport for SimTransport {
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        let mut state = self.card.0.lock();
        if !state.present {
            return Err(TransportError::CardRemoved);
        }
        Ok(Bytes::from(state.respond(command)))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        if self.connected {
            self.connected = false;
            let mut state = self.card.0.lock();
            state.connected = false;
            state.disconnects += 1;
        }
        Ok(())
    }
}

/// Reader holding a [`SimCard`]
#[derive(Debug, Clone)]
pub struct SimReader {
    card: SimCard,
}

const SIM_WAIT_CAP: Duration = Duration::from_millis(10);

impl CardReader for SimReader {
    type Transport = SimTransport;

    fn name(&self) -> &str {
        "Simulated PICC Reader 00"
    }

    fn wait_for_card(&mut self, timeout: Option<Duration>) -> Result<bool, TransportError> {
        if self.card.0.lock().present {
            return Ok(true);
        }
        thread::sleep(timeout.unwrap_or(SIM_WAIT_CAP).min(SIM_WAIT_CAP));
        Ok(self.card.0.lock().present)
    }

    fn wait_for_removal(&mut self, timeout: Duration) -> Result<bool, TransportError> {
        {
            let mut state = self.card.0.lock();
            if state.leaves_on_removal_wait {
                state.present = false;
            }
            if !state.present {
                return Ok(true);
            }
        }
        thread::sleep(timeout.min(SIM_WAIT_CAP));
        Ok(!self.card.0.lock().present)
    }

    fn connect(&mut self) -> Result<SimTransport, TransportError> {
        let mut state = self.card.0.lock();
        if !state.present {
            return Err(TransportError::NoCard);
        }
        state.connected = true;
        state.connects += 1;
        state.loaded = None;
        state.authenticated = None;
        Ok(SimTransport {
            card: self.card.clone(),
            connected: true,
        })
    }
}

/// Enumerator over zero or one simulated reader
#[derive(Debug, Clone, Default)]
pub struct SimEnumerator {
    readers: Vec<SimReader>,
}

impl SimEnumerator {
    pub fn with_card(card: &SimCard) -> Self {
        Self {
            readers: vec![SimReader { card: card.clone() }],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ReaderEnumerator for SimEnumerator {
    type Reader = SimReader;

    fn readers(&self) -> Result<Vec<SimReader>, TransportError> {
        Ok(self.readers.clone())
    }
}

/// Short waits so tests stay fast
pub fn test_config() -> StoreConfig {
    StoreConfig::default()
        .with_poll_slice(Duration::from_millis(5))
        .with_read_absent_timeout(Duration::from_millis(10))
        .with_erase_absent_timeout(Duration::from_millis(10))
}

pub fn store_for(card: &SimCard) -> TagStore<SimEnumerator> {
    TagStore::with_config(SimEnumerator::with_card(card), test_config())
}

pub const PRESENT: Duration = Duration::from_millis(200);
pub const ABSENT: Duration = Duration::from_millis(10);

/// Executor bound straight to a card, bypassing the store
pub fn executor_for(card: &SimCard) -> CardExecutor<SimTransport> {
    let mut reader = SimReader { card: card.clone() };
    let transport = reader.connect().expect("card present");
    CardExecutor::new(transport)
}

/// Route `tracing` output to the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
