//! Device manager for PC/SC operations

use std::fmt;
use std::time::Duration;

use pcsc::{Context, Scope};
use tagstore_apdu_core::{ReaderEnumerator, TransportError};

use crate::config::PcscConfig;
use crate::error::PcscError;
use crate::reader::{PcscReader, PcscTerminal};

/// Manager for PC/SC device operations
pub struct PcscDeviceManager {
    /// PC/SC context
    context: Context,
    /// Only this reader is used when set
    reader_filter: Option<String>,
    /// Configuration handed to every terminal
    config: PcscConfig,
}

impl fmt::Debug for PcscDeviceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscDeviceManager")
            .field("reader_filter", &self.reader_filter)
            .field("config", &self.config)
            .finish()
    }
}

impl PcscDeviceManager {
    /// Create a new PC/SC device manager
    pub fn new() -> Result<Self, PcscError> {
        let context = Context::establish(Scope::User)?;
        Ok(Self {
            context,
            reader_filter: None,
            config: PcscConfig::default(),
        })
    }

    /// Restrict the manager to the reader with this exact name
    pub fn with_reader(mut self, name: impl Into<String>) -> Self {
        self.reader_filter = Some(name.into());
        self
    }

    /// Use a custom connection configuration
    pub fn with_config(mut self, config: PcscConfig) -> Self {
        self.config = config;
        self
    }

    fn reader_names(&self) -> Result<Vec<std::ffi::CString>, PcscError> {
        let names = match self.context.list_readers_owned() {
            Ok(names) => names,
            // No reader attached is an expected condition
            Err(pcsc::Error::NoReadersAvailable) => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(names
            .into_iter()
            .filter(|name| {
                self.reader_filter
                    .as_deref()
                    .is_none_or(|wanted| name.to_string_lossy() == wanted)
            })
            .collect())
    }

    /// List all available card readers with their card status
    pub fn list_readers(&self) -> Result<Vec<PcscReader>, PcscError> {
        let readers = self.reader_names()?;
        let mut result = Vec::with_capacity(readers.len());

        for reader_name in readers {
            let mut reader_states = [pcsc::ReaderState::new(
                reader_name.clone(),
                pcsc::State::UNAWARE,
            )];

            match self.context.get_status_change(Duration::ZERO, &mut reader_states) {
                Ok(()) => result.push(PcscReader::from_reader_state(&reader_states[0])),
                Err(_) => {
                    // If we can't get status, assume no card
                    result.push(PcscReader::new(
                        reader_name.to_string_lossy().into_owned(),
                        false,
                        None,
                    ));
                }
            }
        }

        Ok(result)
    }

    /// Open a terminal for a specific reader
    pub fn open_reader(&self, reader_name: &str) -> Result<PcscTerminal, PcscError> {
        PcscTerminal::new(self.context.clone(), reader_name, self.config)
    }
}

impl ReaderEnumerator for PcscDeviceManager {
    type Reader = PcscTerminal;

    fn readers(&self) -> Result<Vec<PcscTerminal>, TransportError> {
        self.reader_names()?
            .iter()
            .map(|name| self.open_reader(&name.to_string_lossy()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}
