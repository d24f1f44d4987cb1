//! Common test utilities

use tagstore_apdu_core::ReaderEnumerator;
use tagstore_apdu_transport_pcsc::{PcscDeviceManager, PcscTerminal};

/// Try to get a real PC/SC manager for tests
pub fn get_manager() -> Option<PcscDeviceManager> {
    PcscDeviceManager::new().ok()
}

/// Try to get the first real reader for tests
pub fn get_test_terminal() -> Option<PcscTerminal> {
    get_manager()?.first_reader().ok().flatten()
}
