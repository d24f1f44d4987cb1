mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use common::*;

const INTERVAL: Duration = Duration::from_millis(20);
const RECV: Duration = Duration::from_secs(2);

#[test]
fn test_poller_publishes_reads() {
    init_tracing();
    let card = SimCard::new();
    card.update(|state| state.memory[4][..5].copy_from_slice(b"hello"));
    let store = Arc::new(store_for(&card));

    let mut poller = store.poller(INTERVAL);
    let result = poller.receiver().recv_timeout(RECV).unwrap();

    assert_eq!(result.uid.to_hex(), "04A23B91");
    assert_eq!(result.text, "hello");
    assert!(poller.is_running());

    poller.stop();
    assert!(!poller.is_running());
}

#[test]
fn test_poller_stands_back_while_busy() {
    let card = SimCard::new();
    let store = Arc::new(store_for(&card));

    let busy = store.context().begin_foreground();
    let poller = store.poller(INTERVAL);

    thread::sleep(INTERVAL * 5);
    assert!(poller.receiver().try_recv().is_err());
    assert_eq!(card.state().connects, 0);

    drop(busy);
    assert!(poller.receiver().recv_timeout(RECV).is_ok());
}

#[test]
fn test_poller_survives_missing_reader() {
    let store = Arc::new(tagstore_mifare::TagStore::with_config(
        SimEnumerator::empty(),
        test_config(),
    ));

    let poller = store.poller(INTERVAL);
    thread::sleep(INTERVAL * 3);

    assert!(poller.is_running());
    assert!(poller.receiver().try_recv().is_err());
}

#[test]
fn test_poller_stops_on_cancel() {
    let card = SimCard::new();
    card.set_present(false);
    let store = Arc::new(store_for(&card));

    let poller = store.poller(INTERVAL);
    store.context().cancellation().cancel();

    let deadline = std::time::Instant::now() + RECV;
    while poller.is_running() && std::time::Instant::now() < deadline {
        thread::sleep(INTERVAL);
    }
    assert!(!poller.is_running());
}

#[test]
fn test_write_while_polling() {
    let card = SimCard::new();
    let store = Arc::new(store_for(&card));
    let poller = store.poller(INTERVAL);

    // Let the first read through, then write while the poller keeps running
    poller.receiver().recv_timeout(RECV).unwrap();
    let written = store.write_text("updated", PRESENT, ABSENT).unwrap();
    assert_eq!(written.blocks, vec![4]);
    assert_eq!(&card.block(4)[..7], b"updated");
}
