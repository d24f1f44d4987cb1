mod common;

use std::thread;
use std::time::Duration;

use common::*;
use tagstore_apdu_core::TransportError;
use tagstore_mifare::{Error, Key, TagStore};

#[test]
fn test_read_back_single_block_record() {
    init_tracing();
    let card = SimCard::new();
    let store = store_for(&card);
    store.write_text("Jane,AB1,guide", PRESENT, ABSENT).unwrap();

    let result = store.read_uid_and_data(Some(PRESENT)).unwrap().unwrap();

    assert_eq!(result.uid.to_hex(), "04A23B91");
    assert_eq!(result.text, "Jane,AB1,guide");
}

#[test]
fn test_blocks_are_joined_with_spaces() {
    let card = SimCard::new();
    let store = store_for(&card);
    store.write_text("Jane Doe,AB123,guide", PRESENT, ABSENT).unwrap();

    let result = store.read_uid_and_data(Some(PRESENT)).unwrap().unwrap();

    assert_eq!(result.text, "Jane Doe,AB123,g uide");
}

#[test]
fn test_reads_sector_zero_but_not_manufacturer_block() {
    let card = SimCard::new();
    card.update(|state| {
        state.memory[1][..5].copy_from_slice(b"HELLO");
        state.memory[2][..5].copy_from_slice(b"WORLD");
    });
    let store = store_for(&card);

    let result = store.read_uid_and_data(Some(PRESENT)).unwrap().unwrap();

    assert_eq!(result.text, "HELLO WORLD");
    assert!(!card.state().log.contains(&Op::Read(0)));
}

#[test]
fn test_foreign_card_reads_empty() {
    let card = SimCard::new();
    card.update(|state| state.key_a = [Some(Key::new([0x5A; 6])); 16]);
    let store = store_for(&card);

    let result = store.read_uid_and_data(Some(PRESENT)).unwrap().unwrap();

    assert_eq!(result.uid.to_hex(), "04A23B91");
    assert!(result.text.is_empty());
}

#[test]
fn test_locked_sector_is_skipped() {
    let card = SimCard::new();
    card.update(|state| {
        state.memory[4][..3].copy_from_slice(b"one");
        state.memory[8][..3].copy_from_slice(b"two");
        state.memory[12][..5].copy_from_slice(b"three");
        state.key_a[2] = None;
    });
    let store = store_for(&card);

    let result = store.read_uid_and_data(Some(PRESENT)).unwrap().unwrap();

    assert_eq!(result.text, "one three");
}

#[test]
fn test_repeat_within_window_is_debounced() {
    let card = SimCard::new();
    let config = test_config().with_debounce_window(Duration::from_millis(150));
    let store = TagStore::with_config(SimEnumerator::with_card(&card), config);

    assert!(store.read_uid_and_data(Some(PRESENT)).unwrap().is_some());
    assert!(store.read_uid_and_data(Some(PRESENT)).unwrap().is_none());
    assert!(store.context().debounce().is_debounced(&tagstore_mifare::Uid::new(UID)));

    thread::sleep(Duration::from_millis(200));
    assert!(store.read_uid_and_data(Some(PRESENT)).unwrap().is_some());
}

#[test]
fn test_different_card_is_not_debounced() {
    let card = SimCard::new();
    let store = store_for(&card);

    assert!(store.read_uid_and_data(Some(PRESENT)).unwrap().is_some());
    card.replace_uid(&[0x11, 0x22, 0x33, 0x44]);
    let second = store.read_uid_and_data(Some(PRESENT)).unwrap().unwrap();
    assert_eq!(second.uid.to_hex(), "11223344");
}

#[test]
fn test_no_card_returns_none() {
    let card = SimCard::new();
    card.set_present(false);
    let store = store_for(&card);

    assert!(store.read_uid_and_data(Some(Duration::from_millis(30))).unwrap().is_none());
    assert!(store.read_uid_and_data(Some(Duration::ZERO)).unwrap().is_none());
    assert_eq!(card.state().connects, 0);
}

#[test]
fn test_no_reader() {
    let store = TagStore::with_config(SimEnumerator::empty(), test_config());
    assert!(matches!(
        store.read_uid_and_data(Some(PRESENT)),
        Err(Error::NoReader)
    ));
}

#[test]
fn test_read_waits_for_removal() {
    let card = SimCard::new();
    card.update(|state| state.leaves_on_removal_wait = true);
    let store = store_for(&card);

    assert!(store.read_uid_and_data(Some(PRESENT)).unwrap().is_some());

    let state = card.state();
    assert!(!state.present);
    assert_eq!(state.disconnects, 1);
}

#[test]
fn test_cancelled_read() {
    let card = SimCard::new();
    card.set_present(false);
    let store = store_for(&card);

    store.context().cancellation().cancel();
    assert!(matches!(store.read_uid_and_data(None), Err(Error::Cancelled)));

    store.context().cancellation().reset();
    assert!(store.read_uid_and_data(Some(Duration::ZERO)).unwrap().is_none());
}

#[test]
fn test_card_removed_during_read() {
    let card = SimCard::new();
    card.update(|state| state.leave_after_auth = Some(8));
    let store = store_for(&card);

    let err = store.read_uid_and_data(Some(PRESENT)).unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::CardRemoved)), "{err:?}");
    assert!(!store.context().is_busy());
}
