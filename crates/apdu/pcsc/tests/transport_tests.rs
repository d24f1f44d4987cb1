//! Tests for the PC/SC transport against real hardware
//!
//! Every test skips itself when no PC/SC service, reader or card is around.

mod common;

use std::time::Duration;

use tagstore_apdu_core::prelude::*;
use tagstore_apdu_transport_pcsc::card_name_from_atr;

#[test]
fn test_list_readers() {
    let Some(manager) = common::get_manager() else {
        println!("Skipping test, PC/SC not available");
        return;
    };

    // Zero readers is a valid answer, not an error
    let readers = manager.list_readers().expect("listing readers");
    for reader in &readers {
        println!(
            "{} (card: {}, type: {:?})",
            reader.name(),
            reader.has_card(),
            reader.atr().and_then(card_name_from_atr)
        );
    }
}

#[test]
fn test_wait_for_card_is_bounded() {
    let Some(mut terminal) = common::get_test_terminal() else {
        println!("Skipping test, no reader available");
        return;
    };

    let started = std::time::Instant::now();
    let present = terminal
        .wait_for_card(Some(Duration::from_millis(200)))
        .expect("waiting for card");
    if !present {
        assert!(started.elapsed() >= Duration::from_millis(150));
    }
}

#[test]
fn test_get_uid() {
    let Some(mut terminal) = common::get_test_terminal() else {
        println!("Skipping test, no reader available");
        return;
    };

    if !terminal.wait_for_card(Some(Duration::ZERO)).unwrap_or(false) {
        println!("Skipping test, no card in reader");
        return;
    }

    let transport = match terminal.connect() {
        Ok(transport) => transport,
        Err(e) => {
            println!("Could not connect to card: {:?}", e);
            return;
        }
    };
    assert!(transport.is_connected());

    let mut executor = CardExecutor::new(transport);
    match executor.transmit_raw(&[0xFF, 0xCA, 0x00, 0x00, 0x00]) {
        Ok(reply) => {
            let response = Response::from_bytes(&reply).expect("reply carries a status word");
            assert!(response.is_success());
            let uid = response.payload().clone().unwrap_or_default();
            println!("UID: {}", hex::encode_upper(&uid));
        }
        Err(e) => println!("GET DATA failed (might be expected): {:?}", e),
    }
}
