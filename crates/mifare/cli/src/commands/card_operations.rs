//! Commands for reading, writing and erasing cards

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tagstore_apdu_core::ReaderEnumerator;
use tagstore_mifare::TagStore;
use tracing::info;

use crate::utils::display;

/// Read the next card and print its UID and text
pub(crate) fn read_command<E: ReaderEnumerator>(
    store: &TagStore<E>,
    timeout: Option<Duration>,
) -> Result<(), Box<dyn Error>> {
    println!("{}", display::info("Present a card to the reader..."));

    match store.read_uid_and_data(timeout) {
        Ok(Some(result)) => println!("{}", display::read_result(&result)),
        Ok(None) => println!("{}", display::warning("No card presented")),
        Err(e) => return Err(display::describe_error(&e).into()),
    }

    Ok(())
}

/// Write `text` to the next card
pub(crate) fn write_command<E: ReaderEnumerator>(
    store: &TagStore<E>,
    text: &str,
    present_timeout: Duration,
    absent_timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    println!("{}", display::info("Present a card to write..."));

    let result = store
        .write_text(text, present_timeout, absent_timeout)
        .map_err(|e| display::describe_error(&e))?;

    info!(uid = %result.uid, blocks = ?result.blocks, "write complete");
    println!("{}", display::success("Card written and verified"));
    println!("{}", display::write_result(&result));
    Ok(())
}

/// Erase the next card
pub(crate) fn erase_command<E: ReaderEnumerator>(
    store: &TagStore<E>,
    timeout: Option<Duration>,
) -> Result<(), Box<dyn Error>> {
    println!("{}", display::info("Present a card to erase..."));

    let report = store
        .erase_within(timeout)
        .map_err(|e| display::describe_error(&e))?;

    if report.skipped.is_empty() {
        println!("{}", display::success("Card erased"));
    } else {
        println!(
            "{}",
            display::warning("Card partially erased; some blocks use unknown keys")
        );
    }
    println!("{}", display::erase_report(&report));
    Ok(())
}

/// Print every card presented until the process is stopped
pub(crate) fn watch_command<E: ReaderEnumerator + 'static>(
    store: TagStore<E>,
    interval: Duration,
) -> Result<(), Box<dyn Error>> {
    println!("{}", display::info("Watching for cards, press Ctrl+C to stop"));

    let store = Arc::new(store);
    let poller = store.poller(interval);
    for result in poller.receiver().iter() {
        println!("{}", display::read_result(&result));
    }

    Ok(())
}
