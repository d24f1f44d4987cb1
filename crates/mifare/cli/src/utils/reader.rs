use tagstore_apdu_transport_pcsc::{PcscDeviceManager, card_name_from_atr};

/// Fail unless a reader with this exact name is attached
pub(crate) fn ensure_reader_exists(
    manager: &PcscDeviceManager,
    reader_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let readers = manager.list_readers()?;

    if readers.iter().any(|r| r.name() == reader_name) {
        Ok(())
    } else {
        Err(format!("Reader '{reader_name}' not found").into())
    }
}

/// List all available readers
pub(crate) fn list_readers(manager: &PcscDeviceManager) -> Result<(), Box<dyn std::error::Error>> {
    let readers = manager.list_readers()?;

    if readers.is_empty() {
        println!("No readers found!");
        return Ok(());
    }

    println!("Available readers:");
    for (i, reader) in readers.iter().enumerate() {
        let status = match reader.atr().and_then(card_name_from_atr) {
            Some(card) => format!("{card}"),
            None if reader.has_card() => "card present".to_string(),
            None => "no card".to_string(),
        };
        println!("{}. {} ({})", i + 1, reader.name(), status);
    }

    Ok(())
}
