use colored::Colorize;
use simauth_apdu_transport_pcsc::PcscDeviceManager;

/// List all available readers
pub fn list_readers(manager: &PcscDeviceManager) -> Result<(), Box<dyn std::error::Error>> {
    let readers = manager.list_readers()?;

    if readers.is_empty() {
        println!("No readers found!");
        return Ok(());
    }

    println!("Available readers:");
    for (i, reader) in readers.iter().enumerate() {
        let status = if reader.has_card() {
            "card present".green()
        } else {
            "no card".yellow()
        };
        println!("{}. {} ({})", i + 1, reader.name(), status);
        if let Some(atr) = reader.atr() {
            println!("   ATR: {}", hex::encode_upper(atr));
        }
    }

    Ok(())
}
