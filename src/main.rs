use anyhow::Result;
use tracing::info;

use rampart_uci::UciEngine;

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the UCI protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    info!("rampart starting");

    let mut engine = UciEngine::new();
    engine.run()?;
    Ok(())
}
