//! Report which serial port the joystick transmitter is streaming on.

use anyhow::{Context, Result};
use joylink_launcher::{scan_ports, PortCandidate, SCAN_BAUD_RATE};
use joylink_launcher::scan::{SCAN_SETTLE, SCAN_TIMEOUT};
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Scanning available serial ports...");
    let ports: Vec<PortCandidate> = serialport::available_ports()
        .context("listing serial ports")?
        .iter()
        .map(PortCandidate::from)
        .collect();

    let hit = scan_ports(&ports, |name| {
        let port = serialport::new(name, SCAN_BAUD_RATE)
            .timeout(SCAN_TIMEOUT)
            .open()?;
        std::thread::sleep(SCAN_SETTLE);
        Ok::<_, serialport::Error>(port)
    });

    match hit {
        Some(hit) => {
            println!("{}: {}", hit.port, hit.line);
            if let Some(sample) = hit.sample {
                let (x, y) = sample.normalized(0.0);
                println!("  joystick x={} y={} ({x:+.2}, {y:+.2})", sample.x, sample.y);
            }
        }
        None => println!("No port produced data"),
    }
    info!("Scan complete.");
    Ok(())
}
