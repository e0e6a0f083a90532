//! Bluetooth serial port detection.

use serialport::{SerialPortInfo, SerialPortType};

/// Connection type of a serial port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Usb,
    Bluetooth,
    Pci,
    Unknown,
}

/// The parts of a serial port listing used for detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortCandidate {
    pub name: String,
    pub kind: PortKind,
    /// Manufacturer and product strings, when the OS reports them.
    pub description: String,
}

impl From<&SerialPortInfo> for PortCandidate {
    fn from(info: &SerialPortInfo) -> Self {
        let (kind, description) = match &info.port_type {
            SerialPortType::UsbPort(usb) => {
                let parts = [usb.manufacturer.as_deref(), usb.product.as_deref()];
                let description = parts.into_iter().flatten().collect::<Vec<_>>().join(" ");
                (PortKind::Usb, description)
            }
            SerialPortType::BluetoothPort => (PortKind::Bluetooth, String::new()),
            SerialPortType::PciPort => (PortKind::Pci, String::new()),
            SerialPortType::Unknown => (PortKind::Unknown, String::new()),
        };
        Self {
            name: info.port_name.clone(),
            kind,
            description,
        }
    }
}

const BLUETOOTH_MARKERS: [&str; 3] = ["bluetooth", "hc-05", "hc-06"];

impl PortCandidate {
    /// Whether this port looks like a Bluetooth serial module, judging by
    /// its type, name or description.
    #[must_use]
    pub fn looks_like_bluetooth(&self) -> bool {
        if self.kind == PortKind::Bluetooth {
            return true;
        }
        let label = format!("{} {}", self.name, self.description).to_lowercase();
        BLUETOOTH_MARKERS.iter().any(|m| label.contains(m))
    }
}

/// Name of the first port that looks like a Bluetooth module.
#[must_use]
pub fn select_bluetooth_port(ports: &[PortCandidate]) -> Option<&str> {
    ports
        .iter()
        .find(|p| p.looks_like_bluetooth())
        .map(|p| p.name.as_str())
}
