//! Port discovery
//!
//! Finds the Master by matching a descriptor string against the ports the
//! OS reports. When several ports match, an injected [`PortChooser`]
//! decides which one to use.

use serialport::{SerialPortInfo, SerialPortType};

use crate::error::{PipeError, Result};

/// A serial port that might be a Master module
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortCandidate {
    pub port_name: String,
    pub product: Option<String>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
}

impl PortCandidate {
    /// Candidate with only a port name
    pub fn new(port_name: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            ..Self::default()
        }
    }

    /// True if the descriptor appears in any of the port's strings (case-insensitive)
    pub fn matches(&self, descriptor: &str) -> bool {
        let needle = descriptor.to_lowercase();
        std::iter::once(Some(&self.port_name))
            .chain([
                self.product.as_ref(),
                self.manufacturer.as_ref(),
                self.serial_number.as_ref(),
            ])
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// One-line summary for listings and prompts
    pub fn describe(&self) -> String {
        match (&self.product, &self.manufacturer) {
            (Some(product), Some(manufacturer)) => {
                format!("{} ({} - {})", self.port_name, product, manufacturer)
            }
            (Some(product), None) => format!("{} ({})", self.port_name, product),
            _ => self.port_name.clone(),
        }
    }
}

impl From<SerialPortInfo> for PortCandidate {
    fn from(info: SerialPortInfo) -> Self {
        match info.port_type {
            SerialPortType::UsbPort(usb) => Self {
                port_name: info.port_name,
                product: usb.product,
                manufacturer: usb.manufacturer,
                serial_number: usb.serial_number,
            },
            _ => Self::new(info.port_name),
        }
    }
}

/// Picks one of several matching ports
pub trait PortChooser {
    /// Return the index of the chosen candidate, or `None` to give up
    fn choose(&self, candidates: &[PortCandidate]) -> Option<usize>;
}

impl<F> PortChooser for F
where
    F: Fn(&[PortCandidate]) -> Option<usize>,
{
    fn choose(&self, candidates: &[PortCandidate]) -> Option<usize> {
        self(candidates)
    }
}

/// Always takes the first match
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPort;

impl PortChooser for FirstPort {
    fn choose(&self, candidates: &[PortCandidate]) -> Option<usize> {
        if candidates.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}

/// Keep candidates matching the descriptor
pub fn filter_candidates(candidates: Vec<PortCandidate>, descriptor: &str) -> Vec<PortCandidate> {
    candidates
        .into_iter()
        .filter(|c| c.matches(descriptor))
        .collect()
}

/// Enumerate system ports matching the descriptor
pub fn available_candidates(descriptor: &str) -> Result<Vec<PortCandidate>> {
    let ports = serialport::available_ports()?;
    let all: Vec<PortCandidate> = ports.into_iter().map(PortCandidate::from).collect();
    tracing::debug!("Found {} serial ports", all.len());
    Ok(filter_candidates(all, descriptor))
}

/// Reduce matching candidates to a single port name
///
/// No match fails with `NoDeviceFound`. Several matches need a chooser;
/// without one the result is `InvalidArgument` listing the ports.
pub fn select_port(
    candidates: Vec<PortCandidate>,
    descriptor: &str,
    chooser: Option<&dyn PortChooser>,
) -> Result<String> {
    match candidates.len() {
        0 => Err(PipeError::NoDeviceFound(descriptor.to_string())),
        1 => Ok(candidates.into_iter().next().map(|c| c.port_name).unwrap_or_default()),
        n => {
            let chooser = chooser.ok_or_else(|| {
                let names: Vec<&str> = candidates.iter().map(|c| c.port_name.as_str()).collect();
                PipeError::InvalidArgument(format!(
                    "{} ports match {:?}, pick one explicitly: {}",
                    n,
                    descriptor,
                    names.join(", ")
                ))
            })?;

            let idx = chooser
                .choose(&candidates)
                .ok_or(PipeError::PortSelectionCancelled)?;

            candidates
                .into_iter()
                .nth(idx)
                .map(|c| c.port_name)
                .ok_or_else(|| {
                    PipeError::InvalidArgument(format!(
                        "port choice {} out of range (0..{})",
                        idx, n
                    ))
                })
        }
    }
}

/// Find the Master's port on this machine
pub fn find_pipe_port(descriptor: &str, chooser: Option<&dyn PortChooser>) -> Result<String> {
    let candidates = available_candidates(descriptor)?;
    let port = select_port(candidates, descriptor, chooser)?;
    tracing::info!("Using Nixie Pipe port {}", port);
    Ok(port)
}
