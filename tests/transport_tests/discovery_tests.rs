//! Discovery Tests
//!
//! Tests for descriptor matching and port selection, plus config parsing
//! of the port argument.

use std::cell::Cell;

use nixiepipe::transport::{filter_candidates, select_port, FirstPort, PortCandidate, PortChooser};
use nixiepipe::{Config, PipeError, PortSelection};

// =============================================================================
// Helper Functions
// =============================================================================

fn usb(port: &str, product: &str) -> PortCandidate {
    PortCandidate {
        port_name: port.to_string(),
        product: Some(product.to_string()),
        manufacturer: Some("JBR Engineering".to_string()),
        serial_number: None,
    }
}

// =============================================================================
// Matching Tests
// =============================================================================

#[test]
fn test_matches_product_case_insensitive() {
    assert!(usb("/dev/ttyACM0", "Nixie Pipe Master").matches("Nixie Pipe"));
    assert!(usb("/dev/ttyACM0", "NIXIE PIPE").matches("nixie pipe"));
    assert!(!usb("/dev/ttyUSB0", "FT232R USB UART").matches("Nixie Pipe"));
}

#[test]
fn test_matches_port_name() {
    assert!(PortCandidate::new("/dev/tty.NixiePipe").matches("nixiepipe"));
    assert!(!PortCandidate::new("COM3").matches("Nixie Pipe"));
}

#[test]
fn test_filter_candidates() {
    let all = vec![
        usb("/dev/ttyACM0", "Nixie Pipe"),
        usb("/dev/ttyUSB0", "CP2102"),
        usb("/dev/ttyACM1", "Nixie Pipe"),
    ];
    let matched = filter_candidates(all, "Nixie Pipe");
    let names: Vec<&str> = matched.iter().map(|c| c.port_name.as_str()).collect();
    assert_eq!(names, vec!["/dev/ttyACM0", "/dev/ttyACM1"]);
}

#[test]
fn test_describe() {
    assert_eq!(
        usb("COM4", "Nixie Pipe").describe(),
        "COM4 (Nixie Pipe - JBR Engineering)"
    );
    assert_eq!(PortCandidate::new("COM5").describe(), "COM5");
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn test_select_no_candidates() {
    let result = select_port(vec![], "Nixie Pipe", None);
    assert!(matches!(result, Err(PipeError::NoDeviceFound(_))));
}

#[test]
fn test_select_single_candidate_skips_chooser() {
    let asked = Cell::new(false);
    let chooser = |_: &[PortCandidate]| -> Option<usize> {
        asked.set(true);
        Some(0)
    };

    let port =
        select_port(vec![usb("COM3", "Nixie Pipe")], "Nixie Pipe", Some(&chooser)).unwrap();

    assert_eq!(port, "COM3");
    assert!(!asked.get());
}

#[test]
fn test_select_multiple_without_chooser() {
    let candidates = vec![usb("COM3", "Nixie Pipe"), usb("COM4", "Nixie Pipe")];
    let err = select_port(candidates, "Nixie Pipe", None).unwrap_err();
    assert!(matches!(err, PipeError::InvalidArgument(_)));
    assert!(err.to_string().contains("COM4"));
}

#[test]
fn test_select_multiple_with_chooser() {
    let candidates = vec![usb("COM3", "Nixie Pipe"), usb("COM4", "Nixie Pipe")];
    let chooser = |c: &[PortCandidate]| -> Option<usize> {
        assert_eq!(c.len(), 2);
        Some(1)
    };

    assert_eq!(select_port(candidates, "Nixie Pipe", Some(&chooser)).unwrap(), "COM4");
}

#[test]
fn test_select_first_port_chooser() {
    let candidates = vec![usb("COM3", "Nixie Pipe"), usb("COM4", "Nixie Pipe")];
    assert_eq!(select_port(candidates, "Nixie Pipe", Some(&FirstPort)).unwrap(), "COM3");
    assert_eq!(FirstPort.choose(&[]), None);
}

#[test]
fn test_select_cancelled() {
    let candidates = vec![usb("COM3", "Nixie Pipe"), usb("COM4", "Nixie Pipe")];
    let chooser = |_: &[PortCandidate]| -> Option<usize> { None };

    let result = select_port(candidates, "Nixie Pipe", Some(&chooser));
    assert!(matches!(result, Err(PipeError::PortSelectionCancelled)));
}

#[test]
fn test_select_out_of_range() {
    let candidates = vec![usb("COM3", "Nixie Pipe"), usb("COM4", "Nixie Pipe")];
    let chooser = |_: &[PortCandidate]| -> Option<usize> { Some(5) };

    let result = select_port(candidates, "Nixie Pipe", Some(&chooser));
    assert!(matches!(result, Err(PipeError::InvalidArgument(_))));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_port_selection_from_arg() {
    assert_eq!(PortSelection::from_arg("auto"), PortSelection::Auto);
    assert_eq!(PortSelection::from_arg("AUTO"), PortSelection::Auto);
    assert_eq!(PortSelection::from_arg(""), PortSelection::Auto);
    assert_eq!(
        PortSelection::from_arg("/dev/ttyACM0"),
        PortSelection::Explicit("/dev/ttyACM0".to_string())
    );
}

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.baud_rate, 57_600);
    assert_eq!(config.read_timeout_ms, 1000);
    assert_eq!(config.settle_delay_ms, 100);
    assert_eq!(config.descriptor, "Nixie Pipe");
    assert_eq!(config.port, PortSelection::Auto);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let config = Config::builder().read_timeout_ms(0).build();
    assert!(matches!(config.validate(), Err(PipeError::Config(_))));

    let config = Config::builder().baud_rate(0).build();
    assert!(config.validate().is_err());

    let config = Config::builder().port_name("").build();
    assert!(config.validate().is_err());
}
