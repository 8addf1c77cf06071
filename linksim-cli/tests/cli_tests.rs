//! Integration tests driving the command entry points and the transport

use linksim_cli::commands;
use linksim_cli::transport::{send, WireListener};
use linksim_core::channel::Channel;
use linksim_core::{
    receive, transmit, ErrorControl, FramingScheme, LineCode, LinkConfig, ModScheme,
};
use std::io::Write;

fn parity_config() -> LinkConfig {
    LinkConfig::new(
        LineCode::Nrz,
        FramingScheme::CharacterCount,
        ErrorControl::EvenParity,
        ModScheme::Ask,
    )
}

#[test]
fn tcp_exchange_round_trips_a_wire() {
    let listener = WireListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let background = listener.spawn_background();

    let config = LinkConfig::new(
        LineCode::Nrz,
        FramingScheme::CharacterCount,
        ErrorControl::Crc,
        ModScheme::Ask,
    );
    let tx = transmit("over the wire", &config).unwrap();

    // the ack only arrives after the listener stored the wire
    let ack = send(&addr, &tx.wire).unwrap();
    assert_eq!(ack, tx.wire);

    let delivered = background.latest_received().unwrap();
    let rx = receive(&delivered, &config).unwrap();
    assert_eq!(rx.text, "over the wire");
    assert!(rx.is_clean());
}

#[test]
fn tcp_channel_implements_the_collaborator_contract() {
    let listener = WireListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let _background = listener.spawn_background();

    let mut channel = linksim_cli::transport::TcpChannel::new(addr);
    let ack = channel.send("0110").unwrap();
    assert_eq!(ack, "0110");
}

#[test]
fn transmit_command_sends_to_a_listening_peer() {
    let listener = WireListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let background = listener.spawn_background();

    let config = parity_config();
    commands::transmit::execute("peer bound", &config, false, Some(&addr)).unwrap();

    let delivered = background.latest_received().unwrap();
    assert_eq!(receive(&delivered, &config).unwrap().text, "peer bound");
}

#[test]
fn receive_command_reads_the_wire_from_a_file() {
    let config = parity_config();
    let tx = transmit("file borne", &config).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", tx.wire).unwrap();

    commands::receive::execute(
        None,
        Some(file.path().to_str().unwrap()),
        &config,
        false,
    )
    .unwrap();
}

#[test]
fn receive_command_requires_a_wire_source() {
    let err = commands::receive::execute(None, None, &parity_config(), false).unwrap_err();
    assert!(err.to_string().contains("--wire or --input"));
}

#[test]
fn roundtrip_command_runs_clean() {
    let config = LinkConfig::new(
        LineCode::Manchester,
        FramingScheme::CharacterCount,
        ErrorControl::Hamming,
        ModScheme::Qam8,
    );
    commands::roundtrip::execute("demo message", &config).unwrap();
}

#[test]
fn transmit_command_emits_json() {
    commands::transmit::execute("Hi", &parity_config(), true, None).unwrap();
}
