//! End-to-end tests against a local TCP listener standing in for a renderer

use std::cell::Cell;
use std::io::{Read, Write};
use std::net::{Ipv4Addr, TcpListener};
use std::thread;
use std::time::Duration;

use soap_client::{
    Command, CommandEngine, DeviceAddress, EngineConfig, Service, SoapError, TcpTransport, Transport, ValueBuffer,
};

/// Accept one connection, read the full request, answer with `response`
fn serve_once(response: &'static str) -> (u16, thread::JoinHandle<String>) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 256];

        // Header block first, then exactly Content-Length body bytes
        let body_len = loop {
            let n = socket.read(&mut buf).unwrap();
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some((header, _)) = text.split_once("\n\n") {
                let declared: usize = header
                    .lines()
                    .find_map(|line| line.strip_prefix("Content-Length: "))
                    .unwrap()
                    .parse()
                    .unwrap();
                break header.len() + 2 + declared;
            }
        };
        while request.len() < body_len {
            let n = socket.read(&mut buf).unwrap();
            request.extend_from_slice(&buf[..n]);
        }

        socket.write_all(response.as_bytes()).unwrap();
        String::from_utf8(request).unwrap()
    });

    (port, handle)
}

fn engine() -> CommandEngine<TcpTransport> {
    let config = EngineConfig::new()
        .with_response_timeout(Duration::from_secs(2))
        .with_read_timeout(Duration::from_millis(300));
    CommandEngine::new(TcpTransport::new(config.read_timeout))
        .with_config(config)
        .unwrap()
}

#[test]
fn set_volume_writes_field_then_channel() {
    let (port, server) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
    let mut engine = engine();

    let command = Command::new(Service::RenderingControl, "SetVolume")
        .with_field("DesiredVolume", "57")
        .with_extra("<Channel>", "Master", "</Channel>");
    engine
        .send(DeviceAddress::with_port(Ipv4Addr::LOCALHOST, port), &command)
        .unwrap();

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /MediaRenderer/RenderingControl/Control HTTP/1.1\n"));
    assert!(request.contains(&format!("Host: 127.0.0.1:{port}\n")));
    assert!(request.contains(concat!(
        "<u:SetVolume xmlns:u=\"urn:schemas-upnp-org:service:RenderingControl:1\">",
        "<InstanceID>0</InstanceID><DesiredVolume>57</DesiredVolume><Channel>Master</Channel>",
        "</u:SetVolume></s:Body></s:Envelope>"
    )));
}

#[test]
fn get_volume_reads_current_volume() {
    let (port, server) = serve_once(concat!(
        "HTTP/1.1 200 OK\r\nCONTENT-TYPE: text/xml; charset=\"utf-8\"\r\n\r\n",
        "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
        "s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\"><s:Body>",
        "<u:GetVolumeResponse xmlns:u=\"urn:schemas-upnp-org:service:RenderingControl:1\">",
        "<CurrentVolume>57</CurrentVolume></u:GetVolumeResponse></s:Body></s:Envelope>"
    ));
    let mut engine = engine();
    let mut volume = ValueBuffer::<4>::with_default("0");

    let found = engine
        .query(
            DeviceAddress::with_port(Ipv4Addr::LOCALHOST, port),
            &Command::new(Service::RenderingControl, "GetVolume").with_field("Channel", "Master"),
            &["s:Envelope", "s:Body", "u:GetVolumeResponse", "CurrentVolume"],
            &mut volume,
        )
        .unwrap();

    server.join().unwrap();
    assert!(found);
    assert_eq!(volume.as_str(), "57");
    assert!(!engine.transport().is_open());
}

#[test]
fn refused_connection_is_reported() {
    let port = {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        listener.local_addr().unwrap().port()
    };

    let failures = Cell::new(0);
    let mut engine = CommandEngine::with_handler(TcpTransport::default(), || failures.set(failures.get() + 1));

    let command = Command::new(Service::RenderingControl, "SetVolume")
        .with_field("DesiredVolume", "57")
        .with_extra("<Channel>", "Master", "</Channel>");
    let err = engine
        .send(DeviceAddress::with_port(Ipv4Addr::LOCALHOST, port), &command)
        .unwrap_err();

    assert!(matches!(err, SoapError::Connect(_)));
    assert_eq!(failures.get(), 1);
}
