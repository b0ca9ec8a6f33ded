//! Request composer
//!
//! Writes the HTTP header block and SOAP body for a [`Command`] straight to a
//! [`Transport`], fragment by fragment, without assembling the body in memory.
//! The `Content-Length` header is computed up front by [`content_length`],
//! a closed-form sum that mirrors the fragment order of [`body_fragments`]
//! term for term. Adding a fragment to one means adding its term to the other.

use std::io::{self, Cursor, Write};

use crate::address::DeviceAddress;
use crate::command::Command;
use crate::protocol::*;
use crate::transport::Transport;

/// Upper bound on the number of body fragments any command produces
pub const MAX_BODY_FRAGMENTS: usize = 25;

/// Length of the body the composer will write for `command`
pub fn content_length(command: &Command<'_>) -> usize {
    let service_id = command.service.info().service_id;

    let mut length = SOAP_ENVELOPE_START.len()
        + SOAP_BODY_START.len()
        + ACTION_TAG_LEN
        + command.action.len() * 2
        + UPNP_URN_SCHEMA.len()
        + service_id.len()
        + INSTANCE_ID_0_TAG.len()
        + SOAP_BODY_END.len()
        + SOAP_ENVELOPE_END.len();

    if let Some(field) = &command.field {
        length += FIELD_TAG_LEN + field.name.len() * 2 + field.value.len() + field.value_suffix.len();
    }

    if let Some(extra) = &command.extra {
        length += extra.prefix.len() + extra.value.len() + extra.suffix.len();
    }

    length
}

/// Ordered body fragments for one command
///
/// Concatenating the fragments yields exactly [`content_length`] bytes.
#[derive(Debug, Clone)]
pub struct BodyFragments<'a> {
    parts: [&'a str; MAX_BODY_FRAGMENTS],
    len: usize,
}

impl<'a> BodyFragments<'a> {
    fn push(&mut self, part: &'a str) {
        self.parts[self.len] = part;
        self.len += 1;
    }

    /// Iterate the fragments in emission order
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parts[..self.len].iter().copied()
    }

    /// Number of fragments, not bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Lay out the body of `command` as a fixed sequence of borrowed fragments
pub fn body_fragments<'a>(command: &Command<'a>) -> BodyFragments<'a> {
    let mut body = BodyFragments {
        parts: [""; MAX_BODY_FRAGMENTS],
        len: 0,
    };

    body.push(SOAP_ENVELOPE_START);
    body.push(SOAP_BODY_START);
    body.push(ACTION_START_TAG_START);
    body.push(command.action);
    body.push(ACTION_START_TAG_NS);
    body.push(UPNP_URN_SCHEMA);
    body.push(command.service.info().service_id);
    body.push(ACTION_START_TAG_END);
    body.push(INSTANCE_ID_0_TAG);

    if let Some(field) = &command.field {
        body.push(FIELD_OPEN_START);
        body.push(field.name);
        body.push(FIELD_TAG_END);
        body.push(field.value);
        body.push(field.value_suffix);
        body.push(FIELD_CLOSE_START);
        body.push(field.name);
        body.push(FIELD_TAG_END);
    }

    if let Some(extra) = &command.extra {
        body.push(extra.prefix);
        body.push(extra.value);
        body.push(extra.suffix);
    }

    body.push(ACTION_END_TAG_START);
    body.push(command.action);
    body.push(ACTION_END_TAG_END);
    body.push(SOAP_BODY_END);
    body.push(SOAP_ENVELOPE_END);

    body
}

/// Write the complete request for `command` to an open transport
///
/// Every fragment is written in pieces of at most `chunk_size` bytes.
pub fn write_request<T: Transport + ?Sized>(
    transport: &mut T,
    address: DeviceAddress,
    command: &Command<'_>,
    chunk_size: usize,
) -> io::Result<()> {
    let info = command.service.info();
    let mut writer = ChunkedWriter {
        transport,
        chunk_size: chunk_size.max(1),
    };

    writer.write(HTTP_POST)?;
    writer.write(info.endpoint)?;
    writer.write(HTTP_VERSION)?;

    writer.write(HEADER_HOST)?;
    writer.write_display(format_args!("{}:{}", address.ip, address.port))?;
    writer.write(LINE_END)?;
    writer.write(HEADER_CONTENT_TYPE)?;
    writer.write(HEADER_CONTENT_LENGTH)?;
    writer.write_display(format_args!("{}", content_length(command)))?;
    writer.write(LINE_END)?;
    writer.write(HEADER_SOAP_ACTION)?;
    writer.write(UPNP_URN_SCHEMA)?;
    writer.write(info.service_id)?;
    writer.write("#")?;
    writer.write(command.action)?;
    writer.write(HEADER_SOAP_ACTION_END)?;
    writer.write(HEADER_CONNECTION)?;
    writer.write(LINE_END)?;

    for fragment in body_fragments(command).iter() {
        writer.write(fragment)?;
    }

    Ok(())
}

struct ChunkedWriter<'t, T: ?Sized> {
    transport: &'t mut T,
    chunk_size: usize,
}

impl<T: Transport + ?Sized> ChunkedWriter<'_, T> {
    fn write(&mut self, fragment: &str) -> io::Result<()> {
        for chunk in fragment.as_bytes().chunks(self.chunk_size) {
            self.transport.write(chunk)?;
        }
        Ok(())
    }

    /// Format a short header value on the stack; 32 bytes covers
    /// `255.255.255.255:65535` and any `usize` length
    fn write_display(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        let mut cursor = Cursor::new([0u8; 32]);
        cursor.write_fmt(args)?;
        let written = cursor.position() as usize;
        let bytes = cursor.into_inner();
        for chunk in bytes[..written].chunks(self.chunk_size) {
            self.transport.write(chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Service;
    use crate::transport::MemoryTransport;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::net::Ipv4Addr;

    fn address() -> DeviceAddress {
        DeviceAddress::new(Ipv4Addr::new(192, 168, 1, 100))
    }

    fn body_of(command: &Command<'_>) -> String {
        body_fragments(command).iter().collect()
    }

    fn compose(command: &Command<'_>, chunk_size: usize) -> String {
        let mut transport = MemoryTransport::new();
        transport.connect(address(), std::time::Duration::from_secs(1)).unwrap();
        write_request(&mut transport, address(), command, chunk_size).unwrap();
        transport.last_request_str().to_string()
    }

    #[rstest]
    #[case::no_field(Command::new(Service::AVTransport, "Stop"))]
    #[case::field_only(Command::new(Service::AVTransport, "Play").with_field("Speed", "1"))]
    #[case::split_field(
        Command::new(Service::AVTransport, "AddURIToQueue")
            .with_split_field("EnqueuedURI", "x-file-cifs:", "//nas/music/a.flac")
    )]
    #[case::field_and_extra(
        Command::new(Service::RenderingControl, "SetVolume")
            .with_field("DesiredVolume", "57")
            .with_extra("<Channel>", "Master", "</Channel>")
    )]
    #[case::empty_extra_value(
        Command::new(Service::AVTransport, "SetAVTransportURI")
            .with_split_field("CurrentURI", "x-sonos-http:", "track.mp3")
            .with_extra("<CurrentURIMetaData>", "", "</CurrentURIMetaData>")
    )]
    #[case::extra_without_field(
        Command::new(Service::DeviceProperties, "SetLEDState").with_extra("<A>", "b", "</A>")
    )]
    fn test_content_length_matches_body(#[case] command: Command<'static>) {
        assert_eq!(content_length(&command), body_of(&command).len());
    }

    #[test]
    fn test_bare_body_layout() {
        let body = body_of(&Command::new(Service::AVTransport, "Pause"));
        assert_eq!(
            body,
            concat!(
                "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
                "s:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">",
                "<s:Body><u:Pause xmlns:u=\"urn:schemas-upnp-org:service:AVTransport:1\">",
                "<InstanceID>0</InstanceID></u:Pause></s:Body></s:Envelope>"
            )
        );
    }

    #[test]
    fn test_field_and_extra_order() {
        let command = Command::new(Service::RenderingControl, "SetVolume")
            .with_field("DesiredVolume", "57")
            .with_extra("<Channel>", "Master", "</Channel>");

        let body = body_of(&command);
        assert!(body.contains(
            "<InstanceID>0</InstanceID><DesiredVolume>57</DesiredVolume><Channel>Master</Channel></u:SetVolume>"
        ));
    }

    #[test]
    fn test_body_is_well_formed() {
        let command = Command::new(Service::AVTransport, "Seek")
            .with_field("Target", "0:01:02")
            .with_extra("<Unit>", "REL_TIME", "</Unit>");

        let xml = xmltree::Element::parse(body_of(&command).as_bytes()).unwrap();
        assert_eq!(xml.name, "Envelope");

        let action = xml
            .get_child("Body")
            .and_then(|body| body.get_child("Seek"))
            .expect("action element");
        assert_eq!(action.get_child("InstanceID").and_then(|e| e.get_text()).unwrap(), "0");
        assert_eq!(action.get_child("Target").and_then(|e| e.get_text()).unwrap(), "0:01:02");
        assert_eq!(action.get_child("Unit").and_then(|e| e.get_text()).unwrap(), "REL_TIME");
    }

    #[test]
    fn test_header_block() {
        let command = Command::new(Service::RenderingControl, "GetVolume").with_field("Channel", "Master");
        let request = compose(&command, 49);
        let expected_header = format!(
            concat!(
                "POST /MediaRenderer/RenderingControl/Control HTTP/1.1\n",
                "Host: 192.168.1.100:1400\n",
                "Content-Type: text/xml; charset=\"utf-8\"\n",
                "Content-Length: {}\n",
                "SOAPAction: \"urn:schemas-upnp-org:service:RenderingControl:1#GetVolume\"\n",
                "Connection: close\n",
                "\n"
            ),
            content_length(&command)
        );

        assert!(request.starts_with(&expected_header));
        assert_eq!(&request[expected_header.len()..], body_of(&command));
    }

    #[test]
    fn test_declared_length_matches_bytes_after_header() {
        let command = Command::new(Service::AVTransport, "SetPlayMode").with_field("NewPlayMode", "SHUFFLE");
        let request = compose(&command, 49);

        let (header, body) = request.split_once("\n\n").unwrap();
        let declared: usize = header
            .lines()
            .find_map(|line| line.strip_prefix("Content-Length: "))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(declared, body.len());
    }

    #[test]
    fn test_writes_respect_chunk_size() {
        let command = Command::new(Service::AVTransport, "Play").with_field("Speed", "1");
        let mut transport = MemoryTransport::new();
        transport.connect(address(), std::time::Duration::from_secs(1)).unwrap();
        write_request(&mut transport, address(), &command, 8).unwrap();

        assert!(transport.largest_write() <= 8);
        assert_eq!(transport.last_request_str(), compose(&command, 49));
    }

    proptest! {
        #[test]
        fn prop_content_length_agrees(
            action in "[A-Za-z]{1,40}",
            field in "[A-Za-z]{0,20}",
            value_a in "[ -~]{0,60}",
            value_b in "[ -~]{0,60}",
            extra in proptest::option::of(("[ -~]{0,80}", "[ -~]{0,40}", "[ -~]{0,80}")),
        ) {
            let mut command = Command::new(Service::RenderingControl, &action)
                .with_split_field(&field, &value_a, &value_b);
            if let Some((prefix, value, suffix)) = &extra {
                command = command.with_extra(prefix, value, suffix);
            }
            prop_assert_eq!(content_length(&command), body_of(&command).len());
        }
    }
}
