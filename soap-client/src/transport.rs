//! Byte-stream transports
//!
//! The engine talks to a renderer through the [`Transport`] trait: one
//! connection per command, written in small pieces, read until the stream
//! runs dry, then drained and closed. [`TcpTransport`] is the real thing;
//! `MemoryTransport` (tests and the `test-support` feature) replays canned
//! responses and records what was written.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use tracing::trace;

use crate::address::DeviceAddress;

/// A single-connection byte stream
pub trait Transport {
    /// Open a connection, failing if it cannot be established within `timeout`
    fn connect(&mut self, address: DeviceAddress, timeout: Duration) -> io::Result<()>;

    /// Write all of `bytes`
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Wait up to `timeout` for the first byte of a response
    ///
    /// `Ok(false)` means nothing arrived in time.
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read whatever is available; `Ok(0)` once the stream is exhausted
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Discard unread input and release the connection
    ///
    /// Must be harmless when no connection is open.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}

/// [`Transport`] over a blocking [`TcpStream`]
///
/// Reads give up after `read_timeout` of silence, which the engine treats
/// as the end of the response.
#[derive(Debug)]
pub struct TcpTransport {
    stream: Option<TcpStream>,
    read_timeout: Duration,
}

impl TcpTransport {
    pub fn new(read_timeout: Duration) -> Self {
        Self {
            stream: None,
            read_timeout,
        }
    }

    fn stream(&mut self) -> io::Result<&mut TcpStream> {
        self.stream
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no open connection"))
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new(crate::protocol::RESPONSE_TIMEOUT)
    }
}

/// A zero timeout is rejected by the socket API
fn socket_timeout(timeout: Duration) -> Option<Duration> {
    Some(timeout.max(Duration::from_millis(1)))
}

fn is_idle(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

impl Transport for TcpTransport {
    fn connect(&mut self, address: DeviceAddress, timeout: Duration) -> io::Result<()> {
        self.close();
        let target = SocketAddr::V4(address.socket_addr());
        let stream = TcpStream::connect_timeout(&target, timeout.max(Duration::from_millis(1)))?;
        stream.set_nodelay(true)?;
        self.stream = Some(stream);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream()?.write_all(bytes)
    }

    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        let read_timeout = self.read_timeout;
        let stream = self.stream()?;
        stream.set_read_timeout(socket_timeout(timeout))?;

        let ready = match stream.peek(&mut [0u8; 1]) {
            Ok(n) => n > 0,
            Err(err) if is_idle(&err) => false,
            Err(err) => return Err(err),
        };

        stream.set_read_timeout(socket_timeout(read_timeout))?;
        Ok(ready)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.stream()?.read(buf) {
            Err(err) if is_idle(&err) => Ok(0),
            other => other,
        }
    }

    fn close(&mut self) {
        let Some(mut stream) = self.stream.take() else {
            return;
        };

        let mut drained = 0usize;
        if stream.set_nonblocking(true).is_ok() {
            let mut scratch = [0u8; 64];
            while let Ok(n) = stream.read(&mut scratch) {
                if n == 0 {
                    break;
                }
                drained += n;
            }
        }
        let _ = stream.shutdown(Shutdown::Both);
        trace!(drained, "connection closed");
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

/// Lets an engine run over a borrowed transport that the caller keeps
impl<T: Transport + ?Sized> Transport for &mut T {
    fn connect(&mut self, address: DeviceAddress, timeout: Duration) -> io::Result<()> {
        (**self).connect(address, timeout)
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write(bytes)
    }

    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).wait_readable(timeout)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryTransport, Reply};

#[cfg(any(test, feature = "test-support"))]
mod memory {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use super::Transport;
    use crate::address::DeviceAddress;

    /// How a scripted device answers one connection
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Reply {
        /// The connection is refused
        Refuse,
        /// The connection opens but nothing is ever sent back
        Silent,
        /// The connection opens and these bytes are the response
        Respond(Vec<u8>),
        /// The connection opens but breaks on the first write
        FailWrite,
    }

    impl Reply {
        pub fn respond(bytes: impl Into<Vec<u8>>) -> Self {
            Reply::Respond(bytes.into())
        }
    }

    /// In-memory [`Transport`] for tests
    ///
    /// Each connection consumes the next scripted [`Reply`]; once the script
    /// is exhausted the fallback reply is used for every connection.
    #[derive(Debug)]
    pub struct MemoryTransport {
        script: VecDeque<Reply>,
        fallback: Reply,
        current: Option<Vec<u8>>,
        cursor: usize,
        broken: bool,
        read_chunk: usize,
        requests: Vec<Vec<u8>>,
        connects: usize,
        closes: usize,
        largest_write: usize,
        drained: usize,
        last_address: Option<DeviceAddress>,
    }

    impl MemoryTransport {
        /// A device that accepts connections and answers with an empty 200
        pub fn new() -> Self {
            Self::with_fallback(Reply::respond("HTTP/1.1 200 OK\r\n\r\n"))
        }

        /// A device that always answers with `response`
        pub fn responding(response: impl Into<Vec<u8>>) -> Self {
            Self::with_fallback(Reply::Respond(response.into()))
        }

        pub fn refusing() -> Self {
            Self::with_fallback(Reply::Refuse)
        }

        pub fn silent() -> Self {
            Self::with_fallback(Reply::Silent)
        }

        pub fn with_fallback(fallback: Reply) -> Self {
            Self {
                script: VecDeque::new(),
                fallback,
                current: None,
                cursor: 0,
                broken: false,
                read_chunk: 7,
                requests: Vec::new(),
                connects: 0,
                closes: 0,
                largest_write: 0,
                drained: 0,
                last_address: None,
            }
        }

        /// Queue a reply for the next connection that has no scripted reply yet
        pub fn then_reply(mut self, reply: Reply) -> Self {
            self.script.push_back(reply);
            self
        }

        /// Deliver at most `size` bytes per read
        pub fn with_read_chunk(mut self, size: usize) -> Self {
            self.read_chunk = size.max(1);
            self
        }

        /// Every request written, one entry per successful connection
        pub fn requests(&self) -> &[Vec<u8>] {
            &self.requests
        }

        pub fn last_request(&self) -> &[u8] {
            self.requests.last().map(Vec::as_slice).unwrap_or_default()
        }

        pub fn last_request_str(&self) -> &str {
            std::str::from_utf8(self.last_request()).unwrap_or_default()
        }

        /// Body of the last request, after the blank line ending the header
        pub fn last_body_str(&self) -> &str {
            let request = self.last_request_str();
            request.split_once("\n\n").map(|(_, body)| body).unwrap_or_default()
        }

        pub fn connect_count(&self) -> usize {
            self.connects
        }

        pub fn close_count(&self) -> usize {
            self.closes
        }

        pub fn largest_write(&self) -> usize {
            self.largest_write
        }

        /// Response bytes discarded by `close` because nobody read them
        pub fn drained(&self) -> usize {
            self.drained
        }

        pub fn last_address(&self) -> Option<DeviceAddress> {
            self.last_address
        }
    }

    impl Default for MemoryTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for MemoryTransport {
        fn connect(&mut self, address: DeviceAddress, _timeout: Duration) -> io::Result<()> {
            self.last_address = Some(address);
            let reply = self.script.pop_front().unwrap_or_else(|| self.fallback.clone());
            match reply {
                Reply::Refuse => Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused")),
                Reply::Silent => {
                    self.open(Vec::new());
                    Ok(())
                }
                Reply::Respond(bytes) => {
                    self.open(bytes);
                    Ok(())
                }
                Reply::FailWrite => {
                    self.open(Vec::new());
                    self.broken = true;
                    Ok(())
                }
            }
        }

        fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
            if self.current.is_none() {
                return Err(io::Error::new(io::ErrorKind::NotConnected, "no open connection"));
            }
            if self.broken {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset by peer"));
            }
            self.largest_write = self.largest_write.max(bytes.len());
            if let Some(request) = self.requests.last_mut() {
                request.extend_from_slice(bytes);
            }
            Ok(())
        }

        fn wait_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(self.remaining() > 0)
        }

        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let Some(response) = &self.current else {
                return Err(io::Error::new(io::ErrorKind::NotConnected, "no open connection"));
            };
            let n = buf.len().min(self.read_chunk).min(response.len() - self.cursor);
            buf[..n].copy_from_slice(&response[self.cursor..self.cursor + n]);
            self.cursor += n;
            Ok(n)
        }

        fn close(&mut self) {
            if self.current.is_some() {
                self.drained += self.remaining();
                self.current = None;
                self.cursor = 0;
            }
            self.closes += 1;
        }

        fn is_open(&self) -> bool {
            self.current.is_some()
        }
    }

    impl MemoryTransport {
        fn open(&mut self, response: Vec<u8>) {
            self.connects += 1;
            self.current = Some(response);
            self.cursor = 0;
            self.broken = false;
            self.requests.push(Vec::new());
        }

        fn remaining(&self) -> usize {
            self.current.as_ref().map_or(0, |response| response.len() - self.cursor)
        }
    }
}
