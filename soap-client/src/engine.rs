//! Command engine
//!
//! Runs one command at a time over a [`Transport`]: connect, write the
//! request, wait for the first response byte, optionally extract fields with
//! the [`TagPathMatcher`], then drain and close. The close step runs on every
//! exit path, so the engine never holds an open connection between calls.
//!
//! ```text
//! Idle -> Connecting -> Sending -> AwaitingResponse -> Extracting -> Closing -> Idle
//!             |                          |
//!             +--------> Aborted <-------+        (Aborted -> Closing -> Idle)
//! ```

use std::fmt;

use tracing::{debug, trace, warn};

use crate::address::DeviceAddress;
use crate::buffer::ValueSink;
use crate::command::Command;
use crate::config::EngineConfig;
use crate::error::SoapError;
use crate::matcher::{TagPath, TagPathMatcher};
use crate::request;
use crate::transport::Transport;

/// Bytes pulled from the transport per read during extraction
const READ_CHUNK: usize = 64;

/// Notification hook for connect failures and response timeouts
///
/// The hook carries no detail; the failing call's `Err` has it. Any
/// `Fn()` closure is a handler.
pub trait ErrorHandler {
    fn on_transport_error(&self);
}

impl<F: Fn()> ErrorHandler for F {
    fn on_transport_error(&self) {
        self()
    }
}

/// Handler that ignores transport errors
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl ErrorHandler for NoopHandler {
    fn on_transport_error(&self) {}
}

/// Where the engine is in the life of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Connecting,
    Sending,
    AwaitingResponse,
    Extracting,
    Closing,
    Aborted,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Idle => "idle",
            EngineState::Connecting => "connecting",
            EngineState::Sending => "sending",
            EngineState::AwaitingResponse => "awaiting-response",
            EngineState::Extracting => "extracting",
            EngineState::Closing => "closing",
            EngineState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// One value to pull out of a response
pub struct FieldQuery<'b> {
    pub path: TagPath,
    pub out: &'b mut dyn ValueSink,
}

impl<'b> FieldQuery<'b> {
    pub fn new(path: TagPath, out: &'b mut dyn ValueSink) -> Self {
        Self { path, out }
    }
}

impl fmt::Debug for FieldQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldQuery").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Single-flight SOAP command runner
///
/// Every method takes `&mut self`, so one engine never has two commands in
/// flight.
pub struct CommandEngine<T, H = NoopHandler> {
    transport: T,
    handler: H,
    matcher: TagPathMatcher,
    config: EngineConfig,
    state: EngineState,
}

impl<T: Transport> CommandEngine<T, NoopHandler> {
    pub fn new(transport: T) -> Self {
        Self::with_handler(transport, NoopHandler)
    }
}

impl<T: Transport, H: ErrorHandler> CommandEngine<T, H> {
    pub fn with_handler(transport: T, handler: H) -> Self {
        Self {
            transport,
            handler,
            matcher: TagPathMatcher::new(),
            config: EngineConfig::default(),
            state: EngineState::Idle,
        }
    }

    /// Replace the configuration after validating it
    pub fn with_config(mut self, config: EngineConfig) -> Result<Self, SoapError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Run a write-only command
    ///
    /// Succeeds once the device has started answering; the answer itself is
    /// discarded.
    pub fn send(&mut self, address: DeviceAddress, command: &Command<'_>) -> Result<(), SoapError> {
        self.run(address, command, &mut []).map(|_| ())
    }

    /// Run a command and extract one field from its response
    ///
    /// `Ok(false)` means the field never appeared or the response ended
    /// inside its text; `out` then holds what it held before the call.
    pub fn query(
        &mut self,
        address: DeviceAddress,
        command: &Command<'_>,
        path: TagPath,
        out: &mut dyn ValueSink,
    ) -> Result<bool, SoapError> {
        let mut queries = [FieldQuery::new(path, out)];
        self.run(address, command, &mut queries).map(|found| found == 1)
    }

    /// Run a command and extract several fields from one response
    ///
    /// Fields are searched for in slice order, which must match document
    /// order. Extraction stops at the first field that is not found; the
    /// return value counts the fields that were.
    pub fn query_fields(
        &mut self,
        address: DeviceAddress,
        command: &Command<'_>,
        queries: &mut [FieldQuery<'_>],
    ) -> Result<usize, SoapError> {
        self.run(address, command, queries)
    }

    fn run(
        &mut self,
        address: DeviceAddress,
        command: &Command<'_>,
        queries: &mut [FieldQuery<'_>],
    ) -> Result<usize, SoapError> {
        let result = self.exchange(address, command, queries);

        self.transition(EngineState::Closing);
        self.transport.close();
        self.transition(EngineState::Idle);

        if let Err(err) = &result {
            if err.is_transport_failure() {
                self.handler.on_transport_error();
            }
        }
        result
    }

    fn exchange(
        &mut self,
        address: DeviceAddress,
        command: &Command<'_>,
        queries: &mut [FieldQuery<'_>],
    ) -> Result<usize, SoapError> {
        self.matcher.reset();

        self.transition(EngineState::Connecting);
        if let Err(err) = self.transport.connect(address, self.config.connect_timeout) {
            warn!(%address, action = command.action, error = %err, "Failed to connect");
            self.transition(EngineState::Aborted);
            return Err(SoapError::Connect(format!("{address}: {err}")));
        }

        self.transition(EngineState::Sending);
        debug!(
            %address,
            service = command.service.name(),
            action = command.action,
            content_length = request::content_length(command),
            "Sending command"
        );
        request::write_request(&mut self.transport, address, command, self.config.write_chunk_size)
            .map_err(|err| SoapError::Network(err.to_string()))?;

        self.transition(EngineState::AwaitingResponse);
        let ready = match self.transport.wait_readable(self.config.response_timeout) {
            Ok(ready) => ready,
            Err(err) => {
                debug!(%address, error = %err, "Session failed while waiting for response");
                false
            }
        };
        if !ready {
            warn!(
                %address,
                action = command.action,
                timeout_ms = self.config.response_timeout.as_millis() as u64,
                "No response before timeout"
            );
            self.transition(EngineState::Aborted);
            return Err(SoapError::Timeout(self.config.response_timeout));
        }

        if queries.is_empty() {
            return Ok(0);
        }

        self.transition(EngineState::Extracting);
        let found = self.extract(queries);
        if found < queries.len() {
            debug!(
                action = command.action,
                path = ?queries[found].path,
                "Response ended before the field was found"
            );
        }
        Ok(found)
    }

    fn extract(&mut self, queries: &mut [FieldQuery<'_>]) -> usize {
        let mut chunk = [0u8; READ_CHUNK];
        let mut filled = 0;
        let mut pos = 0;
        let mut found = 0;

        for query in queries.iter_mut() {
            self.matcher.set_path(query.path);
            loop {
                if pos == filled {
                    filled = match self.transport.read(&mut chunk) {
                        Ok(0) | Err(_) => {
                            // Cut off inside the value
                            if self.matcher.is_capturing() {
                                query.out.abort();
                            }
                            return found;
                        }
                        Ok(n) => n,
                    };
                    pos = 0;
                }

                let byte = chunk[pos];
                pos += 1;
                if self.matcher.feed(byte, &mut *query.out) {
                    found += 1;
                    break;
                }
            }
        }
        found
    }

    fn transition(&mut self, next: EngineState) {
        trace!(from = %self.state, to = %next, "engine transition");
        self.state = next;
    }
}

impl<T: fmt::Debug, H> fmt::Debug for CommandEngine<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEngine")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
