//! Fixed-buffer SOAP engine for UPnP media renderers
//!
//! This crate drives the control services of a Sonos-style renderer without
//! growable buffers on the command path. Requests are composed straight onto
//! the transport with a `Content-Length` worked out in advance, and responses
//! are scanned one byte at a time for the values the caller asked for, which
//! land in fixed-size [`ValueBuffer`]s.
//!
//! ```no_run
//! use soap_client::{Command, CommandEngine, DeviceAddress, Service, TcpTransport, ValueBuffer};
//! use std::net::Ipv4Addr;
//!
//! let mut engine = CommandEngine::new(TcpTransport::default());
//! let speaker = DeviceAddress::new(Ipv4Addr::new(192, 168, 1, 100));
//!
//! let get_volume = Command::new(Service::RenderingControl, "GetVolume").with_field("Channel", "Master");
//! let mut volume = ValueBuffer::<4>::with_default("0");
//! engine.query(
//!     speaker,
//!     &get_volume,
//!     &["s:Envelope", "s:Body", "u:GetVolumeResponse", "CurrentVolume"],
//!     &mut volume,
//! )?;
//! println!("volume: {}", volume.as_str());
//! # Ok::<(), soap_client::SoapError>(())
//! ```

mod address;
mod buffer;
mod command;
mod config;
mod engine;
mod error;
mod matcher;
pub mod protocol;
pub mod request;
mod service;
mod transport;

pub use address::DeviceAddress;
pub use buffer::{ValueBuffer, ValueSink};
pub use command::{Command, Extra, Field};
pub use config::EngineConfig;
pub use engine::{CommandEngine, EngineState, ErrorHandler, FieldQuery, NoopHandler};
pub use error::SoapError;
pub use matcher::{TagPath, TagPathMatcher};
pub use service::{Service, ServiceInfo};
pub use transport::{TcpTransport, Transport};

#[cfg(any(test, feature = "test-support"))]
pub use transport::{MemoryTransport, Reply};
