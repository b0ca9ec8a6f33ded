//! Typed control of Sonos speakers
//!
//! [`SonosClient`] turns playback, volume, queue and grouping commands into
//! SOAP actions and runs them through the fixed-buffer engine of the
//! `soap-client` crate. Responses are reduced to typed values by the
//! conversions in [`codec`].
//!
//! ```rust,no_run
//! use sonos_api::{PlayMode, SonosClient, TransportState};
//! use std::net::Ipv4Addr;
//!
//! let speaker = Ipv4Addr::new(192, 168, 1, 100);
//! let mut client = SonosClient::with_error_handler(|| eprintln!("speaker unreachable"));
//!
//! client.play_http(speaker, "//radio.example.com/stream.mp3")?;
//! client.set_play_mode(speaker, PlayMode::REPEAT_ALL)?;
//!
//! if client.get_state(speaker)? == TransportState::Playing {
//!     client.set_volume(speaker, 30)?;
//! }
//! # Ok::<(), sonos_api::ApiError>(())
//! ```

#[macro_use]
mod macros;

pub mod actions;
pub mod client;
pub mod codec;
pub mod error;
pub mod logging;

pub use client::{Direction, SonosClient, TrackInfo};
pub use codec::{PlayMode, SourceScheme, TransportState};
pub use error::{ApiError, Result};

pub use soap_client::{
    CommandEngine, DeviceAddress, EngineConfig, ErrorHandler, NoopHandler, Service, TcpTransport, Transport,
    ValueBuffer, ValueSink,
};
