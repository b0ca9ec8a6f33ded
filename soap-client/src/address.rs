use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use crate::protocol::UPNP_PORT;

/// Network location of a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl DeviceAddress {
    /// Address a renderer on the standard control port
    pub const fn new(ip: Ipv4Addr) -> Self {
        Self { ip, port: UPNP_PORT }
    }

    pub const fn with_port(ip: Ipv4Addr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.ip, self.port)
    }
}

impl From<Ipv4Addr> for DeviceAddress {
    fn from(ip: Ipv4Addr) -> Self {
        Self::new(ip)
    }
}

impl From<[u8; 4]> for DeviceAddress {
    fn from(octets: [u8; 4]) -> Self {
        Self::new(Ipv4Addr::from(octets))
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}
