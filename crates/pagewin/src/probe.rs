#![forbid(unsafe_code)]

//! Blocking TCP reachability probe.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpStream};
use std::time::Duration;

use crate::traits::ConnectivityProbe;

/// Checks reachability by opening a TCP connection to a well-known
/// endpoint with a bounded timeout.
///
/// The default target is a public DNS resolver (8.8.8.8:53) with a
/// 1500 ms timeout. The probe blocks for up to the timeout, so it should
/// be invoked off the pager's owning sequence or replaced with a cached
/// implementation when latency matters.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: SocketAddr,
    timeout: Duration,
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53),
            timeout: Duration::from_millis(1500),
        }
    }
}

impl TcpProbe {
    /// Probe a custom endpoint with a custom timeout.
    #[must_use]
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }

    /// Endpoint the probe connects to.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Connection timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ConnectivityProbe for TcpProbe {
    fn is_online(&self) -> bool {
        TcpStream::connect_timeout(&self.addr, self.timeout).is_ok()
    }
}
