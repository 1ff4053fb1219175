//! Printer address resolution.
//!
//! Registry entries usually hold a bare IP, but hostnames and explicit ports
//! are accepted too: `IP`, `IP:PORT`, `hostname`, `hostname:PORT`.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use crate::PrintError;

/// Raw printing port on Zebra network printers.
pub const DEFAULT_PORT: u16 = 9100;

/// Resolve a printer address to a socket address, defaulting the port to
/// [`DEFAULT_PORT`].
///
/// The first resolved address wins when a hostname maps to several.
///
/// IP literals are parsed without a lookup. Hostnames go through the system
/// resolver, which blocks for as long as it takes: the connect and write
/// timeouts in [`PrinterTimeouts`](crate::PrinterTimeouts) do not cover it.
/// Registries that must fail within the timeout should hold IP addresses.
pub fn resolve_address(input: &str) -> Result<SocketAddr, PrintError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PrintError::NoAddressFound(String::new()));
    }

    // Literal forms need no lookup.
    if let Ok(addr) = input.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = input.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    // `host:port`, then bare `host`.
    let resolved = input
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .or_else(|| {
            (input, DEFAULT_PORT)
                .to_socket_addrs()
                .ok()
                .and_then(|mut addrs| addrs.next())
        });

    resolved.ok_or_else(|| PrintError::NoAddressFound(input.to_string()))
}
