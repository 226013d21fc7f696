//! Local LAN address discovery.
//!
//! The rule is deliberately narrow: only `192.168.0.0/16` counts as "the LAN".
//! Hosts on `10/8` or `172.16/12` get `"localhost"`, same as hosts with no
//! usable interface at all.

use std::io;
use std::net::Ipv4Addr;

/// Returned when no LAN address is found.
pub const FALLBACK_HOST: &str = "localhost";

/// First non-loopback `192.168.x.x` interface address, or `"localhost"`.
pub fn local_ip() -> String {
    match interface_ipv4_addrs() {
        Ok(addrs) => pick_lan_address(&addrs)
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| {
                log::debug!("no 192.168 address among {} interfaces", addrs.len());
                FALLBACK_HOST.to_string()
            }),
        Err(e) => {
            log::warn!("interface enumeration failed: {e}");
            FALLBACK_HOST.to_string()
        }
    }
}

/// Selection rule used by [`local_ip`], in interface order.
pub fn pick_lan_address(addrs: &[Ipv4Addr]) -> Option<Ipv4Addr> {
    addrs
        .iter()
        .copied()
        .find(|ip| !ip.is_loopback() && matches!(ip.octets(), [192, 168, _, _]))
}

/// IPv4 addresses of every interface, in the order the OS reports them.
#[cfg(unix)]
pub fn interface_ipv4_addrs() -> io::Result<Vec<Ipv4Addr>> {
    /// Frees the `getifaddrs` list on every exit path.
    struct IfAddrs(*mut libc::ifaddrs);

    impl Drop for IfAddrs {
        fn drop(&mut self) {
            if !self.0.is_null() {
                // SAFETY: pointer came from a successful `getifaddrs` and is freed once.
                unsafe { libc::freeifaddrs(self.0) };
            }
        }
    }

    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
    // SAFETY: `getifaddrs` writes a list head into a valid out-pointer.
    if unsafe { libc::getifaddrs(&mut head) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let list = IfAddrs(head);

    let mut addrs = Vec::new();
    let mut cursor = list.0;
    while !cursor.is_null() {
        // SAFETY: `cursor` walks the list owned by `list`, which outlives this loop.
        let entry = unsafe { &*cursor };
        let sa = entry.ifa_addr;
        // SAFETY: non-null `ifa_addr` points at a sockaddr whose family tells its real type.
        if !sa.is_null() && i32::from(unsafe { (*sa).sa_family }) == libc::AF_INET {
            // SAFETY: AF_INET entries are `sockaddr_in`.
            let sin = unsafe { &*(sa as *const libc::sockaddr_in) };
            addrs.push(Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr)));
        }
        cursor = entry.ifa_next;
    }
    Ok(addrs)
}

#[cfg(not(unix))]
pub fn interface_ipv4_addrs() -> io::Result<Vec<Ipv4Addr>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "interface enumeration is only implemented for unix",
    ))
}
