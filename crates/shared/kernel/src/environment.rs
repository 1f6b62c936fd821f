//! Inspects the host (hostname, interface addresses) to guess whether the process
//! runs on a developer machine.
//!
//! [`detect`] runs once at startup to choose the configuration file;
//! [`snapshot`] checks again for every diagnostic request.

use if_addrs::{IfAddr, get_if_addrs};
use std::net::IpAddr;
use tracing::warn;
use vhub_domain::environment::{
    Environment, EnvironmentSnapshot, InterfaceAddress, NetworkInterfaces, is_local_host,
};

/// Current hostname of the machine.
#[must_use]
pub fn hostname() -> String {
    gethostname::gethostname().to_string_lossy().into_owned()
}

/// Addresses of every network interface, grouped by interface name.
///
/// An enumeration failure is logged and yields an empty map.
#[must_use]
pub fn network_interfaces() -> NetworkInterfaces {
    let interfaces = match get_if_addrs() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            warn!(error = %e, "Failed to enumerate network interfaces");
            return NetworkInterfaces::new();
        },
    };

    interfaces.into_iter().fold(NetworkInterfaces::new(), |mut map, interface| {
        let netmask = match &interface.addr {
            IfAddr::V4(v4) => IpAddr::V4(v4.netmask),
            IfAddr::V6(v6) => IpAddr::V6(v6.netmask),
        };
        let address = InterfaceAddress::new(interface.ip(), netmask);
        map.entry(interface.name).or_default().push(address);
        map
    })
}

/// Whether the host currently looks like a local/development machine.
#[must_use]
pub fn is_local() -> bool {
    let interfaces = network_interfaces();
    is_local_host(&hostname(), interfaces.values().flatten().map(|a| a.address))
}

/// Guesses the runtime environment from the current host state.
#[must_use]
pub fn detect() -> Environment {
    Environment::from_local(is_local())
}

/// Fresh diagnostic snapshot, reporting `startup` as the configured environment.
#[must_use]
pub fn snapshot(startup: Environment) -> EnvironmentSnapshot {
    EnvironmentSnapshot::new(startup, hostname(), network_interfaces())
}
