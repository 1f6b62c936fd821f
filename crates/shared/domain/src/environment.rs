//! Development-vs-production guessing shared by the server and its diagnostics.
//!
//! The server decides once at startup (to pick its configuration) and again on
//! every `/api/environment` request. The two answers may differ if the host's
//! network changes in between; nothing reconciles them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

/// Hostname fragments that mark a development machine.
pub const LOCAL_HOST_MARKERS: &[&str] = &["localhost", ".local"];

/// The runtime context the process believes it is running in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn from_local(is_local: bool) -> Self {
        if is_local { Self::Development } else { Self::Production }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AddressFamily {
    #[serde(rename = "IPv4")]
    V4,
    #[serde(rename = "IPv6")]
    V6,
}

/// One address bound to a network interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InterfaceAddress {
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub address: IpAddr,
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub netmask: IpAddr,
    pub family: AddressFamily,
    /// Loopback (not reachable from outside the host)
    pub internal: bool,
    pub cidr: String,
}

impl InterfaceAddress {
    #[must_use]
    pub fn new(address: IpAddr, netmask: IpAddr) -> Self {
        let (family, prefix) = match netmask {
            IpAddr::V4(mask) => (AddressFamily::V4, u32::from(mask).count_ones()),
            IpAddr::V6(mask) => (AddressFamily::V6, u128::from(mask).count_ones()),
        };

        Self {
            address,
            netmask,
            family,
            internal: address.is_loopback(),
            cidr: format!("{address}/{prefix}"),
        }
    }
}

/// Interface name to its bound addresses, sorted by name.
pub type NetworkInterfaces = BTreeMap<String, Vec<InterfaceAddress>>;

/// Diagnostic view of the process's runtime context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSnapshot {
    /// Environment chosen at process start
    pub environment: Environment,
    /// Current hostname
    pub hostname: String,
    /// Current local/development guess
    pub is_local: bool,
    /// Current interface addresses
    pub network_interfaces: BTreeMap<String, Vec<InterfaceAddress>>,
}

impl EnvironmentSnapshot {
    /// Builds a snapshot, deriving `is_local` from the hostname and interfaces.
    #[must_use]
    pub fn new(
        environment: Environment,
        hostname: impl Into<String>,
        network_interfaces: NetworkInterfaces,
    ) -> Self {
        let hostname = hostname.into();
        let is_local =
            is_local_host(&hostname, network_interfaces.values().flatten().map(|a| a.address));

        Self { environment, hostname, is_local, network_interfaces }
    }
}

/// Any loopback address, or a hostname carrying a local marker, means development.
pub fn is_local_host<I>(hostname: &str, addresses: I) -> bool
where
    I: IntoIterator<Item = IpAddr>,
{
    addresses.into_iter().any(|ip| ip.is_loopback())
        || LOCAL_HOST_MARKERS.iter().any(|marker| hostname.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn cidr_is_derived_from_netmask() {
        let v4 = InterfaceAddress::new(
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
            IpAddr::V4(Ipv4Addr::new(255, 255, 255, 0)),
        );
        assert_eq!(v4.cidr, "192.168.1.20/24");
        assert_eq!(v4.family, AddressFamily::V4);
        assert!(!v4.internal);

        let v6 = InterfaceAddress::new(
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V6(Ipv6Addr::from(u128::MAX)),
        );
        assert_eq!(v6.cidr, "::1/128");
        assert!(v6.internal);
    }
}
