use proptest::prelude::*;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use vhub_domain::environment::{
    Environment, EnvironmentSnapshot, InterfaceAddress, NetworkInterfaces, is_local_host,
};

fn interfaces(entries: &[(&str, IpAddr, IpAddr)]) -> NetworkInterfaces {
    let mut map = NetworkInterfaces::new();
    for (name, address, netmask) in entries {
        map.entry((*name).to_owned())
            .or_default()
            .push(InterfaceAddress::new(*address, *netmask));
    }
    map
}

const NO_ADDRESSES: [IpAddr; 0] = [];

fn mask24() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(255, 255, 255, 0))
}

#[test]
fn loopback_interface_means_local() {
    let ifaces = interfaces(&[
        ("lo", IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V4(Ipv4Addr::new(255, 0, 0, 0))),
        ("eth0", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)), mask24()),
    ]);

    let snapshot = EnvironmentSnapshot::new(Environment::Production, "web-01", ifaces);
    assert!(snapshot.is_local);
    assert_eq!(snapshot.environment, Environment::Production);
}

#[test]
fn hostname_markers_mean_local() {
    assert!(is_local_host("localhost", NO_ADDRESSES));
    assert!(is_local_host("alex-macbook.local", NO_ADDRESSES));
    assert!(!is_local_host("api.example.com", NO_ADDRESSES));
}

#[test]
fn routable_addresses_only_means_production() {
    let ifaces = interfaces(&[("eth0", IpAddr::V4(Ipv4Addr::new(172, 16, 3, 9)), mask24())]);
    let snapshot = EnvironmentSnapshot::new(Environment::Production, "worker", ifaces);

    assert!(!snapshot.is_local);
    assert_eq!(Environment::from_local(snapshot.is_local), Environment::Production);
}

#[test]
fn snapshot_serializes_with_camel_case_keys() {
    let ifaces = interfaces(&[(
        "lo",
        IpAddr::V6(Ipv6Addr::LOCALHOST),
        IpAddr::V6(Ipv6Addr::from(u128::MAX)),
    )]);
    let snapshot = EnvironmentSnapshot::new(Environment::Development, "box", ifaces);

    let value = serde_json::to_value(&snapshot).expect("serialize snapshot");
    assert_eq!(value["environment"], "development");
    assert_eq!(value["hostname"], "box");
    assert_eq!(value["isLocal"], true);
    assert_eq!(value["networkInterfaces"]["lo"][0]["address"], "::1");
    assert_eq!(value["networkInterfaces"]["lo"][0]["family"], "IPv6");
    assert_eq!(value["networkInterfaces"]["lo"][0]["internal"], true);
}

fn any_ip() -> impl Strategy<Value = IpAddr> {
    prop_oneof![
        any::<u32>().prop_map(|bits| IpAddr::V4(Ipv4Addr::from(bits))),
        any::<u128>().prop_map(|bits| IpAddr::V6(Ipv6Addr::from(bits))),
    ]
}

fn loopback_ip() -> impl Strategy<Value = IpAddr> {
    prop_oneof![
        any::<[u8; 3]>().prop_map(|[a, b, c]| IpAddr::V4(Ipv4Addr::new(127, a, b, c))),
        Just(IpAddr::V6(Ipv6Addr::LOCALHOST)),
    ]
}

proptest! {
    #[test]
    fn any_loopback_address_makes_the_host_local(
        hostname in "[a-z0-9-]{1,24}",
        mut addresses in proptest::collection::vec(any_ip(), 0..8),
        loopback in loopback_ip(),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(addresses.len() + 1);
        addresses.insert(at, loopback);

        prop_assert!(is_local_host(&hostname, addresses));
    }

    #[test]
    fn without_loopback_or_marker_the_host_is_not_local(
        hostname in "[a-z0-9-]{1,24}",
        addresses in proptest::collection::vec(any_ip(), 0..8),
    ) {
        prop_assume!(!hostname.contains("localhost"));
        let routable: Vec<IpAddr> = addresses.into_iter().filter(|ip| !ip.is_loopback()).collect();

        prop_assert!(!is_local_host(&hostname, routable));
    }
}
