use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use vhub::domain::config::ApiConfig;
use vhub::domain::environment::Environment;
use vhub::kernel::config::ConfigLoader;

const CONFIG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config");

fn shipped(environment: Environment) -> ApiConfig {
    ConfigLoader::new(CONFIG_DIR, environment)
        .vars(std::iter::empty::<(String, String)>())
        .load()
        .expect("shipped config loads")
}

#[test]
fn development_config_listens_on_all_interfaces_with_a_local_store() {
    let cfg = shipped(Environment::Development);

    assert_eq!(cfg.server.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.database.url, "ws://localhost:8000");
    assert!(cfg.logger.console);
    assert!(cfg.logger.path.is_none());
}

#[test]
fn production_config_serves_the_web_build_and_logs_json_files() {
    let cfg = shipped(Environment::Production);

    assert_eq!(cfg.server.address, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(cfg.server.static_dir, Some(PathBuf::from("dist")));
    assert_eq!(cfg.logger.path, Some(PathBuf::from("logs")));
    assert!(cfg.logger.json);
}

#[test]
fn plain_port_variable_overrides_the_shipped_file() {
    let cfg: ApiConfig = ConfigLoader::new(CONFIG_DIR, Environment::Development)
        .vars([("PORT", "8081")])
        .load()
        .expect("config with port");

    assert_eq!(cfg.server.port, 8081);
}
