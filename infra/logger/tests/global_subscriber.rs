use vhub_logger::{Logger, LoggerError};

#[test]
fn service_logger_installs_once_per_process() {
    let logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .env_filter("vhub=debug,info")
        .init()
        .expect("console logger should install");
    assert!(!logger.writes_file());

    tracing::debug!(target: "vhub", "visible at debug");

    let second = Logger::builder().name(env!("CARGO_PKG_NAME")).init();
    assert!(matches!(second, Err(LoggerError::Subscriber { .. })));
}
