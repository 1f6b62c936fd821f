use std::fs;
use std::time::Duration;
use tracing::info;
use vhub::domain::config::LoggerConfig;

#[test]
fn logger_section_writes_json_lines_to_the_configured_directory() {
    let temp = tempfile::tempdir().expect("temp dir");
    let log_dir = temp.path().join("logs");

    let cfg = LoggerConfig {
        console: false,
        path: Some(log_dir.clone()),
        json: true,
        filter: Some("info".to_owned()),
    };

    let logger = vhub_server::logger(&cfg).init().expect("logger init");
    assert!(logger.writes_file());

    info!(volunteer = "Alex", "Volunteer saved");
    drop(logger);
    std::thread::sleep(Duration::from_millis(50));

    let file = fs::read_dir(&log_dir)
        .expect("log dir")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("vhub-server"))
        })
        .expect("log file named after the service");

    let content = fs::read_to_string(file).expect("read log");
    let saved = content
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("json line"))
        .find(|event| event["fields"]["message"] == "Volunteer saved")
        .expect("event in log");
    assert_eq!(saved["fields"]["volunteer"], "Alex");
}
