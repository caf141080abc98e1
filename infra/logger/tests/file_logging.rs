use fdesk_domain::config::LogConfig;
use fdesk_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn from_config_with_directory_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LogConfig {
        level: "info".to_owned(),
        filter: None,
        json: true,
        directory: Some(log_dir.clone()),
    };
    let logger = Logger::from_config("fleetdesk-file-logging", &config, 0)?;
    assert!(logger.writes_file());

    tracing::info!(vehicles = 3, "overview loaded");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let entries = fs::read_dir(&log_dir)?;
    let log_file = entries
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let first = contents.lines().next().expect("at least one line");
    let line: serde_json::Value = serde_json::from_str(first)?;
    assert_eq!(line["fields"]["message"], "overview loaded");

    Ok(())
}
