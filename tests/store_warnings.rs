//! Checks what the store tells the log. Lives in its own test binary because
//! it installs a capturing logger instead of env_logger.

use std::fs;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use tether::{Profile, ProfileStore};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn install() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Debug);
}

/// Warnings whose text mentions `needle`.
fn warnings_about(needle: &str) -> Vec<String> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, msg)| *level == Level::Warn && msg.contains(needle))
        .map(|(_, msg)| msg.clone())
        .collect()
}

#[test]
fn corrupt_store_warns_and_loads_empty() -> anyhow::Result<()> {
    install();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("corrupt-profiles.json");
    fs::write(&path, "{ not json")?;

    let profiles = ProfileStore::new(&path).load()?;

    assert!(profiles.is_empty());
    let warnings = warnings_about("corrupt-profiles.json");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("corrupted"));
    Ok(())
}

#[test]
fn malformed_record_is_named_in_a_warning() -> anyhow::Result<()> {
    install();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("partial-profiles.json");
    fs::write(
        &path,
        r#"{"good": {"user": "alice", "ip": "h1", "port": 22}, "handedit": {"ip": "h2"}}"#,
    )?;

    let profiles = ProfileStore::new(&path).load()?;

    assert_eq!(profiles.get("good"), Some(&Profile::new("alice", "h1", 22, None)));
    let warnings = warnings_about("partial-profiles.json");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("handedit"));
    Ok(())
}
