// src/system/event_log.rs

use crate::models::Settings;

use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Appends one structured line to the process-wide event log, creating the
/// parent directory on first use. Line shape:
/// `[timestamp] EVENT_TYPE user at ip | details`.
///
/// Logging failures are returned to the caller, which treats them as
/// warnings; they never abort the operation that triggered them.
pub fn log_event(settings: &Settings, event_type: &str, details: &str) -> std::io::Result<()> {
    if let Some(parent) = settings.log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&settings.log_path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(
        file,
        "[{timestamp}] {event_type} {user} at {ip} | {details}",
        user = current_user(),
        ip = local_ip(),
    )
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Best-effort local IPv4 address; never fails.
fn local_ip() -> String {
    local_ip_address::local_ip()
        .map(|ip| ip.to_string())
        .unwrap_or_else(|_| "Unknown IP".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_structured_lines() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            store_path: dir.path().join("rules.conf"),
            scripts_dir: dir.path().join("bin"),
            log_path: dir.path().join("logs").join("abbr.log"),
        };

        log_event(&settings, "CREATE_RULE", "Name: gs, Command: git status").unwrap();
        log_event(&settings, "DELETE_RULE", "Name: gs").unwrap();

        let content = fs::read_to_string(&settings.log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("CREATE_RULE"));
        assert!(lines[0].contains("| Name: gs, Command: git status"));
        assert!(lines[0].starts_with('['));
        assert!(lines[1].contains("DELETE_RULE"));
    }
}
