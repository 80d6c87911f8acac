// src/core/scripts.rs

use crate::models::{ReconcileReport, Rule, Settings};

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from maintaining the generated-script directory.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// A filesystem I/O error occurred.
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

type ScriptResult<T> = Result<T, ScriptError>;

/// Path of the wrapper script derived from a rule name.
pub fn script_path(settings: &Settings, name: &str) -> PathBuf {
    settings.scripts_dir.join(name)
}

/// Renders the executable wrapper for a rule: shebang, start-timestamp
/// capture, the literal command, exit-status and end-timestamp capture, a
/// `bc` duration computation, and a structured log trailer. The trailer
/// reports the wrapped command's real exit status and the script exits
/// with it.
pub fn render_script(settings: &Settings, rule: &Rule) -> String {
    let escaped_command = escape_for_double_quotes(&rule.command);
    format!(
        r#"#!/bin/bash
start=$(date +%s.%N)
{command}
status=$?
end=$(date +%s.%N)
duration=$(echo "$end - $start" | bc)
if [ "$status" -eq 0 ]; then result=Success; else result="Failure($status)"; fi
echo "[$(date +'%Y-%m-%d %H:%M:%S')] EXECUTE_RULE $USER at $(hostname -I | awk '{{print $1}}') | Rule: {name}, Command: \"{escaped_command}\", Result: $result, Duration: ${{duration}}s" >> "{log_path}"
exit $status
"#,
        command = rule.command,
        name = rule.name,
        escaped_command = escaped_command,
        log_path = settings.log_path.display(),
    )
}

/// Writes (or rewrites) the wrapper script for one rule, creating the
/// scripts directory if needed. Scripts carry the executable bit for the
/// owning user on Unix.
pub fn write_script(settings: &Settings, rule: &Rule) -> ScriptResult<()> {
    fs::create_dir_all(&settings.scripts_dir)?;
    let path = script_path(settings, &rule.name);
    fs::write(&path, render_script(settings, rule))?;
    set_executable(&path)?;
    Ok(())
}

/// Removes the wrapper script for one rule name. A missing script is not
/// an error.
pub fn remove_script(settings: &Settings, name: &str) -> ScriptResult<()> {
    match fs::remove_file(script_path(settings, name)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Removes every file in the scripts directory, whether or not it belongs
/// to a known rule. Used by delete-all; callers must treat this as
/// destructive to the whole directory. Per-file failures are returned,
/// not fatal.
pub fn purge_all(settings: &Settings) -> ScriptResult<Vec<String>> {
    let mut failures = Vec::new();
    let entries = match fs::read_dir(&settings.scripts_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(failures),
        Err(e) => return Err(e.into()),
    };
    for entry in entries.flatten() {
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        if let Err(e) = fs::remove_file(entry.path()) {
            log::warn!("Could not remove script {}: {}", entry.path().display(), e);
            failures.push(format!("{}: {}", entry.path().display(), e));
        }
    }
    Ok(failures)
}

/// Reconciles the scripts directory against the current rule set: removes
/// every script whose name is not a rule, then (re)writes a script for
/// every rule. Best-effort — per-file failures land in the report and the
/// pass continues.
///
/// After a successful pass the set of script filenames equals the set of
/// rule names.
pub fn reconcile(settings: &Settings, rules: &[Rule]) -> ScriptResult<ReconcileReport> {
    fs::create_dir_all(&settings.scripts_dir)?;
    let mut report = ReconcileReport::default();
    let names: HashSet<&str> = rules.iter().map(|r| r.name.as_str()).collect();

    for entry in fs::read_dir(&settings.scripts_dir)?.flatten() {
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        if file_name.to_str().map(|n| names.contains(n)).unwrap_or(false) {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => report.removed += 1,
            Err(e) => {
                log::warn!(
                    "Could not remove orphaned script {}: {}",
                    entry.path().display(),
                    e
                );
                report
                    .failures
                    .push(format!("remove {}: {}", entry.path().display(), e));
            }
        }
    }

    for rule in rules {
        match write_script(settings, rule) {
            Ok(()) => report.written += 1,
            Err(e) => {
                log::warn!("Could not write script for rule '{}': {}", rule.name, e);
                report
                    .failures
                    .push(format!("script for '{}': {}", rule.name, e));
            }
        }
    }

    Ok(report)
}

/// Escapes text for inclusion inside a double-quoted shell string.
fn escape_for_double_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' | '$' | '`' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            store_path: dir.join("rules.conf"),
            scripts_dir: dir.join("bin"),
            log_path: dir.join("abbr.log"),
        }
    }

    fn rule(name: &str, command: &str) -> Rule {
        Rule {
            name: name.into(),
            command: command.into(),
        }
    }

    fn script_names(settings: &Settings) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&settings.scripts_dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn rendered_script_embeds_contract_pieces() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        let body = render_script(&settings, &rule("gs", "git status"));

        assert!(body.starts_with("#!/bin/bash\n"));
        assert!(body.contains("start=$(date +%s.%N)"));
        assert!(body.contains("\ngit status\n"));
        assert!(body.contains("end=$(date +%s.%N)"));
        assert!(body.contains("duration=$(echo \"$end - $start\" | bc)"));
        assert!(body.contains("EXECUTE_RULE"));
        assert!(body.contains("Rule: gs"));
        assert!(body.contains("Duration: ${duration}s"));
        assert!(body.contains("exit $status"));
    }

    #[test]
    fn trailer_escapes_shell_specials_in_command_text() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        let body = render_script(&settings, &rule("greet", r#"echo "hi $USER""#));

        // The command line itself stays verbatim...
        assert!(body.contains("\necho \"hi $USER\"\n"));
        // ...while the trailer's quoted copy is escaped.
        assert!(body.contains(r#"Command: \"echo \"hi \$USER\"\""#));
    }

    #[test]
    fn reconcile_reaches_closure() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        fs::create_dir_all(&settings.scripts_dir).unwrap();
        // A stale script and an unrelated file, both orphaned.
        fs::write(settings.scripts_dir.join("stale"), "#!/bin/bash\n").unwrap();
        fs::write(settings.scripts_dir.join("notes.txt"), "unrelated").unwrap();

        let rules = vec![rule("gs", "git status"), rule("up", "sudo apt update -y")];
        let report = reconcile(&settings, &rules).unwrap();

        assert_eq!(report.removed, 2);
        assert_eq!(report.written, 2);
        assert!(report.failures.is_empty());
        assert_eq!(script_names(&settings), vec!["gs", "up"]);
    }

    #[test]
    fn reconcile_on_empty_rule_set_clears_scripts() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        fs::create_dir_all(&settings.scripts_dir).unwrap();
        fs::write(settings.scripts_dir.join("orphan"), "x").unwrap();

        let report = reconcile(&settings, &[]).unwrap();
        assert_eq!(report.removed, 1);
        assert!(script_names(&settings).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn written_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        write_script(&settings, &rule("gs", "git status")).unwrap();

        let mode = fs::metadata(script_path(&settings, "gs"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o755, 0o755);
    }

    #[test]
    fn purge_all_removes_unrelated_files_too() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        write_script(&settings, &rule("gs", "git status")).unwrap();
        fs::write(settings.scripts_dir.join("unrelated.bak"), "keep?").unwrap();

        let failures = purge_all(&settings).unwrap();
        assert!(failures.is_empty());
        assert!(script_names(&settings).is_empty());
    }

    #[test]
    fn purge_all_on_missing_directory_is_a_no_op() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        assert!(purge_all(&settings).unwrap().is_empty());
    }

    #[test]
    fn remove_script_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let settings = settings_in(dir.path());
        remove_script(&settings, "ghost").unwrap();
    }
}
