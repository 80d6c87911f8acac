// src/constants.rs

/// The name of the directory holding abbr state, both under the user's
/// config dir (rule store) and data dir (scripts, event log).
pub const ABBR_DIR: &str = "abbr";

/// The rule store file (inside the config dir).
pub const STORE_FILENAME: &str = "rules.conf";

/// The subdirectory of the data dir where generated rule scripts live.
pub const SCRIPTS_DIRNAME: &str = "bin";

/// The event log file (inside the data dir).
pub const LOG_FILENAME: &str = "abbr.log";

/// The file name used when exporting rules for backup/sharing.
pub const EXPORT_FILENAME: &str = "abbr-rules.txt";

/// Names that may never be bound to a rule: the CLI's own flag tokens (both
/// cases), tokens reserved for future options, and common system commands a
/// generated script would shadow.
pub const RESERVED_NAMES: &[&str] = &[
    "-h", "-l", "-n", "-r", "-c", "-ln", "-v", "-i", "-e", "-b",
    "-H", "-L", "-N", "-R", "-C", "-LN", "-V", "-I", "-E", "-B",
    "-lN", "-Ln",
    // Reserved for future options.
    "-g", "-G", "-w", "-W", "-t", "-T", "-x", "-X", "-y", "-Y",
    "-z", "-Z", "-a", "-A",
    // Reserved to system commands.
    "su", "passwd", "clear", "exit", "logout", "reset", "whoami", "hostname",
    "sync", "uptime", "pwd", "yes", "true", "false", "cal", "date", "arch",
    "bg", "fg", "jobs", "tset", "lsblk",
];

/// Checks a candidate rule name against [`RESERVED_NAMES`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}
