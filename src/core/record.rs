// src/core/record.rs

use crate::models::Rule;
use thiserror::Error;

/// Errors produced while decoding the backslash-escape dialect used by the
/// portable import format.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EscapeError {
    /// The text contained a `\x` sequence outside the supported dialect.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// The text ended with a lone backslash.
    #[error("dangling backslash at end of text")]
    DanglingBackslash,
}

/// Parses one store line of the form `name = command`.
///
/// Splits on the first `=` and trims surrounding whitespace from both
/// halves. Returns `None` for lines with no `=` or an empty name; callers
/// drop such lines silently rather than erroring (tolerant parsing).
pub fn parse(line: &str) -> Option<Rule> {
    let (name, command) = line.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(Rule {
        name: name.to_string(),
        command: command.trim().to_string(),
    })
}

/// Renders a rule as a single store line.
pub fn format(rule: &Rule) -> String {
    format!("{} = {}", rule.name, rule.command)
}

/// Escapes text into the portable backslash dialect.
///
/// The inverse of [`unescape`]: backslashes and line-breaking characters are
/// encoded so that any command survives a one-line portable record.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Decodes the portable backslash dialect: `\\`, `\n`, `\t`, `\r`, `\"`
/// and `\'`. Any other sequence fails with [`EscapeError::InvalidEscape`].
///
/// The store itself round-trips text verbatim; this pass runs only where
/// escaped text legitimately enters the system (the import transcoder), so
/// commands containing literal backslashes in the store never get
/// reinterpreted on rewrite.
pub fn unescape(text: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => return Err(EscapeError::InvalidEscape(other)),
            None => return Err(EscapeError::DanglingBackslash),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_first_equals_and_trims() {
        let rule = parse("  update =  sudo apt update -y ").unwrap();
        assert_eq!(rule.name, "update");
        assert_eq!(rule.command, "sudo apt update -y");
    }

    #[test]
    fn parse_keeps_later_equals_in_command() {
        let rule = parse("env = FOO=bar make").unwrap();
        assert_eq!(rule.name, "env");
        assert_eq!(rule.command, "FOO=bar make");
    }

    #[test]
    fn parse_rejects_lines_without_equals_or_name() {
        assert!(parse("just some text").is_none());
        assert!(parse("").is_none());
        assert!(parse(" = orphan command").is_none());
    }

    #[test]
    fn format_renders_store_line() {
        let rule = Rule {
            name: "gs".into(),
            command: "git status".into(),
        };
        assert_eq!(format(&rule), "gs = git status");
    }

    #[test]
    fn unescape_decodes_dialect() {
        assert_eq!(unescape("a\\nb\\tc\\\\d\\'e\\\"").unwrap(), "a\nb\tc\\d'e\"");
    }

    #[test]
    fn unescape_rejects_unknown_sequence() {
        assert_eq!(unescape(r"bad\qseq"), Err(EscapeError::InvalidEscape('q')));
    }

    #[test]
    fn unescape_rejects_dangling_backslash() {
        assert_eq!(unescape("trailing\\"), Err(EscapeError::DanglingBackslash));
    }

    #[test]
    fn escape_then_unescape_is_identity() {
        let samples = [
            "plain",
            r"C:\Users\me",
            "multi\nline\tand\ttabs",
            r#"quoted "text" and 'more'"#,
        ];
        for s in samples {
            assert_eq!(unescape(&escape(s)).unwrap(), s);
        }
    }
}
