// src/core/transfer.rs

use crate::core::record;
use crate::models::Rule;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Two-field portable record: `b:<name> = <command>:b`, command capture
    // non-greedy so a trailing `:b` elsewhere on the line cannot swallow it.
    static ref PORTABLE_RULE_RE: Regex =
        Regex::new(r"b:([^=\r\n]+) = (.*?):b").expect("portable pattern is valid");
}

/// Renders rules in the portable bracketed format, with an optional
/// free-text leading comment line prefixed by `#`.
///
/// The command field is backslash-escaped and HTML-entity-encoded so that
/// commands containing `\`, `&`, `<` or `>` survive the import round trip.
/// A command containing a literal `:b` still cannot be represented; that is
/// a limitation of the format itself.
pub fn render_export(rules: &[Rule], comment: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(comment) = comment {
        if !comment.is_empty() {
            out.push('#');
            out.push_str(comment);
            out.push('\n');
        }
    }
    for rule in rules {
        let escaped = record::escape(&rule.command);
        let encoded = html_escape::encode_text(&escaped);
        out.push_str(&format!("b:{} = {}:b\n", rule.name, encoded));
    }
    out
}

/// Extracts every portable rule record from a block of text.
///
/// The command field is HTML-entity-decoded, then passed through the
/// backslash-escape decoder. Entries whose content fails either step are
/// reported back (second element) and skipped — never fatal to the batch.
pub fn extract_rules(text: &str) -> (Vec<Rule>, Vec<String>) {
    let mut rules = Vec::new();
    let mut rejected = Vec::new();
    for caps in PORTABLE_RULE_RE.captures_iter(text) {
        let whole = &caps[0];
        let name = caps[1].trim().to_string();
        if name.is_empty() {
            rejected.push(whole.to_string());
            continue;
        }
        let decoded = html_escape::decode_html_entities(caps[2].trim()).into_owned();
        match record::unescape(&decoded) {
            Ok(command) => rules.push(Rule { name, command }),
            Err(e) => rejected.push(format!("{whole} ({e})")),
        }
    }
    (rules, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, command: &str) -> Rule {
        Rule {
            name: name.into(),
            command: command.into(),
        }
    }

    #[test]
    fn export_renders_comment_and_records() {
        let rules = vec![rule("gs", "git status"), rule("ll", "ls -la")];
        let text = render_export(&rules, Some("my backup"));
        assert_eq!(
            text,
            "#my backup\nb:gs = git status:b\nb:ll = ls -la:b\n"
        );
    }

    #[test]
    fn export_without_comment_has_no_leading_line() {
        let text = render_export(&[rule("gs", "git status")], None);
        assert!(text.starts_with("b:gs"));
    }

    #[test]
    fn extract_parses_records_and_skips_surrounding_text() {
        let text = "#shared by a friend\nb:gs = git status:b\nnoise line\nb:up = sudo apt update -y:b\n";
        let (rules, rejected) = extract_rules(text);
        assert!(rejected.is_empty());
        assert_eq!(rules, vec![rule("gs", "git status"), rule("up", "sudo apt update -y")]);
    }

    #[test]
    fn extract_decodes_html_entities() {
        let (rules, rejected) = extract_rules("b:find = grep -r &quot;TODO&quot; . &amp;&amp; echo done:b\n");
        assert!(rejected.is_empty());
        assert_eq!(rules[0].command, r#"grep -r "TODO" . && echo done"#);
    }

    #[test]
    fn export_import_round_trip_preserves_special_characters() {
        let originals = vec![
            rule("pipe", "ps aux | grep sshd && echo up"),
            rule("redir", "cat <file.txt >out.txt"),
            rule("bottle", "ssh -p 2222 <bottle:username>@example.com"),
            rule("backslash", r"printf 'a\tb'"),
        ];
        let (roundtripped, rejected) = extract_rules(&render_export(&originals, Some("trip")));
        assert!(rejected.is_empty());
        assert_eq!(roundtripped, originals);
    }

    #[test]
    fn malformed_entries_are_reported_not_fatal() {
        let text = "b:broken entry with no separator:b\nb:ok = echo fine:b\n";
        let (rules, rejected) = extract_rules(text);
        assert_eq!(rules, vec![rule("ok", "echo fine")]);
        assert_eq!(rejected.len(), 0, "non-matching text is simply not captured");

        // A matching record with an invalid escape is reported.
        let (rules, rejected) = extract_rules(r"b:bad = echo \q:b");
        assert!(rules.is_empty());
        assert_eq!(rejected.len(), 1);
    }
}
