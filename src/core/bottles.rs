// src/core/bottles.rs

use anyhow::Result;
use dialoguer::{Input, theme::ColorfulTheme};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref BOTTLE_RE: Regex = Regex::new(r"<bottle:([A-Za-z0-9_][A-Za-z0-9_.-]*)>")
        .expect("bottle pattern is valid");
}

/// Supplies values for bottle tokens the caller did not pre-supply.
///
/// Production uses [`PromptSource`]; tests substitute fakes so no terminal
/// interaction is needed.
pub trait ValueSource {
    fn resolve(&mut self, token: &str) -> Result<String>;
}

/// Interactive source: asks the operator on the terminal and blocks until
/// a value is typed. There is no timeout or cancellation path.
#[derive(Debug, Default)]
pub struct PromptSource;

impl ValueSource for PromptSource {
    fn resolve(&mut self, token: &str) -> Result<String> {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("The {token} is?"))
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }
}

/// Rewrites a command by replacing every `<bottle:token>` occurrence.
///
/// Resolution order per occurrence: the pre-supplied `values` map first,
/// then the source. Values obtained from the source are cached for the
/// remainder of the call, so a token appearing twice prompts once and
/// substitutes the same value both times. A command with no placeholders
/// passes through unchanged.
pub fn substitute(
    command: &str,
    values: &HashMap<String, String>,
    source: &mut dyn ValueSource,
) -> Result<String> {
    if !BOTTLE_RE.is_match(command) {
        return Ok(command.to_string());
    }

    let mut resolved = values.clone();
    let mut out = String::with_capacity(command.len());
    let mut last = 0;
    for caps in BOTTLE_RE.captures_iter(command) {
        let whole = caps.get(0).expect("group 0 always present");
        let token = &caps[1];
        out.push_str(&command[last..whole.start()]);
        let value = match resolved.get(token) {
            Some(v) => v.clone(),
            None => {
                let v = source.resolve(token)?;
                resolved.insert(token.to_string(), v.clone());
                v
            }
        };
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&command[last..]);
    Ok(out)
}

/// Parses one `-b=token:value` flag into its parts.
/// Returns `None` when the flag is malformed.
pub fn parse_bottle_flag(arg: &str) -> Option<(String, String)> {
    let payload = arg.strip_prefix("-b=")?;
    let (token, value) = payload.split_once(':')?;
    if token.is_empty() {
        return None;
    }
    Some((token.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fake source that hands out canned values and counts how often it is
    /// asked, to pin down the per-call caching behavior.
    struct CountingSource {
        value: String,
        calls: usize,
    }

    impl ValueSource for CountingSource {
        fn resolve(&mut self, _token: &str) -> Result<String> {
            self.calls += 1;
            Ok(self.value.clone())
        }
    }

    fn no_values() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn command_without_placeholders_passes_through_unchanged() {
        let mut source = CountingSource {
            value: "never".into(),
            calls: 0,
        };
        let out = substitute("git status --short", &no_values(), &mut source).unwrap();
        assert_eq!(out, "git status --short");
        assert_eq!(source.calls, 0);
    }

    #[test]
    fn supplied_value_is_substituted() {
        let mut values = HashMap::new();
        values.insert("username".to_string(), "alice".to_string());
        let mut source = CountingSource {
            value: "never".into(),
            calls: 0,
        };

        let out = substitute(
            "ssh -p 2222 <bottle:username>@example.com",
            &values,
            &mut source,
        )
        .unwrap();

        assert_eq!(out, "ssh -p 2222 alice@example.com");
        assert_eq!(source.calls, 0);
    }

    #[test]
    fn missing_value_is_asked_from_the_source() {
        let mut source = CountingSource {
            value: "8080".into(),
            calls: 0,
        };
        let out = substitute("curl localhost:<bottle:port>/health", &no_values(), &mut source)
            .unwrap();
        assert_eq!(out, "curl localhost:8080/health");
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn repeated_token_is_resolved_once_per_call() {
        let mut source = CountingSource {
            value: "web1".into(),
            calls: 0,
        };
        let out = substitute(
            "scp <bottle:host>:/etc/hosts ./backup-<bottle:host>.txt",
            &no_values(),
            &mut source,
        )
        .unwrap();
        assert_eq!(out, "scp web1:/etc/hosts ./backup-web1.txt");
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn distinct_tokens_are_resolved_independently() {
        let mut values = HashMap::new();
        values.insert("user".to_string(), "alice".to_string());
        let mut source = CountingSource {
            value: "example.com".into(),
            calls: 0,
        };
        let out = substitute("ssh <bottle:user>@<bottle:host>", &values, &mut source).unwrap();
        assert_eq!(out, "ssh alice@example.com");
        assert_eq!(source.calls, 1);
    }

    #[test]
    fn bottle_flag_parsing() {
        assert_eq!(
            parse_bottle_flag("-b=username:alice"),
            Some(("username".to_string(), "alice".to_string()))
        );
        // Value may itself contain ':'.
        assert_eq!(
            parse_bottle_flag("-b=url:http://x"),
            Some(("url".to_string(), "http://x".to_string()))
        );
        assert_eq!(parse_bottle_flag("-b=novalue"), None);
        assert_eq!(parse_bottle_flag("-b=:headless"), None);
        assert_eq!(parse_bottle_flag("--b=x:y"), None);
    }
}
