use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder regex must compile")
    })
}

/// Expand environment placeholders in raw TOML text
///
/// Comment lines are copied through untouched so that commented-out
/// settings never require their variables to exist.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut expanded = Vec::new();

    for line in input.split('\n') {
        if line.trim_start().starts_with('#') {
            expanded.push(line.to_owned());
            continue;
        }
        expanded.push(expand_line(line)?);
    }

    Ok(expanded.join("\n"))
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut failure = None;

    let replaced = placeholder().replace_all(line, |captures: &Captures<'_>| {
        match resolve(&captures[1], captures.get(2).map(|m| m.as_str())) {
            Ok(value) => value,
            Err(err) => {
                failure.get_or_insert(err);
                String::new()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[upstream]\ncompatible_prefix = \"/v1/\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_variable() {
        temp_env::with_var("PRISM_TEST_PROXY", Some("socks5://127.0.0.1:1080"), || {
            let result = expand_env("proxy_url = \"{{ env.PRISM_TEST_PROXY }}\"").unwrap();
            assert_eq!(result, "proxy_url = \"socks5://127.0.0.1:1080\"");
        });
    }

    #[test]
    fn expands_several_variables_on_one_line() {
        let vars = [("PRISM_HOST", Some("127.0.0.1")), ("PRISM_PORT", Some("9000"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("listen_address = \"{{ env.PRISM_HOST }}:{{ env.PRISM_PORT }}\"").unwrap();
            assert_eq!(result, "listen_address = \"127.0.0.1:9000\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("PRISM_MISSING", || {
            let err = expand_env("key = \"{{ env.PRISM_MISSING }}\"").unwrap_err();
            assert!(err.contains("PRISM_MISSING"));
        });
    }

    #[test]
    fn default_applies_when_unset() {
        temp_env::with_var_unset("PRISM_OPTIONAL", || {
            let result = expand_env("key = \"{{ env.PRISM_OPTIONAL | default(\"info\") }}\"").unwrap();
            assert_eq!(result, "key = \"info\"");
        });
    }

    #[test]
    fn set_variable_wins_over_default() {
        temp_env::with_var("PRISM_OPTIONAL", Some("debug"), || {
            let result = expand_env("key = \"{{ env.PRISM_OPTIONAL | default(\"info\") }}\"").unwrap();
            assert_eq!(result, "key = \"debug\"");
        });
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("PRISM_MISSING", || {
            let input = "  # proxy_url = \"{{ env.PRISM_MISSING }}\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }

    #[test]
    fn rejects_other_scopes() {
        let err = expand_env("key = \"{{ vault.SECRET }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }
}
