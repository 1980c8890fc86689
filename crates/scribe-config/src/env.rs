use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.NAME }}` and `{{ env.NAME | default("value") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Substitute environment placeholders in raw config text
///
/// Runs before TOML parsing so config structs stay plain `String`/`SecretString`.
/// Comment lines are copied through untouched, so a commented-out key never
/// requires its variable to be set.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
        } else {
            lines.push(expand_line(line)?);
        }
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> anyhow::Result<String> {
    let mut failure = None;

    let expanded = placeholder().replace_all(line, |caps: &Captures<'_>| {
        match resolve(&caps[1], caps.get(2).map(|m| m.as_str())) {
            Ok(value) => value,
            Err(e) => {
                if failure.is_none() {
                    failure = Some(e);
                }
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(key: &str, fallback: Option<&str>) -> anyhow::Result<String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        anyhow::bail!("only variables scoped with 'env.' are supported: `{key}`");
    };

    match (std::env::var(var_name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable not found: `{var_name}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "results_dir = \"results\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_api_key() {
        temp_env::with_var("SCRIBE_TEST_KEY", Some("dg-secret"), || {
            let result = expand_env("api_key = \"{{ env.SCRIBE_TEST_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"dg-secret\"");
        });
    }

    #[test]
    fn substitutes_several_placeholders() {
        let vars = [("SCRIBE_HOST", Some("127.0.0.1")), ("SCRIBE_PORT", Some("9000"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("listen_address = \"{{ env.SCRIBE_HOST }}:{{env.SCRIBE_PORT}}\"").unwrap();
            assert_eq!(result, "listen_address = \"127.0.0.1:9000\"");
        });
    }

    #[test]
    fn unset_variable_is_an_error() {
        temp_env::with_var_unset("SCRIBE_UNSET", || {
            let err = expand_env("api_key = \"{{ env.SCRIBE_UNSET }}\"").unwrap_err();
            assert!(err.to_string().contains("SCRIBE_UNSET"));
        });
    }

    #[test]
    fn default_applies_when_unset() {
        temp_env::with_var_unset("SCRIBE_RESULTS", || {
            let result = expand_env("results_dir = \"{{ env.SCRIBE_RESULTS | default(\"results\") }}\"").unwrap();
            assert_eq!(result, "results_dir = \"results\"");
        });
    }

    #[test]
    fn default_ignored_when_set() {
        temp_env::with_var("SCRIBE_RESULTS", Some("/var/lib/scribe"), || {
            let result = expand_env("results_dir = \"{{ env.SCRIBE_RESULTS | default(\"results\") }}\"").unwrap();
            assert_eq!(result, "results_dir = \"/var/lib/scribe\"");
        });
    }

    #[test]
    fn rejects_non_env_scope() {
        let err = expand_env("api_key = \"{{ vault.KEY }}\"").unwrap_err();
        assert!(err.to_string().contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("SCRIBE_UNSET", || {
            let input = "  # api_key = \"{{ env.SCRIBE_UNSET }}\"\nformat = \"json\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
