//! GitHub Actions runtime integration.
//!
//! The runner injects action inputs as `INPUT_<NAME>` environment variables,
//! points `GITHUB_EVENT_PATH` at the triggering event payload, and reads
//! workflow commands from stdout and step outputs from the file named by
//! `GITHUB_OUTPUT`.
use log::*;
use std::{fs::OpenOptions, io::Write, path::Path};

use crate::error::Result;

/// Environment variable naming the triggering event payload file.
pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";
/// Environment variable naming the step output file.
pub const OUTPUT_VAR: &str = "GITHUB_OUTPUT";
/// Set to "1" by the runner when step debug logging is enabled.
pub const RUNNER_DEBUG_VAR: &str = "RUNNER_DEBUG";

const OUTPUT_DELIMITER: &str = "__JIRA_PR_SYNC_EOF__";

/// Name of the environment variable the runner uses for an action input.
pub fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Look up an action input through `lookup`, treating blank values as
/// absent.
pub fn get_input(
    lookup: &dyn Fn(&str) -> Option<String>,
    name: &str,
) -> Option<String> {
    lookup(&input_var(name))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a boolean input value the way `@actions/core` accepts them.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format a workflow `error` command for the given message.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Report the run as failed to the runner. The process must still exit
/// non-zero for the step to be marked failed.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        format!("{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// Append a step output to `output_file`.
pub fn write_output(output_file: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_file)?;
    file.write_all(format_output(name, value).as_bytes())?;
    Ok(())
}

/// Append a step output when the runner provides an output file.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match std::env::var(OUTPUT_VAR) {
        Ok(path) if !path.is_empty() => {
            write_output(Path::new(&path), name, value)
        }
        _ => {
            debug!("{OUTPUT_VAR} not set: skipping output {name}={value}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn input_var_follows_runner_convention() {
        assert_eq!(input_var("github-token"), "INPUT_GITHUB-TOKEN");
        assert_eq!(input_var("jira base url"), "INPUT_JIRA_BASE_URL");
    }

    #[test]
    fn get_input_treats_blank_as_absent() {
        let env = HashMap::from([
            ("INPUT_JIRA-EMAIL".to_string(), "  dev@example.com ".to_string()),
            ("INPUT_INTENDED-BASE".to_string(), "   ".to_string()),
        ]);
        let lookup = |k: &str| env.get(k).cloned();

        assert_eq!(
            get_input(&lookup, "jira-email"),
            Some("dev@example.com".to_string())
        );
        assert_eq!(get_input(&lookup, "intended-base"), None);
        assert_eq!(get_input(&lookup, "github-token"), None);
    }

    #[test]
    fn parse_bool_accepts_yaml_spellings() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn error_command_escapes_newlines() {
        assert_eq!(
            error_command("stale branch\n100% sure"),
            "::error::stale branch%0A100%25 sure"
        );
    }

    #[test]
    fn write_output_appends_single_and_multiline_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("output");

        write_output(&path, "issue-key", "PROJ-42").unwrap();
        write_output(&path, "labels", "feature\nbackend").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            format!(
                "issue-key=PROJ-42\nlabels<<{OUTPUT_DELIMITER}\nfeature\nbackend\n{OUTPUT_DELIMITER}\n"
            )
        );
    }
}
