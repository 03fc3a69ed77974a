//! Spinner shown while `introspection generate-sdl` waits on the endpoint.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Set by common CI services, whose logs should not get spinner frames.
const CI_VARIABLES: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Starts a spinner for a schema download, unless stdout carries the schema
/// itself (`writes_file` is false) or the process runs in CI.
pub fn fetch_spinner(url: &str, writes_file: bool) -> Option<ProgressBar> {
    if !writes_file || CI_VARIABLES.iter().any(|name| std::env::var_os(name).is_some()) {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        Ok(style) => spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")),
        Err(e) => tracing::debug!(error = %e, "Falling back to default spinner style"),
    }
    spinner.set_message(format!("Fetching schema from {url}..."));
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}
