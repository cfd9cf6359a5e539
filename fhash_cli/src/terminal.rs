//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners may allocate a TTY
    if is_ci_environment() {
        return false;
    }

    env::var("DEBIAN_FRONTEND").unwrap_or_default() != "noninteractive"
}

/// Check if the terminal supports ANSI escape codes
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }

    #[cfg(windows)]
    {
        // Windows 10+ consoles and Windows Terminal
        true
    }

    #[cfg(not(windows))]
    {
        !term.is_empty()
    }
}

/// Whether output should be colored
///
/// Color needs an ANSI terminal, no `--no-color` flag, `output.color_enabled`
/// in the config, and no `NO_COLOR` in the environment.
pub fn should_use_color(no_color_flag: bool, color_enabled: bool) -> bool {
    color_allowed(no_color_flag, color_enabled, env::var_os("NO_COLOR").is_some()) && supports_ansi()
}

fn color_allowed(no_color_flag: bool, color_enabled: bool, no_color_env: bool) -> bool {
    !no_color_flag && color_enabled && !no_color_env
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_detection() {
        // Environment dependent, must not panic
        let _ = is_interactive();
        let _ = supports_ansi();
        let _ = is_ci_environment();
    }

    #[test]
    fn test_color_allowed() {
        assert!(color_allowed(false, true, false));
        assert!(!color_allowed(true, true, false));
        assert!(!color_allowed(false, false, false));
        assert!(!color_allowed(false, true, true));
    }

    #[test]
    fn test_no_color_flag_wins() {
        assert!(!should_use_color(true, true));
    }
}
