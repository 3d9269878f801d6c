//! ANSI color support with a process-wide on/off gate.
//!
//! Colors are enabled by default and switched off by [`init`] when `NO_COLOR`
//! is set or stdout is not a terminal. Every helper funnels through
//! [`colorize`], so a disabled gate means plain text everywhere.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";
/// Red foreground.
pub const RED: &str = "\x1b[31m";
/// Green foreground.
pub const GREEN: &str = "\x1b[32m";
/// Yellow foreground.
pub const YELLOW: &str = "\x1b[33m";
/// Blue foreground.
pub const BLUE: &str = "\x1b[34m";
/// Cyan foreground.
pub const CYAN: &str = "\x1b[36m";
/// Gray foreground.
pub const GRAY: &str = "\x1b[90m";
/// Bold red foreground.
pub const BOLD_RED: &str = "\x1b[1;31m";
/// Bold green foreground.
pub const BOLD_GREEN: &str = "\x1b[1;32m";
/// Bold yellow foreground.
pub const BOLD_YELLOW: &str = "\x1b[1;33m";
/// Bold blue foreground.
pub const BOLD_BLUE: &str = "\x1b[1;34m";

static COLORS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Disable colors when `NO_COLOR` is set or stdout is not a terminal.
///
/// Call once at startup, before any output.
pub fn init() {
    if std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
        set_enabled(false);
    }
}

/// Flip the process-wide color gate.
pub fn set_enabled(enabled: bool) {
    COLORS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether colors are currently enabled.
#[must_use]
pub fn enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

/// Wrap `text` in the given color code when colors are enabled.
#[must_use]
pub fn colorize(text: &str, color: &str) -> String {
    if !enabled() || color.is_empty() {
        return text.to_string();
    }
    format!("{color}{text}{RESET}")
}

/// Red text.
#[must_use]
pub fn red(text: &str) -> String {
    colorize(text, RED)
}

/// Green text.
#[must_use]
pub fn green(text: &str) -> String {
    colorize(text, GREEN)
}

/// Yellow text.
#[must_use]
pub fn yellow(text: &str) -> String {
    colorize(text, YELLOW)
}

/// Blue text.
#[must_use]
pub fn blue(text: &str) -> String {
    colorize(text, BLUE)
}

/// Cyan text.
#[must_use]
pub fn cyan(text: &str) -> String {
    colorize(text, CYAN)
}

/// Gray text.
#[must_use]
pub fn gray(text: &str) -> String {
    colorize(text, GRAY)
}

/// A bold green checkmark followed by `text`.
#[must_use]
pub fn success(text: &str) -> String {
    format!("{} {text}", colorize("✓", BOLD_GREEN))
}

/// A bold red cross followed by `text`.
#[must_use]
pub fn error(text: &str) -> String {
    format!("{} {text}", colorize("✗", BOLD_RED))
}

/// A bold yellow warning sign followed by `text`.
#[must_use]
pub fn warning(text: &str) -> String {
    format!("{} {text}", colorize("⚠", BOLD_YELLOW))
}

/// A bold blue info sign followed by `text`.
#[must_use]
pub fn info(text: &str) -> String {
    format!("{} {text}", colorize("ℹ", BOLD_BLUE))
}

/// Uppercase a state word and color it by severity.
///
/// Healthy states come out green, failed states red, transitional states
/// yellow. Unrecognized states are uppercased without color.
#[must_use]
pub fn state(state: &str) -> String {
    let upper = state.to_uppercase();
    match upper.as_str() {
        "STARTED" | "RUNNING" | "UP" | "ONLINE" | "DISK_OK" | "GOOD" | "HEALTHY" => green(&upper),
        "STOPPED" | "DOWN" | "OFFLINE" | "EXITED" | "DISK_DSBL" | "DISK_INVALID"
        | "DISK_WRONG" | "ERROR" | "FAILED" => red(&upper),
        "PAUSED" | "STOPPING" | "STARTING" | "WARNING" | "DISK_NP" => yellow(&upper),
        _ => upper,
    }
}

/// Format a percentage to one decimal and color it by threshold.
///
/// With `reverse` false high values are bad (usage): >= 90 red, >= 75
/// yellow, otherwise green. With `reverse` true high values are good (free
/// space): >= 75 green, >= 50 yellow, otherwise red.
#[must_use]
pub fn percentage(percent: f64, reverse: bool) -> String {
    let text = format!("{percent:.1}%");

    if reverse {
        if percent >= 75.0 {
            green(&text)
        } else if percent >= 50.0 {
            yellow(&text)
        } else {
            red(&text)
        }
    } else if percent >= 90.0 {
        red(&text)
    } else if percent >= 75.0 {
        yellow(&text)
    } else {
        green(&text)
    }
}

/// Format a temperature to one decimal and color it by band.
///
/// >= 60°C red, >= 50°C yellow, >= 40°C cyan, cooler blue.
#[must_use]
pub fn temperature(temp: f64) -> String {
    let text = format!("{temp:.1}°C");

    if temp >= 60.0 {
        red(&text)
    } else if temp >= 50.0 {
        yellow(&text)
    } else if temp >= 40.0 {
        cyan(&text)
    } else {
        blue(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The gate is process-wide, so everything that toggles it lives in one
    // test to avoid racing with parallel test threads.
    #[test]
    fn colorize_and_semantic_helpers_respect_gate() {
        set_enabled(true);
        assert_eq!(colorize("hi", RED), "\x1b[31mhi\x1b[0m");
        assert_eq!(green("ok"), "\x1b[32mok\x1b[0m");

        // State mapping.
        assert_eq!(state("running"), green("RUNNING"));
        assert_eq!(state("Exited"), red("EXITED"));
        assert_eq!(state("paused"), yellow("PAUSED"));
        assert_eq!(state("DISK_OK"), green("DISK_OK"));
        assert_eq!(state("DISK_NP"), yellow("DISK_NP"));
        assert_eq!(state("weird"), "WEIRD");

        // Usage thresholds: 90 red, 75 yellow, below green.
        assert_eq!(percentage(95.0, false), red("95.0%"));
        assert_eq!(percentage(90.0, false), red("90.0%"));
        assert_eq!(percentage(80.0, false), yellow("80.0%"));
        assert_eq!(percentage(10.0, false), green("10.0%"));

        // Reverse thresholds: 75 green, 50 yellow, below red.
        assert_eq!(percentage(80.0, true), green("80.0%"));
        assert_eq!(percentage(60.0, true), yellow("60.0%"));
        assert_eq!(percentage(10.0, true), red("10.0%"));

        // Temperature bands.
        assert_eq!(temperature(65.0), red("65.0°C"));
        assert_eq!(temperature(55.0), yellow("55.0°C"));
        assert_eq!(temperature(45.0), cyan("45.0°C"));
        assert_eq!(temperature(30.0), blue("30.0°C"));

        // Disabled gate passes text through untouched.
        set_enabled(false);
        assert_eq!(colorize("hi", RED), "hi");
        assert_eq!(state("running"), "RUNNING");
        assert_eq!(percentage(95.0, false), "95.0%");
        assert_eq!(success("done"), "✓ done");
        assert!(!enabled());

        set_enabled(true);
    }
}
