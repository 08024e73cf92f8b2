//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<24} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Plain text for pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value falls through to TTY detection
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from the `--json` flag, `FORMAT`, and the TTY.
#[must_use]
pub fn resolve_output_mode(json_flag: bool) -> OutputMode {
    let format_env = std::env::var("FORMAT").ok();
    resolve_output_mode_inner(json_flag, format_env.as_deref(), io::stdout().is_terminal())
}

/// Render `payload` to stdout: JSON via serde, otherwise the human closure.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render<T: Serialize>(
    mode: OutputMode,
    payload: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if mode.is_json() {
        serde_json::to_writer_pretty(&mut w, payload)?;
        writeln!(w)?;
    } else {
        human(payload, &mut w)?;
    }
    Ok(())
}

/// Format an optional metric, printing `undefined` for `None`.
///
/// Degenerate graphs make several metrics undefined; they must be reported
/// as such explicitly, never as a misleading numeric placeholder.
#[must_use]
pub fn fmt_metric<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_wins_over_env_and_tty() {
        let mode = resolve_output_mode_inner(true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn format_env_respected() {
        assert_eq!(
            resolve_output_mode_inner(false, Some("json"), true),
            OutputMode::Json
        );
        assert_eq!(
            resolve_output_mode_inner(false, Some("text"), true),
            OutputMode::Text
        );
    }

    #[test]
    fn unknown_env_falls_back_to_tty() {
        assert_eq!(
            resolve_output_mode_inner(false, Some("fancy"), true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(false, Some("fancy"), false),
            OutputMode::Text
        );
    }

    #[test]
    fn undefined_metrics_render_explicitly() {
        assert_eq!(fmt_metric::<u32>(None), "undefined");
        assert_eq!(fmt_metric(Some(3)), "3");
    }
}
