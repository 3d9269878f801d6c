//! Output formatting: table, JSON, and YAML renderings plus small value
//! formatters shared by the commands.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;
use crate::output::{color, table};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable table or key/value text.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputMode {
    /// Parse a mode name. Unknown names fall back to [`OutputMode::Table`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "yaml" => Self::Yaml,
            _ => Self::Table,
        }
    }

    /// Whether this mode emits machine-readable output.
    #[must_use]
    pub fn is_structured(self) -> bool {
        !matches!(self, Self::Table)
    }
}

/// Renders command results in the selected [`OutputMode`].
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    mode: OutputMode,
}

impl Formatter {
    /// Create a formatter for the given mode.
    #[must_use]
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// The active output mode.
    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Serialize `value` in the active mode.
    ///
    /// In table mode the value must serialize to a JSON object, which is
    /// printed as `key: value` lines.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Format`] when serialization fails or a table
    /// rendering is requested for a non-object value.
    pub fn write<W: Write, T: Serialize>(&self, writer: &mut W, value: &T) -> Result<(), CliError> {
        match self.mode {
            OutputMode::Json => {
                let text = serde_json::to_string_pretty(value)
                    .map_err(|e| CliError::Format(e.to_string()))?;
                writeln!(writer, "{text}")?;
            }
            OutputMode::Yaml => {
                let text =
                    serde_yaml::to_string(value).map_err(|e| CliError::Format(e.to_string()))?;
                write!(writer, "{text}")?;
            }
            OutputMode::Table => {
                let value =
                    serde_json::to_value(value).map_err(|e| CliError::Format(e.to_string()))?;
                let Value::Object(map) = value else {
                    return Err(CliError::Format(
                        "table output requires an object value".into(),
                    ));
                };
                for (key, val) in &map {
                    writeln!(writer, "{key}: {}", plain(val))?;
                }
            }
        }
        Ok(())
    }

    /// Write a table, or the equivalent list of objects in structured modes.
    ///
    /// Structured output strips ANSI codes from cells so colored table cells
    /// stay machine-readable.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Format`] when serialization fails.
    pub fn write_table<W: Write>(
        &self,
        writer: &mut W,
        headers: &[&str],
        rows: &[Vec<String>],
    ) -> Result<(), CliError> {
        if self.mode == OutputMode::Table {
            write!(writer, "{}", table::render(headers, rows))?;
            return Ok(());
        }

        let objects: Vec<serde_json::Map<String, Value>> = rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .zip(row)
                    .map(|(h, cell)| {
                        (
                            h.to_lowercase().replace(' ', "_"),
                            Value::String(table::strip_ansi(cell)),
                        )
                    })
                    .collect()
            })
            .collect();
        self.write(writer, &objects)?;
        Ok(())
    }

    /// Write ordered key/value pairs, or the equivalent object in structured
    /// modes.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Format`] when serialization fails.
    pub fn write_key_values<W: Write>(
        &self,
        writer: &mut W,
        pairs: &[(&str, String)],
    ) -> Result<(), CliError> {
        if self.mode == OutputMode::Table {
            for (key, value) in pairs {
                writeln!(writer, "{key}: {value}")?;
            }
            return Ok(());
        }

        let map: serde_json::Map<String, Value> = pairs
            .iter()
            .map(|(k, v)| {
                (
                    k.to_lowercase().replace(' ', "_"),
                    Value::String(table::strip_ansi(v)),
                )
            })
            .collect();
        self.write(writer, &map)?;
        Ok(())
    }

    /// Write a success line, or a `{status, message}` object in structured
    /// modes.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Format`] when serialization fails.
    pub fn write_success<W: Write>(&self, writer: &mut W, message: &str) -> Result<(), CliError> {
        if self.mode == OutputMode::Table {
            writeln!(writer, "{}", color::success(message))?;
            return Ok(());
        }
        self.write(
            writer,
            &serde_json::json!({ "status": "success", "message": message }),
        )
    }

    /// Write an error line, or a `{status, message}` object in structured
    /// modes.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Format`] when serialization fails.
    pub fn write_error<W: Write>(&self, writer: &mut W, message: &str) -> Result<(), CliError> {
        if self.mode == OutputMode::Table {
            writeln!(writer, "{}", color::error(message))?;
            return Ok(());
        }
        self.write(
            writer,
            &serde_json::json!({ "status": "error", "message": message }),
        )
    }
}

// Scalar JSON values render without quotes in table mode.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a byte count with binary units, one decimal from `KiB` up.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut value = bytes / UNIT;
    let mut rem = bytes % UNIT;
    let mut exp = 0;
    while value >= UNIT {
        rem = value % UNIT;
        value /= UNIT;
        exp += 1;
    }
    let scaled = value as f64 + rem as f64 / UNIT as f64;
    let unit = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{scaled:.1} {unit}iB")
}

/// Format an uptime in seconds as days, hours, and minutes.
#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format an elapsed duration in seconds as `XhYmZs`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{minutes}m{secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Format a temperature reading; zero means no sensor.
#[must_use]
pub fn format_temperature(temp: f64) -> String {
    if temp == 0.0 {
        return "N/A".to_string();
    }
    format!("{temp:.1}°C")
}

/// Render a boolean as colored Yes/No.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        color::green("Yes")
    } else {
        color::red("No")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::table::strip_ansi;
    use serde_json::json;

    fn render<F>(mode: OutputMode, f: F) -> String
    where
        F: FnOnce(&Formatter, &mut Vec<u8>) -> Result<(), CliError>,
    {
        let formatter = Formatter::new(mode);
        let mut buf = Vec::new();
        f(&formatter, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn parse_mode_defaults_to_table() {
        assert_eq!(OutputMode::parse("json"), OutputMode::Json);
        assert_eq!(OutputMode::parse("YAML"), OutputMode::Yaml);
        assert_eq!(OutputMode::parse("table"), OutputMode::Table);
        assert_eq!(OutputMode::parse("bogus"), OutputMode::Table);
        assert_eq!(OutputMode::parse(""), OutputMode::Table);
    }

    #[test]
    fn json_output_is_pretty_with_trailing_newline() {
        let out = render(OutputMode::Json, |f, w| {
            f.write(w, &json!({ "name": "plex", "state": "RUNNING" }))
        });
        assert!(out.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "plex");
    }

    #[test]
    fn yaml_output_parses_back() {
        let out = render(OutputMode::Yaml, |f, w| {
            f.write(w, &json!({ "name": "plex", "count": 3 }))
        });
        let value: serde_json::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn table_mode_object_prints_key_value_lines() {
        let out = render(OutputMode::Table, |f, w| {
            f.write(w, &json!({ "name": "plex", "count": 3 }))
        });
        assert!(out.contains("name: plex\n"));
        assert!(out.contains("count: 3\n"));
    }

    #[test]
    fn table_mode_rejects_non_object() {
        let formatter = Formatter::new(OutputMode::Table);
        let mut buf = Vec::new();
        let err = formatter.write(&mut buf, &json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, CliError::Format(_)));
    }

    #[test]
    fn structured_table_strips_ansi_from_cells() {
        let rows = vec![vec![
            "plex".to_string(),
            "\x1b[32mRUNNING\x1b[0m".to_string(),
        ]];
        let out = render(OutputMode::Json, |f, w| f.write_table(w, &["NAME", "STATE"], &rows));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["state"], "RUNNING");
        assert_eq!(value[0]["name"], "plex");
    }

    #[test]
    fn table_mode_table_renders_columns() {
        let rows = vec![vec!["plex".to_string(), "RUNNING".to_string()]];
        let out = render(OutputMode::Table, |f, w| {
            f.write_table(w, &["NAME", "STATE"], &rows)
        });
        assert!(out.starts_with("NAME  STATE\n"));
    }

    #[test]
    fn key_values_keep_order_in_table_mode() {
        let pairs = vec![
            ("Server", "tower".to_string()),
            ("Version", "7.0".to_string()),
        ];
        let out = render(OutputMode::Table, |f, w| f.write_key_values(w, &pairs));
        assert_eq!(out, "Server: tower\nVersion: 7.0\n");
    }

    #[test]
    fn success_and_error_objects_in_json_mode() {
        let out = render(OutputMode::Json, |f, w| f.write_success(w, "array started"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "array started");

        let out = render(OutputMode::Table, |f, w| f.write_error(w, "boom"));
        assert_eq!(strip_ansi(&out), "✗ boom\n");
    }

    #[test]
    fn bytes_format_binary_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KiB");
        assert_eq!(format_bytes(1_073_741_824), "1.0 GiB");
        assert_eq!(format_bytes(1_610_612_736), "1.5 GiB");
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn uptime_format_drops_leading_zero_units() {
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(59), "0m");
        assert_eq!(format_uptime(120), "2m");
    }

    #[test]
    fn duration_format_is_compact() {
        assert_eq!(format_duration(36_000), "10h0m0s");
        assert_eq!(format_duration(3_725), "1h2m5s");
        assert_eq!(format_duration(125), "2m5s");
        assert_eq!(format_duration(9), "9s");
    }

    #[test]
    fn temperature_zero_is_not_available() {
        assert_eq!(format_temperature(0.0), "N/A");
        assert_eq!(strip_ansi(&format_temperature(42.5)), "42.5°C");
    }

    #[test]
    fn bool_format_yes_no() {
        assert_eq!(strip_ansi(&format_bool(true)), "Yes");
        assert_eq!(strip_ansi(&format_bool(false)), "No");
    }
}
