//! Plain-text table rendering with ANSI-aware column widths.

/// Strip ANSI escape sequences from `text`.
///
/// Consumes `ESC [` through the terminating alphabetic byte, so color codes
/// do not count toward column widths.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for esc in chars.by_ref() {
                if esc.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}

/// Width of `text` as it appears on screen, ignoring ANSI codes.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

fn pad(cell: &str, width: usize) -> String {
    let visible = visible_width(cell);
    if visible >= width {
        return cell.to_string();
    }
    let mut out = String::with_capacity(cell.len() + width - visible);
    out.push_str(cell);
    for _ in visible..width {
        out.push(' ');
    }
    out
}

/// Render a table with a header row, a dash separator, and two-space column
/// gutters.
///
/// Column widths are the maximum visible width of header and cells. Cells
/// wider than their column are emitted verbatim, and rows shorter than the
/// header simply end early. Zero rows still produce the header and separator.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| visible_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            let w = visible_width(cell);
            if w > widths[i] {
                widths[i] = w;
            }
        }
    }

    let mut out = String::new();

    let header_cells: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect();
    out.push_str(header_cells.join("  ").trim_end());
    out.push('\n');

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&separator.join("  "));
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i < widths.len() {
                    pad(cell, widths[i])
                } else {
                    cell.clone()
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_color_codes() {
        assert_eq!(strip_ansi("\x1b[32mRUNNING\x1b[0m"), "RUNNING");
        assert_eq!(strip_ansi("\x1b[1;33m85.0%\x1b[0m"), "85.0%");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn visible_width_ignores_escapes() {
        assert_eq!(visible_width("\x1b[31mEXITED\x1b[0m"), 6);
        assert_eq!(visible_width("NAME"), 4);
    }

    #[test]
    fn colored_cells_do_not_skew_columns() {
        let rows = vec![
            vec!["plex".to_string(), "\x1b[32mRUNNING\x1b[0m".to_string()],
            vec!["sonarr".to_string(), "\x1b[31mEXITED\x1b[0m".to_string()],
        ];
        let out = render(&["NAME", "STATE"], &rows);
        let lines: Vec<&str> = out.lines().collect();

        // STATE starts at the same visible offset on every line.
        assert_eq!(lines[0], "NAME    STATE");
        assert_eq!(lines[1], "------  -------");
        assert_eq!(strip_ansi(lines[2]), "plex    RUNNING");
        assert_eq!(strip_ansi(lines[3]), "sonarr  EXITED");
    }

    #[test]
    fn empty_rows_still_render_header() {
        let out = render(&["NAME", "STATE"], &[]);
        assert_eq!(out, "NAME  STATE\n----  -----\n");
    }

    #[test]
    fn short_rows_end_early() {
        let rows = vec![vec!["disk1".to_string()]];
        let out = render(&["NAME", "TEMP", "SIZE"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "disk1");
    }

    #[test]
    fn wide_cell_emitted_verbatim() {
        let rows = vec![
            vec!["a".to_string(), "this cell is very wide".to_string()],
            vec!["b".to_string(), "x".to_string()],
        ];
        let out = render(&["C1", "C2"], &rows);
        assert!(out.contains("this cell is very wide"));
        // The wide cell sets the column width for everyone else.
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "--  ----------------------");
    }
}
