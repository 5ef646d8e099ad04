use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::system::process::ProcessRow;

pub const USER_WIDTH: usize = 9;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Column header line for the plain-text table.
pub fn table_header() -> String {
    format!(
        "{:<7} {:<USER_WIDTH$} {:>6} {:>6} {:>9} {:>9} CMD",
        "PID", "USER", "%CPU", "%MEM", "VSZ", "RSS"
    )
}

pub fn format_row(row: &ProcessRow) -> String {
    format!(
        "{:<7} {:<USER_WIDTH$} {:>6} {:>6} {:>9} {:>9} {}",
        row.pid,
        truncate_unicode(&row.owner, USER_WIDTH),
        format_percent(row.cpu_percent),
        format_percent(row.mem_percent),
        format_bytes(row.virtual_size_bytes),
        format_bytes(row.resident_bytes),
        row.command,
    )
}

/// Header plus one line per row, newline separated, no trailing newline.
pub fn table_text(rows: &[ProcessRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(table_header());
    lines.extend(rows.iter().map(format_row));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(4096), "4 KB");
        assert_eq!(format_bytes(104_857_600), "100.0 MB");
        assert_eq!(format_bytes(1_610_612_736), "1.5 GB");
    }

    #[test]
    fn truncate_unicode_adds_ellipsis() {
        assert_eq!(truncate_unicode("root", 9), "root");
        assert_eq!(truncate_unicode("postgresql", 9), "postgres\u{2026}");
        assert_eq!(truncate_unicode("日本語ユーザー", 6), "日本\u{2026}");
    }

    #[test]
    fn header_and_row_columns_line_up() {
        let row = ProcessRow {
            pid: 1,
            owner: "root".to_string(),
            command: "init".to_string(),
            cpu_ticks: 0,
            resident_bytes: 104_857_600,
            virtual_size_bytes: 8_192_000,
            cpu_percent: 25.0,
            mem_percent: 10.0,
        };
        let header = table_header();
        let line = format_row(&row);
        assert_eq!(header.find("CMD"), line.find("init"));
    }
}
