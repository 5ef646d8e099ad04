use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row, Table};

use crate::format::{USER_WIDTH, format_bytes, format_percent, truncate_unicode};
use crate::system::process::ProcessRow;
use crate::ui::theme::Theme;

const COLUMNS: [&str; 7] = ["PID", "USER", "%CPU", "%MEM", "VSZ", "RSS", "CMD"];

/// Renders the column header and the visible rows. The selected row is drawn
/// in reverse video.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[ProcessRow],
    selected: Option<usize>,
    theme: &Theme,
) {
    if area.height == 0 {
        return;
    }

    let header = Row::new(COLUMNS).style(
        Style::default()
            .fg(theme.column_header_fg)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().enumerate().map(|(i, row)| {
        let style = if selected == Some(i) {
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(theme.text_primary)
        };
        Row::new(vec![
            Cell::from(row.pid.to_string()),
            Cell::from(truncate_unicode(&row.owner, USER_WIDTH)),
            Cell::from(Span::styled(
                format_percent(row.cpu_percent),
                Style::default().fg(theme.cpu_color(row.cpu_percent)),
            )),
            Cell::from(format_percent(row.mem_percent)),
            Cell::from(format_bytes(row.virtual_size_bytes)),
            Cell::from(format_bytes(row.resident_bytes)),
            Cell::from(row.command.as_str()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(7),
        Constraint::Length(USER_WIDTH as u16),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Fill(1),
    ];

    let table = Table::new(body, widths).header(header).column_spacing(1);
    frame.render_widget(table, area);
}
