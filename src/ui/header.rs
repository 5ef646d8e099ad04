use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::TableView;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    title_area: Rect,
    summary_area: Rect,
    view: &TableView<'_>,
    theme: &Theme,
) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", view.title),
            Style::default()
                .fg(theme.title_fg)
                .bg(theme.title_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(theme.name, Style::default().fg(theme.text_secondary)),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    let summary = Line::from(Span::styled(
        view.summary.as_str(),
        Style::default().fg(theme.text_secondary),
    ));
    frame.render_widget(Paragraph::new(summary), summary_area);
}
