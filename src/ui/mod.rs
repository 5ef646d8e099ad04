pub mod header;
pub mod help;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.on_resize(area.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let view = app.table_view(area.height);

    header::render(frame, chunks[0], chunks[1], &view, &app.theme);
    table::render(frame, chunks[2], view.rows, view.selected, &app.theme);
    statusbar::render(frame, chunks[3], view.status, &app.theme);

    // Help overlay, rendered last to appear on top
    if app.show_help() {
        help::render(frame, area, &app.help_entries(), &app.theme);
    }
}
