mod contact_table;
mod editor;
mod footer;
mod log;

use self::log::log;
use super::Frame;
use crate::state::State;
use contact_table::contact_table;
use editor::editor;
use footer::footer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Render the whole screen according to state.
///
pub fn render(frame: &mut Frame, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.size());

    if state.is_log_visible() {
        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[0]);
        contact_table(frame, panes[0], state);
        log(frame, panes[1], state);
    } else {
        contact_table(frame, rows[0], state);
    }
    footer(frame, rows[1], state);

    if state.contact_list().editor().is_visible() {
        editor(frame, centered_rect(60, 60, frame.size()), state);
    }
}

/// Return a rectangle of the given percentages centered in `r`.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
