use super::Frame;
use crate::state::State;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render footer widget with the controls of the current mode and the
/// connection status.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let (mode, mode_color, controls) = if state.contact_list().editor().is_visible() {
        (
            "EDIT:",
            theme.footer_edit,
            " Type to edit, Tab/Shift-Tab: field, Enter: submit, Esc: cancel",
        )
    } else {
        (
            "LIST:",
            theme.footer_list,
            " j/k: navigate, Enter: edit, n: new, L: log, q: quit",
        )
    };

    let controls_content = Line::from(vec![
        Span::styled(
            mode,
            Style::default()
                .fg(theme.footer_normal.to_color())
                .bg(mode_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(controls, Style::default().fg(theme.text.to_color())),
    ]);

    let (status, status_color) = if state.is_live() {
        ("live", theme.success)
    } else {
        ("offline", theme.warning)
    };
    let status_content = Line::from(vec![
        Span::styled(
            state.get_server_url(),
            Style::default().fg(theme.text_muted.to_color()),
        ),
        Span::raw(" "),
        Span::styled(
            status,
            Style::default()
                .fg(status_color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(40)])
        .split(size);
    frame.render_widget(Paragraph::new(controls_content), columns[0]);
    frame.render_widget(
        Paragraph::new(status_content).alignment(Alignment::Right),
        columns[1],
    );
}
