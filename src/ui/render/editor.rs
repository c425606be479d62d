use super::Frame;
use crate::state::{EditorMode, Field, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the contact editor as a popup.
///
pub fn editor(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let editor = state.contact_list().editor();
    let title = match editor.mode() {
        EditorMode::Copy(_) => " Edit contact ",
        _ => " New contact ",
    };

    let mut lines = Vec::with_capacity(Field::ALL.len() * 2 + 2);
    for field in Field::ALL {
        let label_style = if editor.invalid_field() == Some(field) {
            styling::invalid_field_style(theme)
        } else if editor.focus() == field {
            styling::focused_field_style(theme)
        } else {
            styling::muted_text_style(theme)
        };
        let marker = if editor.focus() == field { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, field.label()),
            label_style,
        )));
        let mut value = editor.value(field).to_string();
        if editor.focus() == field {
            value.push('_');
        }
        lines.push(Line::from(Span::styled(
            format!("    {}", value),
            styling::normal_text_style(theme),
        )));
    }
    lines.push(Line::from(""));
    let hints = match editor.mode() {
        EditorMode::Copy(_) => "Enter: save, Esc: cancel, Tab: next field, Ctrl-D: delete",
        _ => "Enter: create, Esc: cancel, Tab: next field",
    };
    lines.push(Line::from(Span::styled(hints, styling::muted_text_style(theme))));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(theme))
                .title(Span::styled(title, styling::active_block_title_style())),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, size);
    frame.render_widget(paragraph, size);
}
