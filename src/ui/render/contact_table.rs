use super::Frame;
use crate::state::rows::COLUMN_TITLES;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
};

/// Relative column widths in cell order.
///
const COLUMN_WIDTHS: [Constraint; 6] = [
    Constraint::Percentage(22),
    Constraint::Percentage(12),
    Constraint::Percentage(14),
    Constraint::Percentage(22),
    Constraint::Percentage(11),
    Constraint::Percentage(19),
];

/// Render the contact table from the row views, in row table order.
///
pub fn contact_table(frame: &mut Frame, size: Rect, state: &mut State) {
    state.set_table_area(size);
    let theme = state.get_theme().clone();
    let editing = state.contact_list().editor().is_visible();

    let header = Row::new(COLUMN_TITLES.iter().map(|title| Cell::from(*title)))
        .style(styling::header_style(&theme));
    let rows: Vec<Row> = state
        .contact_list()
        .table_rows()
        .map(|row| Row::new(row.cells().iter().map(|cell| Cell::from(cell.clone()))))
        .collect();
    let title = format!(" Contacts ({}) ", rows.len());

    let border_style = if editing {
        styling::normal_block_border_style(&theme)
    } else {
        styling::active_block_border_style(&theme)
    };
    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(title, styling::active_block_title_style())),
        )
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::selected_row_style(&theme));

    frame.render_stateful_widget(table, size, state.get_table_state());
}
