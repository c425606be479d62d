use super::contact_list::ContactList;
use crate::app::NetworkEventSender;
use crate::contacts::SessionId;
use crate::logger::LogBuffer;
use crate::ui::Theme;
use ratatui::layout::Rect;
use ratatui::widgets::TableState;

/// Table rows start below the top border and the header row.
///
const TABLE_FIRST_ROW_OFFSET: u16 = 2;

/// Houses data representative of application state.
///
pub struct State {
    contact_list: ContactList,
    terminal_size: Rect,
    table_area: Rect,
    table_state: TableState,
    theme: Theme,
    log: LogBuffer,
    show_log: bool,
    live: bool,
    server_url: String,
}

impl Default for State {
    fn default() -> State {
        State {
            contact_list: ContactList::new(SessionId::generate(), None),
            terminal_size: Rect::default(),
            table_area: Rect::default(),
            table_state: TableState::default(),
            theme: Theme::default(),
            log: LogBuffer::default(),
            show_log: false,
            live: false,
            server_url: String::new(),
        }
    }
}

impl State {
    pub fn new(
        session: SessionId,
        net_sender: NetworkEventSender,
        theme: Theme,
        log: LogBuffer,
        server_url: String,
    ) -> Self {
        State {
            contact_list: ContactList::new(session, Some(net_sender)),
            theme,
            log,
            server_url,
            ..State::default()
        }
    }

    pub fn contact_list(&self) -> &ContactList {
        &self.contact_list
    }

    pub fn contact_list_mut(&mut self) -> &mut ContactList {
        &mut self.contact_list
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_server_url(&self) -> &str {
        &self.server_url
    }

    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Remember where the contact table was drawn, for mouse hit-testing.
    ///
    pub fn set_table_area(&mut self, area: Rect) -> &mut Self {
        self.table_area = area;
        self
    }

    /// Return the table state synchronized with the current selection.
    ///
    pub fn get_table_state(&mut self) -> &mut TableState {
        let selected = self.contact_list.selected_index();
        self.table_state.select(selected);
        &mut self.table_state
    }

    /// Return the index of the contact row drawn at the given screen cell.
    ///
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.table_area;
        let first = area.y + TABLE_FIRST_ROW_OFFSET;
        let last = area.y + area.height.saturating_sub(1);
        if column <= area.x || column >= area.x + area.width.saturating_sub(1) {
            return None;
        }
        if row < first || row >= last {
            return None;
        }
        let index = (row - first) as usize + self.table_state.offset();
        if index < self.contact_list.rows().len() {
            Some(index)
        } else {
            None
        }
    }

    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    pub fn get_log_entries(&self) -> Vec<String> {
        self.log.entries()
    }

    /// Record whether the notification stream is connected.
    ///
    pub fn set_live(&mut self, live: bool) -> &mut Self {
        self.live = live;
        self
    }

    pub fn is_live(&self) -> bool {
        self.live
    }
}
