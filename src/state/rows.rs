//! Row views for the contact table and the container they are displayed in.

use super::bindable::ListChangeHandler;
use super::error::StateError;
use crate::contacts::Contact;
use log::*;
use std::sync::mpsc::Sender;

/// Number of cells rendered per row.
///
pub const CELL_COUNT: usize = 6;

/// Column titles in cell order.
///
pub const COLUMN_TITLES: [&str; CELL_COUNT] = [
    "Full name",
    "Nickname",
    "Phone",
    "Email",
    "Birthday",
    "Notes",
];

/// Locally assigned handle of a row view. Never reused.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(u64);

/// Interaction reported by a row's listeners.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Click(RowKey),
    DoubleClick(RowKey),
}

pub type RowHandler = Box<dyn Fn(RowKey) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HandlerKind {
    Click,
    DoubleClick,
}

/// Token returned when attaching a handler, used to detach it again.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandlerRegistration {
    kind: HandlerKind,
    id: u64,
}

/// Renders one contact as a table row.
///
pub struct RowView {
    key: RowKey,
    cells: [String; CELL_COUNT],
    selected: bool,
    next_handler_id: u64,
    click_handlers: Vec<(u64, RowHandler)>,
    double_click_handlers: Vec<(u64, RowHandler)>,
}

impl RowView {
    pub fn new(key: RowKey, contact: &Contact) -> Self {
        let mut view = RowView {
            key,
            cells: Default::default(),
            selected: false,
            next_handler_id: 0,
            click_handlers: vec![],
            double_click_handlers: vec![],
        };
        view.set_model(contact);
        view
    }

    pub fn key(&self) -> RowKey {
        self.key
    }

    pub fn cells(&self) -> &[String; CELL_COUNT] {
        &self.cells
    }

    /// Re-render the cells from the given contact.
    ///
    pub fn set_model(&mut self, contact: &Contact) {
        self.cells = [
            contact.fullname.clone(),
            contact.nickname.clone(),
            contact.phonenumber.clone(),
            contact.email.clone(),
            contact.birthday_text(),
            contact.notes_preview(),
        ];
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Toggle the visual selection marker.
    ///
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn add_click_handler(&mut self, handler: RowHandler) -> HandlerRegistration {
        self.register(HandlerKind::Click, handler)
    }

    pub fn add_double_click_handler(&mut self, handler: RowHandler) -> HandlerRegistration {
        self.register(HandlerKind::DoubleClick, handler)
    }

    /// Detach a previously added handler. Returns false if it was already
    /// removed or belongs to another row.
    ///
    pub fn remove_handler(&mut self, registration: HandlerRegistration) -> bool {
        let handlers = match registration.kind {
            HandlerKind::Click => &mut self.click_handlers,
            HandlerKind::DoubleClick => &mut self.double_click_handlers,
        };
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != registration.id);
        handlers.len() != before
    }

    pub fn on_click(&self) {
        for (_, handler) in &self.click_handlers {
            handler(self.key);
        }
    }

    pub fn on_double_click(&self) {
        for (_, handler) in &self.double_click_handlers {
            handler(self.key);
        }
    }

    fn register(&mut self, kind: HandlerKind, handler: RowHandler) -> HandlerRegistration {
        let id = self.next_handler_id;
        self.next_handler_id += 1;
        match kind {
            HandlerKind::Click => self.click_handlers.push((id, handler)),
            HandlerKind::DoubleClick => self.double_click_handlers.push((id, handler)),
        }
        HandlerRegistration { kind, id }
    }
}

/// Display container holding the rows in on-screen order.
///
#[derive(Debug, Default)]
pub struct RowTable {
    order: Vec<RowKey>,
}

impl RowTable {
    pub fn keys(&self) -> &[RowKey] {
        &self.order
    }

    pub fn insert_first(&mut self, key: RowKey) {
        self.order.insert(0, key);
    }

    /// Insert `key` directly after `anchor`.
    ///
    pub fn insert_after(&mut self, key: RowKey, anchor: RowKey) -> Result<(), StateError> {
        match self.order.iter().position(|k| *k == anchor) {
            Some(position) => {
                self.order.insert(position + 1, key);
                Ok(())
            }
            None => Err(StateError::RowNotAttached(anchor)),
        }
    }

    /// Detach `key`. Returns false if it was not attached.
    ///
    pub fn remove(&mut self, key: RowKey) -> bool {
        let before = self.order.len();
        self.order.retain(|k| *k != key);
        self.order.len() != before
    }
}

/// Row views mirroring the managed contact list, plus the selection.
///
pub struct ContactRows {
    rows: Vec<RowView>,
    table: RowTable,
    selected: Option<RowKey>,
    next_key: u64,
    actions: Sender<RowAction>,
}

impl ContactRows {
    pub fn new(actions: Sender<RowAction>) -> Self {
        ContactRows {
            rows: vec![],
            table: RowTable::default(),
            selected: None,
            next_key: 0,
            actions,
        }
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    pub fn get(&self, index: usize) -> Option<&RowView> {
        self.rows.get(index)
    }

    /// Iterate the row views in the order the table holds their keys.
    ///
    pub fn in_table_order(&self) -> impl Iterator<Item = &RowView> + '_ {
        self.table
            .keys()
            .iter()
            .filter_map(move |key| self.rows.iter().find(|row| row.key == *key))
    }

    pub fn index_of(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }

    pub fn selected(&self) -> Option<RowKey> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|key| self.index_of(key))
    }

    /// Mark the row selected and deselect the previous one. Selecting the
    /// current selection again keeps it selected.
    ///
    pub fn select(&mut self, key: RowKey) -> Result<(), StateError> {
        let index = self.index_of(key).ok_or(StateError::RowNotFound(key))?;
        if let Some(previous) = self.selected.filter(|previous| *previous != key) {
            if let Some(previous_index) = self.index_of(previous) {
                self.rows[previous_index].set_selected(false);
            }
        }
        self.rows[index].set_selected(true);
        self.selected = Some(key);
        Ok(())
    }

    fn create_row(&mut self, contact: &Contact) -> RowView {
        let key = RowKey(self.next_key);
        self.next_key += 1;
        let mut view = RowView::new(key, contact);
        let clicks = self.actions.clone();
        view.add_click_handler(Box::new(move |key| {
            let _ = clicks.send(RowAction::Click(key));
        }));
        let double_clicks = self.actions.clone();
        view.add_double_click_handler(Box::new(move |key| {
            let _ = double_clicks.send(RowAction::DoubleClick(key));
        }));
        view
    }

    fn insert_at_index(&mut self, index: usize) {
        let key = self.rows[index].key;
        if index == 0 {
            self.table.insert_first(key);
        } else if let Err(e) = self.table.insert_after(key, self.rows[index - 1].key) {
            error!("Failed to place row {:?}: {}", key, e);
            self.table.order.push(key);
        }
    }
}

impl ListChangeHandler<Contact> for ContactRows {
    fn on_items_added_at(&mut self, source: &[Contact], index: usize, count: usize) {
        for i in index..index + count {
            let view = self.create_row(&source[i]);
            self.rows.insert(i, view);
            self.insert_at_index(i);
        }
    }

    fn on_items_removed_at(&mut self, _source: &[Contact], indices: &[usize]) {
        for &i in indices {
            if i >= self.rows.len() {
                continue;
            }
            let removed = self.rows.remove(i);
            self.table.remove(removed.key);
            if self.selected == Some(removed.key) {
                self.selected = None;
            }
        }
    }

    fn on_item_changed(&mut self, source: &[Contact], index: usize) {
        if let (Some(row), Some(contact)) = (self.rows.get_mut(index), source.get(index)) {
            row.set_model(contact);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::bindable::BindableList;
    use fake::{Fake, Faker};
    use std::sync::mpsc::{channel, Receiver};
    use std::sync::{Arc, Mutex};

    fn rows() -> (ContactRows, Receiver<RowAction>) {
        let (tx, rx) = channel();
        (ContactRows::new(tx), rx)
    }

    fn assert_in_sync(list: &BindableList<Contact>, rows: &ContactRows) {
        let row_keys: Vec<RowKey> = rows.rows().iter().map(|r| r.key()).collect();
        assert_eq!(list.len(), rows.rows().len());
        assert_eq!(row_keys.as_slice(), rows.table().keys());
        for (contact, row) in list.iter().zip(rows.rows()) {
            assert_eq!(row.cells()[0], contact.fullname);
        }
    }

    fn named(name: &str) -> Contact {
        Contact {
            fullname: name.to_string(),
            ..Contact::blank()
        }
    }

    #[test]
    fn table_order_matches_list_order() {
        let (mut rows, _rx) = rows();
        let mut list = BindableList::new();
        list.extend(vec![named("a"), named("b"), named("c")], &mut rows);
        list.insert(0, named("z"), &mut rows);
        list.insert(2, named("m"), &mut rows);
        list.remove_at(&[3], &mut rows);
        let drawn: Vec<&str> = rows
            .in_table_order()
            .map(|row| row.cells()[0].as_str())
            .collect();
        let expected: Vec<&str> = list.iter().map(|c| c.fullname.as_str()).collect();
        assert_eq!(drawn, expected);
        assert_eq!(drawn, vec!["z", "a", "m", "c"]);
    }

    #[test]
    fn rows_follow_arbitrary_insertions_and_removals() {
        let (mut rows, _rx) = rows();
        let mut list = BindableList::new();
        list.push(named("a"), &mut rows);
        assert_in_sync(&list, &rows);
        list.insert(0, named("b"), &mut rows);
        assert_in_sync(&list, &rows);
        list.insert(1, named("c"), &mut rows);
        assert_in_sync(&list, &rows);
        list.extend(vec![named("d"), named("e"), named("f")], &mut rows);
        assert_in_sync(&list, &rows);
        list.remove_at(&[1, 4], &mut rows);
        assert_in_sync(&list, &rows);
        list.insert(2, named("g"), &mut rows);
        assert_in_sync(&list, &rows);
        list.remove_at(&[0], &mut rows);
        assert_in_sync(&list, &rows);
        let names: Vec<&str> = list.iter().map(|c| c.fullname.as_str()).collect();
        assert_eq!(names, vec!["a", "g", "d", "f"]);
    }

    #[test]
    fn bulk_insert_in_the_middle_keeps_order() {
        let (mut rows, _rx) = rows();
        let mut list = BindableList::new();
        list.extend(vec![named("a"), named("z")], &mut rows);
        for (offset, name) in ["b", "c", "d"].iter().enumerate() {
            list.insert(1 + offset, named(name), &mut rows);
            assert_in_sync(&list, &rows);
        }
    }

    #[test]
    fn changed_item_rerenders_row() {
        let (mut rows, _rx) = rows();
        let mut list = BindableList::new();
        list.push(named("before"), &mut rows);
        list.update(0, &mut rows, |c| c.fullname = "after".to_string());
        assert_eq!(rows.get(0).unwrap().cells()[0], "after");
    }

    #[test]
    fn select_moves_marker() {
        let (mut rows, _rx) = rows();
        let mut list = BindableList::new();
        list.extend(vec![Faker.fake(), Faker.fake()], &mut rows);
        let a = rows.get(0).unwrap().key();
        let b = rows.get(1).unwrap().key();

        rows.select(a).unwrap();
        rows.select(a).unwrap();
        assert!(rows.get(0).unwrap().is_selected());
        assert_eq!(rows.selected(), Some(a));

        rows.select(b).unwrap();
        assert!(!rows.get(0).unwrap().is_selected());
        assert!(rows.get(1).unwrap().is_selected());
        assert_eq!(rows.selected_index(), Some(1));
    }

    #[test]
    fn removing_selected_row_clears_selection() {
        let (mut rows, _rx) = rows();
        let mut list = BindableList::new();
        list.extend(vec![Faker.fake(), Faker.fake()], &mut rows);
        let key = rows.get(1).unwrap().key();
        rows.select(key).unwrap();
        list.remove_at(&[0], &mut rows);
        assert_eq!(rows.selected(), Some(key));
        list.remove_at(&[0], &mut rows);
        assert_eq!(rows.selected(), None);
    }

    #[test]
    fn select_unknown_row_fails() {
        let (mut rows, _rx) = rows();
        assert!(matches!(
            rows.select(RowKey(99)),
            Err(StateError::RowNotFound(_))
        ));
    }

    #[test]
    fn row_listeners_post_actions() {
        let (mut rows, rx) = rows();
        let mut list = BindableList::new();
        list.push(Faker.fake(), &mut rows);
        let row = rows.get(0).unwrap();
        row.on_click();
        row.on_double_click();
        assert_eq!(rx.try_recv().unwrap(), RowAction::Click(row.key()));
        assert_eq!(rx.try_recv().unwrap(), RowAction::DoubleClick(row.key()));
    }

    #[test]
    fn multiple_handlers_and_removal() {
        let mut view = RowView::new(RowKey(1), &Contact::blank());
        let hits = Arc::new(Mutex::new(vec![]));
        let first = {
            let hits = Arc::clone(&hits);
            view.add_click_handler(Box::new(move |_| hits.lock().unwrap().push("first")))
        };
        {
            let hits = Arc::clone(&hits);
            view.add_click_handler(Box::new(move |_| hits.lock().unwrap().push("second")));
        }
        view.on_click();
        assert!(view.remove_handler(first));
        assert!(!view.remove_handler(first));
        view.on_click();
        assert_eq!(*hits.lock().unwrap(), vec!["first", "second", "second"]);
    }

    #[test]
    fn set_selected_has_no_other_effect() {
        let contact: Contact = Faker.fake();
        let mut view = RowView::new(RowKey(3), &contact);
        let cells = view.cells().clone();
        view.set_selected(true);
        assert!(view.is_selected());
        assert_eq!(view.cells(), &cells);
        view.set_selected(false);
        assert!(!view.is_selected());
    }

    #[test]
    fn table_insert_after_missing_anchor() {
        let mut table = RowTable::default();
        table.insert_first(RowKey(1));
        assert!(table.insert_after(RowKey(2), RowKey(7)).is_err());
        assert!(table.insert_after(RowKey(2), RowKey(1)).is_ok());
        assert_eq!(table.keys(), &[RowKey(1), RowKey(2)]);
        assert!(table.remove(RowKey(1)));
        assert!(!table.remove(RowKey(1)));
    }
}
