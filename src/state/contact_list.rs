//! Contact list controller.
//!
//! Owns the managed contact list, the row views mirroring it, the selection,
//! and the editor. Local changes are sent to the storage service as network
//! events and applied to the list only once the service accepts them.

use super::bindable::BindableList;
use super::binding::Field;
use super::editor::{ContactEditor, EditorMode};
use super::error::StateError;
use super::rows::{ContactRows, RowAction, RowKey, RowView};
use crate::app::NetworkEventSender;
use crate::contacts::{Contact, SessionId};
use crate::events::network::Event as NetworkEvent;
use log::*;
use std::sync::mpsc::{channel, Receiver};

pub struct ContactList {
    session: SessionId,
    net_sender: Option<NetworkEventSender>,
    contacts: BindableList<Contact>,
    rows: ContactRows,
    editor: ContactEditor,
    row_actions: Receiver<RowAction>,
}

impl ContactList {
    pub fn new(session: SessionId, net_sender: Option<NetworkEventSender>) -> Self {
        let (actions_tx, actions_rx) = channel();
        let mut editor = ContactEditor::default();
        editor.subscribe(Box::new(|field: Field, model: &Contact| {
            trace!("Editor field {:?} changed for contact ID {}", field, model.id);
        }));
        ContactList {
            session,
            net_sender,
            contacts: BindableList::new(),
            rows: ContactRows::new(actions_tx),
            editor,
            row_actions: actions_rx,
        }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn contacts(&self) -> &[Contact] {
        self.contacts.as_slice()
    }

    pub fn rows(&self) -> &[RowView] {
        self.rows.rows()
    }

    pub fn row_table(&self) -> &[RowKey] {
        self.rows.table().keys()
    }

    /// Row views in table order, as they are drawn.
    ///
    pub fn table_rows(&self) -> impl Iterator<Item = &RowView> + '_ {
        self.rows.in_table_order()
    }

    pub fn selected(&self) -> Option<RowKey> {
        self.rows.selected()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.rows.selected_index()
    }

    pub fn editor(&self) -> &ContactEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ContactEditor {
        &mut self.editor
    }

    pub fn is_copied(&self) -> bool {
        self.editor.is_copied()
    }

    /// Return the contact shown by the row with this key.
    ///
    pub fn contact_for(&self, key: RowKey) -> Option<&Contact> {
        self.rows
            .index_of(key)
            .and_then(|index| self.contacts.get(index))
    }

    /// Request every stored contact.
    ///
    pub fn load_all(&mut self) {
        self.dispatch(NetworkEvent::LoadContacts);
    }

    /// Append loaded contacts in the order received.
    ///
    pub fn on_loaded(&mut self, contacts: Vec<Contact>) {
        info!("Loaded {} contacts.", contacts.len());
        self.contacts.extend(contacts, &mut self.rows);
    }

    /// Fire the click listeners of the row at `index`.
    ///
    pub fn click_row(&mut self, index: usize) {
        match self.rows.get(index) {
            Some(row) => row.on_click(),
            None => debug!("Ignoring click on missing row {}", index),
        }
        self.process_row_actions();
    }

    /// Fire the double-click listeners of the row at `index`.
    ///
    pub fn double_click_row(&mut self, index: usize) {
        match self.rows.get(index) {
            Some(row) => row.on_double_click(),
            None => debug!("Ignoring double-click on missing row {}", index),
        }
        self.process_row_actions();
    }

    pub fn select_next(&mut self) {
        if self.rows.rows().is_empty() {
            return;
        }
        let next = match self.selected_index() {
            Some(i) if i + 1 < self.rows.rows().len() => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.click_row(next);
    }

    pub fn select_previous(&mut self) {
        let len = self.rows.rows().len();
        if len == 0 {
            return;
        }
        let previous = match self.selected_index() {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.click_row(previous);
    }

    /// Open the editor on a copy of the selected contact.
    ///
    pub fn edit_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            self.double_click_row(index);
        }
    }

    fn process_row_actions(&mut self) {
        while let Ok(action) = self.row_actions.try_recv() {
            match action {
                RowAction::Click(key) => self.select_row(key),
                RowAction::DoubleClick(key) => {
                    self.select_row(key);
                    self.begin_edit(key);
                }
            }
        }
    }

    /// Mark the row selected, deselecting the previous selection.
    ///
    pub fn select_row(&mut self, key: RowKey) {
        if let Err(e) = self.rows.select(key) {
            warn!("Cannot select row: {}", e);
        }
    }

    /// Open the editor on a detached copy of the row's contact.
    ///
    pub fn begin_edit(&mut self, key: RowKey) {
        let contact = match self.contact_for(key) {
            Some(contact) => contact.clone(),
            None => {
                warn!("Cannot edit missing row {:?}", key);
                return;
            }
        };
        debug!("Editing {}", contact);
        self.editor.copy_model_state(key, &contact);
        self.editor.show();
    }

    /// Open the editor bound to a fresh blank contact.
    ///
    pub fn begin_create(&mut self) {
        self.editor.set_model(Contact::blank());
        self.editor.show();
    }

    /// Submit the editor. A copy is sent as an update of its original; a
    /// new contact is sent for creation. The editor is reset and hidden.
    /// Nothing is sent while a field holds an invalid value.
    ///
    pub fn commit(&mut self) {
        if let Some(field) = self.editor.invalid_field() {
            warn!("Not saving: '{}' holds an invalid value", field.label());
            return;
        }
        match self.editor.mode() {
            EditorMode::Idle => {
                debug!("Ignoring commit with hidden editor");
                return;
            }
            EditorMode::Copy(key) => match self.contact_for(key).cloned() {
                Some(mut original) => {
                    self.editor.overwrite_copied_model_state(&mut original);
                    info!("Saving contact '{}'...", original.fullname);
                    self.dispatch(NetworkEvent::UpdateContact {
                        key,
                        contact: original,
                    });
                }
                None => warn!("Dropping edit of row {:?} that no longer exists", key),
            },
            EditorMode::Create => {
                let contact = self.editor.model().clone();
                let listed = contact.is_persisted()
                    && self.contacts.position(|c| *c == contact).is_some();
                if listed {
                    warn!("Contact ID {} is already listed; not creating it", contact.id);
                } else {
                    info!("Creating contact '{}'...", contact.fullname);
                    self.dispatch(NetworkEvent::CreateContact { contact });
                }
            }
        }
        self.close_editor();
    }

    /// Close the editor without saving.
    ///
    pub fn discard(&mut self) {
        self.close_editor();
    }

    /// Delete the contact being edited. Only valid while editing a copy.
    ///
    pub fn delete(&mut self) {
        let key = match self.editor.mode() {
            EditorMode::Copy(key) => key,
            _ => {
                debug!("Ignoring delete: {}", StateError::NotCopied);
                return;
            }
        };
        match self.contact_for(key).map(|c| c.id) {
            Some(id) => {
                info!("Deleting contact ID {}...", id);
                self.dispatch(NetworkEvent::DeleteContact { key, id });
            }
            None => warn!("Cannot delete row {:?} that no longer exists", key),
        }
        self.close_editor();
    }

    /// Append a contact the service created with `id`.
    ///
    pub fn on_create_succeeded(&mut self, mut contact: Contact, id: u64) {
        contact.id = id;
        if let Some(index) = self.index_of_id(id) {
            warn!("Contact ID {} already listed; updating it instead", id);
            self.overwrite_at(index, &contact);
            return;
        }
        self.contacts.push(contact, &mut self.rows);
    }

    /// Apply an accepted update to the original row's contact.
    ///
    pub fn on_update_succeeded(&mut self, key: RowKey, contact: Contact) {
        match self.rows.index_of(key) {
            Some(index) => self.overwrite_at(index, &contact),
            None => warn!(
                "Contact ID {} was removed before its update completed",
                contact.id
            ),
        }
    }

    /// Remove the row whose contact the service deleted.
    ///
    pub fn on_delete_succeeded(&mut self, key: RowKey) {
        match self.rows.index_of(key) {
            Some(index) => {
                self.contacts.remove_at(&[index], &mut self.rows);
            }
            None => debug!("Deleted row {:?} already gone", key),
        }
    }

    /// Handle a contact created by another session.
    ///
    pub fn on_remote_created(&mut self, contact: Contact, origin: SessionId) {
        if origin == self.session {
            debug!("Ignoring own created notification for ID {}", contact.id);
            return;
        }
        if !contact.is_persisted() {
            warn!("Ignoring created notification without contact ID");
            return;
        }
        match self.index_of_id(contact.id) {
            Some(index) => self.overwrite_at(index, &contact),
            None => self.contacts.push(contact, &mut self.rows),
        }
    }

    /// Handle a contact updated by another session. An update for a contact
    /// that is not listed is applied as a creation.
    ///
    pub fn on_remote_updated(&mut self, contact: Contact, origin: SessionId) {
        if origin == self.session {
            debug!("Ignoring own updated notification for ID {}", contact.id);
            return;
        }
        if !contact.is_persisted() {
            warn!("Ignoring updated notification without contact ID");
            return;
        }
        match self.index_of_id(contact.id) {
            Some(index) => self.overwrite_at(index, &contact),
            None => {
                warn!(
                    "Received update for unlisted contact ID {}; adding it",
                    contact.id
                );
                self.contacts.push(contact, &mut self.rows);
            }
        }
    }

    /// Handle a contact deleted by any session.
    ///
    pub fn on_remote_deleted(&mut self, id: u64) {
        if let Some(index) = self.index_of_id(id) {
            self.contacts.remove_at(&[index], &mut self.rows);
        }
    }

    /// Type into the focused editor field.
    ///
    pub fn type_char(&mut self, c: char) {
        self.editor.push_char(c);
    }

    pub fn erase_char(&mut self) {
        self.editor.pop_char();
    }

    pub fn input(&mut self, field: Field, text: String) {
        self.editor.input(field, text);
    }

    fn index_of_id(&self, id: u64) -> Option<usize> {
        if id == 0 {
            return None;
        }
        self.contacts.position(|c| c.id == id)
    }

    fn overwrite_at(&mut self, index: usize, contact: &Contact) {
        self.contacts
            .update(index, &mut self.rows, |c| c.copy_fields_from(contact));
    }

    fn close_editor(&mut self) {
        self.editor.reset();
        self.editor.hide();
    }

    fn dispatch(&self, event: NetworkEvent) {
        match &self.net_sender {
            Some(tx) => {
                if let Err(e) = tx.send(event) {
                    error!("{}", StateError::Dispatch(e.to_string()));
                }
            }
            None => debug!("No network available for event '{:?}'", event),
        }
    }
}
