//! Contact editor: a form bound to a contact in live, copy, or blank mode.

use super::binding::{Binder, ChangeHandler, Field};
use super::rows::RowKey;
use crate::contacts::Contact;

/// Phase of the current edit session.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    Create,
    Copy(RowKey),
}

pub struct ContactEditor {
    binder: Binder,
    copied: Option<RowKey>,
    visible: bool,
    focus: Field,
}

impl Default for ContactEditor {
    fn default() -> Self {
        ContactEditor {
            binder: Binder::default(),
            copied: None,
            visible: false,
            focus: Field::Fullname,
        }
    }
}

impl ContactEditor {
    pub fn mode(&self) -> EditorMode {
        match (self.visible, self.copied) {
            (false, _) => EditorMode::Idle,
            (true, Some(key)) => EditorMode::Copy(key),
            (true, None) => EditorMode::Create,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.focus = Field::Fullname;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Bind `model` live and drop any copy in progress.
    ///
    pub fn set_model(&mut self, model: Contact) {
        self.copied = None;
        self.binder.set_model(model);
    }

    pub fn model(&self) -> &Contact {
        self.binder.model()
    }

    /// Start editing a detached clone of `original`, which is remembered by
    /// its row key.
    ///
    pub fn copy_model_state(&mut self, original: RowKey, contact: &Contact) {
        self.binder.set_model(contact.clone());
        self.copied = Some(original);
    }

    pub fn is_copied(&self) -> bool {
        self.copied.is_some()
    }

    /// Row key of the contact being edited through a copy.
    ///
    pub fn copied(&self) -> Option<RowKey> {
        self.copied
    }

    /// Write the edited copy's values into `target` (its id is kept) and
    /// rebind the form live to the result. Returns false and leaves
    /// `target` alone when no copy is in progress.
    ///
    pub fn overwrite_copied_model_state(&mut self, target: &mut Contact) -> bool {
        if !self.is_copied() {
            return false;
        }
        target.copy_fields_from(self.binder.model());
        self.set_model(target.clone());
        true
    }

    /// Drop the bound contact and any copy, leaving a fresh blank contact.
    /// Returns the contact that was bound.
    ///
    pub fn reset(&mut self) -> Contact {
        self.copied = None;
        self.binder.take_model()
    }

    pub fn value(&self, field: Field) -> &str {
        self.binder.value(field)
    }

    pub fn invalid_field(&self) -> Option<Field> {
        self.binder.invalid_field()
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn input(&mut self, field: Field, text: String) {
        self.binder.input(field, text);
    }

    pub fn push_char(&mut self, c: char) {
        self.binder.push_char(self.focus, c);
    }

    pub fn pop_char(&mut self) {
        self.binder.pop_char(self.focus);
    }

    pub fn subscribe(&mut self, handler: ChangeHandler) -> u64 {
        self.binder.subscribe(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::rows::ContactRows;
    use crate::state::bindable::BindableList;
    use fake::{Fake, Faker};
    use std::sync::mpsc::channel;

    fn some_key() -> RowKey {
        let (tx, _rx) = channel();
        let mut rows = ContactRows::new(tx);
        let mut list = BindableList::new();
        list.push(Contact::blank(), &mut rows);
        rows.get(0).unwrap().key()
    }

    #[test]
    fn modes() {
        let key = some_key();
        let mut editor = ContactEditor::default();
        assert_eq!(editor.mode(), EditorMode::Idle);

        editor.set_model(Contact::blank());
        editor.show();
        assert_eq!(editor.mode(), EditorMode::Create);
        assert!(!editor.is_copied());

        editor.copy_model_state(key, &Faker.fake());
        assert_eq!(editor.mode(), EditorMode::Copy(key));
        assert!(editor.is_copied());

        editor.hide();
        assert_eq!(editor.mode(), EditorMode::Idle);
    }

    #[test]
    fn copy_edits_do_not_touch_original() {
        let original: Contact = Faker.fake();
        let snapshot = original.clone();
        let mut editor = ContactEditor::default();
        editor.copy_model_state(some_key(), &original);
        editor.input(Field::Fullname, "Someone Else".to_string());
        assert!(original.has_same_fields(&snapshot));
        assert_eq!(editor.model().fullname, "Someone Else");
    }

    #[test]
    fn overwrite_copied_model_state() {
        let mut target: Contact = Faker.fake();
        target.id = 5;
        let mut editor = ContactEditor::default();
        editor.copy_model_state(some_key(), &target);
        editor.input(Field::Email, "new@example.com".to_string());

        assert!(editor.overwrite_copied_model_state(&mut target));
        assert_eq!(target.id, 5);
        assert_eq!(target.email, "new@example.com");
        assert!(!editor.is_copied());
        assert_eq!(editor.model().id, 5);
        assert!(!editor.overwrite_copied_model_state(&mut target));
    }

    #[test]
    fn reset_returns_bound_contact() {
        let mut editor = ContactEditor::default();
        editor.copy_model_state(some_key(), &Faker.fake());
        editor.push_char('x');
        let bound = editor.reset();
        assert!(bound.fullname.ends_with('x'));
        assert!(!editor.is_copied());
        assert_eq!(editor.value(Field::Fullname), "");
    }

    #[test]
    fn focus_cycles() {
        let mut editor = ContactEditor::default();
        editor.show();
        editor.focus_previous();
        assert_eq!(editor.focus(), Field::Notes);
        editor.focus_next();
        editor.focus_next();
        assert_eq!(editor.focus(), Field::Nickname);
    }
}
