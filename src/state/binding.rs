//! Two-way binding between a contact and the editor's text fields.
//!
//! `set_model` pushes model values into the fields. `input` pushes one
//! field's text into the model and notifies every subscriber.

use super::error::StateError;
use crate::contacts::{Contact, BIRTHDAY_FORMAT};
use chrono::NaiveDate;

/// Editable contact fields in form order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Fullname,
    Nickname,
    Phonenumber,
    Email,
    Birthday,
    Notes,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Fullname,
        Field::Nickname,
        Field::Phonenumber,
        Field::Email,
        Field::Birthday,
        Field::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Fullname => "Full name",
            Field::Nickname => "Nickname",
            Field::Phonenumber => "Phone number",
            Field::Email => "Email",
            Field::Birthday => "Birthday (YYYY-MM-DD)",
            Field::Notes => "Notes",
        }
    }

    fn index(&self) -> usize {
        match self {
            Field::Fullname => 0,
            Field::Nickname => 1,
            Field::Phonenumber => 2,
            Field::Email => 3,
            Field::Birthday => 4,
            Field::Notes => 5,
        }
    }

    pub fn next(&self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn previous(&self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// Convert birthday text into a date. Empty text means no birthday.
///
pub fn parse_birthday(text: &str) -> Result<Option<NaiveDate>, StateError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, BIRTHDAY_FORMAT)
        .map(Some)
        .map_err(|_| StateError::InvalidBirthday(text.to_owned()))
}

pub type ChangeHandler = Box<dyn Fn(Field, &Contact) + Send>;

/// Keeps a contact model and its form values synchronized.
///
pub struct Binder {
    model: Contact,
    values: [String; 6],
    invalid: Option<Field>,
    handlers: Vec<(u64, ChangeHandler)>,
    next_handler_id: u64,
}

impl Default for Binder {
    fn default() -> Self {
        Binder::new(Contact::blank())
    }
}

impl Binder {
    pub fn new(model: Contact) -> Self {
        let mut binder = Binder {
            model: Contact::blank(),
            values: Default::default(),
            invalid: None,
            handlers: vec![],
            next_handler_id: 0,
        };
        binder.set_model(model);
        binder
    }

    pub fn model(&self) -> &Contact {
        &self.model
    }

    /// Bind a new model and load its values into the form.
    ///
    pub fn set_model(&mut self, model: Contact) {
        self.model = model;
        self.invalid = None;
        for field in Field::ALL {
            self.values[field.index()] = self.model_value(field);
        }
    }

    /// Replace the bound model with a blank contact and return it.
    ///
    pub fn take_model(&mut self) -> Contact {
        let model = std::mem::take(&mut self.model);
        self.set_model(Contact::blank());
        model
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Field whose text does not currently convert into the model.
    ///
    pub fn invalid_field(&self) -> Option<Field> {
        self.invalid
    }

    /// Store form text for a field and write it through to the model. Text
    /// that does not convert is kept in the form while the model keeps its
    /// previous value.
    ///
    pub fn input(&mut self, field: Field, text: String) {
        self.values[field.index()] = text;
        let text = &self.values[field.index()];
        match field {
            Field::Fullname => self.model.fullname = text.clone(),
            Field::Nickname => self.model.nickname = text.clone(),
            Field::Phonenumber => self.model.phonenumber = text.clone(),
            Field::Email => self.model.email = text.clone(),
            Field::Notes => self.model.notes = text.clone(),
            Field::Birthday => match parse_birthday(text) {
                Ok(birthday) => {
                    self.model.birthday = birthday;
                    self.invalid = None;
                }
                Err(_) => {
                    self.invalid = Some(Field::Birthday);
                    return;
                }
            },
        }
        for (_, handler) in &self.handlers {
            handler(field, &self.model);
        }
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        let mut text = self.value(field).to_owned();
        text.push(c);
        self.input(field, text);
    }

    pub fn pop_char(&mut self, field: Field) {
        let mut text = self.value(field).to_owned();
        if text.pop().is_some() {
            self.input(field, text);
        }
    }

    /// Subscribe to model changes caused by form input. Returns an id for
    /// `unsubscribe`.
    ///
    pub fn subscribe(&mut self, handler: ChangeHandler) -> u64 {
        let id = self.next_handler_id;
        self.next_handler_id += 1;
        self.handlers.push((id, handler));
        id
    }

    pub fn unsubscribe(&mut self, id: u64) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    fn model_value(&self, field: Field) -> String {
        match field {
            Field::Fullname => self.model.fullname.clone(),
            Field::Nickname => self.model.nickname.clone(),
            Field::Phonenumber => self.model.phonenumber.clone(),
            Field::Email => self.model.email.clone(),
            Field::Birthday => self.model.birthday_text(),
            Field::Notes => self.model.notes.clone(),
        }
    }
}
