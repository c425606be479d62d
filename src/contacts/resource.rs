use chrono::NaiveDate;
use fake::Dummy;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Format used for birthdays on the wire and in the UI.
///
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

const NOTES_PREVIEW_LENGTH: usize = 20;

/// Defines contact data structure.
///
/// An `id` of zero marks a contact that the storage service has not yet
/// persisted. Equality is identity by id, see the `PartialEq` impl.
#[derive(Clone, Debug, Default, Dummy, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub phonenumber: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl Contact {
    /// Return a blank, not yet persisted contact.
    ///
    pub fn blank() -> Self {
        Contact::default()
    }

    /// Return true if the storage service has assigned an id.
    ///
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Overwrite every field except the id with the values of `other`.
    ///
    pub fn copy_fields_from(&mut self, other: &Contact) {
        self.fullname = other.fullname.clone();
        self.nickname = other.nickname.clone();
        self.phonenumber = other.phonenumber.clone();
        self.email = other.email.clone();
        self.birthday = other.birthday;
        self.notes = other.notes.clone();
    }

    /// Compare every field except the id.
    ///
    pub fn has_same_fields(&self, other: &Contact) -> bool {
        self.fullname == other.fullname
            && self.nickname == other.nickname
            && self.phonenumber == other.phonenumber
            && self.email == other.email
            && self.birthday == other.birthday
            && self.notes == other.notes
    }

    /// Return the birthday as display text, or an empty string.
    ///
    pub fn birthday_text(&self) -> String {
        self.birthday
            .map(|date| date.format(BIRTHDAY_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Return the first characters of the notes, with an ellipsis when cut.
    ///
    pub fn notes_preview(&self) -> String {
        if self.notes.chars().count() > NOTES_PREVIEW_LENGTH {
            let preview: String = self.notes.chars().take(NOTES_PREVIEW_LENGTH).collect();
            format!("{}...", preview)
        } else {
            self.notes.clone()
        }
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        if self.id == 0 || other.id == 0 {
            return std::ptr::eq(self, other);
        }
        self.id == other.id
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Contact: id={}, nickname={}, fullname={}, phonenumber={}, email={}, birthday={}, notes=\"{}\"]",
            self.id,
            self.nickname,
            self.fullname,
            self.phonenumber,
            self.email,
            self.birthday_text(),
            self.notes_preview()
        )
    }
}
