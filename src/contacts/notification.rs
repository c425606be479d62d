//! Broadcast notifications about contact changes made by any session.

use super::{Contact, StorageError};
use log::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies the session that originated a change.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Return a new random session id.
    ///
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Change notification delivered to every connected session.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Notification {
    Created { contact: Contact, origin: SessionId },
    Updated { contact: Contact, origin: SessionId },
    Deleted { id: u64 },
}

impl Notification {
    /// Parse one line of the notification stream. Blank lines are
    /// keep-alives and yield `None`.
    ///
    pub fn parse_line(line: &str) -> Result<Option<Notification>, StorageError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(line)?))
    }
}

/// Longest unterminated line kept while waiting for its newline.
///
const MAX_LINE_BYTES: usize = 64 * 1024;

/// Splits a byte stream into complete newline-terminated lines.
///
pub struct LineBuffer {
    pending: Vec<u8>,
    max_line: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        LineBuffer::with_max_line(MAX_LINE_BYTES)
    }
}

impl LineBuffer {
    pub fn with_max_line(max_line: usize) -> Self {
        LineBuffer {
            pending: vec![],
            max_line,
        }
    }

    /// Append a chunk and return every line it completed. A partial line
    /// longer than the limit is discarded.
    ///
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = vec![];
        while let Some(position) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=position).collect();
            lines.push(String::from_utf8_lossy(&line[..line.len() - 1]).into_owned());
        }
        if self.pending.len() > self.max_line {
            warn!(
                "Dropping {} bytes of notification stream without a line break",
                self.pending.len()
            );
            self.pending.clear();
        }
        lines
    }
}
