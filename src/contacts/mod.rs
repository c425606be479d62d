pub mod client;
mod error;
mod notification;
mod resource;

pub use error::StorageError;
pub use notification::{LineBuffer, Notification, SessionId};
pub use resource::*;

use client::Client;
use log::*;
use reqwest::{header::LOCATION, Method, Response};
use std::collections::VecDeque;

/// Responsible for asynchronous interaction with the contact storage
/// service including transformation of response data into contacts.
///
pub struct ContactStorage {
    client: Client,
}

impl ContactStorage {
    /// Returns a new instance for the given service URL and session.
    ///
    pub fn new(base_url: &str, session: SessionId) -> Result<ContactStorage, StorageError> {
        debug!(
            "Initializing contact storage client for {} (session {})...",
            base_url, session
        );
        Ok(ContactStorage {
            client: Client::new(base_url, session)?,
        })
    }

    /// Returns every stored contact in the order the service lists them.
    ///
    pub async fn get_all_contacts(&self) -> Result<Vec<Contact>, StorageError> {
        debug!("Requesting all contacts...");
        let contacts: Vec<Contact> = self
            .client
            .call(Method::GET, None, None)
            .await?
            .json()
            .await?;
        debug!("Retrieved {} contacts", contacts.len());
        Ok(contacts)
    }

    /// Persist a new contact and return the id assigned by the service.
    ///
    pub async fn create(&self, contact: &Contact) -> Result<u64, StorageError> {
        debug!("Creating contact '{}'...", contact.fullname);
        let response = self.client.call(Method::POST, None, Some(contact)).await?;
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        match location.as_deref().and_then(client::id_from_location) {
            Some(id) => Ok(id),
            None => Err(StorageError::MissingLocation(location)),
        }
    }

    /// Store the fields of an existing contact.
    ///
    pub async fn update(&self, contact: &Contact) -> Result<(), StorageError> {
        debug!("Updating contact ID {}...", contact.id);
        self.client
            .call(Method::PUT, Some(contact.id), Some(contact))
            .await?;
        Ok(())
    }

    /// Delete the contact with the given id.
    ///
    pub async fn delete(&self, id: u64) -> Result<(), StorageError> {
        debug!("Deleting contact ID {}...", id);
        self.client.call(Method::DELETE, Some(id), None).await?;
        Ok(())
    }

    /// Open the stream of change notifications from all sessions.
    ///
    pub async fn subscribe(&self) -> Result<NotificationStream, StorageError> {
        let response = self.client.subscribe().await?;
        Ok(NotificationStream {
            response,
            lines: LineBuffer::default(),
            ready: VecDeque::new(),
        })
    }
}

/// Newline-delimited notifications read from an open response.
///
pub struct NotificationStream {
    response: Response,
    lines: LineBuffer,
    ready: VecDeque<Notification>,
}

impl NotificationStream {
    /// Wait for the next notification. Returns `None` once the service
    /// closes the stream. Lines that fail to parse are logged and skipped.
    ///
    pub async fn next(&mut self) -> Result<Option<Notification>, StorageError> {
        loop {
            if let Some(notification) = self.ready.pop_front() {
                return Ok(Some(notification));
            }
            let chunk = match self.response.chunk().await? {
                Some(chunk) => chunk,
                None => return Ok(None),
            };
            for line in self.lines.push(&chunk) {
                match Notification::parse_line(&line) {
                    Ok(Some(notification)) => self.ready.push_back(notification),
                    Ok(None) => (),
                    Err(e) => warn!("Skipping malformed notification '{}': {}", line, e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::SESSION_HEADER;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;

    fn storage(server: &MockServer, session: SessionId) -> ContactStorage {
        ContactStorage::new(&server.base_url(), session).expect("mock server url is valid")
    }

    #[tokio::test]
    async fn get_all_contacts_success() -> Result<(), StorageError> {
        let contacts: [Contact; 2] = Faker.fake();

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/contacts");
                then.status(200).json_body(json!([contacts[0], contacts[1]]));
            })
            .await;

        let received = storage(&server, SessionId::generate())
            .get_all_contacts()
            .await?;
        mock.assert_async().await;
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].id, contacts[0].id);
        assert!(received[1].has_same_fields(&contacts[1]));
        Ok(())
    }

    #[tokio::test]
    async fn get_all_contacts_server_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/contacts");
                then.status(500).body("boom");
            })
            .await;

        let result = storage(&server, SessionId::generate())
            .get_all_contacts()
            .await;
        mock.assert_async().await;
        assert_eq!(result.unwrap_err().status(), Some(500));
    }

    #[tokio::test]
    async fn create_returns_location_id() -> Result<(), StorageError> {
        let session = SessionId::generate();
        let contact = Contact {
            fullname: "Ada Lovelace".to_string(),
            ..Contact::blank()
        };

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/contacts")
                    .header(SESSION_HEADER, &session.to_string())
                    .body_contains("Ada Lovelace");
                then.status(201).header("Location", "/rest/contacts/42");
            })
            .await;

        let id = storage(&server, session).create(&contact).await?;
        mock.assert_async().await;
        assert_eq!(id, 42);
        Ok(())
    }

    #[tokio::test]
    async fn create_without_location_fails() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/contacts");
                then.status(201);
            })
            .await;

        let result = storage(&server, SessionId::generate())
            .create(&Contact::blank())
            .await;
        mock.assert_async().await;
        assert!(matches!(result, Err(StorageError::MissingLocation(None))));
    }

    #[tokio::test]
    async fn update_puts_contact() -> Result<(), StorageError> {
        let session = SessionId::generate();
        let mut contact: Contact = Faker.fake();
        contact.id = 12;

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/contacts/12")
                    .header(SESSION_HEADER, &session.to_string());
                then.status(204);
            })
            .await;

        storage(&server, session).update(&contact).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_not_found() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/contacts/77");
                then.status(404);
            })
            .await;

        let result = storage(&server, SessionId::generate()).delete(77).await;
        mock.assert_async().await;
        assert_eq!(result.unwrap_err().status(), Some(404));
    }

    #[tokio::test]
    async fn subscribe_reads_notifications() -> Result<(), StorageError> {
        let origin = SessionId::generate();
        let body = format!(
            "{}\n\n{}\nnot json\n{}\n",
            json!({"type": "created", "contact": {"id": 1, "fullname": "A"}, "origin": origin}),
            json!({"type": "updated", "contact": {"id": 1, "fullname": "B"}, "origin": origin}),
            json!({"type": "deleted", "id": 1}),
        );

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/contacts/events");
                then.status(200).body(body.as_str());
            })
            .await;

        let mut stream = storage(&server, SessionId::generate()).subscribe().await?;
        assert!(matches!(stream.next().await?, Some(Notification::Created { .. })));
        assert!(matches!(stream.next().await?, Some(Notification::Updated { .. })));
        assert!(matches!(stream.next().await?, Some(Notification::Deleted { id: 1 })));
        assert!(stream.next().await?.is_none());
        mock.assert_async().await;
        Ok(())
    }
}
