use crate::contacts::{Contact, ContactStorage};
use crate::state::{RowKey, State};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadContacts,
    CreateContact { contact: Contact },
    UpdateContact { key: RowKey, contact: Contact },
    DeleteContact { key: RowKey, id: u64 },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    storage: &'a ContactStorage,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, storage: &'a ContactStorage) -> Self {
        Handler { state, storage }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::LoadContacts => self.load_contacts().await?,
            Event::CreateContact { contact } => self.create_contact(contact).await?,
            Event::UpdateContact { key, contact } => self.update_contact(key, contact).await?,
            Event::DeleteContact { key, id } => self.delete_contact(key, id).await?,
        }
        Ok(())
    }

    /// Update state with every stored contact.
    ///
    async fn load_contacts(&mut self) -> Result<()> {
        info!("Fetching contacts...");
        match self.storage.get_all_contacts().await {
            Ok(contacts) => {
                let mut state = self.state.lock().await;
                state.contact_list_mut().on_loaded(contacts);
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch contacts: {}", e);
                Err(e.into())
            }
        }
    }

    /// Persist a new contact and append it once the service assigns an id.
    ///
    async fn create_contact(&mut self, contact: Contact) -> Result<()> {
        match self.storage.create(&contact).await {
            Ok(id) => {
                info!("Created contact '{}' (ID: {}).", contact.fullname, id);
                let mut state = self.state.lock().await;
                state.contact_list_mut().on_create_succeeded(contact, id);
                Ok(())
            }
            Err(e) => {
                error!("Failed to create contact '{}': {}", contact.fullname, e);
                Err(e.into())
            }
        }
    }

    /// Store an edited contact and apply it to its row once accepted.
    ///
    async fn update_contact(&mut self, key: RowKey, contact: Contact) -> Result<()> {
        match self.storage.update(&contact).await {
            Ok(()) => {
                info!("Saved contact '{}' (ID: {}).", contact.fullname, contact.id);
                let mut state = self.state.lock().await;
                state.contact_list_mut().on_update_succeeded(key, contact);
                Ok(())
            }
            Err(e) => {
                error!("Failed to save contact ID {}: {}", contact.id, e);
                Err(e.into())
            }
        }
    }

    /// Delete a contact and drop its row once accepted.
    ///
    async fn delete_contact(&mut self, key: RowKey, id: u64) -> Result<()> {
        match self.storage.delete(id).await {
            Ok(()) => {
                info!("Deleted contact ID {}.", id);
                let mut state = self.state.lock().await;
                state.contact_list_mut().on_delete_succeeded(key);
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete contact ID {}: {}", id, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::SessionId;
    use httpmock::MockServer;
    use serde_json::json;

    fn storage(server: &MockServer) -> ContactStorage {
        ContactStorage::new(&server.base_url(), SessionId::generate())
            .expect("mock server url is valid")
    }

    fn contact(id: u64, name: &str) -> Contact {
        Contact {
            id,
            fullname: name.to_string(),
            ..Contact::blank()
        }
    }

    fn loaded_state(contacts: Vec<Contact>) -> Arc<Mutex<State>> {
        let mut state = State::default();
        state.contact_list_mut().on_loaded(contacts);
        Arc::new(Mutex::new(state))
    }

    #[tokio::test]
    async fn load_contacts_fills_list() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/contacts");
                then.status(200).json_body(json!([
                    { "id": 1, "fullname": "Ada" },
                    { "id": 2, "fullname": "Grace" }
                ]));
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let storage = storage(&server);
        Handler::new(&state, &storage)
            .handle(Event::LoadContacts)
            .await?;
        mock.assert_async().await;

        let state = state.lock().await;
        let names: Vec<&str> = state
            .contact_list()
            .contacts()
            .iter()
            .map(|c| c.fullname.as_str())
            .collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
        assert_eq!(state.contact_list().rows().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn load_failure_leaves_list_empty() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/contacts");
                then.status(500);
            })
            .await;
        let state = Arc::new(Mutex::new(State::default()));
        let storage = storage(&server);
        let result = Handler::new(&state, &storage)
            .handle(Event::LoadContacts)
            .await;
        mock.assert_async().await;
        assert!(result.is_err());

        let state = state.lock().await;
        assert!(state.contact_list().contacts().is_empty());
        assert!(state.contact_list().rows().is_empty());
        assert!(state.contact_list().row_table().is_empty());
    }

    #[tokio::test]
    async fn create_appends_with_location_id() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/contacts");
                then.status(201).header("Location", "/contacts/7");
            })
            .await;
        let state = loaded_state(vec![contact(1, "Ada")]);
        let storage = storage(&server);
        Handler::new(&state, &storage)
            .handle(Event::CreateContact {
                contact: contact(0, "New"),
            })
            .await?;

        let state = state.lock().await;
        let contacts = state.contact_list().contacts();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].id, 7);
        assert_eq!(contacts[1].fullname, "New");
        Ok(())
    }

    #[tokio::test]
    async fn failed_create_leaves_list_unchanged() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/contacts");
                then.status(400).body("bad contact");
            })
            .await;
        let state = loaded_state(vec![contact(1, "Ada")]);
        let storage = storage(&server);
        let result = Handler::new(&state, &storage)
            .handle(Event::CreateContact {
                contact: contact(0, "New"),
            })
            .await;
        assert!(result.is_err());
        assert_eq!(state.lock().await.contact_list().contacts().len(), 1);
    }

    #[tokio::test]
    async fn update_applies_to_original_row() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT").path("/contacts/1");
                then.status(204);
            })
            .await;
        let state = loaded_state(vec![contact(1, "Ada")]);
        let key = state.lock().await.contact_list().rows()[0].key();
        let storage = storage(&server);
        Handler::new(&state, &storage)
            .handle(Event::UpdateContact {
                key,
                contact: contact(1, "Ada Lovelace"),
            })
            .await?;
        mock.assert_async().await;

        let state = state.lock().await;
        assert_eq!(state.contact_list().contacts()[0].fullname, "Ada Lovelace");
        assert_eq!(state.contact_list().rows()[0].cells()[0], "Ada Lovelace");
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_keeps_original() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("PUT").path("/contacts/1");
                then.status(500);
            })
            .await;
        let state = loaded_state(vec![contact(1, "Ada")]);
        let key = state.lock().await.contact_list().rows()[0].key();
        let storage = storage(&server);
        let result = Handler::new(&state, &storage)
            .handle(Event::UpdateContact {
                key,
                contact: contact(1, "Changed"),
            })
            .await;
        assert!(result.is_err());
        assert_eq!(
            state.lock().await.contact_list().contacts()[0].fullname,
            "Ada"
        );
    }

    #[tokio::test]
    async fn delete_removes_row() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/contacts/2");
                then.status(204);
            })
            .await;
        let state = loaded_state(vec![contact(1, "Ada"), contact(2, "Grace")]);
        let key = state.lock().await.contact_list().rows()[1].key();
        let storage = storage(&server);
        Handler::new(&state, &storage)
            .handle(Event::DeleteContact { key, id: 2 })
            .await?;

        let state = state.lock().await;
        assert_eq!(state.contact_list().contacts().len(), 1);
        assert_eq!(state.contact_list().contacts()[0].id, 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/contacts/2");
                then.status(404);
            })
            .await;
        let state = loaded_state(vec![contact(2, "Grace")]);
        let key = state.lock().await.contact_list().rows()[0].key();
        let storage = storage(&server);
        let result = Handler::new(&state, &storage)
            .handle(Event::DeleteContact { key, id: 2 })
            .await;
        assert!(result.is_err());
        assert_eq!(state.lock().await.contact_list().contacts().len(), 1);
    }
}
