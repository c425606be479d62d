//! Live updates from other sessions.
//!
//! The listener keeps a notification stream open against the storage service
//! and applies each change to the contact list, reconnecting after a delay
//! whenever the stream fails or closes.

use crate::contacts::{ContactStorage, Notification, StorageError};
use crate::state::State;
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub struct Listener<'a> {
    state: &'a Arc<Mutex<State>>,
    storage: &'a ContactStorage,
    reconnect_delay: Duration,
}

impl<'a> Listener<'a> {
    pub fn new(
        state: &'a Arc<Mutex<State>>,
        storage: &'a ContactStorage,
        reconnect_delay: Duration,
    ) -> Self {
        Listener {
            state,
            storage,
            reconnect_delay,
        }
    }

    /// Listen until the runtime shuts down.
    ///
    pub async fn run(&self) {
        loop {
            match self.listen().await {
                Ok(()) => warn!("Notification stream closed by service."),
                Err(e) => warn!("Notification stream failed: {}", e),
            }
            self.state.lock().await.set_live(false);
            debug!(
                "Reconnecting to notification stream in {}s...",
                self.reconnect_delay.as_secs()
            );
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }

    /// Apply notifications from a single connection until it closes.
    ///
    pub async fn listen(&self) -> Result<(), StorageError> {
        let mut stream = self.storage.subscribe().await?;
        info!("Listening for contact changes.");
        self.state.lock().await.set_live(true);
        while let Some(notification) = stream.next().await? {
            self.apply(notification).await;
        }
        Ok(())
    }

    async fn apply(&self, notification: Notification) {
        trace!("Applying notification {:?}", notification);
        let mut state = self.state.lock().await;
        let list = state.contact_list_mut();
        match notification {
            Notification::Created { contact, origin } => list.on_remote_created(contact, origin),
            Notification::Updated { contact, origin } => list.on_remote_updated(contact, origin),
            Notification::Deleted { id } => list.on_remote_deleted(id),
        }
    }
}
