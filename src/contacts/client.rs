//! HTTP client for contact storage requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the contact storage service, tagging mutating requests with the
//! originating session and turning unsuccessful statuses into errors.

use super::{Contact, SessionId, StorageError};
use log::*;
use reqwest::{Method, Response};

/// Header carrying the originating session on mutating requests.
///
pub const SESSION_HEADER: &str = "X-Session-Id";

const CONTACTS_ENDPOINT: &str = "contacts";
const EVENTS_ENDPOINT: &str = "events";

/// Makes requests to the storage service.
///
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) session: SessionId,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and session.
    ///
    pub fn new(base_url: &str, session: SessionId) -> Result<Self, StorageError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StorageError::InvalidUrl(base_url.to_owned()));
        }
        Ok(Client {
            base_url: base_url.to_owned(),
            session,
            http_client: reqwest::Client::builder().build()?,
        })
    }

    /// Return the URL of the contacts collection, or of one contact.
    ///
    fn contacts_url(&self, id: Option<u64>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", self.base_url, CONTACTS_ENDPOINT, id),
            None => format!("{}/{}", self.base_url, CONTACTS_ENDPOINT),
        }
    }

    /// Make request and return the response if its status is a success.
    ///
    pub(crate) async fn call(
        &self,
        method: Method,
        id: Option<u64>,
        body: Option<&Contact>,
    ) -> Result<Response, StorageError> {
        let url = self.contacts_url(id);
        let mutating = matches!(method, Method::POST | Method::PUT | Method::DELETE);
        trace!("{} {}", method, url);

        let mut request = self.http_client.request(method, &url);
        if mutating {
            request = request.header(SESSION_HEADER, self.session.to_string());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Client::ensure_success(request.send().await?).await
    }

    /// Open the notification stream.
    ///
    pub(crate) async fn subscribe(&self) -> Result<Response, StorageError> {
        let url = format!("{}/{}", self.contacts_url(None), EVENTS_ENDPOINT);
        debug!("Subscribing to {}...", url);
        let response = self
            .http_client
            .get(&url)
            .header(SESSION_HEADER, self.session.to_string())
            .send()
            .await?;
        Client::ensure_success(response).await
    }

    async fn ensure_success(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        error!("Storage request failed with status {}: {}", status, message);
        Err(StorageError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extract the id of a created contact from a Location header value.
///
pub(crate) fn id_from_location(location: &str) -> Option<u64> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .filter(|id| *id != 0)
}
