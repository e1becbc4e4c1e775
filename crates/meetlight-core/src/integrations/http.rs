//! Event provider backed by an HTTP endpoint.
//!
//! The endpoint is expected to answer `GET` with either a JSON array of
//! Google Calendar events or the raw `events.list` response (`{"items": [...]}`).
//! A bearer token is attached when configured.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

use super::decode_events;
use super::traits::EventProvider;
use crate::calendar::RawEvent;
use crate::error::FetchError;
use crate::storage::ProviderConfig;

pub struct HttpEventProvider {
    client: Client,
    url: Url,
    token: Option<String>,
}

impl HttpEventProvider {
    pub fn new(api_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, FetchError> {
        if api_url.trim().is_empty() {
            return Err(FetchError::NotConfigured("provider.api_url is empty".into()));
        }
        let url = Url::parse(api_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, FetchError> {
        Self::new(
            &config.api_url,
            config.resolved_token(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl EventProvider for HttpEventProvider {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&mut self) -> Result<Vec<RawEvent>, FetchError> {
        debug!(url = %self.url, "fetching events");

        let mut request = self
            .client
            .get(self.url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let events = decode_events(&body)?;
        info!(count = events.len(), "fetched events");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_not_configured() {
        let err = HttpEventProvider::new("  ", None, Duration::from_secs(1)).err();
        assert!(matches!(err, Some(FetchError::NotConfigured(_))));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = HttpEventProvider::new("not a url", None, Duration::from_secs(1)).err();
        assert!(matches!(err, Some(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn blank_token_is_dropped() {
        let provider = HttpEventProvider::new(
            "http://127.0.0.1:3000/calendar/events",
            Some(String::new()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(provider.token.is_none());
        assert_eq!(provider.url().path(), "/calendar/events");
    }
}
