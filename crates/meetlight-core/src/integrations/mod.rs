//! Collaborators the monitor talks to: where events come from, and where
//! the results go.

pub mod file;
pub mod http;
pub mod traits;

pub use file::FileEventProvider;
pub use http::HttpEventProvider;
pub use traits::{EventProvider, Indicator, Renderer};

use serde::Deserialize;

use crate::calendar::RawEvent;
use crate::error::FetchError;

/// Accepted response bodies: a bare array, or Google's `events.list` shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsPayload {
    List(Vec<RawEvent>),
    Envelope { items: Vec<RawEvent> },
}

/// Decode a provider response body into raw events.
pub fn decode_events(body: &str) -> Result<Vec<RawEvent>, FetchError> {
    let payload: EventsPayload = serde_json::from_str(body)?;
    Ok(match payload {
        EventsPayload::List(events) => events,
        EventsPayload::Envelope { items } => items,
    })
}
