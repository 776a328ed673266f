//! Live data provider backed by the helpdesk API.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::warn;

use crate::api::HelpdeskClient;

use super::{ProviderError, TicketBoard, TicketProvider};

/// Provider that fetches tickets from the backend, with interval-based
/// caching: refresh calls inside the minimum interval return the cached
/// board without touching the network. A failed fetch keeps the last good
/// board and records the error.
pub struct LiveProvider {
    client: HelpdeskClient,
    min_refresh: Duration,
    last_fetch: Option<Instant>,
    current: Option<TicketBoard>,
    last_error: Option<ProviderError>,
    source: String,
}

impl LiveProvider {
    pub fn new(client: HelpdeskClient, min_refresh: Duration) -> Self {
        let source = client.endpoint().to_string();
        Self {
            client,
            min_refresh,
            last_fetch: None,
            current: None,
            last_error: None,
            source,
        }
    }

    fn cache_is_fresh(&self) -> bool {
        match (&self.current, self.last_fetch) {
            (Some(_), Some(at)) => at.elapsed() < self.min_refresh,
            _ => false,
        }
    }
}

impl TicketProvider for LiveProvider {
    fn current(&self) -> Option<&TicketBoard> {
        self.current.as_ref()
    }

    fn refresh(&mut self) -> Option<&TicketBoard> {
        if self.cache_is_fresh() {
            return self.current.as_ref();
        }
        match self.client.fetch_tickets() {
            Ok(tickets) => {
                self.current = Some(TicketBoard {
                    fetched_at: Utc::now().timestamp(),
                    tickets,
                });
                self.last_fetch = Some(Instant::now());
                self.last_error = None;
            }
            Err(err) => {
                warn!(%err, "ticket fetch failed, keeping previous data");
                self.last_error = Some(ProviderError::Fetch(err.to_string()));
            }
        }
        self.current.as_ref()
    }

    fn is_live(&self) -> bool {
        true
    }

    fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn invalidate(&mut self) {
        self.last_fetch = None;
    }

    fn close(&mut self) {
        self.client.close();
    }
}
