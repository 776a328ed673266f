//! Thin client for the helpdesk REST API.
//!
//! Session lifecycle: `initSession` exchanges the user/app token pair for a
//! session token that every subsequent request carries. Sessions expire
//! server-side; the client re-initializes once and retries the failed
//! request. Transient transport failures get a short bounded retry.
//! Ticket listings are paginated with `range` and signalled complete by a
//! 200 (vs 206 Partial Content).

pub mod schema;

use std::thread;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Ticket;
use schema::{SessionResponse, TicketDto};

/// Rows requested per page.
const PAGE_SIZE: usize = 200;
/// Retries for transient transport errors (timeouts, refused connections).
const TRANSPORT_RETRIES: usize = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(250);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("session rejected: {0}")]
    Session(String),
}

/// Credentials and endpoint for one backend.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub base_url: String,
    pub app_token: String,
    pub user_token: String,
}

/// Blocking client with session handling.
pub struct HelpdeskClient {
    http: Client,
    base_url: String,
    app_token: String,
    user_token: String,
    session_token: Option<String>,
}

impl HelpdeskClient {
    pub fn new(credentials: ApiCredentials) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
            app_token: credentials.app_token,
            user_token: credentials.user_token,
            session_token: None,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Opens a session if none is held, returning the session token.
    fn ensure_session(&mut self) -> Result<String, ApiError> {
        if let Some(token) = &self.session_token {
            return Ok(token.clone());
        }
        debug!(url = %self.base_url, "opening session");
        let response = self
            .http
            .get(self.url("initSession"))
            .header("App-Token", &self.app_token)
            .header("Authorization", format!("user_token {}", self.user_token))
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = read_body(response);
            return Err(ApiError::Session(format!(
                "initSession failed with {status}: {body}"
            )));
        }
        let session: SessionResponse = response.json()?;
        self.session_token = Some(session.session_token.clone());
        Ok(session.session_token)
    }

    fn session_headers(&self, session: &str) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "App-Token",
            HeaderValue::from_str(&self.app_token)
                .map_err(|e| ApiError::Session(format!("invalid app token: {e}")))?,
        );
        headers.insert(
            "Session-Token",
            HeaderValue::from_str(session)
                .map_err(|e| ApiError::Session(format!("invalid session token: {e}")))?,
        );
        Ok(headers)
    }

    /// Fetches all tickets, paging until the backend reports completion.
    /// On session expiry the session is re-opened once and the fetch
    /// restarted from the first page.
    pub fn fetch_tickets(&mut self) -> Result<Vec<Ticket>, ApiError> {
        match self.fetch_all_pages() {
            Err(ApiError::Session(reason)) => {
                warn!(%reason, "session expired, re-authenticating");
                self.session_token = None;
                self.fetch_all_pages()
            }
            other => other,
        }
    }

    fn fetch_all_pages(&mut self) -> Result<Vec<Ticket>, ApiError> {
        let session = self.ensure_session()?;
        let mut tickets = Vec::new();
        let mut start = 0usize;
        loop {
            let (page, more) = self.fetch_page(&session, start)?;
            let fetched = page.len();
            tickets.extend(page.into_iter().map(TicketDto::into_ticket));
            if !more || fetched == 0 {
                break;
            }
            start += PAGE_SIZE;
        }
        debug!(count = tickets.len(), "fetched tickets");
        Ok(tickets)
    }

    /// Fetches one page. Returns the rows and whether more pages remain
    /// (206 Partial Content means the range did not exhaust the result).
    fn fetch_page(&self, session: &str, start: usize) -> Result<(Vec<TicketDto>, bool), ApiError> {
        let range = format!("{}-{}", start, start + PAGE_SIZE - 1);
        let response = self.send_with_retry(|| {
            self.http
                .get(self.url("Ticket"))
                .headers(self.session_headers(session)?)
                .query(&[("range", range.as_str()), ("expand_dropdowns", "true")])
                .send()
                .map_err(ApiError::from)
        })?;

        let status = response.status();
        let more = status == StatusCode::PARTIAL_CONTENT;
        if status.is_success() {
            let page: Vec<TicketDto> = response.json()?;
            return Ok((page, more));
        }

        let body = read_body(response);
        if is_session_expired(status.as_u16(), &body) {
            Err(ApiError::Session(body))
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Runs a request, retrying transient transport failures a bounded
    /// number of times with a short pause.
    fn send_with_retry<F>(&self, mut send: F) -> Result<Response, ApiError>
    where
        F: FnMut() -> Result<Response, ApiError>,
    {
        let mut attempt = 0;
        loop {
            match send() {
                Err(ApiError::Transport(err)) if attempt < TRANSPORT_RETRIES && is_transient(&err) => {
                    attempt += 1;
                    warn!(%err, attempt, "transient transport error, retrying");
                    thread::sleep(RETRY_BACKOFF);
                }
                other => return other,
            }
        }
    }

    /// Closes the session; failures are logged, not surfaced (called on
    /// shutdown where nothing can act on them).
    pub fn close(&mut self) {
        let Some(session) = self.session_token.take() else {
            return;
        };
        let headers = match self.session_headers(&session) {
            Ok(h) => h,
            Err(_) => return,
        };
        if let Err(err) = self.http.get(self.url("killSession")).headers(headers).send() {
            debug!(%err, "killSession failed");
        }
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Session expiry arrives as a 401 whose body names the session token.
fn is_session_expired(status: u16, body: &str) -> bool {
    status == 401 && body.contains("SESSION_TOKEN")
}

fn read_body(response: Response) -> String {
    response.text().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expiry_detection() {
        assert!(is_session_expired(
            401,
            r#"["ERROR_SESSION_TOKEN_INVALID","session_token seems invalid"]"#
        ));
        assert!(!is_session_expired(401, "bad credentials"));
        assert!(!is_session_expired(500, "ERROR_SESSION_TOKEN_INVALID"));
    }

    #[test]
    fn base_url_is_normalized() {
        let client = HelpdeskClient::new(ApiCredentials {
            base_url: "https://helpdesk.example/apirest.php/".to_string(),
            app_token: "app".to_string(),
            user_token: "user".to_string(),
        })
        .unwrap();
        assert_eq!(client.endpoint(), "https://helpdesk.example/apirest.php");
        assert_eq!(
            client.url("initSession"),
            "https://helpdesk.example/apirest.php/initSession"
        );
    }
}
