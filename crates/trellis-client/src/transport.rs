//! Matrix client-server transport.
//!
//! Provides [`MatrixClient`], an authenticated HTTPS client implementing
//! [`ChatService`]. This is a thin layer: it performs the requests and hands
//! the decoded [`SyncBatch`] back; retry policy and event delivery live in the
//! application's ingestion bridge.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use reqwest::{Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{ChatService, ClientError, SyncBatch, SyncResponse};

const API_PREFIX: [&str; 3] = ["_matrix", "client", "v3"];
const DEVICE_DISPLAY_NAME: &str = "trellis";

/// Default server-side long-poll timeout.
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra time allowed on top of the long-poll timeout before the HTTP request
/// itself is abandoned.
const SYNC_GRACE: Duration = Duration::from_secs(10);

/// Password login parameters.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Homeserver base URL (e.g. `https://matrix.org`).
    pub homeserver: String,
    /// Username localpart or full user id.
    pub username: String,
    /// Account password.
    pub password: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    identifier: UserIdentifier<'a>,
    password: &'a str,
    initial_device_display_name: &'static str,
}

#[derive(Serialize)]
struct UserIdentifier<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    user: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
    user_id: String,
}

#[derive(Serialize)]
struct TextContent<'a> {
    msgtype: &'static str,
    body: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    event_id: String,
}

/// Authenticated Matrix client.
///
/// Cheap to clone; clones share the connection pool and the transaction
/// counter.
#[derive(Debug, Clone)]
pub struct MatrixClient {
    http: reqwest::Client,
    homeserver: Url,
    access_token: String,
    user_id: String,
    sync_timeout: Duration,
    txn_prefix: u128,
    txn_counter: Arc<AtomicU64>,
}

impl MatrixClient {
    /// Log in with a password and return an authenticated client.
    pub async fn login(credentials: &Credentials) -> Result<Self, ClientError> {
        let homeserver = Url::parse(&credentials.homeserver)
            .map_err(|e| ClientError::InvalidHomeserver(format!("{}: {e}", credentials.homeserver)))?;
        if homeserver.cannot_be_a_base() {
            return Err(ClientError::InvalidHomeserver(credentials.homeserver.clone()));
        }

        let http = reqwest::Client::new();
        let request = LoginRequest {
            kind: "m.login.password",
            identifier: UserIdentifier { kind: "m.id.user", user: &credentials.username },
            password: &credentials.password,
            initial_device_display_name: DEVICE_DISPLAY_NAME,
        };

        let url = endpoint(&homeserver, &["login"])?;
        let response = http.post(url).json(&request).send().await.map_err(http_error)?;
        let login: LoginResponse = decode(response).await?;

        tracing::info!(user_id = %login.user_id, "Logged in");

        let txn_prefix =
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or_default();

        Ok(Self {
            http,
            homeserver,
            access_token: login.access_token,
            user_id: login.user_id,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            txn_prefix,
            txn_counter: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Set the server-side long-poll timeout.
    #[must_use]
    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = timeout;
        self
    }

    /// Fully qualified id of the logged-in user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Unique transaction id for idempotent sends.
    fn next_txn_id(&self) -> String {
        let n = self.txn_counter.fetch_add(1, Ordering::Relaxed);
        format!("trellis.{}.{n}", self.txn_prefix)
    }
}

impl ChatService for MatrixClient {
    async fn sync(&self, since: Option<&str>) -> Result<SyncBatch, ClientError> {
        let mut url = endpoint(&self.homeserver, &["sync"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("timeout", &self.sync_timeout.as_millis().to_string());
            if let Some(token) = since {
                query.append_pair("since", token);
            }
        }

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .timeout(self.sync_timeout + SYNC_GRACE)
            .send()
            .await
            .map_err(http_error)?;

        let sync: SyncResponse = decode(response).await?;
        Ok(sync.into_batch())
    }

    async fn send_text(&self, room_id: &str, body: &str) -> Result<(), ClientError> {
        let txn_id = self.next_txn_id();
        let url =
            endpoint(&self.homeserver, &["rooms", room_id, "send", "m.room.message", &txn_id])?;

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&TextContent { msgtype: "m.text", body })
            .send()
            .await
            .map_err(http_error)?;

        let sent: SendResponse = decode(response).await?;
        tracing::debug!(%room_id, event_id = %sent.event_id, "Message sent");
        Ok(())
    }
}

/// Build an API URL under `/_matrix/client/v3`. Segments are percent-encoded.
fn endpoint(homeserver: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = homeserver.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidHomeserver(homeserver.to_string()))?
        .pop_if_empty()
        .extend(API_PREFIX)
        .extend(segments);
    Ok(url)
}

/// Map a non-success status to [`ClientError::Status`], otherwise decode JSON.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status { status: status.as_u16(), body });
    }

    response.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
}

fn http_error(error: reqwest::Error) -> ClientError {
    ClientError::Http(error.to_string())
}
