use std::thread;
use std::time::Duration;

use serde::Deserialize;

use super::{MessagingSource, ReadyHandle};
use crate::error::{ChatGraphError, ChatGraphResult};
use crate::model::{Account, RawChat, RawContact, Wid};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_READY_ATTEMPTS: u32 = 30;
const DEFAULT_READY_INTERVAL_MS: u64 = 1000;

/// Connection settings for a messaging bridge speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// How many times `/status` is polled before giving up.
    pub ready_attempts: u32,
    pub ready_interval: Duration,
}

impl BridgeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            ready_attempts: DEFAULT_READY_ATTEMPTS,
            ready_interval: Duration::from_millis(DEFAULT_READY_INTERVAL_MS),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeStatus {
    #[serde(default)]
    ready: bool,
    self_id: Option<String>,
    self_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PictureResponse {
    url: Option<String>,
}

/// Client for a bridge exposing `/status`, `/contacts`, `/chats`,
/// `/contacts/{id}` and `/contacts/{id}/picture`.
pub struct HttpSource {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpSource {
    /// Polls the bridge until it reports a ready session, then returns a handle
    /// bound to the session's account.
    pub fn connect(config: BridgeConfig) -> ChatGraphResult<ReadyHandle> {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        let source = Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        };

        for attempt in 1..=config.ready_attempts.max(1) {
            match source.get_json::<BridgeStatus>("/status") {
                Ok(status) if status.ready => {
                    let self_id = status
                        .self_id
                        .as_deref()
                        .and_then(Wid::parse)
                        .ok_or_else(|| {
                            ChatGraphError::SourceNotReady("bridge reported no self id".into())
                        })?;
                    tracing::info!(account = %self_id, attempt, "bridge session ready");
                    let account = Account::new(self_id, status.self_name);
                    return Ok(ReadyHandle::new(account, Box::new(source)));
                }
                Ok(_) => tracing::info!(attempt, "waiting for bridge session"),
                Err(e) => tracing::debug!(attempt, error = %e, "bridge status request failed"),
            }
            thread::sleep(config.ready_interval);
        }

        Err(ChatGraphError::SourceNotReady(format!(
            "{} did not become ready after {} attempts",
            source.base_url, config.ready_attempts
        )))
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ChatGraphResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ChatGraphError::Bridge(format!("GET {}: {}", url, e)))?;
        response
            .into_json::<T>()
            .map_err(|e| ChatGraphError::Bridge(format!("GET {}: invalid JSON: {}", url, e)))
    }
}

impl MessagingSource for HttpSource {
    fn list_contacts(&self) -> ChatGraphResult<Vec<RawContact>> {
        self.get_json("/contacts")
    }

    fn list_chats(&self) -> ChatGraphResult<Vec<RawChat>> {
        self.get_json("/chats")
    }

    fn lookup_contact(&self, id: &Wid) -> ChatGraphResult<RawContact> {
        self.get_json(&format!("/contacts/{}", id))
    }

    fn profile_pic_url(&self, id: &Wid) -> ChatGraphResult<Option<String>> {
        let picture: PictureResponse = self.get_json(&format!("/contacts/{}/picture", id))?;
        Ok(picture.url.filter(|u| !u.trim().is_empty()))
    }
}
