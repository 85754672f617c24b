use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::ConnectionStatus,
    protocol::{GreetingPayload, HealthResponse},
};
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{error, info, warn};
use url::{form_urlencoded, Url};

pub mod config;
pub mod error;
pub mod state;
mod time_format;

pub use config::ClientSettings;
pub use error::RemoteCallError;
pub use state::{ClientState, Counter, MessageCycle};
pub use time_format::format_timestamp;

const HEALTH_ENDPOINT: &str = "health";
const GREETING_ENDPOINT: &str = "api/message";

pub struct StatusClient {
    http: Client,
    api_base_url: Url,
    health_url: Url,
    greeting_url: Url,
    greeting_delay: Duration,
    state: Mutex<ClientState>,
    deferred_fetch: Mutex<Option<DeferredFetch>>,
}

/// Startup greeting fetch scheduled by `activate`. Dropping `cancel` stops it
/// only while it is still waiting out the delay.
struct DeferredFetch {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl StatusClient {
    pub fn new(settings: &ClientSettings) -> Result<Arc<Self>> {
        Self::with_state(settings, ClientState::default())
    }

    pub fn with_state(settings: &ClientSettings, state: ClientState) -> Result<Arc<Self>> {
        let api_base_url = normalize_base_url(&settings.api_base_url)?;
        let health_url = api_base_url
            .join(HEALTH_ENDPOINT)
            .context("failed to build health endpoint url")?;
        let greeting_url = api_base_url
            .join(GREETING_ENDPOINT)
            .context("failed to build greeting endpoint url")?;

        Ok(Arc::new(Self {
            http: Client::new(),
            api_base_url,
            health_url,
            greeting_url,
            greeting_delay: settings.greeting_delay(),
            state: Mutex::new(state),
            deferred_fetch: Mutex::new(None),
        }))
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// Schedules the welcome greeting after the configured delay, then runs
    /// the health check right away. Activating again replaces a greeting
    /// fetch that is still waiting; one already sent is left to finish.
    pub async fn activate(self: &Arc<Self>) {
        let client = Arc::downgrade(self);
        let delay = self.greeting_delay;
        let (cancel, cancelled) = oneshot::channel();
        let handle = tokio::spawn(run_deferred_fetch(client, delay, cancelled));
        // Dropping the previous sender cancels it if it is still sleeping.
        drop(lock(&self.deferred_fetch).replace(DeferredFetch { cancel, handle }));
        info!(
            api_base_url = %self.api_base_url,
            delay_ms = delay.as_millis() as u64,
            "status client activated"
        );

        self.check_health().await;
    }

    /// Cancels the deferred greeting fetch unless its request is already out.
    pub fn deactivate(&self) {
        if let Some(deferred) = lock(&self.deferred_fetch).take() {
            if !deferred.handle.is_finished() {
                info!("status client deactivated; cancelling deferred greeting fetch");
            }
            deferred.cancel.send(()).ok();
        }
    }

    pub fn deferred_fetch_pending(&self) -> bool {
        lock(&self.deferred_fetch)
            .as_ref()
            .is_some_and(|deferred| !deferred.handle.is_finished())
    }

    pub async fn check_health(&self) {
        let status = match self
            .get_json::<HealthResponse>(HEALTH_ENDPOINT, self.health_url.clone())
            .await
        {
            Ok(health) => {
                if !health.is_healthy() {
                    warn!(status = %health.status, "health: backend reported non-healthy status");
                }
                ConnectionStatus::from_reachable(health.is_healthy())
            }
            Err(err) => {
                error!(endpoint = err.endpoint, error = %err, "health: check failed");
                ConnectionStatus::Offline
            }
        };
        self.state().status = status;
    }

    /// An empty name is treated the same as no name.
    pub async fn fetch_greeting(&self, name: Option<&str>) {
        let _loading = LoadingGuard::begin(self);
        let url = self.greeting_url(name);

        match self.get_json::<GreetingPayload>(GREETING_ENDPOINT, url).await {
            Ok(payload) => {
                let mut state = self.state();
                state.api_response = Some(payload);
                state.status = ConnectionStatus::Online;
            }
            Err(err) => {
                error!(endpoint = err.endpoint, error = %err, "greeting: fetch failed");
                let mut state = self.state();
                state.error = Some(err.display_message());
                state.api_response = None;
                state.status = ConnectionStatus::Offline;
            }
        }
    }

    pub async fn fetch_greeting_for_user(&self) {
        let name = self.user_name();
        self.fetch_greeting(Some(&name)).await;
    }

    pub fn greeting_url(&self, name: Option<&str>) -> Url {
        let mut url = self.greeting_url.clone();
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            // Spaces go out as %20 rather than the form-encoded '+'; a literal
            // '+' is already escaped as %2B by the serializer.
            let encoded = form_urlencoded::byte_serialize(name.as_bytes())
                .collect::<String>()
                .replace('+', "%20");
            url.set_query(Some(&format!("name={encoded}")));
        }
        url
    }

    pub fn advance_message(&self) -> String {
        self.state().messages.advance().to_string()
    }

    pub fn increment(&self) -> i64 {
        self.state().counter.increment()
    }

    pub fn decrement(&self) -> i64 {
        self.state().counter.decrement()
    }

    pub fn reset(&self) {
        self.state().counter.reset();
    }

    pub fn set_user_name(&self, name: impl Into<String>) {
        self.state().user_name = name.into();
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state().status
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn api_response(&self) -> Option<GreetingPayload> {
        self.state().api_response.clone()
    }

    pub fn counter(&self) -> i64 {
        self.state().counter.value()
    }

    pub fn current_message(&self) -> String {
        self.state().messages.current().to_string()
    }

    pub fn message_index(&self) -> usize {
        self.state().messages.cursor()
    }

    pub fn user_name(&self) -> String {
        self.state().user_name.clone()
    }

    pub fn snapshot(&self) -> ClientState {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, ClientState> {
        lock(&self.state)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
    ) -> Result<T, RemoteCallError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| RemoteCallError::new(endpoint, source))?;
        response
            .json::<T>()
            .await
            .map_err(|source| RemoteCallError::new(endpoint, source))
    }
}

/// Clears `loading` on drop, including when the fetch future is dropped.
struct LoadingGuard<'a> {
    client: &'a StatusClient,
}

impl<'a> LoadingGuard<'a> {
    fn begin(client: &'a StatusClient) -> Self {
        let mut state = client.state();
        state.loading = true;
        state.error = None;
        state.api_response = None;
        drop(state);
        Self { client }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.client.state().loading = false;
    }
}

async fn run_deferred_fetch(
    client: Weak<StatusClient>,
    delay: Duration,
    cancelled: oneshot::Receiver<()>,
) {
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = cancelled => return,
    }
    let Some(client) = client.upgrade() else {
        return;
    };
    client.fetch_greeting(None).await;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw.trim()).with_context(|| format!("invalid api base url '{raw}'"))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
