use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Notify;

use crate::error::TransportError;
use crate::transport::{RawResponse, Transport};

#[derive(Clone)]
enum Route {
    Respond(RawResponse),
    Fail(TransportError),
}

/// In-memory transport keyed by full URL. Unknown URLs fail with a network error.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .lock()
            .expect("routes mutex poisoned")
            .insert(url.to_string(), Route::Respond(RawResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(self, url: &str, err: TransportError) -> Self {
        self.routes
            .lock()
            .expect("routes mutex poisoned")
            .insert(url.to_string(), Route::Fail(err));
        self
    }

    /// Makes requests to `url` wait until the returned gate is notified.
    pub(crate) fn hold(&self, url: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .expect("gates mutex poisoned")
            .insert(url.to_string(), gate.clone());
        gate
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(url.to_string());

        let gate = self
            .gates
            .lock()
            .expect("gates mutex poisoned")
            .get(url)
            .cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let route = self
            .routes
            .lock()
            .expect("routes mutex poisoned")
            .get(url)
            .cloned();
        match route {
            Some(Route::Respond(response)) => Ok(response),
            Some(Route::Fail(err)) => Err(err),
            None => Err(TransportError::Network(format!("no route to {url}"))),
        }
    }
}

/// Wraps items into the `{ "data": [...] }` envelope.
pub(crate) fn envelope<T: Serialize>(items: &[T]) -> String {
    serde_json::json!({ "data": items }).to_string()
}
