//! Request gateway - executes descriptors and normalizes outcomes
//!
//! One network call per invocation, no retry. Every fault is absorbed
//! and converted into `Outcome::Failure`; nothing is raised past this
//! boundary. Callers branch on the returned value.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use reqwest::StatusCode;
use serde_json::Value;

use crate::constants::{
    EMPTY_ENDPOINT_MESSAGE, GENERIC_FAILURE_MESSAGE, PAYLOAD_TOO_LARGE_MESSAGE, REQUEST_TIMEOUT,
    UNREACHABLE_MESSAGE,
};
use crate::dispatch::{NullSink, Signal, SignalSink};
use crate::models::{Authorization, Body, HttpMethod, RequestDescriptor, SignalSpec};
use crate::outcome::Outcome;
use crate::token::{StaticTokenSource, TokenSource};

/// Translates request descriptors into HTTP calls.
///
/// Stateless across invocations apart from reading the ambient token,
/// which is fetched fresh from the injected [`TokenSource`] on every
/// call. Concurrent sends are independent.
pub struct Gateway {
    client: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
    sink: Arc<dyn SignalSink>,
    fallback_token: String,
}

impl Gateway {
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// Gateway with default client, no token and no signal sink
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Execute one request described by `descriptor`.
    ///
    /// Always returns an [`Outcome`]; transport, server and decoding
    /// faults all resolve to `Outcome::Failure` with a user-facing
    /// message. Configured `on_success`/`on_failure` signals are
    /// emitted before returning.
    pub async fn send(&self, mut descriptor: RequestDescriptor) -> Outcome {
        if descriptor.endpoint.trim().is_empty() {
            return self.fail(&descriptor.on_failure, EMPTY_ENDPOINT_MESSAGE.to_string());
        }

        let body = std::mem::take(&mut descriptor.body);
        tracing::info!(
            endpoint = %descriptor.endpoint,
            method = descriptor.method.as_str(),
            body = body.kind(),
            "Dispatching request"
        );

        let req = self.build_request(&descriptor, body);
        match req.send().await {
            Ok(resp) => self.resolve_response(&descriptor, resp).await,
            Err(e) => {
                tracing::debug!(error = %e, "Transport error");
                self.fail(&descriptor.on_failure, transport_fault_message(&e))
            }
        }
    }

    fn build_request(&self, descriptor: &RequestDescriptor, body: Body) -> reqwest::RequestBuilder {
        let url = &descriptor.endpoint;
        let mut req = match descriptor.method {
            HttpMethod::GET => self.client.get(url),
            HttpMethod::POST => self.client.post(url),
            HttpMethod::PUT => self.client.put(url),
            HttpMethod::PATCH => self.client.patch(url),
            HttpMethod::DELETE => self.client.delete(url),
        };

        req = req.header("Accept", "application/json");

        match &descriptor.authorization {
            Authorization::Basic(creds) => {
                req = req.header("Authorization", basic_credential(&creds.identifier, &creds.secret));
            }
            Authorization::Bearer => {
                // Read fresh on every call - the token may have changed
                // since the last request (e.g. after login)
                let token = self
                    .tokens
                    .get()
                    .unwrap_or_else(|| self.fallback_token.clone());
                req = req.header("Authorization", format!("Bearer {}", token));
            }
            Authorization::None => {}
        }

        match body {
            Body::Empty => {}
            Body::Json(value) => {
                if descriptor.method.has_body() {
                    req = req.json(&value);
                } else {
                    req = req.query(&query_pairs(&value));
                }
            }
            Body::Multipart(form) => {
                // Content-Type stays unset here; the transport adds the
                // multipart boundary itself
                if descriptor.method.has_body() {
                    req = req.multipart(form);
                } else {
                    tracing::warn!(
                        endpoint = %descriptor.endpoint,
                        "Dropping multipart body on GET request"
                    );
                }
            }
        }

        req
    }

    async fn resolve_response(
        &self,
        descriptor: &RequestDescriptor,
        resp: reqwest::Response,
    ) -> Outcome {
        let status = resp.status();

        if !status.is_success() {
            let body_text = resp.text().await.ok();
            let message = server_fault_message(status, body_text.as_deref());
            return self.fail(&descriptor.on_failure, message);
        }

        if status == StatusCode::NO_CONTENT {
            return self.succeed(descriptor, Outcome::NoContent);
        }

        match resp.text().await {
            Ok(text) if text.trim().is_empty() => self.succeed(descriptor, Outcome::NoContent),
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value) => {
                    tracing::debug!(status = status.as_u16(), "Response decoded");
                    self.succeed(descriptor, Outcome::Success(value))
                }
                Err(e) => self.fail(&descriptor.on_failure, fault_description(e.to_string())),
            },
            Err(e) => self.fail(&descriptor.on_failure, fault_description(e.to_string())),
        }
    }

    fn succeed(&self, descriptor: &RequestDescriptor, outcome: Outcome) -> Outcome {
        if let Some(spec) = &descriptor.on_success {
            let payload = descriptor
                .payload_override
                .clone()
                .unwrap_or_else(|| outcome.to_payload());
            self.sink.emit(Signal::new(spec.kind.as_str(), payload));
        }
        outcome
    }

    fn fail(&self, on_failure: &Option<SignalSpec>, message: String) -> Outcome {
        tracing::error!(message = %message, "Request failed");
        if let Some(spec) = on_failure {
            self.sink
                .emit(Signal::new(spec.kind.as_str(), Value::String(message.clone())));
        }
        Outcome::Failure { message }
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Gateway configuration
pub struct GatewayBuilder {
    client: Option<reqwest::Client>,
    timeout: Duration,
    tokens: Option<Arc<dyn TokenSource>>,
    sink: Option<Arc<dyn SignalSink>>,
    fallback_token: String,
}

impl Default for GatewayBuilder {
    fn default() -> Self {
        GatewayBuilder {
            client: None,
            timeout: REQUEST_TIMEOUT,
            tokens: None,
            sink: None,
            fallback_token: String::new(),
        }
    }
}

impl GatewayBuilder {
    /// Use a preconfigured client instead of the built-in default
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Override the default 30-second request timeout.
    /// Ignored when a custom client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.tokens = Some(Arc::new(source));
        self
    }

    /// Token source shared with an external login flow
    pub fn shared_token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(source);
        self
    }

    pub fn signal_sink(mut self, sink: impl SignalSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn shared_signal_sink(mut self, sink: Arc<dyn SignalSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Bearer token used when the token source has none
    pub fn fallback_token(mut self, token: impl Into<String>) -> Self {
        self.fallback_token = token.into();
        self
    }

    pub fn build(self) -> Gateway {
        let client = self.client.unwrap_or_else(|| create_client(self.timeout));
        Gateway {
            client,
            tokens: self
                .tokens
                .unwrap_or_else(|| Arc::new(StaticTokenSource::empty())),
            sink: self.sink.unwrap_or_else(|| Arc::new(NullSink)),
            fallback_token: self.fallback_token,
        }
    }
}

/// Create an HTTP client with default configuration
fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// `Basic <base64(identifier:secret)>` header value
fn basic_credential(identifier: &str, secret: &str) -> String {
    let credentials = format!("{}:{}", identifier, secret);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {}", encoded)
}

/// Flatten a JSON-object body into query pairs. Only top-level scalar
/// fields are carried; nested values have no query representation.
fn query_pairs(value: &Value) -> Vec<(String, String)> {
    let Some(map) = value.as_object() else {
        tracing::debug!("Non-object GET body has no query representation");
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, field) in map {
        match field {
            Value::Null => {}
            Value::String(s) => pairs.push((key.clone(), s.clone())),
            Value::Bool(_) | Value::Number(_) => pairs.push((key.clone(), field.to_string())),
            Value::Array(_) | Value::Object(_) => {
                tracing::debug!(key = %key, "Skipping nested value in GET body");
            }
        }
    }
    pairs
}

/// Resolve a send-level error into a user-facing message
fn transport_fault_message(e: &reqwest::Error) -> String {
    if e.is_builder() {
        // Malformed URL or similar - surfaced as the fault's own description
        fault_description(e.to_string())
    } else if e.is_timeout() || e.is_connect() || e.status().is_none() {
        // No response received: network unreachable, CORS, timeout
        UNREACHABLE_MESSAGE.to_string()
    } else {
        fault_description(e.to_string())
    }
}

/// Resolve a non-2xx response into a user-facing message
fn server_fault_message(status: StatusCode, body: Option<&str>) -> String {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return PAYLOAD_TOO_LARGE_MESSAGE.to_string();
    }

    if let Some(text) = body {
        if let Ok(value) = serde_json::from_str::<Value>(text) {
            for key in ["message", "error"] {
                if let Some(msg) = value.get(key).and_then(Value::as_str) {
                    if !msg.is_empty() {
                        return msg.to_string();
                    }
                }
            }
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

fn fault_description(description: String) -> String {
    if description.is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        description
    }
}
