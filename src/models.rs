use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// Parse a method name, case-insensitively
    pub fn parse(s: &str) -> Result<HttpMethod> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "PATCH" => Ok(HttpMethod::PATCH),
            "DELETE" => Ok(HttpMethod::DELETE),
            _ => Err(anyhow!("Unknown HTTP method: {}", s)),
        }
    }

    /// Whether a supplied body travels as the request payload.
    /// GET sends it as query parameters instead.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::GET)
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        HttpMethod::parse(s)
    }
}

/// Basic auth credential pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

/// Authorization policy for a request
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Authorization {
    #[default]
    None,
    /// `Authorization: Basic base64(identifier:secret)`
    Basic(Credentials),
    /// `Authorization: Bearer <token>` where the token comes from the
    /// ambient token source, read fresh on every call
    Bearer,
}

/// Request payload, tagged explicitly by the caller
#[derive(Debug, Default)]
pub enum Body {
    #[default]
    Empty,
    /// Structured record, JSON-encoded (or flattened into query
    /// parameters on GET)
    Json(serde_json::Value),
    /// Multipart form; the transport sets the content-type and boundary
    Multipart(reqwest::multipart::Form),
}

impl Body {
    /// Short tag for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::Json(_) => "json",
            Body::Multipart(_) => "multipart",
        }
    }
}

/// Tag for a signal emitted after the request completes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub kind: String,
}

impl SignalSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        SignalSpec { kind: kind.into() }
    }
}

/// Declarative description of one network operation
#[derive(Debug)]
pub struct RequestDescriptor {
    pub endpoint: String,
    pub method: HttpMethod,
    pub body: Body,
    pub authorization: Authorization,
    /// Signal emitted on success
    pub on_success: Option<SignalSpec>,
    /// Signal emitted on failure, carrying the resolved message
    pub on_failure: Option<SignalSpec>,
    /// Substituted for the raw response in the success signal payload
    pub payload_override: Option<serde_json::Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        RequestDescriptor {
            endpoint: endpoint.into(),
            method,
            body: Body::Empty,
            authorization: Authorization::None,
            on_success: None,
            on_failure: None,
            payload_override: None,
        }
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    pub fn bearer(mut self) -> Self {
        self.authorization = Authorization::Bearer;
        self
    }

    pub fn basic(mut self, identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        self.authorization = Authorization::Basic(Credentials::new(identifier, secret));
        self
    }

    pub fn on_success(mut self, kind: impl Into<String>) -> Self {
        self.on_success = Some(SignalSpec::new(kind));
        self
    }

    pub fn on_failure(mut self, kind: impl Into<String>) -> Self {
        self.on_failure = Some(SignalSpec::new(kind));
        self
    }

    pub fn payload_override(mut self, payload: serde_json::Value) -> Self {
        self.payload_override = Some(payload);
        self
    }
}
