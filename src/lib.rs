//! # Reqgate
//!
//! A declarative HTTP request gateway: describe a request once, get a
//! normalized outcome back, and let the gateway emit state-management
//! signals for you.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, PATCH, DELETE
//! - Tagged request bodies: JSON, multipart form, or none
//! - Auth support (Bearer via ambient token, Basic)
//! - Uniform failure records - no fault ever escapes the gateway
//! - Success/failure signal dispatch into an injected sink
//! - Pluggable ambient token stores (static, in-memory, file-backed)
//!
//! ## Architecture
//! One chokepoint, three injected ports:
//! - Gateway (reqwest) - builds and executes the call
//! - TokenSource - read-only ambient auth token
//! - SignalSink - fire-and-forget `{type, payload}` emissions

pub mod constants;
pub mod models;
pub mod outcome;
pub mod token;
pub mod dispatch;
pub mod gateway;

// Re-export commonly used types
pub use models::{Authorization, Body, Credentials, HttpMethod, RequestDescriptor, SignalSpec};
pub use outcome::Outcome;
pub use token::{FileTokenStore, MemoryTokenStore, StaticTokenSource, TokenSource};
pub use dispatch::{ChannelSink, NullSink, Signal, SignalSink};
pub use gateway::{Gateway, GatewayBuilder};
