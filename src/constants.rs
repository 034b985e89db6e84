//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// Hard timeout applied to every gateway request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Key under which the ambient auth token is stored
pub const TOKEN_KEY: &str = "auth_token";

/// Dot-directory under the user's home for the file token store
pub const CONFIG_DIR: &str = ".reqgate";

/// Message carried by the no-content marker
pub const NO_CONTENT_MESSAGE: &str = "Success";

/// Failure message for a 413 response, regardless of its body
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Upload is too large. Max 50MB allowed.";

/// Failure message when no response was received at all
pub const UNREACHABLE_MESSAGE: &str =
    "Unable to reach server. Please check your connection or try again later.";

/// Last-resort failure message
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again later.";

/// Fail-fast message for a descriptor with an empty endpoint
pub const EMPTY_ENDPOINT_MESSAGE: &str = "Request endpoint must not be empty.";
