/// Errors from the Keystone/Neutron boundary layer.
use thiserror::Error;

/// Typed errors from session bootstrap and the Neutron API client.
#[derive(Debug, Error)]
pub enum NeutronError {
    /// Required authentication environment variables are missing or empty.
    #[error("missing OpenStack environment variables: {}", vars.join(", "))]
    MissingConfig {
        /// The missing variable names.
        vars: Vec<&'static str>,
    },

    /// Keystone rejected the password authentication request.
    #[error("authentication failed (HTTP {status}): check OS_* credentials")]
    AuthFailed {
        /// HTTP status returned by Keystone.
        status: u16,
    },

    /// Keystone answered without an `X-Subject-Token` header.
    #[error("keystone response is missing the X-Subject-Token header")]
    MissingToken,

    /// The service catalog has no endpoint for the requested service.
    #[error("no '{service}' endpoint with interface '{interface}' in the service catalog")]
    EndpointNotFound {
        /// Catalog service type that was searched.
        service: &'static str,
        /// The configured endpoint interface.
        interface: String,
    },

    /// Transport-level failure (connection, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{context} returned HTTP {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Which call failed.
        context: String,
    },
}
