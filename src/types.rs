/// Shared serializable output types.
///
/// These types are what gets written to stdout — as JSON, YAML, or rendered
/// into a table. They are decoupled from the wire-level `RouterRecord` /
/// `AgentRecord` types in the neutron layer.
use serde::{Deserialize, Serialize};

/// A router with its derived active-agent count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
    /// Router UUID (opaque string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning project UUID (opaque string).
    pub project: String,
    /// Number of hosting agents whose HA state is `active` or `standalone`.
    pub active: usize,
}

/// One L3 agent host serving a router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentBinding {
    /// Agent hostname.
    pub host: String,
    /// HA state as reported upstream (`active`, `standby`, `standalone`).
    /// A null/absent upstream value becomes `standalone`; any other string
    /// is passed through verbatim.
    pub ha_state: String,
}

/// A router paired with the agents hosting it, in API order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterReport {
    /// The router and its aggregate counts.
    pub router: Router,
    /// Hosting agents, order as returned by the API.
    pub agents: Vec<AgentBinding>,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `ReportError`.
    #[must_use]
    pub fn from_report_error(err: &crate::report::ReportError) -> Self {
        use crate::neutron::NeutronError;
        use crate::report::ReportError;

        let code = match err {
            ReportError::TableUnavailable => "table_unavailable",
            ReportError::Neutron(neutron) => match neutron {
                NeutronError::MissingConfig { .. } => "missing_config",
                NeutronError::AuthFailed { .. } | NeutronError::MissingToken => "auth_failed",
                NeutronError::EndpointNotFound { .. } => "endpoint_not_found",
                NeutronError::Http(_) => "http_error",
                NeutronError::Api { .. } => "api_error",
            },
            ReportError::Json(_) | ReportError::Yaml(_) => "serialize_error",
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
            },
        }
    }
}
