/// Aggregation: combine routers with their hosting agents into reports.
use thiserror::Error;

use crate::neutron::{AgentRecord, NetworkClient, NeutronError, RouterRecord};
use crate::types::{AgentBinding, Router, RouterReport};

/// HA state assigned when the upstream API reports no state.
const DEFAULT_HA_STATE: &str = "standalone";

/// Errors that can occur while producing or rendering reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// `table` output requested, but table rendering was not compiled in.
    #[error("cannot render a table, built without the `table` feature")]
    TableUnavailable,

    /// An underlying control plane API error.
    #[error("{0}")]
    Neutron(#[from] NeutronError),

    /// JSON serialization failure.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failure.
    #[error("failed to serialize report: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ReportError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TableUnavailable => 3,
            Self::Neutron(neutron) => match neutron {
                NeutronError::MissingConfig { .. }
                | NeutronError::AuthFailed { .. }
                | NeutronError::MissingToken => 2,
                _ => 1,
            },
            Self::Json(_) | Self::Yaml(_) => 1,
        }
    }
}

/// Combine one router with its hosting agents into a `RouterReport`.
///
/// A null/absent HA state becomes `standalone`; any other value is passed
/// through verbatim. `active` counts agents whose state is `active` or
/// `standalone` — `standby` agents are hosting the router but not serving
/// traffic, so they never contribute.
#[must_use]
pub fn aggregate(router: &RouterRecord, agents: &[AgentRecord]) -> RouterReport {
    let bindings: Vec<AgentBinding> = agents
        .iter()
        .map(|agent| AgentBinding {
            host: agent.host.clone(),
            ha_state: agent
                .ha_state
                .clone()
                .unwrap_or_else(|| DEFAULT_HA_STATE.to_owned()),
        })
        .collect();

    let active = bindings
        .iter()
        .filter(|binding| matches!(binding.ha_state.as_str(), "active" | "standalone"))
        .count();

    RouterReport {
        router: Router {
            id: router.id.clone(),
            name: router.name.clone(),
            project: router.project_id.clone(),
            active,
        },
        agents: bindings,
    }
}

/// Enumerate all routers and resolve the agents hosting each, in router-list
/// order. One list call plus one agent call per router; any failure aborts
/// the whole run with no partial result.
///
/// # Errors
///
/// Returns `ReportError::Neutron` on any API failure.
pub fn collect(client: &impl NetworkClient) -> Result<Vec<RouterReport>, ReportError> {
    let routers = client.list_routers()?;
    let mut reports = Vec::with_capacity(routers.len());
    for router in &routers {
        let agents = client.list_hosting_agents(&router.id)?;
        reports.push(aggregate(router, &agents));
    }
    Ok(reports)
}
