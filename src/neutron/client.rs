/// The narrow Neutron API surface: enumerate routers, resolve hosting agents.
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::errors::NeutronError;
use super::session::{AuthConfig, Session, authenticate};

/// A router as returned by `GET /v2.0/routers`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterRecord {
    /// Router UUID.
    pub id: String,
    /// Display name; Neutron allows unnamed routers.
    #[serde(default)]
    pub name: String,
    /// Owning project UUID. Older deployments report `tenant_id`.
    #[serde(default, alias = "tenant_id")]
    pub project_id: String,
}

/// An L3 agent hosting a router, from `GET /v2.0/routers/{id}/l3-agents`.
///
/// `ha_state` is `None` for non-HA routers, where the API reports null or
/// omits the field entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRecord {
    /// Agent hostname.
    pub host: String,
    #[serde(default)]
    pub ha_state: Option<String>,
}

/// The two operations the pipeline needs from the control plane.
///
/// Everything past the boundary depends on this trait, never on the HTTP
/// client, so the pipeline is testable with a fake implementation.
pub trait NetworkClient {
    /// List all routers visible to the session's project scope, in API order.
    ///
    /// # Errors
    ///
    /// Returns `NeutronError` on transport failure or a non-success status.
    fn list_routers(&self) -> Result<Vec<RouterRecord>, NeutronError>;

    /// List the L3 agents currently hosting the given router, in API order.
    ///
    /// # Errors
    ///
    /// Returns `NeutronError` on transport failure or a non-success status.
    fn list_hosting_agents(&self, router_id: &str) -> Result<Vec<AgentRecord>, NeutronError>;
}

#[derive(Debug, Deserialize)]
struct RoutersResponse {
    routers: Vec<RouterRecord>,
}

#[derive(Debug, Deserialize)]
struct AgentsResponse {
    agents: Vec<AgentRecord>,
}

/// `NetworkClient` over blocking HTTP with a Keystone token.
pub struct HttpNetworkClient {
    http: Client,
    session: Session,
}

impl HttpNetworkClient {
    /// Build the HTTP client and authenticate from ambient `OS_*` variables.
    ///
    /// # Errors
    ///
    /// Returns `NeutronError` when configuration is missing or Keystone
    /// authentication fails. No Neutron call is made here.
    pub fn from_env() -> Result<Self, NeutronError> {
        let cfg = AuthConfig::from_env()?;
        let http = Client::builder()
            .user_agent(concat!("routerha/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let session = authenticate(&http, &cfg)?;
        Ok(Self { http, session })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T, NeutronError> {
        let response = self
            .http
            .get(format!("{}{path}", self.session.network_endpoint))
            .header("X-Auth-Token", self.session.token.as_str())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(NeutronError::Api {
                status: status.as_u16(),
                context: context.to_owned(),
            });
        }
        Ok(response.json()?)
    }
}

impl NetworkClient for HttpNetworkClient {
    fn list_routers(&self) -> Result<Vec<RouterRecord>, NeutronError> {
        let body: RoutersResponse = self.get_json("/v2.0/routers", "router list")?;
        Ok(body.routers)
    }

    fn list_hosting_agents(&self, router_id: &str) -> Result<Vec<AgentRecord>, NeutronError> {
        let body: AgentsResponse = self.get_json(
            &format!("/v2.0/routers/{router_id}/l3-agents"),
            "l3 agent list",
        )?;
        Ok(body.agents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_routers_response() {
        let body: RoutersResponse = serde_json::from_str(
            r#"{"routers": [
                {"id": "f1c23964", "name": "router1", "project_id": "8f77be9a", "status": "ACTIVE"},
                {"id": "97d2ab1d", "name": "router2", "tenant_id": "68a93cc7"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(body.routers.len(), 2);
        assert_eq!(body.routers[0].project_id, "8f77be9a");
        // Legacy tenant_id key maps onto project_id.
        assert_eq!(body.routers[1].project_id, "68a93cc7");
    }

    #[test]
    fn test_decode_router_without_name_or_project() {
        let body: RoutersResponse =
            serde_json::from_str(r#"{"routers": [{"id": "f1c23964"}]}"#).unwrap();
        assert_eq!(body.routers[0].name, "");
        assert_eq!(body.routers[0].project_id, "");
    }

    #[test]
    fn test_decode_agents_null_and_absent_ha_state() {
        let body: AgentsResponse = serde_json::from_str(
            r#"{"agents": [
                {"host": "osnet001", "ha_state": null},
                {"host": "osnet002"},
                {"host": "osnet003", "ha_state": "standby"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(body.agents[0].ha_state, None);
        assert_eq!(body.agents[1].ha_state, None);
        assert_eq!(body.agents[2].ha_state.as_deref(), Some("standby"));
    }
}
