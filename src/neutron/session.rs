/// Keystone v3 session bootstrap from `OS_*` environment variables.
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use super::errors::NeutronError;

/// Catalog service type we need an endpoint for.
const NETWORK_SERVICE: &str = "network";

/// Authentication settings read from the conventional `OS_*` variables.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Keystone base URL, normalized to end in `/v3`.
    pub auth_url: String,
    pub username: String,
    pub password: String,
    /// Project scope by id, preferred over name when both are set.
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub user_domain: String,
    pub project_domain: String,
    /// Optional region filter for catalog endpoint selection.
    pub region: Option<String>,
    /// Endpoint interface to select from the catalog (`public` by default).
    pub interface: String,
}

impl AuthConfig {
    /// Read configuration from the process environment.
    ///
    /// Required: `OS_AUTH_URL`, `OS_USERNAME`, `OS_PASSWORD`, and one of
    /// `OS_PROJECT_NAME` / `OS_PROJECT_ID`. Empty values count as missing.
    ///
    /// # Errors
    ///
    /// Returns `NeutronError::MissingConfig` naming every missing variable.
    pub fn from_env() -> Result<Self, NeutronError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, NeutronError> {
        // Empty values are treated as unset.
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let mut missing = Vec::new();
        let mut require = |name: &'static str, value: Option<String>| {
            value.unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let auth_url = require("OS_AUTH_URL", get("OS_AUTH_URL"));
        let username = require("OS_USERNAME", get("OS_USERNAME"));
        let password = require("OS_PASSWORD", get("OS_PASSWORD"));
        let project_id = get("OS_PROJECT_ID");
        let project_name = get("OS_PROJECT_NAME");
        if project_id.is_none() && project_name.is_none() {
            missing.push("OS_PROJECT_NAME");
        }

        if !missing.is_empty() {
            return Err(NeutronError::MissingConfig { vars: missing });
        }

        Ok(Self {
            auth_url: normalize_auth_url(&auth_url),
            username,
            password,
            project_id,
            project_name,
            user_domain: get("OS_USER_DOMAIN_NAME").unwrap_or_else(|| "Default".to_owned()),
            project_domain: get("OS_PROJECT_DOMAIN_NAME").unwrap_or_else(|| "Default".to_owned()),
            region: get("OS_REGION_NAME"),
            interface: get("OS_INTERFACE").unwrap_or_else(|| "public".to_owned()),
        })
    }
}

/// Strip trailing slashes and append `/v3` when the URL does not name the
/// Keystone version already.
fn normalize_auth_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with("/v3") {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/v3")
    }
}

/// An authenticated session: the token and the resolved Neutron endpoint.
#[derive(Debug, Clone)]
pub struct Session {
    /// Keystone token, sent as `X-Auth-Token` on every API call.
    pub token: String,
    /// Neutron base URL from the service catalog, no trailing slash.
    pub network_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    catalog: Vec<CatalogService>,
}

#[derive(Debug, Deserialize)]
struct CatalogService {
    #[serde(rename = "type")]
    service_type: String,
    #[serde(default)]
    endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Deserialize)]
struct CatalogEndpoint {
    interface: String,
    #[serde(default)]
    region: Option<String>,
    url: String,
}

/// Authenticate against Keystone and resolve the network endpoint.
///
/// # Errors
///
/// Returns `AuthFailed` on a non-success Keystone status, `MissingToken`
/// when the subject token header is absent, `EndpointNotFound` when the
/// catalog has no matching network endpoint, or a transport error.
pub fn authenticate(http: &Client, cfg: &AuthConfig) -> Result<Session, NeutronError> {
    let scope = cfg.project_id.as_ref().map_or_else(
        || {
            json!({
                "name": cfg.project_name,
                "domain": {"name": cfg.project_domain},
            })
        },
        |id| json!({"id": id}),
    );
    let payload = json!({
        "auth": {
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": cfg.username,
                        "domain": {"name": cfg.user_domain},
                        "password": cfg.password,
                    }
                }
            },
            "scope": {"project": scope},
        }
    });

    let response = http
        .post(format!("{}/auth/tokens", cfg.auth_url))
        .json(&payload)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(NeutronError::AuthFailed {
            status: status.as_u16(),
        });
    }

    let token = response
        .headers()
        .get("x-subject-token")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or(NeutronError::MissingToken)?;

    let body: TokenResponse = response.json()?;
    let network_endpoint =
        select_network_endpoint(&body.token.catalog, &cfg.interface, cfg.region.as_deref())?;

    Ok(Session {
        token,
        network_endpoint,
    })
}

/// Pick the network service endpoint matching interface and optional region.
fn select_network_endpoint(
    catalog: &[CatalogService],
    interface: &str,
    region: Option<&str>,
) -> Result<String, NeutronError> {
    catalog
        .iter()
        .filter(|service| service.service_type == NETWORK_SERVICE)
        .flat_map(|service| &service.endpoints)
        .find(|endpoint| {
            endpoint.interface == interface
                && region.is_none_or(|r| endpoint.region.as_deref() == Some(r))
        })
        .map(|endpoint| endpoint.url.trim_end_matches('/').to_owned())
        .ok_or_else(|| NeutronError::EndpointNotFound {
            service: NETWORK_SERVICE,
            interface: interface.to_owned(),
        })
}
