/// Cloud boundary layer: Keystone session bootstrap and the Neutron client.
pub mod client;
pub mod errors;
pub mod session;

pub use client::{AgentRecord, HttpNetworkClient, NetworkClient, RouterRecord};
pub use errors::NeutronError;
pub use session::{AuthConfig, Session};
