use crate::error::config::DeploymentConfigError;
use crate::error::identity::ResolveIdentityError;
use candid::types::principal::PrincipalError;
use ic_agent::AgentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildSessionError {
    #[error(transparent)]
    Config(#[from] DeploymentConfigError),

    #[error(transparent)]
    ResolveIdentity(#[from] ResolveIdentityError),

    #[error(transparent)]
    BuildProxy(#[from] BuildProxyError),
}

#[derive(Error, Debug)]
pub enum BuildProxyError {
    #[error(transparent)]
    DeriveEndpoint(#[from] DeploymentConfigError),

    #[error("failed to create http client")]
    CreateHttpClient(#[source] reqwest::Error),

    #[error("failed to create agent")]
    CreateAgent(#[source] AgentError),

    #[error("failed to parse the service canister id")]
    ParseServiceId(#[source] PrincipalError),

    #[error("failed to derive the caller principal from the credential: {0}")]
    CredentialPrincipalFailed(String),
}
