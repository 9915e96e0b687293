use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeploymentConfigError {
    #[error("no service canister id configured: set {0} or pass one explicitly")]
    ServiceIdNotConfigured(&'static str),

    #[error("no identity provider canister id configured for the local network: set {0}")]
    IdentityProviderNotConfigured(&'static str),

    #[error("failed to parse derived url {0}")]
    ParseDerivedUrlFailed(String, #[source] url::ParseError),
}
