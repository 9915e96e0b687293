use crate::error::config::DeploymentConfigError;
use crate::error::config::DeploymentConfigError::{
    IdentityProviderNotConfigured, ParseDerivedUrlFailed, ServiceIdNotConfigured,
};
use std::env;
use url::Url;

pub const DEFAULT_IC_GATEWAY_DOMAIN: &str = "ic0.app";
pub const MAINNET_IDENTITY_PROVIDER: &str = "https://identity.internetcomputer.org/#authorize";
pub const DEFAULT_LOCAL_GATEWAY_PORT: u16 = 4943;

pub const DEPLOY_TARGET_ENV: &str = "DFX_NETWORK";
pub const SERVICE_CANISTER_ENV: &str = "CANISTER_ID_BACKEND";
pub const IDENTITY_CANISTER_ENV: &str = "CANISTER_ID_INTERNET_IDENTITY";

/// Which network the service is reached on. Selected once at startup and
/// passed down explicitly; nothing below the configuration edge reads the
/// environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeploymentTarget {
    Ic,
    Local { gateway_port: u16 },
}

impl DeploymentTarget {
    pub fn local() -> Self {
        DeploymentTarget::Local {
            gateway_port: DEFAULT_LOCAL_GATEWAY_PORT,
        }
    }

    pub fn is_ic(&self) -> bool {
        matches!(self, DeploymentTarget::Ic)
    }

    /// Whether agents for this target must fetch the replica's root signing
    /// key before responses can be certified. Mainnet agents ship with the
    /// hardcoded IC root key and never fetch.
    pub fn needs_root_key_fetch(&self) -> bool {
        !self.is_ic()
    }

    pub fn from_env() -> Self {
        match env::var(DEPLOY_TARGET_ENV) {
            Ok(name) if name == "ic" => DeploymentTarget::Ic,
            _ => DeploymentTarget::local(),
        }
    }
}

/// Everything needed to address the service and its identity provider on one
/// deployment target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub target: DeploymentTarget,
    pub service_id: String,
    pub identity_provider_id: Option<String>,
}

impl ServiceDescriptor {
    pub fn new(target: DeploymentTarget, service_id: &str) -> Self {
        ServiceDescriptor {
            target,
            service_id: service_id.to_string(),
            identity_provider_id: None,
        }
    }

    pub fn with_identity_provider_id(self, identity_provider_id: &str) -> Self {
        ServiceDescriptor {
            identity_provider_id: Some(identity_provider_id.to_string()),
            ..self
        }
    }

    /// Reads the deployment target and canister ids from the environment.
    /// This is the only place the session layer touches ambient state.
    pub fn from_env() -> Result<Self, DeploymentConfigError> {
        let target = DeploymentTarget::from_env();
        let service_id =
            env::var(SERVICE_CANISTER_ENV).map_err(|_| ServiceIdNotConfigured(SERVICE_CANISTER_ENV))?;
        let identity_provider_id = env::var(IDENTITY_CANISTER_ENV).ok();
        Ok(ServiceDescriptor {
            target,
            service_id,
            identity_provider_id,
        })
    }

    /// The gateway endpoint every proxy call is routed through. Derived from
    /// the target; any caller-supplied host is overridden by this value.
    pub fn service_url(&self) -> Result<Url, DeploymentConfigError> {
        let url = match &self.target {
            DeploymentTarget::Ic => {
                format!("https://{}.{}", self.service_id, DEFAULT_IC_GATEWAY_DOMAIN)
            }
            DeploymentTarget::Local { gateway_port } => {
                format!("http://{}.localhost:{}", self.service_id, gateway_port)
            }
        };
        Url::parse(&url).map_err(|e| ParseDerivedUrlFailed(url, e))
    }

    /// Where the interactive authorization flow is opened.
    pub fn identity_provider_url(&self) -> Result<Url, DeploymentConfigError> {
        match &self.target {
            DeploymentTarget::Ic => Url::parse(MAINNET_IDENTITY_PROVIDER)
                .map_err(|e| ParseDerivedUrlFailed(MAINNET_IDENTITY_PROVIDER.to_string(), e)),
            DeploymentTarget::Local { gateway_port } => {
                let identity_provider_id = self
                    .identity_provider_id
                    .as_deref()
                    .ok_or(IdentityProviderNotConfigured(IDENTITY_CANISTER_ENV))?;
                let url = format!("http://{}.localhost:{}", identity_provider_id, gateway_port);
                Url::parse(&url).map_err(|e| ParseDerivedUrlFailed(url, e))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn local_service_url() {
        let descriptor = ServiceDescriptor::new(DeploymentTarget::local(), "abc123");
        assert_eq!(
            descriptor.service_url().unwrap().as_str(),
            "http://abc123.localhost:4943/"
        );
    }

    #[test]
    fn ic_service_url() {
        let descriptor = ServiceDescriptor::new(DeploymentTarget::Ic, "xyz");
        assert_eq!(
            descriptor.service_url().unwrap().as_str(),
            "https://xyz.ic0.app/"
        );
    }

    #[test]
    fn custom_local_port() {
        let descriptor =
            ServiceDescriptor::new(DeploymentTarget::Local { gateway_port: 8080 }, "abc123");
        assert_eq!(
            descriptor.service_url().unwrap().as_str(),
            "http://abc123.localhost:8080/"
        );
    }

    #[test]
    fn local_identity_provider_url() {
        let descriptor = ServiceDescriptor::new(DeploymentTarget::local(), "abc123")
            .with_identity_provider_id("int-id");
        assert_eq!(
            descriptor.identity_provider_url().unwrap().as_str(),
            "http://int-id.localhost:4943/"
        );
    }

    #[test]
    fn ic_identity_provider_url() {
        let descriptor = ServiceDescriptor::new(DeploymentTarget::Ic, "xyz");
        assert_eq!(
            descriptor.identity_provider_url().unwrap().as_str(),
            "https://identity.internetcomputer.org/#authorize"
        );
    }

    #[test]
    fn local_identity_provider_requires_an_id() {
        let descriptor = ServiceDescriptor::new(DeploymentTarget::local(), "abc123");
        assert!(matches!(
            descriptor.identity_provider_url(),
            Err(IdentityProviderNotConfigured(IDENTITY_CANISTER_ENV))
        ));
    }

    #[test]
    fn target_from_env() {
        std::env::set_var(DEPLOY_TARGET_ENV, "ic");
        assert_eq!(DeploymentTarget::from_env(), DeploymentTarget::Ic);
        std::env::set_var(DEPLOY_TARGET_ENV, "local");
        assert_eq!(DeploymentTarget::from_env(), DeploymentTarget::local());
        std::env::remove_var(DEPLOY_TARGET_ENV);
        assert_eq!(DeploymentTarget::from_env(), DeploymentTarget::local());
    }

    #[test]
    fn ic_identity_provider_ignores_the_local_id() {
        let descriptor =
            ServiceDescriptor::new(DeploymentTarget::Ic, "xyz").with_identity_provider_id("int-id");
        assert_eq!(
            descriptor.identity_provider_url().unwrap().as_str(),
            "https://identity.internetcomputer.org/#authorize"
        );
    }
}
