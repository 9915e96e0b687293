use crate::config::model::deployment::ServiceDescriptor;
use crate::error::root_key::FetchRootKeyError;
use ic_agent::Agent;

/// Fetches and trusts the replica's root signing key when the target is not
/// the production network. Mainnet agents ship with the hardcoded IC root
/// key, so this is a no-op there.
pub async fn fetch_root_key_if_needed(
    agent: &Agent,
    descriptor: &ServiceDescriptor,
) -> Result<(), FetchRootKeyError> {
    if descriptor.target.needs_root_key_fetch() {
        agent
            .fetch_root_key()
            .await
            .map_err(FetchRootKeyError::ReplicaError)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::model::deployment::DeploymentTarget;

    #[tokio::test]
    async fn production_targets_never_fetch() {
        // nothing listens on this address; the call must not go out
        let agent = Agent::builder()
            .with_url("http://xyz.localhost:4943")
            .build()
            .unwrap();
        let descriptor = ServiceDescriptor::new(DeploymentTarget::Ic, "xyz");
        fetch_root_key_if_needed(&agent, &descriptor).await.unwrap();
    }
}
