use ic_agent::AgentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchRootKeyError {
    #[error(transparent)]
    ReplicaError(AgentError),
}
