use ic_agent::AgentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("failed to encode or decode candid arguments")]
    Candid(#[from] candid::Error),
}
