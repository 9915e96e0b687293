use crate::error::structured_file::StructuredFileError;
use crate::identity::delegation::DelegationError;
use ic_agent::identity::PemError;
use thiserror::Error;

/// The provider could not produce any identity object. Distinct from "no
/// login yet", which still yields the anonymous identity.
#[derive(Error, Debug)]
pub enum ResolveIdentityError {
    #[error("failed to read the stored session")]
    ReadStoredSessionFailed(#[source] StructuredFileError),

    #[error("failed to decode the stored delegation chain")]
    DecodeDelegationChainFailed(#[source] DelegationError),

    #[error("failed to decode the stored session key")]
    DecodeSessionKeyFailed(#[source] PemError),
}
