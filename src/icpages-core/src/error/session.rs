use crate::error::structured_file::StructuredFileError;
use thiserror::Error;

/// A failed authorization flow. Never surfaces to session consumers as an
/// error: `login()` logs it and reports `false`.
#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("the identity provider rejected the authorization request: {0}")]
    Rejected(String),

    #[error("failed to persist the authorized session")]
    PersistSessionFailed(#[source] StructuredFileError),
}
