//! The typed surface of the pages canister. Variant and field idents mirror
//! the canister's candid interface; renaming any of them breaks decoding.
use crate::error::call::CallError;
use candid::{CandidType, Decode, Encode, Principal};
use ic_agent::Agent;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

pub type PagePath = String;
pub type PageContent = String;

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub enum GetPageResponse {
    Page {
        path: PagePath,
        content: PageContent,
    },
    FundingRequired {
        path: PagePath,
        user_id: Principal,
    },
    PathNotFound {
        path: PagePath,
    },
    IndexOutOfBounds {
        index: u64,
        max_index: u64,
    },
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub enum SetPageResponse {
    Set { path: PagePath },
    AccessDenied { path: PagePath, user_id: Principal },
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub enum DeletePageResponse {
    Deleted { path: PagePath },
    NotFound { path: PagePath },
    AccessDenied { path: PagePath, user_id: Principal },
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub enum FundPageResponse {
    Funded {
        // approximate
        spent_amount: f32,
        pages: Vec<PagePath>,
    },
    InsufficientFunds,
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub enum AllPagesResponse {
    Pages(HashMap<PagePath, PageContent>),
    AccessDenied { user_id: Principal },
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq)]
pub enum SetIndexResponse {
    IndexSet(Vec<PagePath>),
    StorageFailure,
}

#[derive(CandidType)]
struct GetPageArgs {
    index: u64,
}

#[derive(CandidType)]
struct SetPageArgs {
    path: PagePath,
    content: PageContent,
}

#[derive(CandidType)]
struct DeletePageArgs {
    path: PagePath,
}

#[derive(CandidType)]
struct FundPageArgs {
    path: PagePath,
}

#[derive(CandidType)]
struct SetIndexArgs {
    index: Vec<PagePath>,
}

/// Remote handle for the pages service, bound to one credential and one
/// endpoint. Every call is routed through the configured endpoint and signed
/// with the attached credential. Cloning shares the underlying agent.
#[derive(Clone)]
pub struct ServiceProxy {
    agent: Agent,
    canister_id: Principal,
    endpoint: Url,
    sender: Principal,
}

impl ServiceProxy {
    pub(crate) fn new(agent: Agent, canister_id: Principal, endpoint: Url, sender: Principal) -> Self {
        Self {
            agent,
            canister_id,
            endpoint,
            sender,
        }
    }

    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }

    /// The gateway endpoint every call is routed through.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The principal this proxy signs calls as.
    pub fn sender(&self) -> Principal {
        self.sender
    }

    /// Asks the service which principal it sees for this proxy's calls.
    pub async fn whoami(&self) -> Result<Principal, CallError> {
        let response = self
            .agent
            .query(&self.canister_id, "whoami")
            .with_arg(Encode!()?)
            .call()
            .await?;
        Ok(Decode!(&response, Principal)?)
    }

    pub async fn get_page(&self, index: u64) -> Result<GetPageResponse, CallError> {
        let arg = Encode!(&GetPageArgs { index })?;
        let response = self
            .agent
            .query(&self.canister_id, "get_page")
            .with_arg(arg)
            .call()
            .await?;
        Ok(Decode!(&response, GetPageResponse)?)
    }

    pub async fn set_page(
        &self,
        path: PagePath,
        content: PageContent,
    ) -> Result<SetPageResponse, CallError> {
        let arg = Encode!(&SetPageArgs { path, content })?;
        let response = self
            .agent
            .update(&self.canister_id, "set_page")
            .with_arg(arg)
            .call_and_wait()
            .await?;
        Ok(Decode!(&response, SetPageResponse)?)
    }

    pub async fn delete_page(&self, path: PagePath) -> Result<DeletePageResponse, CallError> {
        let arg = Encode!(&DeletePageArgs { path })?;
        let response = self
            .agent
            .update(&self.canister_id, "delete_page")
            .with_arg(arg)
            .call_and_wait()
            .await?;
        Ok(Decode!(&response, DeletePageResponse)?)
    }

    pub async fn fund_page(&self, path: PagePath) -> Result<FundPageResponse, CallError> {
        let arg = Encode!(&FundPageArgs { path })?;
        let response = self
            .agent
            .update(&self.canister_id, "fund_page")
            .with_arg(arg)
            .call_and_wait()
            .await?;
        Ok(Decode!(&response, FundPageResponse)?)
    }

    pub async fn funded_pages_list(&self) -> Result<Vec<PagePath>, CallError> {
        let response = self
            .agent
            .query(&self.canister_id, "funded_pages_list")
            .with_arg(Encode!()?)
            .call()
            .await?;
        Ok(Decode!(&response, Vec<PagePath>)?)
    }

    /// Controller-only: the full page store.
    pub async fn all_pages(&self) -> Result<AllPagesResponse, CallError> {
        let response = self
            .agent
            .query(&self.canister_id, "all_pages")
            .with_arg(Encode!()?)
            .call()
            .await?;
        Ok(Decode!(&response, AllPagesResponse)?)
    }

    /// Controller-only: replaces the index-to-path table.
    pub async fn set_index(&self, index: Vec<PagePath>) -> Result<SetIndexResponse, CallError> {
        let arg = Encode!(&SetIndexArgs { index })?;
        let response = self
            .agent
            .update(&self.canister_id, "set_index")
            .with_arg(arg)
            .call_and_wait()
            .await?;
        Ok(Decode!(&response, SetIndexResponse)?)
    }
}
