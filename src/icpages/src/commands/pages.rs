use anyhow::Result;
use icpages_core::actor::service::{
    DeletePageResponse, FundPageResponse, GetPageResponse, SetPageResponse,
};
use icpages_core::Session;

pub async fn get(session: &Session, index: u64) -> Result<()> {
    match session.proxy().get_page(index).await? {
        GetPageResponse::Page { path, content } => {
            println!("{path}");
            println!("{content}");
        }
        GetPageResponse::FundingRequired { path, user_id } => {
            println!("{path}: funding required for {user_id}");
        }
        GetPageResponse::PathNotFound { path } => println!("{path}: not found"),
        GetPageResponse::IndexOutOfBounds { index, max_index } => {
            println!("index {index} out of bounds (max {max_index})");
        }
    }
    Ok(())
}

pub async fn set(session: &Session, path: String, content: String) -> Result<()> {
    match session.proxy().set_page(path, content).await? {
        SetPageResponse::Set { path } => println!("set {path}"),
        SetPageResponse::AccessDenied { path, user_id } => {
            println!("{path}: access denied for {user_id}");
        }
    }
    Ok(())
}

pub async fn rm(session: &Session, path: String) -> Result<()> {
    match session.proxy().delete_page(path).await? {
        DeletePageResponse::Deleted { path } => println!("deleted {path}"),
        DeletePageResponse::NotFound { path } => println!("{path}: not found"),
        DeletePageResponse::AccessDenied { path, user_id } => {
            println!("{path}: access denied for {user_id}");
        }
    }
    Ok(())
}

pub async fn fund(session: &Session, path: String) -> Result<()> {
    match session.proxy().fund_page(path).await? {
        FundPageResponse::Funded {
            spent_amount,
            pages,
        } => {
            println!("funded {} page(s) for {spent_amount}", pages.len());
            for page in pages {
                println!("{page}");
            }
        }
        FundPageResponse::InsufficientFunds => println!("insufficient funds"),
    }
    Ok(())
}

pub async fn funded(session: &Session) -> Result<()> {
    for path in session.proxy().funded_pages_list().await? {
        println!("{path}");
    }
    Ok(())
}
