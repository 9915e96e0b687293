use anyhow::Result;
use icpages_core::Session;
use slog::{info, warn, Logger};

pub fn status(session: &Session) {
    let proxy = session.proxy();
    println!("endpoint:    {}", proxy.endpoint());
    println!("canister id: {}", proxy.canister_id());
    println!("caller:      {}", proxy.sender());
}

pub async fn whoami(session: &Session) -> Result<()> {
    println!("{}", session.proxy().whoami().await?);
    Ok(())
}

pub async fn logout(session: &Session, logger: &Logger) -> Result<()> {
    if session.logout().await {
        warn!(logger, "the provider still reports an authenticated session");
    } else {
        info!(logger, "logged out");
    }
    Ok(())
}
