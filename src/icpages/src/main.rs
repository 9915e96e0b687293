mod commands;

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};
use icpages_core::config::model::deployment::{
    DeploymentTarget, ServiceDescriptor, IDENTITY_CANISTER_ENV, SERVICE_CANISTER_ENV,
};
use icpages_core::error::session::AuthorizationError;
use icpages_core::identity::session_store::{
    AuthorizationFlow, AuthorizedSession, StoredSessionProvider, SESSION_FILE_NAME,
};
use icpages_core::SessionBuilder;
use slog::{Drain, Level, Logger};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

#[derive(Parser)]
#[command(version, about = "command-line client for the icpages service")]
struct Opts {
    /// Deployment target: "local" or "ic".
    #[arg(long, default_value = "local")]
    network: String,

    /// The service canister id. Falls back to CANISTER_ID_BACKEND.
    #[arg(long)]
    canister_id: Option<String>,

    /// The Internet Identity canister id (local networks only). Falls back
    /// to CANISTER_ID_INTERNET_IDENTITY.
    #[arg(long)]
    ii_canister_id: Option<String>,

    /// Where the authorized session is stored.
    #[arg(long, default_value = SESSION_FILE_NAME)]
    session_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    subcommand: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Show the endpoint, canister id, and caller principal.
    Status,
    /// Ask the service which principal it sees.
    Whoami,
    /// Fetch a page by index.
    Get { index: u64 },
    /// Create or replace a page.
    Set { path: String, content: String },
    /// Delete a page.
    Rm { path: String },
    /// Fund access to a page.
    Fund { path: String },
    /// List pages the current user has funded.
    Funded,
    /// Invalidate the stored session.
    Logout,
}

/// The interactive redirect needs a browser; the CLI only replays a session
/// stored by the web frontend.
struct UnavailableAuthorizationFlow;

#[async_trait::async_trait]
impl AuthorizationFlow for UnavailableAuthorizationFlow {
    async fn authorize(
        &self,
        _identity_provider: &Url,
    ) -> Result<AuthorizedSession, AuthorizationError> {
        Err(AuthorizationError::Rejected(
            "interactive login is not available from the command line".to_string(),
        ))
    }
}

fn new_logger(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, slog::o!())
}

fn build_descriptor(opts: &Opts) -> anyhow::Result<ServiceDescriptor> {
    let target = match opts.network.as_str() {
        "ic" => DeploymentTarget::Ic,
        "local" => DeploymentTarget::local(),
        other => bail!("unsupported network {other:?}; expected \"local\" or \"ic\""),
    };
    let service_id = match &opts.canister_id {
        Some(canister_id) => canister_id.clone(),
        None => std::env::var(SERVICE_CANISTER_ENV)
            .map_err(|_| anyhow!("pass --canister-id or set {}", SERVICE_CANISTER_ENV))?,
    };
    let mut descriptor = ServiceDescriptor::new(target, &service_id);
    if let Some(identity_provider_id) = opts
        .ii_canister_id
        .clone()
        .or_else(|| std::env::var(IDENTITY_CANISTER_ENV).ok())
    {
        descriptor = descriptor.with_identity_provider_id(&identity_provider_id);
    }
    Ok(descriptor)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let level = if opts.verbose {
        Level::Debug
    } else {
        Level::Info
    };
    let logger = new_logger(level);

    let descriptor = build_descriptor(&opts)?;
    let provider = Arc::new(StoredSessionProvider::new(
        opts.session_file.clone(),
        Box::new(UnavailableAuthorizationFlow),
        logger.clone(),
    ));
    let session = SessionBuilder::new(provider)
        .with_descriptor(descriptor)
        .with_logger(logger.clone())
        .build()
        .await?;

    match opts.subcommand {
        SubCommand::Status => commands::session::status(&session),
        SubCommand::Whoami => commands::session::whoami(&session).await?,
        SubCommand::Get { index } => commands::pages::get(&session, index).await?,
        SubCommand::Set { path, content } => commands::pages::set(&session, path, content).await?,
        SubCommand::Rm { path } => commands::pages::rm(&session, path).await?,
        SubCommand::Fund { path } => commands::pages::fund(&session, path).await?,
        SubCommand::Funded => commands::pages::funded(&session).await?,
        SubCommand::Logout => commands::session::logout(&session, &logger).await?,
    }
    Ok(())
}
