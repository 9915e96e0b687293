use super::{PublishedSession, Session, SessionController};
use crate::actor::{ActorFactory, ConnectionOptions};
use crate::config::model::deployment::ServiceDescriptor;
use crate::error::builder::BuildSessionError;
use crate::identity::{AuthProvider, IdentityResolver};
use slog::Logger;
use std::sync::Arc;

/// Builds the one published session for a process: resolves the startup
/// credential, eagerly constructs the initial proxy, and seeds the cell.
pub struct SessionBuilder {
    provider: Arc<dyn AuthProvider>,
    descriptor: Option<ServiceDescriptor>,
    options: ConnectionOptions,
    logger: Option<Logger>,
}

impl SessionBuilder {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            descriptor: None,
            options: ConnectionOptions::default(),
            logger: None,
        }
    }

    /// Without this, the descriptor is read from the environment at build
    /// time.
    pub fn with_descriptor(self, descriptor: ServiceDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
            ..self
        }
    }

    /// Overrides applied to the initial proxy only; proxies rebuilt on login
    /// use defaults.
    pub fn with_connection_options(self, options: ConnectionOptions) -> Self {
        Self { options, ..self }
    }

    pub fn with_logger(self, logger: Logger) -> Self {
        Self {
            logger: Some(logger),
            ..self
        }
    }

    pub async fn build(self) -> Result<Session, BuildSessionError> {
        let descriptor = match self.descriptor {
            Some(descriptor) => descriptor,
            None => ServiceDescriptor::from_env()?,
        };
        let logger = self
            .logger
            .unwrap_or_else(|| Logger::root(slog::Discard, slog::o!()));

        let resolver = IdentityResolver::new(self.provider.clone());
        let credential = resolver.resolve().await?;

        let factory = ActorFactory::new(descriptor, logger.clone());
        let proxy = factory.build(credential, self.options)?;

        let controller = Arc::new(SessionController {
            provider: self.provider,
            factory,
            published: PublishedSession::new(proxy),
            logger,
        });
        Ok(Session::new(controller))
    }
}
