//! Topic storage behind a single async trait.
//!
//! Backends answer with an [`Outcome`] for anything the caller did (missing
//! topic, not allowed, bad input) and reserve [`ServiceError`] for the store
//! itself failing.

pub mod memory;
pub mod model;
pub mod mongo;
pub mod outcome;
pub mod policy;

use crate::application::config::models::{AuthConfig, DatabaseConfig};
use crate::common::error::{Result, ServerError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub use memory::MemoryTopicService;
pub use model::{NewTopic, Topic, TopicId, UpdateTopic, UserId};
pub use mongo::MongoTopicService;
pub use outcome::{Outcome, Reply, ServiceError, ServiceResult};
pub use policy::AdminPolicy;

#[async_trait]
pub trait TopicService: Send + Sync {
    /// One topic by id, or every topic when `id` is `None`
    async fn get(&self, id: Option<&TopicId>, user: Option<&UserId>) -> ServiceResult;

    async fn create(&self, topic: NewTopic, user: Option<&UserId>) -> ServiceResult;

    async fn update(
        &self,
        id: Option<&TopicId>,
        update: UpdateTopic,
        user: Option<&UserId>,
    ) -> ServiceResult;

    async fn delete(&self, id: Option<&TopicId>, user: Option<&UserId>) -> ServiceResult;
}

/// Open the backend named by the connection string's scheme
pub async fn connect(
    database: &DatabaseConfig,
    auth: &AuthConfig,
) -> Result<Arc<dyn TopicService>> {
    let policy = AdminPolicy::new(auth.admin_user_ids.iter().cloned());
    let uri = database.connection_string.as_str();

    if uri.starts_with("memory://") {
        info!("using in-memory topic store");
        return Ok(Arc::new(MemoryTopicService::new(policy)));
    }

    if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
        let service = MongoTopicService::connect(uri, &database.name, policy)
            .await
            .map_err(|e| ServerError::ConfigError(format!("Failed to open MongoDB: {}", e)))?;
        info!(database = %database.name, "using MongoDB topic store");
        return Ok(Arc::new(service));
    }

    let scheme = uri.split("://").next().unwrap_or(uri);
    Err(ServerError::ConfigError(format!(
        "Unsupported database connection scheme: {}",
        scheme
    )))
}
