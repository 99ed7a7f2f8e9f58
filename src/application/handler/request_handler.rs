use crate::application::event::{ApiEvent, ApiResponse};
use async_trait::async_trait;

/// Trait for turning a request event into a response.
///
/// Implementations never fail: every problem is expressed as a response.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(&self, event: ApiEvent) -> ApiResponse;
}
