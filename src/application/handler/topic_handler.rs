use crate::application::config::models::Config;
use crate::application::event::{ApiEvent, ApiResponse};
use crate::application::handler::auth::AuthExtractor;
use crate::application::handler::cors::CorsPolicy;
use crate::application::handler::path;
use crate::application::handler::payload;
use crate::application::handler::request_handler::RequestHandler;
use crate::application::messages;
use crate::application::service::model::{TopicId, UserId};
use crate::application::service::outcome::{Outcome, ServiceResult};
use crate::application::service::TopicService;
use crate::common::constants::TOPIC_RESOURCE;
use crate::http::headers::Headers;
use crate::http::method::Method;
use crate::http::status::StatusCode;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Entry point for `/topic` requests.
///
/// One request maps to at most one [`TopicService`] call. OPTIONS and
/// unknown methods are answered without touching the service.
pub struct TopicHandler {
    service: Arc<dyn TopicService>,
    cors: CorsPolicy,
    auth: AuthExtractor,
}

impl TopicHandler {
    pub fn new(service: Arc<dyn TopicService>, cors: CorsPolicy, auth: AuthExtractor) -> Self {
        Self {
            service,
            cors,
            auth,
        }
    }

    pub fn from_config(service: Arc<dyn TopicService>, config: &Config) -> Self {
        Self::new(
            service,
            CorsPolicy::new(config.cors.allowed_origins.clone()),
            AuthExtractor::from_config(&config.auth),
        )
    }

    async fn dispatch(
        &self,
        event: &ApiEvent,
        target: Option<&TopicId>,
        user: Option<&UserId>,
    ) -> ServiceResult {
        match &event.http_method {
            Method::GET => self.service.get(target, user).await,
            Method::POST => match payload::parse_new_topic(event.body.as_deref()) {
                Ok(topic) => self.service.create(topic, user).await,
                Err(e) => Ok(messages::bad_request(&e.to_string())),
            },
            Method::PUT => match payload::parse_update_topic(event.body.as_deref()) {
                Ok(update) => self.service.update(target, update, user).await,
                Err(e) => Ok(messages::bad_request(&e.to_string())),
            },
            Method::DELETE => self.service.delete(target, user).await,
            Method::OPTIONS => Ok(messages::no_content()),
            Method::Other(_) => Ok(messages::method_not_allowed()),
        }
    }
}

/// Attach headers; 204 goes out bare, everything else JSON-encoded
fn into_response(outcome: Outcome, headers: Headers) -> ApiResponse {
    let reply = outcome.into_reply();
    if reply.status_code == StatusCode::NO_CONTENT {
        return ApiResponse::new(reply.status_code, None, headers);
    }
    ApiResponse::new(reply.status_code, Some(reply.body.to_string()), headers)
}

#[async_trait]
impl RequestHandler for TopicHandler {
    async fn handle(&self, event: ApiEvent) -> ApiResponse {
        let headers = self.cors.response_headers(&event.headers);

        if !path::is_valid_depth(&event.path) {
            debug!(path = %event.path, "rejecting over-deep path");
            return ApiResponse::new(
                StatusCode::NOT_FOUND,
                Some(format!("{} is not valid", event.path)),
                headers,
            );
        }

        let user = self.auth.user_id(&event.headers);
        let target = path::target_id(&event.path, TOPIC_RESOURCE);

        let outcome = match self.dispatch(&event, target.as_ref(), user.as_ref()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    method = %event.http_method,
                    path = %event.path,
                    error = %e,
                    "topic service failed"
                );
                messages::internal_error()
            }
        };

        info!(
            method = %event.http_method,
            path = %event.path,
            status = %outcome.status_code(),
            user = user.as_ref().map(UserId::as_str).unwrap_or("-"),
            "handled topic request"
        );

        into_response(outcome, headers)
    }
}
