// Shared fixtures for the integration tests

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};

use topicd::application::config::models::Config;
use topicd::application::handler::{sign_session_token, TopicHandler};
use topicd::application::service::{
    NewTopic, Outcome, ServiceError, ServiceResult, TopicId, TopicService, UpdateTopic, UserId,
};

pub const TEST_SECRET: &str = "integration-secret";
pub const ALLOWED_ORIGIN: &str = "https://allowed.test";

/// One recorded service invocation
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(Option<TopicId>, Option<UserId>),
    Create(NewTopic, Option<UserId>),
    Update(Option<TopicId>, UpdateTopic, Option<UserId>),
    Delete(Option<TopicId>, Option<UserId>),
}

/// What the fake answers with
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Canned {
    Answer(Outcome),
    Fail(String),
}

/// Service fake that records calls and returns a fixed answer
#[allow(dead_code)]
pub struct RecordingTopicService {
    calls: Mutex<Vec<Call>>,
    canned: Canned,
}

#[allow(dead_code)]
impl RecordingTopicService {
    pub fn answering(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            canned: Canned::Answer(outcome),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            canned: Canned::Fail(message.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> ServiceResult {
        self.calls.lock().unwrap().push(call);
        match &self.canned {
            Canned::Answer(outcome) => Ok(outcome.clone()),
            Canned::Fail(message) => Err(ServiceError::Unavailable(message.clone())),
        }
    }
}

#[async_trait]
impl TopicService for RecordingTopicService {
    async fn get(&self, id: Option<&TopicId>, user: Option<&UserId>) -> ServiceResult {
        self.record(Call::Get(id.cloned(), user.cloned()))
    }

    async fn create(&self, topic: NewTopic, user: Option<&UserId>) -> ServiceResult {
        self.record(Call::Create(topic, user.cloned()))
    }

    async fn update(
        &self,
        id: Option<&TopicId>,
        update: UpdateTopic,
        user: Option<&UserId>,
    ) -> ServiceResult {
        self.record(Call::Update(id.cloned(), update, user.cloned()))
    }

    async fn delete(&self, id: Option<&TopicId>, user: Option<&UserId>) -> ServiceResult {
        self.record(Call::Delete(id.cloned(), user.cloned()))
    }
}

/// Valid configuration with one allowed origin and `admin` as the only admin
#[allow(dead_code)]
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.auth.admin_user_ids = vec!["admin".to_string()];
    config.cors.allowed_origins = vec![ALLOWED_ORIGIN.to_string()];
    config
}

#[allow(dead_code)]
pub fn create_handler(service: Arc<dyn TopicService>) -> TopicHandler {
    TopicHandler::from_config(service, &create_test_config())
}

/// `Authorization` header value for `user`, valid for an hour
#[allow(dead_code)]
pub fn bearer_for(user: &str) -> String {
    let token = sign_session_token(
        TEST_SECRET,
        &UserId::new(user),
        Utc::now() + Duration::hours(1),
    )
    .unwrap();
    format!("Bearer {}", token)
}
