use crate::application::messages;
use crate::application::service::model::{NewTopic, Topic, TopicId, UpdateTopic, UserId};
use crate::application::service::outcome::{Outcome, ServiceResult};
use crate::application::service::policy::{validate_new_topic, AdminPolicy};
use crate::application::service::TopicService;
use crate::http::status::StatusCode;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local topic store. Contents are lost on restart.
pub struct MemoryTopicService {
    topics: RwLock<HashMap<TopicId, Topic>>,
    policy: AdminPolicy,
}

impl MemoryTopicService {
    pub fn new(policy: AdminPolicy) -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            policy,
        }
    }

    pub async fn len(&self) -> usize {
        self.topics.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.topics.read().await.is_empty()
    }
}

#[async_trait]
impl TopicService for MemoryTopicService {
    async fn get(&self, id: Option<&TopicId>, _user: Option<&UserId>) -> ServiceResult {
        let topics = self.topics.read().await;

        let Some(id) = id else {
            let mut all: Vec<&Topic> = topics.values().collect();
            all.sort_by(|a, b| {
                a.date_created
                    .cmp(&b.date_created)
                    .then_with(|| a.id.cmp(&b.id))
            });
            return Ok(Outcome::success(StatusCode::OK, serde_json::to_value(all)?));
        };

        match topics.get(id) {
            Some(topic) => Ok(Outcome::success(StatusCode::OK, serde_json::to_value(topic)?)),
            None => Ok(messages::topic_not_found()),
        }
    }

    async fn create(&self, topic: NewTopic, user: Option<&UserId>) -> ServiceResult {
        let user = match self.policy.authorize_write(user) {
            Ok(user) => user,
            Err(denied) => return Ok(denied),
        };
        if let Err(invalid) = validate_new_topic(&topic) {
            return Ok(invalid);
        }

        let mut topics = self.topics.write().await;
        if topics.contains_key(&topic.id) {
            return Ok(messages::duplicate_topic());
        }

        let topic = Topic::from_new(topic, Utc::now());
        debug!(topic = %topic.id, user = %user, "created topic");
        let body = serde_json::to_value(&topic)?;
        topics.insert(topic.id.clone(), topic);
        Ok(Outcome::success(StatusCode::CREATED, body))
    }

    async fn update(
        &self,
        id: Option<&TopicId>,
        update: UpdateTopic,
        user: Option<&UserId>,
    ) -> ServiceResult {
        if let Err(denied) = self.policy.authorize_write(user) {
            return Ok(denied);
        }
        let Some(id) = id else {
            return Ok(messages::topic_id_required());
        };
        if matches!(&update.title, Some(title) if title.trim().is_empty()) {
            return Ok(messages::bad_request("Topic title is required"));
        }

        let mut topics = self.topics.write().await;
        match topics.get_mut(id) {
            Some(topic) => {
                topic.apply(&update);
                Ok(Outcome::success(StatusCode::OK, serde_json::to_value(&*topic)?))
            }
            None => Ok(messages::topic_not_found()),
        }
    }

    async fn delete(&self, id: Option<&TopicId>, user: Option<&UserId>) -> ServiceResult {
        if let Err(denied) = self.policy.authorize_write(user) {
            return Ok(denied);
        }
        let Some(id) = id else {
            return Ok(messages::topic_id_required());
        };

        match self.topics.write().await.remove(id) {
            Some(_) => Ok(messages::topic_deleted()),
            None => Ok(messages::topic_not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn service() -> MemoryTopicService {
        MemoryTopicService::new(AdminPolicy::new(["admin"]))
    }

    fn new_topic(id: &str, title: &str) -> NewTopic {
        NewTopic {
            id: TopicId::new(id),
            title: title.to_string(),
            is_locked: false,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let admin = UserId::new("admin");

        let created = service
            .create(new_topic("t1", "First"), Some(&admin))
            .await
            .unwrap();
        assert!(created.is_success());
        assert_eq!(created.status_code(), StatusCode::CREATED);

        let fetched = service.get(Some(&TopicId::new("t1")), None).await.unwrap();
        assert_eq!(fetched.status_code(), StatusCode::OK);
        assert_eq!(fetched.reply().body["title"], json!("First"));
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let service = service();

        let anonymous = service.create(new_topic("t1", "x"), None).await.unwrap();
        assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);

        let guest = UserId::new("guest");
        let denied = service.create(new_topic("t1", "x"), Some(&guest)).await.unwrap();
        assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_create() {
        let service = service();
        let admin = UserId::new("admin");
        service.create(new_topic("t1", "x"), Some(&admin)).await.unwrap();
        let again = service.create(new_topic("t1", "y"), Some(&admin)).await.unwrap();
        assert_eq!(again, messages::duplicate_topic());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_creation_then_id() {
        let service = service();
        {
            let mut topics = service.topics.write().await;
            for (id, secs) in [("late", 300), ("b", 100), ("early", 50), ("a", 100)] {
                let created = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
                topics.insert(TopicId::new(id), Topic::from_new(new_topic(id, id), created));
            }
        }

        let listed = service.get(None, None).await.unwrap();
        let ids: Vec<_> = listed
            .reply()
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["early", "a", "b", "late"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = service();
        let admin = UserId::new("admin");
        let id = TopicId::new("t1");
        service.create(new_topic("t1", "Old"), Some(&admin)).await.unwrap();

        let update = UpdateTopic {
            title: Some("New".to_string()),
            is_locked: Some(true),
        };
        let updated = service.update(Some(&id), update, Some(&admin)).await.unwrap();
        assert_eq!(updated.status_code(), StatusCode::OK);
        assert_eq!(updated.reply().body["isLocked"], json!(true));

        let deleted = service.delete(Some(&id), Some(&admin)).await.unwrap();
        assert_eq!(deleted, messages::topic_deleted());

        let gone = service.delete(Some(&id), Some(&admin)).await.unwrap();
        assert_eq!(gone, messages::topic_not_found());
    }

    #[tokio::test]
    async fn test_write_without_id() {
        let service = service();
        let admin = UserId::new("admin");
        let outcome = service
            .update(None, UpdateTopic::default(), Some(&admin))
            .await
            .unwrap();
        assert_eq!(outcome, messages::topic_id_required());

        let outcome = service.delete(None, Some(&admin)).await.unwrap();
        assert_eq!(outcome.status_code(), StatusCode::BAD_REQUEST);
    }
}
