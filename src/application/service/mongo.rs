use crate::application::messages;
use crate::application::service::model::{NewTopic, Topic, TopicId, UpdateTopic, UserId};
use crate::application::service::outcome::{Outcome, ServiceError, ServiceResult};
use crate::application::service::policy::{validate_new_topic, AdminPolicy};
use crate::application::service::TopicService;
use crate::http::status::StatusCode;
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use futures::TryStreamExt;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const TOPICS_COLLECTION: &str = "topics";

const DUPLICATE_KEY: i32 = 11000;

/// Stored form of a [`Topic`]; the topic id doubles as `_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopicDocument {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    #[serde(default)]
    is_locked: bool,
    /// BSON datetime so that sorting on it is sorting by time
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    date_created: DateTime<Utc>,
}

impl From<Topic> for TopicDocument {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id.as_str().to_string(),
            title: topic.title,
            is_locked: topic.is_locked,
            date_created: topic.date_created,
        }
    }
}

impl From<TopicDocument> for Topic {
    fn from(document: TopicDocument) -> Self {
        Self {
            id: TopicId::new(document.id),
            title: document.title,
            is_locked: document.is_locked,
            date_created: document.date_created,
        }
    }
}

/// Topic store backed by a MongoDB collection
pub struct MongoTopicService {
    topics: Collection<TopicDocument>,
    policy: AdminPolicy,
}

impl MongoTopicService {
    pub async fn connect(
        connection_string: &str,
        database: &str,
        policy: AdminPolicy,
    ) -> Result<Self, ServiceError> {
        let client = Client::with_uri_str(connection_string).await?;
        let database = client.database(database);

        // the driver connects lazily; fail at startup instead of on the first request
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ServiceError::Unavailable(format!("MongoDB did not answer ping: {}", e)))?;

        let topics = database.collection::<TopicDocument>(TOPICS_COLLECTION);
        Ok(Self { topics, policy })
    }

    async fn find(&self, id: &TopicId) -> Result<Option<Topic>, ServiceError> {
        let found = self.topics.find_one(doc! { "_id": id.as_str() }).await?;
        Ok(found.map(Topic::from))
    }
}

/// `$set` document for the fields present in `update`
fn set_document(update: &UpdateTopic) -> Document {
    let mut set = Document::new();
    if let Some(title) = &update.title {
        set.insert("title", title.as_str());
    }
    if let Some(is_locked) = update.is_locked {
        set.insert("isLocked", is_locked);
    }
    set
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl TopicService for MongoTopicService {
    async fn get(&self, id: Option<&TopicId>, _user: Option<&UserId>) -> ServiceResult {
        let Some(id) = id else {
            let documents: Vec<TopicDocument> = self
                .topics
                .find(doc! {})
                .sort(doc! { "dateCreated": 1, "_id": 1 })
                .await?
                .try_collect()
                .await?;
            let topics: Vec<Topic> = documents.into_iter().map(Topic::from).collect();
            return Ok(Outcome::success(StatusCode::OK, serde_json::to_value(topics)?));
        };

        match self.find(id).await? {
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
        if self.find(&topic.id).await?.is_some() {
            return Ok(messages::duplicate_topic());
        }

        // BSON datetimes keep milliseconds only
        let topic = Topic::from_new(topic, Utc::now().trunc_subsecs(3));
        match self.topics.insert_one(TopicDocument::from(topic.clone())).await {
            Ok(_) => {
                debug!(topic = %topic.id, user = %user, "created topic");
                Ok(Outcome::success(StatusCode::CREATED, serde_json::to_value(topic)?))
            }
            // lost a race with a concurrent create of the same id
            Err(err) if is_duplicate_key(&err) => Ok(messages::duplicate_topic()),
            Err(err) => Err(err.into()),
        }
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

        // an empty $set is rejected by the server
        let updated = if update.is_empty() {
            self.find(id).await?
        } else {
            self.topics
                .find_one_and_update(doc! { "_id": id.as_str() }, doc! { "$set": set_document(&update) })
                .return_document(ReturnDocument::After)
                .await?
                .map(Topic::from)
        };

        match updated {
            Some(topic) => Ok(Outcome::success(StatusCode::OK, serde_json::to_value(topic)?)),
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

        let result = self.topics.delete_one(doc! { "_id": id.as_str() }).await?;
        if result.deleted_count == 0 {
            Ok(messages::topic_not_found())
        } else {
            Ok(messages::topic_deleted())
        }
    }
}
