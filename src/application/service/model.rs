use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a topic, taken from the request path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of an authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A discussion topic that comments hang off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub is_locked: bool,
    pub date_created: DateTime<Utc>,
}

impl Topic {
    pub fn from_new(new_topic: NewTopic, date_created: DateTime<Utc>) -> Self {
        Self {
            id: new_topic.id,
            title: new_topic.title,
            is_locked: new_topic.is_locked,
            date_created,
        }
    }

    pub fn apply(&mut self, update: &UpdateTopic) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(is_locked) = update.is_locked {
            self.is_locked = is_locked;
        }
    }
}

/// Fields accepted when creating a topic
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopic {
    pub id: TopicId,
    pub title: String,
    #[serde(default)]
    pub is_locked: bool,
}

/// Fields accepted when updating a topic; absent fields stay as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopic {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_locked: Option<bool>,
}

impl UpdateTopic {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.is_locked.is_none()
    }
}
