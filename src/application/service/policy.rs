use crate::application::messages;
use crate::application::service::model::{NewTopic, UserId};
use crate::application::service::outcome::Outcome;
use std::collections::HashSet;

/// Decides who may change topics: only configured administrators.
/// Reading is open to everyone.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    admins: HashSet<UserId>,
}

impl AdminPolicy {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(UserId::new).collect(),
        }
    }

    pub fn is_admin(&self, user: &UserId) -> bool {
        self.admins.contains(user)
    }

    /// `Err` carries the 401/403 outcome to send back
    pub fn authorize_write<'a>(&self, user: Option<&'a UserId>) -> Result<&'a UserId, Outcome> {
        match user {
            None => Err(messages::user_not_authenticated()),
            Some(user) if !self.is_admin(user) => Err(messages::user_not_authorized()),
            Some(user) => Ok(user),
        }
    }
}

/// Reject topics with a blank id or title
pub fn validate_new_topic(topic: &NewTopic) -> Result<(), Outcome> {
    if topic.id.as_str().trim().is_empty() {
        return Err(messages::topic_id_required());
    }
    if topic.title.trim().is_empty() {
        return Err(messages::bad_request("Topic title is required"));
    }
    Ok(())
}
