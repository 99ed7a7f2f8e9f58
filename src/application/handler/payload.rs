use crate::application::service::model::{NewTopic, UpdateTopic};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Request body is required")]
    Missing,

    #[error("Malformed request body: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn parse_new_topic(body: Option<&str>) -> Result<NewTopic, PayloadError> {
    parse_json(body)
}

pub fn parse_update_topic(body: Option<&str>) -> Result<UpdateTopic, PayloadError> {
    parse_json(body)
}

fn parse_json<T: DeserializeOwned>(body: Option<&str>) -> Result<T, PayloadError> {
    match body {
        Some(body) if !body.trim().is_empty() => Ok(serde_json::from_str(body)?),
        _ => Err(PayloadError::Missing),
    }
}
