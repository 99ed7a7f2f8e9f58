//! Canned outcomes shared by the handler and the service backends.

use crate::application::service::outcome::Outcome;
use crate::http::status::StatusCode;
use serde_json::Value;

pub fn no_content() -> Outcome {
    Outcome::success(StatusCode::NO_CONTENT, Value::Null)
}

pub fn topic_deleted() -> Outcome {
    Outcome::success(StatusCode::ACCEPTED, Value::String("Topic deleted".to_string()))
}

pub fn bad_request(message: &str) -> Outcome {
    Outcome::error(StatusCode::BAD_REQUEST, message)
}

pub fn topic_id_required() -> Outcome {
    bad_request("Topic id is required")
}

pub fn user_not_authenticated() -> Outcome {
    Outcome::error(StatusCode::UNAUTHORIZED, "User not authenticated")
}

pub fn user_not_authorized() -> Outcome {
    Outcome::error(StatusCode::FORBIDDEN, "User not authorized")
}

pub fn topic_not_found() -> Outcome {
    Outcome::error(StatusCode::NOT_FOUND, "Topic not found")
}

pub fn method_not_allowed() -> Outcome {
    Outcome::error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

pub fn duplicate_topic() -> Outcome {
    Outcome::error(StatusCode::CONFLICT, "Topic already exists")
}

pub fn internal_error() -> Outcome {
    Outcome::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
