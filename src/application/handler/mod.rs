pub mod auth;
pub mod cors;
pub mod path;
pub mod payload;
pub mod request_handler;
pub mod topic_handler;

pub use auth::{sign_session_token, AuthExtractor};
pub use cors::CorsPolicy;
pub use request_handler::RequestHandler;
pub use topic_handler::TopicHandler;
