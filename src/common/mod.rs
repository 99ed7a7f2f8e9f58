pub mod buffer;
pub mod constants;
pub mod error;
pub mod logger;
