pub mod config;
pub mod event;
pub mod handler;
pub mod messages;
pub mod server;
pub mod service;
