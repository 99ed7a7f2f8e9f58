pub mod connection;
pub mod listener;
pub mod server_manager;

pub use connection::{serve_connection, ConnectionLimits};
pub use listener::Listener;
pub use server_manager::ServerManager;
