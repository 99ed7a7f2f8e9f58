use crate::application::config::models::Config;
use crate::application::handler::request_handler::RequestHandler;
use crate::application::server::connection::{serve_connection, ConnectionLimits};
use crate::application::server::listener::Listener;
use crate::common::error::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Accepts connections and serves each on its own task
pub struct ServerManager {
    listener: Listener,
    handler: Arc<dyn RequestHandler>,
    limits: ConnectionLimits,
}

impl ServerManager {
    pub async fn bind(config: &Config, handler: Arc<dyn RequestHandler>) -> Result<Self> {
        let addr = SocketAddr::new(config.server.address, config.server.port);
        let listener = Listener::bind(addr).await?;

        Ok(Self {
            listener,
            handler,
            limits: ConnectionLimits::from_config(config),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.listener.addr()
    }

    /// Log server information
    pub fn print_server_info(&self) {
        info!(
            addr = %self.local_addr(),
            read_timeout_secs = self.limits.read_timeout.as_secs(),
            max_body_size = self.limits.max_body_size,
            "topic server listening"
        );
    }

    /// Accept connections until `shutdown` resolves. In-flight connections
    /// finish on their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutting down listener");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            warn!(error = %e, "failed to accept connection");
                            continue;
                        }
                    };

                    let handler = Arc::clone(&self.handler);
                    let limits = self.limits;
                    tokio::spawn(async move {
                        debug!(%peer, "connection opened");
                        if let Err(e) = serve_connection(stream, handler.as_ref(), limits).await {
                            debug!(%peer, error = %e, "connection ended with error");
                        }
                    });
                }
            }
        }
    }
}
