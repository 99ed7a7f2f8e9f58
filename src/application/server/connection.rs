use crate::application::event::ApiEvent;
use crate::application::handler::request_handler::RequestHandler;
use crate::application::config::models::Config;
use crate::common::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_MAX_HEADER_SIZE};
use crate::common::error::{Result, ServerError};
use crate::http::parser::RequestParser;
use crate::http::response::Response;
use crate::http::serializer::ResponseSerializer;
use crate::http::status::StatusCode;
use crate::http::version::Version;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Per-connection limits
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub read_timeout: Duration,
    pub max_header_size: usize,
    pub max_body_size: usize,
}

impl ConnectionLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            read_timeout: Duration::from_secs(config.client_timeout_secs),
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            max_body_size: config.client_max_body_size,
        }
    }
}

/// Serve requests on one connection until the client closes it, asks for
/// `Connection: close`, goes quiet past the read timeout or sends garbage.
pub async fn serve_connection<S>(
    mut stream: S,
    handler: &dyn RequestHandler,
    limits: ConnectionLimits,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut parser = RequestParser::with_limits(limits.max_header_size, limits.max_body_size);
    let mut buf = vec![0u8; DEFAULT_BUFFER_SIZE];

    loop {
        let request = match parser.parse() {
            Ok(Some(request)) => request,
            Ok(None) => {
                let read = tokio::time::timeout(limits.read_timeout, stream.read(&mut buf)).await;
                match read {
                    Ok(Ok(0)) => return Ok(()),
                    Ok(Ok(n)) => {
                        parser.add_data(&buf[..n]);
                        continue;
                    }
                    Ok(Err(e)) => return Err(e.into()),
                    Err(_) if parser.is_idle() => {
                        debug!("closing idle connection");
                        return Ok(());
                    }
                    Err(_) => {
                        let response = Response::plain(
                            Version::Http11,
                            StatusCode::REQUEST_TIMEOUT,
                            "Request timed out",
                        );
                        return write_final(&mut stream, response).await;
                    }
                }
            }
            Err(ServerError::PayloadTooLarge(size, limit)) => {
                warn!(size, limit, "rejecting oversized request body");
                let response = Response::plain(
                    Version::Http11,
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Request body too large",
                );
                return write_final(&mut stream, response).await;
            }
            Err(e) => {
                warn!(error = %e, "rejecting malformed request");
                let response =
                    Response::plain(Version::Http11, StatusCode::BAD_REQUEST, &e.to_string());
                return write_final(&mut stream, response).await;
            }
        };

        let keep_alive = request.should_keep_alive();
        let version = request.version;

        let mut response = match ApiEvent::from_request(request) {
            Ok(event) => handler.handle(event).await.into_http(version),
            Err(e) => Response::plain(version, StatusCode::BAD_REQUEST, &e.to_string()),
        };

        if !keep_alive {
            return write_final(&mut stream, response).await;
        }
        response.set_connection("keep-alive");
        stream.write_all(&ResponseSerializer::serialize(&response)?).await?;
        stream.flush().await?;
    }
}

/// Write a last response marked `Connection: close` and shut the stream down
async fn write_final<S>(stream: &mut S, mut response: Response) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    response.set_connection("close");
    stream.write_all(&ResponseSerializer::serialize(&response)?).await?;
    stream.flush().await?;
    stream.shutdown().await?;
    Ok(())
}
