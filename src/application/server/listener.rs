use crate::common::error::Result;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};

/// Listening socket for the HTTP host
pub struct Listener {
    inner: TcpListener,
    addr: SocketAddr,
}

impl Listener {
    /// Bind to `addr`; port 0 picks a free port
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let inner = TcpListener::bind(addr).await?;
        let addr = inner.local_addr()?;
        Ok(Self { inner, addr })
    }

    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr)> {
        let (stream, peer) = self.inner.accept().await?;
        stream.set_nodelay(true)?;
        Ok((stream, peer))
    }

    /// Address actually bound
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}
