use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, error, warn};

use super::session::SessionHost;
use crate::game::GameConfig;

/// Where to listen and what every session plays
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub game: GameConfig,
}

impl ServerConfig {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            game: GameConfig::default(),
        }
    }
}

/// Accepts connections and gives each one its own game
pub struct Server {
    listener: TcpListener,
    game: GameConfig,
}

impl Server {
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind(&config.addr)
            .await
            .with_context(|| format!("Failed to bind {}", config.addr))?;

        Ok(Self {
            listener,
            game: config.game,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    /// Accept connections until the future is dropped
    pub async fn run(self) -> Result<()> {
        let mut next_id: u64 = 1;

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };

            let session_id = next_id;
            next_id = next_id.saturating_add(1);

            if let Err(err) = stream.set_nodelay(true) {
                debug!(session = session_id, error = %err, "could not disable Nagle");
            }

            let host = match SessionHost::new(session_id, peer, &self.game) {
                Ok(host) => host,
                Err(err) => {
                    error!(session = session_id, peer = %peer, error = %err, "failed to start session");
                    continue;
                }
            };

            tokio::spawn(async move {
                if let Err(err) = host.run(stream).await {
                    warn!(session = session_id, peer = %peer, error = %err, "session ended with error");
                }
            });
        }
    }
}
