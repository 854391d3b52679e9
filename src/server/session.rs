use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::terminal::RemoteTerminal;
use crate::game::{Flow, GameConfig, GameEngine, GameEvent, Viewport};
use crate::input::telnet::NEGOTIATION;
use crate::input::{InputHandler, KeyDecoder, TerminalEvent};
use crate::render::{Renderer, SessionStyle};

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player pressed the quit key
    Quit,
    /// The client closed the connection
    Disconnected,
}

/// Everything one connected client owns. Nothing here is shared with other
/// sessions; the engine is only touched from this session's task.
pub struct SessionHost {
    id: u64,
    peer: SocketAddr,
    engine: GameEngine,
    decoder: KeyDecoder,
    input_handler: InputHandler,
    renderer: Renderer,
    terminal: RemoteTerminal,
    tick_interval: Duration,
}

impl SessionHost {
    pub fn new(id: u64, peer: SocketAddr, config: &GameConfig) -> Result<Self> {
        let engine = GameEngine::new(config).context("Failed to create game")?;
        let terminal = RemoteTerminal::new(engine.viewport()).context("Failed to create terminal")?;
        let style = SessionStyle::random(&mut rand::thread_rng());

        Ok(Self {
            id,
            peer,
            engine,
            decoder: KeyDecoder::new(),
            input_handler: InputHandler::new(),
            renderer: Renderer::new(style),
            terminal,
            tick_interval: config.tick_interval(),
        })
    }

    /// Play over `stream` until the player quits or the connection goes away
    pub async fn run<S>(mut self, stream: S) -> Result<SessionEnd>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let started = Instant::now();
        info!(session = self.id, peer = %self.peer, "session started");

        let (mut reader, mut writer) = tokio::io::split(stream);
        writer
            .write_all(&NEGOTIATION)
            .await
            .context("Failed to negotiate with client")?;
        let setup = self.terminal.enter()?;
        send(&mut writer, &setup).await?;

        let end = self.event_loop(&mut reader, &mut writer).await?;

        if end == SessionEnd::Quit {
            // Best effort: the client may already be gone
            if let Ok(restore) = self.terminal.leave() {
                let _ = send(&mut writer, &restore).await;
            }
            let _ = writer.shutdown().await;
        }

        info!(
            session = self.id,
            peer = %self.peer,
            reason = ?end,
            snake_length = self.engine.snake().len(),
            duration_secs = started.elapsed().as_secs(),
            "session ended"
        );

        Ok(end)
    }

    async fn event_loop<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<SessionEnd>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut buf = [0u8; 512];

        loop {
            tokio::select! {
                read = reader.read(&mut buf) => {
                    let n = read.context("Failed to read from client")?;
                    if n == 0 {
                        return Ok(SessionEnd::Disconnected);
                    }
                    if self.handle_bytes(&buf[..n])? == Flow::Quit {
                        return Ok(SessionEnd::Quit);
                    }
                }

                _ = ticker.tick() => {
                    self.engine.handle_event(GameEvent::Tick);
                }
            }

            let frame = self
                .terminal
                .draw(&self.renderer, &self.engine.render())
                .context("Failed to draw frame")?;
            send(writer, &frame).await?;
        }
    }

    fn handle_bytes(&mut self, bytes: &[u8]) -> Result<Flow> {
        for event in self.decoder.feed(bytes) {
            let game_event = match event {
                TerminalEvent::Key(key) => GameEvent::Key(self.input_handler.handle_key_event(key)),
                TerminalEvent::Resize { width, height } => {
                    debug!(session = self.id, width, height, "client resized");
                    self.terminal
                        .resize(Viewport::new(width, height))
                        .context("Failed to resize terminal")?;
                    GameEvent::Resize { width, height }
                }
            };

            if self.engine.handle_event(game_event) == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }
}

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    writer.write_all(bytes).await.context("Failed to write to client")?;
    writer.flush().await.context("Failed to flush to client")?;
    Ok(())
}
