//! Session lifecycle
//!
//! One session means: one client on the command channel, one on the exit
//! channel, a cancellation monitor task, and the dispatch loop. The
//! supervisor owns all shared state and wires the pieces together.

use crate::codec::{self, CodecError};
use crate::command::handlers::HandlerContext;
use crate::command::CommandRegistry;
use crate::config::ServerConfig;
use crate::device::DeviceBindings;
use crate::monitor::CancellationMonitor;
use crate::protocol;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Shared session gate. Starts true, flips to false exactly once when
/// the cancellation gesture fires, and never resets. Single writer,
/// polled by every blocking wait loop.
#[derive(Clone, Debug)]
pub struct RunState(Arc<AtomicBool>);

impl RunState {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// One-way transition to the terminal state.
    pub fn shutdown(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the command/reply loop until the client sends the literal exit
/// request, cancellation fires, or the channel fails.
///
/// Exactly one command is in flight at a time; `receive` is the only
/// suspension point between commands. No reply is sent for the literal
/// exit request or once the run state is down.
pub async fn dispatch_loop<S>(
    channel: &mut S,
    registry: &CommandRegistry,
    ctx: &HandlerContext,
) -> Result<(), CodecError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let payload = codec::receive(channel).await?;
        debug!(%payload, "received command");

        if payload == protocol::EXIT || !ctx.run_state.is_running() {
            return Ok(());
        }

        let reply = registry.dispatch(ctx, &payload).await;
        debug!(%reply, "sending reply");
        codec::send(channel, &reply).await?;
    }
}

/// Accepts both channels, starts the monitor, runs the dispatch loop and
/// tears everything down on exit.
pub struct SessionSupervisor {
    config: ServerConfig,
    bindings: Arc<DeviceBindings>,
}

impl SessionSupervisor {
    pub fn new(config: ServerConfig, bindings: Arc<DeviceBindings>) -> Self {
        Self { config, bindings }
    }

    /// Serve one session to completion. Framing and transport errors on
    /// the command channel are fatal and propagate from here.
    pub async fn serve(self) -> anyhow::Result<()> {
        let command_listener =
            TcpListener::bind(("0.0.0.0", self.config.command_port)).await?;
        let exit_listener = TcpListener::bind(("0.0.0.0", self.config.exit_port)).await?;
        info!(
            command_port = self.config.command_port,
            exit_port = self.config.exit_port,
            "listening"
        );

        let (mut command_channel, addr) = command_listener.accept().await?;
        info!(%addr, "command channel connected");
        let (mut exit_channel, addr) = exit_listener.accept().await?;
        info!(%addr, "exit channel connected");

        let run_state = RunState::new();
        let monitor = CancellationMonitor::new(
            self.bindings.buttons().clone(),
            run_state.clone(),
            self.config.poll_interval,
        );
        let monitor_task = tokio::spawn(async move {
            if let Err(err) = monitor.run(&mut exit_channel).await {
                warn!(%err, "failed to signal exit channel");
            }
        });

        let ctx = HandlerContext {
            bindings: self.bindings,
            run_state,
            poll_interval: self.config.poll_interval,
        };
        let registry = CommandRegistry::new();

        let result = dispatch_loop(&mut command_channel, &registry, &ctx).await;
        monitor_task.abort();
        info!("session closed");

        result.map_err(Into::into)
    }
}
