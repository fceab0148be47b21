//! Cancellation monitor
//!
//! Runs as a background task for the lifetime of the session, watching
//! the brick buttons for the cancellation gesture: CENTER and LEFT
//! clicked together. When the gesture completes it flips the shared run
//! state and sends the exit token on the exit channel, which unblocks
//! any handler waiting in a poll loop on the command channel.

use crate::codec::{self, CodecError};
use crate::device::{BrickButton, ButtonPad};
use crate::protocol;
use crate::session::RunState;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tracing::info;

/// The button chord that cancels the session.
const CANCEL_CHORD: [BrickButton; 2] = [BrickButton::Center, BrickButton::Left];

pub struct CancellationMonitor {
    buttons: Arc<dyn ButtonPad>,
    run_state: RunState,
    poll_interval: Duration,
}

impl CancellationMonitor {
    pub fn new(buttons: Arc<dyn ButtonPad>, run_state: RunState, poll_interval: Duration) -> Self {
        Self {
            buttons,
            run_state,
            poll_interval,
        }
    }

    async fn any_chord_button_down(&self) -> bool {
        let down = self.buttons.pressed().await;
        CANCEL_CHORD.iter().any(|b| down.contains(b))
    }

    async fn full_chord_down(&self) -> bool {
        let down = self.buttons.pressed().await;
        CANCEL_CHORD.iter().all(|b| down.contains(b))
    }

    /// Watch for the cancellation gesture, then fire: run state goes
    /// false and the exit token is sent on `exit_channel`. Fires at most
    /// once; the task ends afterwards.
    pub async fn run<W>(self, exit_channel: &mut W) -> Result<(), CodecError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        // A chord button may already be held when the session starts;
        // wait it out so a stale press cannot fire the gesture.
        while self.any_chord_button_down().await {
            tokio::time::sleep(self.poll_interval).await;
        }
        while !self.full_chord_down().await {
            tokio::time::sleep(self.poll_interval).await;
        }
        while self.any_chord_button_down().await {
            tokio::time::sleep(self.poll_interval).await;
        }

        info!("cancellation gesture detected, shutting down session");
        self.run_state.shutdown();
        codec::send(exit_channel, protocol::EXIT).await
    }
}
