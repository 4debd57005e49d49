use std::time::Duration;

use tokio::sync::{mpsc::UnboundedSender, oneshot};

use crate::playback::types::PlayerIn;

/// One-shot start-delay and hold-duration timers, each carrying a stop
/// sender so reset/teardown can cancel a pending fire. Cancellation can
/// lose the race against an already-elapsed sleep, so every fire also
/// carries the generation it was armed under for the receiver to check.
pub struct PlaybackTimers {
    start_stop: Option<oneshot::Sender<()>>,
    hold_stop: Option<oneshot::Sender<()>>,
}

impl PlaybackTimers {
    pub fn new() -> Self {
        Self {
            start_stop: None,
            hold_stop: None,
        }
    }

    /// Arms the start-delay timer; posts `StartElapsed` when it fires.
    pub fn arm_start(&mut self, tx: UnboundedSender<PlayerIn>, delay: Duration, generation: u64) {
        self.cancel_start();
        let (stop_tx, mut stop_rx) = oneshot::channel();
        self.start_stop = Some(stop_tx);
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(PlayerIn::StartElapsed(generation));
                }
                _ = &mut stop_rx => {}
            }
        });
    }

    /// Arms the hold-duration timer; posts `HoldElapsed` when it fires.
    pub fn arm_hold(&mut self, tx: UnboundedSender<PlayerIn>, hold: Duration, generation: u64) {
        self.cancel_hold();
        let (stop_tx, mut stop_rx) = oneshot::channel();
        self.hold_stop = Some(stop_tx);
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(hold) => {
                    let _ = tx.send(PlayerIn::HoldElapsed(generation));
                }
                _ = &mut stop_rx => {}
            }
        });
    }

    pub fn cancel_start(&mut self) {
        if let Some(stop) = self.start_stop.take() {
            let _ = stop.send(());
        }
    }

    pub fn cancel_hold(&mut self) {
        if let Some(stop) = self.hold_stop.take() {
            let _ = stop.send(());
        }
    }

    pub fn cancel_all(&mut self) {
        self.cancel_start();
        self.cancel_hold();
    }
}

impl Default for PlaybackTimers {
    fn default() -> Self {
        Self::new()
    }
}
