use tokio::time::Instant;

use crate::shared::entities::Segment;

/// Scheduler phase. At most one segment is ever Waiting or Active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedState {
    /// Queue empty, nothing armed.
    Idle,
    /// A segment is popped and its start-delay timer is pending.
    Waiting,
    /// Animation and audio started, the hold timer is pending.
    Active,
}

/// Inbound events for the scheduler actor (session, timers, UI gestures).
#[derive(Debug)]
pub enum PlayerIn {
    /// Append a reply's segments; starts playback if idle.
    Enqueue(Vec<Segment>),
    /// Manual gesture path: crossfade directly, queue state untouched.
    PlayGesture(String),
    /// Start-delay timer fired. Carries the generation the timer was
    /// armed under; a fire from a superseded arming is dropped.
    StartElapsed(u64),
    /// Hold-duration timer fired, with its arming generation.
    HoldElapsed(u64),
    /// Clear the queue, cancel timers, return to idle.
    Reset,
}

/// Event kinds driving the pure state machine (payload-free mirror of
/// the `PlayerIn` variants that may change the scheduler phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    SegmentsQueued,
    StartElapsed,
    HoldElapsed,
    Reset,
}

/// Notifications to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackOut {
    /// The active animation changed (crossfade began).
    AnimationChanged { name: String },
    /// A segment entered its hold window.
    SegmentStarted { sentence: String },
    /// The queue drained and the avatar is back at the default pose.
    QueueDrained,
}

/// Pure transition function. Timer events arriving in the wrong phase
/// (a cancelled timer losing the race with reset) leave the state as is.
pub(crate) fn next_sched_state(
    state: SchedState,
    event: SchedEvent,
    queue_has_next: bool,
) -> SchedState {
    match (state, event) {
        (SchedState::Idle, SchedEvent::SegmentsQueued) if queue_has_next => SchedState::Waiting,
        (SchedState::Waiting, SchedEvent::StartElapsed) => SchedState::Active,
        (SchedState::Active, SchedEvent::HoldElapsed) if queue_has_next => SchedState::Waiting,
        (SchedState::Active, SchedEvent::HoldElapsed) => SchedState::Idle,
        (_, SchedEvent::Reset) => SchedState::Idle,
        (state, _) => state,
    }
}

/// Wall clock for segment timestamps. Server timestamps are absolute
/// milliseconds on this clock's domain, with the epoch at session start.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    epoch: Instant,
}

impl PlaybackClock {
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_waits_only_when_queue_has_segments() {
        assert_eq!(
            next_sched_state(SchedState::Idle, SchedEvent::SegmentsQueued, true),
            SchedState::Waiting
        );
        assert_eq!(
            next_sched_state(SchedState::Idle, SchedEvent::SegmentsQueued, false),
            SchedState::Idle
        );
    }

    #[test]
    fn hold_elapsed_rearms_or_goes_idle() {
        assert_eq!(
            next_sched_state(SchedState::Active, SchedEvent::HoldElapsed, true),
            SchedState::Waiting
        );
        assert_eq!(
            next_sched_state(SchedState::Active, SchedEvent::HoldElapsed, false),
            SchedState::Idle
        );
    }

    #[test]
    fn stale_timer_events_do_not_move_state() {
        assert_eq!(
            next_sched_state(SchedState::Idle, SchedEvent::StartElapsed, false),
            SchedState::Idle
        );
        assert_eq!(
            next_sched_state(SchedState::Waiting, SchedEvent::HoldElapsed, true),
            SchedState::Waiting
        );
    }

    #[test]
    fn reset_always_returns_to_idle() {
        for state in [SchedState::Idle, SchedState::Waiting, SchedState::Active] {
            assert_eq!(
                next_sched_state(state, SchedEvent::Reset, true),
                SchedState::Idle
            );
        }
    }
}
