use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::playback::audio_channel::AudioChannel;
use crate::playback::crossfade::AnimationCrossfadeController;
use crate::playback::queue::SegmentQueue;
use crate::playback::registry::AnimationRegistry;
use crate::playback::state_machine::SchedulerStateMachine;
use crate::playback::timers::PlaybackTimers;
use crate::playback::types::{PlaybackClock, PlaybackOut, PlayerIn, SchedEvent, SchedState};
use crate::shared::entities::Segment;
use crate::shared::ports::{AudioSink, ClipSource};

/// Render-loop cadence for mixer updates (crossfades, finished clips).
const MIXER_TICK: Duration = Duration::from_millis(16);

/// Millisecond spans from server segments are untrusted input; NaN or
/// values beyond what `Duration` can hold clamp to zero instead of
/// tearing down the actor.
fn duration_from_ms(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::ZERO)
}

/// Cloneable front of the scheduler actor.
#[derive(Clone)]
pub struct SchedulerHandle {
    tx_in: UnboundedSender<PlayerIn>,
    clock: PlaybackClock,
}

impl SchedulerHandle {
    /// Appends segments to the playback queue; starts playback if idle.
    pub fn enqueue(&self, segments: Vec<Segment>) {
        let _ = self.tx_in.send(PlayerIn::Enqueue(segments));
    }

    /// Manual gesture path (UI buttons, think/idle around a chat call).
    pub fn play_gesture(&self, name: impl Into<String>) {
        let _ = self.tx_in.send(PlayerIn::PlayGesture(name.into()));
    }

    /// Cancels pending timers, clears the queue and returns to idle.
    pub fn reset(&self) {
        let _ = self.tx_in.send(PlayerIn::Reset);
    }

    /// The clock domain segment timestamps are interpreted against.
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }
}

/// Drains the segment queue one segment at a time: waits out the start
/// delay, plays animation and audio for the hold window, then returns the
/// avatar to idle and re-arms for the next segment.
///
/// Idle -> Waiting (segment popped, start timer armed)
///      -> Active  (animation + audio running, hold timer armed)
///      -> Waiting | Idle
pub struct PlaybackScheduler {
    state_machine: SchedulerStateMachine,
    queue: SegmentQueue,
    crossfade: AnimationCrossfadeController,
    audio: AudioChannel,
    timers: PlaybackTimers,
    timer_generation: u64,
    clock: PlaybackClock,
    current: Option<Segment>,
    tx_in: UnboundedSender<PlayerIn>,
    out_tx: UnboundedSender<PlaybackOut>,
}

/// Spawns the scheduler actor and returns its handle.
pub fn spawn_scheduler(
    registry: AnimationRegistry,
    clips: &dyn ClipSource,
    audio_sink: Arc<dyn AudioSink>,
    audio_base_url: impl Into<String>,
    out_tx: UnboundedSender<PlaybackOut>,
) -> SchedulerHandle {
    let (scheduler, rx_in) = PlaybackScheduler::new(registry, clips, audio_sink, audio_base_url, out_tx);
    let handle = scheduler.handle();
    tokio::spawn(async move {
        scheduler.run(rx_in).await;
    });
    handle
}

impl PlaybackScheduler {
    pub fn new(
        registry: AnimationRegistry,
        clips: &dyn ClipSource,
        audio_sink: Arc<dyn AudioSink>,
        audio_base_url: impl Into<String>,
        out_tx: UnboundedSender<PlaybackOut>,
    ) -> (Self, UnboundedReceiver<PlayerIn>) {
        let (tx_in, rx_in) = mpsc::unbounded_channel();
        let scheduler = Self {
            state_machine: SchedulerStateMachine::new(),
            queue: SegmentQueue::new(),
            crossfade: AnimationCrossfadeController::new(registry, clips),
            audio: AudioChannel::new(audio_sink, audio_base_url),
            timers: PlaybackTimers::new(),
            timer_generation: 0,
            clock: PlaybackClock::start(),
            current: None,
            tx_in,
            out_tx,
        };
        (scheduler, rx_in)
    }

    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            tx_in: self.tx_in.clone(),
            clock: self.clock.clone(),
        }
    }

    pub fn state(&self) -> SchedState {
        self.state_machine.state()
    }

    pub fn active_animation(&self) -> Option<&str> {
        self.crossfade.active_name()
    }

    async fn run(mut self, mut rx_in: UnboundedReceiver<PlayerIn>) {
        let mut mixer_tick = interval(MIXER_TICK);
        mixer_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();
        loop {
            tokio::select! {
                biased;
                maybe_ev = rx_in.recv() => {
                    let Some(ev) = maybe_ev else { break; };
                    self.handle_event(ev);
                }
                _ = mixer_tick.tick() => {
                    // Runs independently of the segment timers; the only
                    // coupling is the finished notification of one-shot clips.
                    // Skipped ticks still advance by the measured elapsed
                    // time, so clip positions track the clock under load.
                    let now = Instant::now();
                    let dt = now - last_tick;
                    last_tick = now;
                    if self.crossfade.update(dt) {
                        self.notify_animation();
                    }
                }
            }
        }
        self.timers.cancel_all();
        self.audio.stop();
    }

    pub fn handle_event(&mut self, ev: PlayerIn) {
        let state = self.state_machine.state();
        match ev {
            PlayerIn::Enqueue(segments) => {
                if segments.is_empty() {
                    return;
                }
                debug!("enqueue {} segment(s) in {state:?}", segments.len());
                self.queue.push_batch(segments);
                let next = self
                    .state_machine
                    .advance(SchedEvent::SegmentsQueued, !self.queue.is_empty());
                if state == SchedState::Idle && next == SchedState::Waiting {
                    self.arm_next_segment();
                }
            }
            PlayerIn::PlayGesture(name) => {
                if self.crossfade.play(&name) {
                    self.notify_animation();
                }
            }
            PlayerIn::StartElapsed(generation) => {
                if state != SchedState::Waiting || generation != self.timer_generation {
                    debug!("stale start timer (gen {generation}) fired in {state:?}, ignoring");
                    return;
                }
                self.begin_segment();
                self.state_machine.advance(SchedEvent::StartElapsed, false);
            }
            PlayerIn::HoldElapsed(generation) => {
                if state != SchedState::Active || generation != self.timer_generation {
                    debug!("stale hold timer (gen {generation}) fired in {state:?}, ignoring");
                    return;
                }
                self.finish_segment();
                let next = self
                    .state_machine
                    .advance(SchedEvent::HoldElapsed, !self.queue.is_empty());
                if next == SchedState::Waiting {
                    self.arm_next_segment();
                } else {
                    let _ = self.out_tx.send(PlaybackOut::QueueDrained);
                }
            }
            PlayerIn::Reset => {
                info!("playback reset in {state:?}, dropping {} queued segment(s)", self.queue.len());
                self.timers.cancel_all();
                // Close the race with an already-elapsed timer.
                self.timer_generation = self.timer_generation.wrapping_add(1);
                self.queue.clear();
                self.current = None;
                self.audio.stop();
                if self.crossfade.play_default() {
                    self.notify_animation();
                }
                self.state_machine.advance(SchedEvent::Reset, false);
            }
        }
    }

    /// Pops the queue head and arms its start-delay timer. The delay is
    /// recomputed against the current clock rather than taken from a
    /// precomputed schedule, so jitter between segments self-corrects by
    /// clamping to zero instead of producing negative waits.
    fn arm_next_segment(&mut self) {
        let Some(segment) = self.queue.pop() else {
            self.state_machine.advance(SchedEvent::Reset, false);
            return;
        };
        let delay_ms = (segment.start_timestamp - self.clock.now_ms()).max(0.0);
        debug!(
            "segment \"{}\" waiting {delay_ms:.0}ms",
            segment.sentence
        );
        self.current = Some(segment);
        self.timer_generation = self.timer_generation.wrapping_add(1);
        self.timers.arm_start(
            self.tx_in.clone(),
            duration_from_ms(delay_ms),
            self.timer_generation,
        );
    }

    fn begin_segment(&mut self) {
        let Some(segment) = self.current.as_ref() else {
            return;
        };
        let animation = segment
            .animation
            .clone()
            .unwrap_or_else(|| self.crossfade.default_name().to_string());
        let audio_file = segment.audio_file.clone();
        let sentence = segment.sentence.clone();
        let hold_ms = segment.hold_ms();

        if self.crossfade.play(&animation) {
            self.notify_animation();
        }
        if let Some(file) = audio_file {
            self.audio.start(&file);
        }
        let _ = self.out_tx.send(PlaybackOut::SegmentStarted { sentence });
        self.timer_generation = self.timer_generation.wrapping_add(1);
        self.timers.arm_hold(
            self.tx_in.clone(),
            duration_from_ms(hold_ms),
            self.timer_generation,
        );
    }

    fn finish_segment(&mut self) {
        self.audio.stop();
        self.current = None;
        if self.crossfade.play_default() {
            self.notify_animation();
        }
    }

    fn notify_animation(&self) {
        if let Some(name) = self.crossfade.active_name() {
            let _ = self.out_tx.send(PlaybackOut::AnimationChanged {
                name: name.to_string(),
            });
        }
    }
}
