pub mod audio_channel;
pub mod crossfade;
pub mod queue;
pub mod registry;
pub mod scheduler;
pub mod state_machine;
pub mod timers;
pub mod types;

pub use crossfade::AnimationCrossfadeController;
pub use registry::AnimationRegistry;
pub use scheduler::{spawn_scheduler, PlaybackScheduler, SchedulerHandle};
pub use types::{PlaybackClock, PlaybackOut, PlayerIn, SchedState};
