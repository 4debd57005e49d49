pub mod playback;
pub mod service;
pub mod session;
pub mod shared;

// Convenience re-exports for hosts.
pub use playback::scheduler::{spawn_scheduler, SchedulerHandle};
pub use session::ChatSession;
pub use shared::{config, entities, error, logging, ports};
