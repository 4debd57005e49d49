pub mod animation;
pub mod message;
pub mod segment;

pub use animation::{builtin_catalog, AnimationDescriptor, LoopMode};
pub use message::{ChatMessage, Role};
pub use segment::Segment;
