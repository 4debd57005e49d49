//! Outbound adapters for the chat server, audio playback and clip
//! metadata. External I/O is confined here; the playback core only sees
//! the port traits.

pub mod audio;
pub mod chat;
pub mod clips;

pub use audio::HttpAudioPlayer;
pub use chat::HttpChatClient;
pub use clips::ManifestClipSource;
