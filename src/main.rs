use std::sync::Arc;

use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use virtual_avatar_runtime::playback::{spawn_scheduler, AnimationRegistry, PlaybackOut};
use virtual_avatar_runtime::service::{HttpAudioPlayer, HttpChatClient, ManifestClipSource};
use virtual_avatar_runtime::session::ChatSession;
use virtual_avatar_runtime::shared::entities::builtin_catalog;
use virtual_avatar_runtime::shared::{config, logging};

/// Console host: reads user turns from stdin, sends them to the chat
/// server and lets the scheduler drive animation/audio playback. The
/// renderer boundary is the printed playback events.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cfg = config::Config::from_env()?;
    info!("avatar console connecting to {}", cfg.server_base_url);

    let registry = AnimationRegistry::new(builtin_catalog())?;
    let clips = ManifestClipSource::load_default();
    let audio = Arc::new(HttpAudioPlayer::new()?);
    let chat = Arc::new(HttpChatClient::new(&cfg.server_base_url)?);

    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let scheduler = spawn_scheduler(registry, &clips, audio, cfg.server_base_url.clone(), out_tx);
    let mut session = ChatSession::new(cfg.personality.clone(), chat, scheduler);

    tokio::spawn(async move {
        while let Some(ev) = out_rx.recv().await {
            match ev {
                PlaybackOut::AnimationChanged { name } => info!("[avatar] animation -> {name}"),
                PlaybackOut::SegmentStarted { sentence } => info!("[avatar] says: {sentence}"),
                PlaybackOut::QueueDrained => info!("[avatar] back to idle"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type a message (Ctrl-D to quit):");
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match session.send(text).await {
            Ok(answer) => println!("assistant: {answer}"),
            Err(e) => eprintln!("chat failed: {e}"),
        }
    }

    session.reset();
    Ok(())
}
