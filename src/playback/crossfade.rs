use std::collections::HashMap;
use std::time::Duration;

use log::{debug, warn};

use crate::playback::registry::AnimationRegistry;
use crate::shared::entities::LoopMode;
use crate::shared::ports::ClipSource;

/// Fixed blend window between the outgoing and incoming action.
pub const CROSSFADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActionState {
    Stopped,
    FadingIn { elapsed: Duration },
    Playing,
    FadingOut { elapsed: Duration },
}

#[derive(Debug)]
struct Action {
    loop_mode: LoopMode,
    clip_duration: Duration,
    state: ActionState,
    weight: f32,
    position: Duration,
    /// Set once a Once-clip reaches its end; cleared when the action restarts.
    finished: bool,
}

impl Action {
    fn is_stopped(&self) -> bool {
        self.state == ActionState::Stopped
    }

    fn restart_fading_in(&mut self) {
        self.position = Duration::ZERO;
        self.finished = false;
        self.weight = 0.0;
        self.state = ActionState::FadingIn {
            elapsed: Duration::ZERO,
        };
    }
}

/// Owns the currently active animation action and blends between named
/// animations over a fixed window. The sole autonomous transition it
/// performs is the return to the default pose when a one-shot clip that
/// is still active runs out.
pub struct AnimationCrossfadeController {
    registry: AnimationRegistry,
    actions: HashMap<String, Action>,
    active: Option<String>,
}

impl AnimationCrossfadeController {
    /// Builds actions for every registry entry whose clip loads. A failed
    /// load is logged and leaves that name unavailable; it never aborts.
    pub fn new(registry: AnimationRegistry, clips: &dyn ClipSource) -> Self {
        let mut actions = HashMap::new();
        for desc in registry.descriptors() {
            match clips.load(desc.resource) {
                Ok(clip) => {
                    actions.insert(
                        desc.name.to_string(),
                        Action {
                            loop_mode: desc.loop_mode,
                            clip_duration: clip.duration,
                            state: ActionState::Stopped,
                            weight: 0.0,
                            position: Duration::ZERO,
                            finished: false,
                        },
                    );
                }
                Err(e) => {
                    warn!("animation clip unavailable for {}: {e}", desc.name);
                }
            }
        }

        let default_name = registry.default_name().to_string();
        let mut controller = Self {
            registry,
            actions,
            active: None,
        };
        // The default pose starts at full weight, no fade.
        if let Some(action) = controller.actions.get_mut(&default_name) {
            action.state = ActionState::Playing;
            action.weight = 1.0;
            controller.active = Some(default_name);
        }
        controller
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn default_name(&self) -> &'static str {
        self.registry.default_name()
    }

    /// Weight of a named action, for presentation layers and tests.
    pub fn weight_of(&self, name: &str) -> f32 {
        self.actions.get(name).map(|a| a.weight).unwrap_or(0.0)
    }

    /// Crossfades to `name`. Unknown or unloadable names are logged and
    /// ignored; replaying the active action is a no-op. Returns whether
    /// the active action changed.
    pub fn play(&mut self, name: &str) -> bool {
        if !self.actions.contains_key(name) {
            warn!("unknown animation requested: {name}");
            return false;
        }
        if self.active.as_deref() == Some(name) {
            return false;
        }

        if let Some(prev) = self.active.take() {
            if let Some(action) = self.actions.get_mut(&prev) {
                if !action.is_stopped() {
                    action.state = ActionState::FadingOut {
                        elapsed: Duration::ZERO,
                    };
                }
            }
        }

        if let Some(action) = self.actions.get_mut(name) {
            action.restart_fading_in();
        }
        self.active = Some(name.to_string());
        true
    }

    /// Crossfades back to the default pose.
    pub fn play_default(&mut self) -> bool {
        let name = self.registry.default_name();
        self.play(name)
    }

    /// Advances fades and playback positions by one mixer tick. Returns
    /// whether the active action changed (a finished one-shot clip that
    /// was still active triggers the return to the default pose).
    pub fn update(&mut self, dt: Duration) -> bool {
        let mut finished_active = false;

        for (name, action) in self.actions.iter_mut() {
            match action.state {
                ActionState::Stopped => continue,
                ActionState::FadingIn { elapsed } => {
                    let elapsed = elapsed + dt;
                    if elapsed >= CROSSFADE {
                        action.state = ActionState::Playing;
                        action.weight = 1.0;
                    } else {
                        action.state = ActionState::FadingIn { elapsed };
                        action.weight = elapsed.as_secs_f32() / CROSSFADE.as_secs_f32();
                    }
                }
                ActionState::Playing => {}
                ActionState::FadingOut { elapsed } => {
                    let elapsed = elapsed + dt;
                    if elapsed >= CROSSFADE {
                        action.state = ActionState::Stopped;
                        action.weight = 0.0;
                        continue;
                    }
                    action.state = ActionState::FadingOut { elapsed };
                    action.weight = 1.0 - elapsed.as_secs_f32() / CROSSFADE.as_secs_f32();
                }
            }

            action.position += dt;
            match action.loop_mode {
                LoopMode::Repeat => {
                    if !action.clip_duration.is_zero() {
                        while action.position >= action.clip_duration {
                            action.position -= action.clip_duration;
                        }
                    }
                }
                LoopMode::Once => {
                    if !action.finished && action.position >= action.clip_duration {
                        // Clamp on the final pose and report completion once.
                        action.position = action.clip_duration;
                        action.finished = true;
                        debug!("one-shot animation finished: {name}");
                        if self.active.as_deref() == Some(name.as_str()) {
                            finished_active = true;
                        }
                    }
                }
            }
        }

        if finished_active {
            return self.play_default();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entities::builtin_catalog;
    use crate::shared::error::AnimationError;
    use crate::shared::ports::Clip;

    struct FixedClips(Duration);

    impl ClipSource for FixedClips {
        fn load(&self, _resource: &str) -> Result<Clip, AnimationError> {
            Ok(Clip { duration: self.0 })
        }
    }

    struct FailingClips;

    impl ClipSource for FailingClips {
        fn load(&self, resource: &str) -> Result<Clip, AnimationError> {
            if resource.contains("wave") {
                return Err(AnimationError::LoadFailed {
                    name: resource.to_string(),
                    reason: "corrupt".to_string(),
                });
            }
            Ok(Clip {
                duration: Duration::from_secs(2),
            })
        }
    }

    fn controller(clip_len: Duration) -> AnimationCrossfadeController {
        let registry = AnimationRegistry::new(builtin_catalog()).unwrap();
        AnimationCrossfadeController::new(registry, &FixedClips(clip_len))
    }

    #[test]
    fn starts_on_default_at_full_weight() {
        let c = controller(Duration::from_secs(2));
        assert_eq!(c.active_name(), Some("idle"));
        assert_eq!(c.weight_of("idle"), 1.0);
    }

    #[test]
    fn play_is_idempotent_for_active_action() {
        let mut c = controller(Duration::from_secs(2));
        assert!(c.play("wave"));
        assert!(!c.play("wave"));
        assert_eq!(c.active_name(), Some("wave"));
    }

    #[test]
    fn unknown_animation_is_a_logged_no_op() {
        let mut c = controller(Duration::from_secs(2));
        assert!(!c.play("moonwalk"));
        assert_eq!(c.active_name(), Some("idle"));
        assert_eq!(c.weight_of("idle"), 1.0);
    }

    #[test]
    fn unloadable_clip_behaves_like_unknown() {
        let registry = AnimationRegistry::new(builtin_catalog()).unwrap();
        let mut c = AnimationCrossfadeController::new(registry, &FailingClips);
        assert!(!c.play("wave"));
        assert_eq!(c.active_name(), Some("idle"));
        assert!(c.play("cheer"));
    }

    #[test]
    fn crossfade_ramps_weights_over_the_window() {
        let mut c = controller(Duration::from_secs(10));
        c.play("wave");
        assert_eq!(c.weight_of("wave"), 0.0);

        c.update(Duration::from_millis(150));
        assert!((c.weight_of("wave") - 0.5).abs() < 0.01);
        assert!((c.weight_of("idle") - 0.5).abs() < 0.01);

        c.update(Duration::from_millis(200));
        assert_eq!(c.weight_of("wave"), 1.0);
        assert_eq!(c.weight_of("idle"), 0.0);
    }

    #[test]
    fn finished_one_shot_returns_to_default() {
        let mut c = controller(Duration::from_millis(500));
        c.play("wave");
        // Run the clip out; the controller must come back to idle on its own.
        let mut changed = false;
        for _ in 0..40 {
            changed |= c.update(Duration::from_millis(20));
        }
        assert!(changed);
        assert_eq!(c.active_name(), Some("idle"));
    }

    #[test]
    fn repeat_clips_never_finish() {
        let mut c = controller(Duration::from_millis(100));
        c.play("think");
        for _ in 0..100 {
            c.update(Duration::from_millis(20));
        }
        assert_eq!(c.active_name(), Some("think"));
    }

    #[test]
    fn finished_non_active_action_stays_quiet() {
        let mut c = controller(Duration::from_millis(200));
        c.play("wave");
        c.update(Duration::from_millis(100));
        // Switch away before the wave clip runs out.
        c.play("cheer");
        let changed = c.update(Duration::from_millis(150));
        // wave finished while fading out; no autonomous transition.
        assert!(!changed);
        assert_eq!(c.active_name(), Some("cheer"));
    }
}
