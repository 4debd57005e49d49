/// How a clip behaves once it reaches its last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Loops forever, never reports completion.
    Repeat,
    /// Plays once, clamps on the final pose and reports completion.
    Once,
}

/// Static description of one named animation. Built at startup, immutable after.
#[derive(Debug, Clone)]
pub struct AnimationDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    /// Opaque path/handle of the clip asset; resolved by the clip source.
    pub resource: &'static str,
    pub loop_mode: LoopMode,
    pub is_default: bool,
}

impl AnimationDescriptor {
    const fn repeat(name: &'static str, label: &'static str, resource: &'static str) -> Self {
        Self {
            name,
            label,
            resource,
            loop_mode: LoopMode::Repeat,
            is_default: false,
        }
    }

    const fn once(name: &'static str, label: &'static str, resource: &'static str) -> Self {
        Self {
            name,
            label,
            resource,
            loop_mode: LoopMode::Once,
            is_default: false,
        }
    }
}

pub const DEFAULT_ANIMATION: &str = "idle";

/// The avatar's stock animation set. Add new animations here only.
pub fn builtin_catalog() -> Vec<AnimationDescriptor> {
    vec![
        AnimationDescriptor {
            is_default: true,
            ..AnimationDescriptor::repeat("idle", "Idle", "/remy_animations/remy_idle.fbx")
        },
        AnimationDescriptor::once(
            "hipHop",
            "Hip Hop 💃",
            "/remy_animations/remy_hip_hop_dancing.fbx",
        ),
        AnimationDescriptor::once("cheer", "Cheer 🎉", "/remy_animations/remy_cheering.fbx"),
        AnimationDescriptor::once("sad", "Sad 😔", "/remy_animations/remy_sad.fbx"),
        AnimationDescriptor::once("happy", "Happy 🙂", "/remy_animations/remy_happy.fbx"),
        AnimationDescriptor::once("jump", "Jump 🦘", "/remy_animations/remy_jump.fbx"),
        AnimationDescriptor::once("talk", "Talk 🗣️", "/remy_animations/remy_talk.fbx"),
        AnimationDescriptor::once(
            "disappointed",
            "Disappointed 😞",
            "/remy_animations/remy_disappointed.fbx",
        ),
        AnimationDescriptor::once("wave", "Wave 👋", "/remy_animations/remy_wave.fbx"),
        AnimationDescriptor::repeat("think", "Think 🤔", "/remy_animations/remy_thinking.fbx"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_exactly_one_default() {
        let defaults: Vec<_> = builtin_catalog()
            .into_iter()
            .filter(|d| d.is_default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].name, DEFAULT_ANIMATION);
        assert_eq!(defaults[0].loop_mode, LoopMode::Repeat);
    }
}
