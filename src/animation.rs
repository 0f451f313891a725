//! Static animation table: frame ranges, rates and loop flags per actor.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Actor {
    Player,
    Bat,
    Wolf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Run,
    Idle,
    Jump,
    Died,
    BatFly,
    WolfRun,
    WolfIdle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub actor: Actor,
    /// Inclusive spritesheet frame range.
    pub start: u32,
    pub end: u32,
    pub frame_rate: u32,
    pub looping: bool,
}

impl AnimationSpec {
    pub fn frame_count(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Spritesheet frame shown `elapsed_ms` after the animation started.
    /// Non-looping animations hold their last frame.
    pub fn frame_at(&self, elapsed_ms: u64) -> u32 {
        let step = elapsed_ms * self.frame_rate as u64 / 1000;
        let count = self.frame_count() as u64;
        let offset = if self.looping {
            step % count
        } else {
            step.min(count - 1)
        };
        self.start + offset as u32
    }
}

impl AnimationKey {
    pub const ALL: [AnimationKey; 7] = [
        AnimationKey::Run,
        AnimationKey::Idle,
        AnimationKey::Jump,
        AnimationKey::Died,
        AnimationKey::BatFly,
        AnimationKey::WolfRun,
        AnimationKey::WolfIdle,
    ];

    pub fn spec(self) -> AnimationSpec {
        use Actor::*;
        let (actor, start, end, frame_rate, looping) = match self {
            AnimationKey::Run => (Player, 0, 5, 10, true),
            AnimationKey::Idle => (Player, 21, 22, 2, true),
            AnimationKey::Jump => (Player, 19, 20, 10, true),
            AnimationKey::Died => (Player, 23, 25, 10, false),
            AnimationKey::BatFly => (Bat, 0, 5, 10, true),
            AnimationKey::WolfRun => (Wolf, 7, 11, 10, true),
            AnimationKey::WolfIdle => (Wolf, 0, 5, 10, true),
        };
        AnimationSpec {
            actor,
            start,
            end,
            frame_rate,
            looping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_well_formed() {
        for key in AnimationKey::ALL {
            let spec = key.spec();
            assert!(spec.start <= spec.end, "{key:?}");
            assert!(spec.frame_rate > 0, "{key:?}");
        }
    }

    #[test]
    fn looping_animation_wraps() {
        let run = AnimationKey::Run.spec();
        assert_eq!(run.frame_at(0), 0);
        assert_eq!(run.frame_at(150), 1);
        assert_eq!(run.frame_at(600), 0); // 6 frames at 10 fps
    }

    #[test]
    fn one_shot_animation_holds_last_frame() {
        let died = AnimationKey::Died.spec();
        assert_eq!(died.frame_at(0), 23);
        assert_eq!(died.frame_at(5_000), 25);
    }

    #[test]
    fn idle_is_slow() {
        let idle = AnimationKey::Idle.spec();
        assert_eq!(idle.frame_at(400), 21);
        assert_eq!(idle.frame_at(500), 22);
        assert_eq!(idle.frame_at(1000), 21);
    }
}
