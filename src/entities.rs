//! Level entities and the state of one level attempt. Plain data; the rules live in `compute`.

use slotmap::{new_key_type, SlotMap};

use crate::animation::AnimationKey;
use crate::levels::LevelDefinition;
use crate::physics::{Aabb, Body};
use crate::pool::ProjectilePool;
use crate::schedule::Scheduler;

new_key_type! {
    /// Stable handle for an enemy; stays invalid once the enemy is destroyed.
    pub struct EnemyId;
    pub struct CollectibleId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn from_velocity(vx: f32, current: Facing) -> Facing {
        if vx < 0.0 {
            Facing::Left
        } else if vx > 0.0 {
            Facing::Right
        } else {
            current
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Bat,
    Wolf,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Patrol {
    /// Bats turn around at the edges of the platform they spawned on.
    Platform {
        platform: usize,
        origin_x: f32,
        width: f32,
    },
    /// Wolves roam the whole level.
    Level,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Patrolling,
    /// Shot: no collisions, ejected downward until removed.
    Falling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyAgent {
    pub kind: EnemyKind,
    pub body: Body,
    pub patrol: Patrol,
    pub state: EnemyState,
    pub facing: Facing,
}

impl EnemyAgent {
    pub fn is_patrolling(&self) -> bool {
        self.state == EnemyState::Patrolling
    }
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Dropped by bats.
    Wing,
    /// Dropped by wolves.
    Skull,
}

impl CollectibleKind {
    pub fn dropped_by(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Bat => CollectibleKind::Wing,
            EnemyKind::Wolf => CollectibleKind::Skull,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub body: Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalState {
    Hidden,
    Revealed,
    Collected,
}

/// The level's egg.
#[derive(Clone, Debug, PartialEq)]
pub struct Goal {
    pub body: Body,
    pub state: GoalState,
}

// ── Player & session ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    /// Standing on a platform after the last physics step.
    pub grounded: bool,
    pub damage_cooldown: bool,
    /// Red damage tint.
    pub tinted: bool,
    /// False between a fatal hit and the level reset.
    pub active: bool,
    pub animation: AnimationKey,
    pub animation_started_ms: u64,
}

/// Per-game context carried from level to level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Signed and never clamped.
    pub score: i64,
    pub hits: u32,
}

// ── Frame I/O ─────────────────────────────────────────────────────────────────

/// Keys held during one frame. Rising edges are derived by the level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
}

/// One-frame presentation events: sounds and screen effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Shoot,
    Jump,
    Hit,
    Collect,
    /// Camera shake before a fall restart.
    Shake,
    /// Fade-out after the egg is collected.
    Fade,
    LevelRestarted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelStatus {
    Playing,
    /// The fade after the egg finished; the scene flow moves on.
    Complete,
}

// ── Master level state ────────────────────────────────────────────────────────

/// Everything about one level attempt. Cloneable so the update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct LevelState {
    pub definition: LevelDefinition,
    pub session: Session,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, EnemyAgent>,
    pub projectiles: ProjectilePool,
    pub collectibles: SlotMap<CollectibleId, Collectible>,
    pub goal: Goal,
    /// One-way platforms, the ground slab last.
    pub platforms: Vec<Aabb>,
    /// Weather tint applied to both background layers.
    pub backdrop_tint: u32,
    pub scheduler: Scheduler,
    /// Monotonic level clock.
    pub clock_ms: u64,
    /// Firing is refused until the clock passes this value.
    pub next_fire_at_ms: u64,
    pub prev_input: FrameInput,
    /// A fall restart is already scheduled.
    pub falling_out: bool,
    pub status: LevelStatus,
    pub cues: Vec<Cue>,
    pub frame: u64,
}

impl LevelState {
    /// Enemies still patrolling; shot enemies are no longer part of it.
    pub fn active_roster(&self) -> impl Iterator<Item = (EnemyId, &EnemyAgent)> {
        self.enemies.iter().filter(|(_, e)| e.is_patrolling())
    }

    pub fn count_patrolling(&self, kind: EnemyKind) -> usize {
        self.active_roster().filter(|(_, e)| e.kind == kind).count()
    }
}
