//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `LevelState` (plus the config and, where needed, an RNG handle) and
//! returns a brand-new `LevelState`.  Side effects are limited to the
//! injected RNG.
//!
//! Within one `tick` the order is fixed: clock, input, enemy patrol, physics
//! integration, overlaps, fall-out check, due timed events.

use glam::Vec2;
use log::{debug, info, warn};
use rand::Rng;
use slotmap::SlotMap;

use crate::animation::AnimationKey;
use crate::config::GameConfig;
use crate::entities::{
    Collectible, CollectibleId, CollectibleKind, Cue, EnemyAgent, EnemyId, EnemyKind,
    EnemyState, Facing, FrameInput, Goal, GoalState, LevelState, LevelStatus, Patrol, Player,
    Session,
};
use crate::levels::{LevelDefinition, LevelError};
use crate::physics::{self, Aabb, Body};
use crate::pool::{ProjectileId, ProjectilePool};
use crate::schedule::{Scheduler, TimedEvent};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh attempt at `def`, carrying `session` over.
///
/// Bats go on distinct random platforms, wolves at random x on the ground,
/// and the egg starts hidden near the far edge.
pub fn setup_level(
    def: &LevelDefinition,
    session: Session,
    cfg: &GameConfig,
    rng: &mut impl Rng,
) -> Result<LevelState, LevelError> {
    def.validate()?;

    let mut platforms: Vec<Aabb> = def
        .platforms
        .iter()
        .map(|&(x, y)| platform_rect(x, y, cfg))
        .collect();

    let mut enemies = SlotMap::with_key();
    let mut taken: Vec<usize> = Vec::with_capacity(def.bat_count);
    for _ in 0..def.bat_count {
        let mut pick = rng.gen_range(0..platforms.len());
        while taken.contains(&pick) {
            pick = rng.gen_range(0..platforms.len());
        }
        taken.push(pick);
        enemies.insert(spawn_bat(pick, &platforms[pick], cfg, rng));
    }
    for _ in 0..def.wolf_count {
        enemies.insert(spawn_wolf(cfg, rng));
    }

    platforms.push(Aabb {
        min: Vec2::new(0.0, cfg.ground_top()),
        max: Vec2::new(cfg.world.width, cfg.world.canvas_height),
    });

    let goal = Goal {
        body: Body::new(
            Vec2::new(
                cfg.world.width - cfg.scoring.goal_edge_offset,
                cfg.scoring.goal_drop_height,
            ),
            Vec2::from(cfg.scoring.goal_size),
        )
        .with_gravity(),
        state: GoalState::Hidden,
    };

    info!(
        "level {} ({}): {} platforms, {} bats, {} wolves, score {}",
        def.id.number(),
        def.weather.label(),
        def.platforms.len(),
        def.bat_count,
        def.wolf_count,
        session.score
    );

    Ok(LevelState {
        definition: def.clone(),
        session,
        player: new_player(cfg),
        enemies,
        projectiles: ProjectilePool::new(
            cfg.projectile.pool_size,
            Vec2::from(cfg.projectile.size),
        ),
        collectibles: SlotMap::with_key(),
        goal,
        platforms,
        backdrop_tint: def.weather.tint(),
        scheduler: Scheduler::new(),
        clock_ms: 0,
        next_fire_at_ms: 0,
        prev_input: FrameInput::default(),
        falling_out: false,
        status: LevelStatus::Playing,
        cues: Vec::new(),
        frame: 0,
    })
}

pub fn new_player(cfg: &GameConfig) -> Player {
    Player {
        body: Body::new(Vec2::from(cfg.player.spawn), cfg.player_size()).with_gravity(),
        facing: Facing::Right,
        grounded: false,
        damage_cooldown: false,
        tinted: false,
        active: true,
        animation: AnimationKey::Idle,
        animation_started_ms: 0,
    }
}

/// Platform anchors are the left edge and vertical centre.
pub fn platform_rect(x: f32, y: f32, cfg: &GameConfig) -> Aabb {
    let half_h = cfg.world.platform_height / 2.0;
    Aabb {
        min: Vec2::new(x, y - half_h),
        max: Vec2::new(x + cfg.world.platform_width, y + half_h),
    }
}

fn spawn_bat(platform: usize, rect: &Aabb, cfg: &GameConfig, rng: &mut impl Rng) -> EnemyAgent {
    let centre = Vec2::new(
        rect.min.x + rect.width() / 2.0,
        (rect.min.y + rect.max.y) / 2.0 - cfg.enemies.bat_hover,
    );
    let speed = random_speed(cfg.enemies.bat_speed, rng);
    EnemyAgent {
        kind: EnemyKind::Bat,
        body: Body::new(centre, Vec2::from(cfg.enemies.bat_size))
            .with_velocity(Vec2::new(-speed, 0.0)),
        patrol: Patrol::Platform {
            platform,
            origin_x: rect.min.x,
            width: rect.width(),
        },
        state: EnemyState::Patrolling,
        facing: Facing::Left,
    }
}

fn spawn_wolf(cfg: &GameConfig, rng: &mut impl Rng) -> EnemyAgent {
    let size = Vec2::from(cfg.enemies.wolf_size);
    let x = rng.gen_range(cfg.enemies.wolf_spawn_min..=cfg.world.width - cfg.enemies.wolf_spawn_edge);
    let speed = random_speed(cfg.enemies.wolf_speed, rng);
    EnemyAgent {
        kind: EnemyKind::Wolf,
        body: Body::new(Vec2::new(x, cfg.ground_top() - size.y / 2.0), size)
            .with_velocity(Vec2::new(-speed, 0.0)),
        patrol: Patrol::Level,
        state: EnemyState::Patrolling,
        facing: Facing::Left,
    }
}

fn random_speed((lo, hi): (f32, f32), rng: &mut impl Rng) -> f32 {
    rng.gen_range(lo..=hi)
}

// ── Enemy patrol ─────────────────────────────────────────────────────────────

/// New horizontal velocity for an enemy that is past its patrol bound,
/// `None` while it is inside.  Bats turn strictly beyond their platform
/// edge ± buffer; wolves turn at or beyond the level edge ± buffer.
pub fn patrol_turn(enemy: &EnemyAgent, cfg: &GameConfig, rng: &mut impl Rng) -> Option<f32> {
    let x = enemy.body.pos.x;
    match enemy.patrol {
        Patrol::Platform { origin_x, width, .. } => {
            let buffer = cfg.enemies.bat_buffer;
            if x < origin_x + buffer {
                Some(random_speed(cfg.enemies.bat_speed, rng))
            } else if x > origin_x + width - buffer {
                Some(-random_speed(cfg.enemies.bat_speed, rng))
            } else {
                None
            }
        }
        Patrol::Level => {
            let margin = cfg.enemies.wolf_margin + cfg.enemies.wolf_buffer;
            if x >= cfg.world.width - margin {
                Some(-random_speed(cfg.enemies.wolf_speed, rng))
            } else if x <= margin {
                Some(random_speed(cfg.enemies.wolf_speed, rng))
            } else {
                None
            }
        }
    }
}

fn patrol(s: &mut LevelState, cfg: &GameConfig, rng: &mut impl Rng) {
    for enemy in s.enemies.values_mut().filter(|e| e.is_patrolling()) {
        if let Some(vx) = patrol_turn(enemy, cfg, rng) {
            enemy.body.vel.x = vx;
        }
        enemy.facing = Facing::from_velocity(enemy.body.vel.x, enemy.facing);
    }
}

// ── Player actions ───────────────────────────────────────────────────────────

fn apply_input(s: &mut LevelState, input: &FrameInput, cfg: &GameConfig) {
    let player = &mut s.player;
    if input.right {
        player.facing = Facing::Right;
        player.body.vel.x = cfg.player.speed;
    } else if input.left {
        player.facing = Facing::Left;
        player.body.vel.x = -cfg.player.speed;
    } else {
        player.body.vel.x = 0.0;
    }

    if input.jump && !s.prev_input.jump && player.grounded {
        player.body.vel.y = -cfg.player.jump_velocity;
        player.grounded = false;
        s.cues.push(Cue::Jump);
    }

    if input.fire && !s.prev_input.fire && s.clock_ms > s.next_fire_at_ms {
        fire_projectile(s, cfg);
        s.next_fire_at_ms = s.clock_ms + cfg.projectile.refractory_ms;
    }
}

fn fire_projectile(s: &mut LevelState, cfg: &GameConfig) {
    let origin = s.player.body.pos + Vec2::new(0.0, cfg.projectile.muzzle_offset);
    let vel = Vec2::new(s.player.facing.sign() * cfg.projectile.speed, 0.0);
    match s.projectiles.spawn(origin, vel) {
        Some(id) => {
            s.scheduler.schedule(
                s.clock_ms + cfg.projectile.lifespan_ms,
                TimedEvent::ExpireProjectile(id),
            );
            s.cues.push(Cue::Shoot);
            debug!("shot {:?} fired at {:?}", id, origin);
        }
        None => warn!("projectile pool exhausted; shot dropped"),
    }
}

fn take_damage(s: &mut LevelState, cfg: &GameConfig) {
    if s.player.damage_cooldown || !s.player.active {
        return;
    }
    s.session.hits += 1;
    s.player.tinted = true;
    s.player.damage_cooldown = true;
    s.cues.push(Cue::Hit);
    s.scheduler.schedule(
        s.clock_ms + cfg.player.damage_cooldown_ms,
        TimedEvent::DamageCooldownEnd,
    );
    debug!("player hit {}/{}", s.session.hits, cfg.player.max_hits);

    if s.session.hits >= cfg.player.max_hits {
        s.player.active = false;
        s.session.score -= cfg.player.death_penalty;
        s.scheduler
            .schedule(s.clock_ms + cfg.player.death_reset_ms, TimedEvent::DeathReset);
        info!("player died; score now {}", s.session.score);
    }
}

/// Register contact with an enemy.  Ignored during the damage cooldown.
pub fn player_take_damage(state: &LevelState, cfg: &GameConfig) -> LevelState {
    let mut next = state.clone();
    take_damage(&mut next, cfg);
    next
}

fn hit_enemy(s: &mut LevelState, projectile: ProjectileId, enemy: EnemyId, cfg: &GameConfig) {
    let Some(agent) = s.enemies.get_mut(enemy) else {
        return;
    };
    if !agent.is_patrolling() {
        return;
    }
    s.projectiles.release(projectile);

    agent.state = EnemyState::Falling;
    agent.body.vel.y = cfg.enemies.fall_velocity;
    let drop_at = agent.body.pos;
    let kind = agent.kind;

    s.collectibles.insert(Collectible {
        kind: CollectibleKind::dropped_by(kind),
        body: Body::new(drop_at, Vec2::from(cfg.scoring.collectible_size)).with_gravity(),
    });
    s.scheduler.schedule(
        s.clock_ms + cfg.enemies.removal_delay_ms,
        TimedEvent::RemoveEnemy(enemy),
    );
    if s.goal.state == GoalState::Hidden {
        s.goal.state = GoalState::Revealed;
        info!("egg revealed");
    }
    debug!("{:?} {:?} shot at {:?}", kind, enemy, drop_at);
}

/// Resolve a projectile striking an enemy: the enemy starts falling, drops
/// its trophy and reveals the egg.  Stale handles change nothing.
pub fn projectile_hit_enemy(
    state: &LevelState,
    projectile: ProjectileId,
    enemy: EnemyId,
    cfg: &GameConfig,
) -> LevelState {
    let mut next = state.clone();
    hit_enemy(&mut next, projectile, enemy, cfg);
    next
}

fn collect(s: &mut LevelState, id: CollectibleId, cfg: &GameConfig) {
    if let Some(item) = s.collectibles.remove(id) {
        s.session.score += match item.kind {
            CollectibleKind::Wing => cfg.scoring.wing,
            CollectibleKind::Skull => cfg.scoring.skull,
        };
        s.cues.push(Cue::Collect);
        debug!("collected {:?}; score {}", item.kind, s.session.score);
    }
}

pub fn collect_item(state: &LevelState, id: CollectibleId, cfg: &GameConfig) -> LevelState {
    let mut next = state.clone();
    collect(&mut next, id, cfg);
    next
}

fn touch_goal(s: &mut LevelState, cfg: &GameConfig) {
    if s.goal.state != GoalState::Revealed {
        return;
    }
    s.goal.state = GoalState::Collected;
    s.session.score += cfg.scoring.goal;
    s.cues.push(Cue::Fade);
    s.scheduler.schedule(
        s.clock_ms + cfg.effects.goal_fade_ms,
        TimedEvent::LevelComplete,
    );
    info!("egg collected; score {}", s.session.score);
}

/// Collect the egg if it has been revealed.  Counts once per level.
pub fn reach_goal(state: &LevelState, cfg: &GameConfig) -> LevelState {
    let mut next = state.clone();
    touch_goal(&mut next, cfg);
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the level by one fixed step.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &LevelState,
    input: &FrameInput,
    cfg: &GameConfig,
    rng: &mut impl Rng,
) -> LevelState {
    let mut next = state.clone();
    step(&mut next, input, cfg, rng);
    next
}

fn step(s: &mut LevelState, input: &FrameInput, cfg: &GameConfig, rng: &mut impl Rng) {
    if s.status == LevelStatus::Complete {
        return;
    }
    let frame_ms = cfg.frame_ms();
    s.frame += 1;
    s.clock_ms += frame_ms;
    s.cues.clear();

    if s.player.active {
        apply_input(s, input, cfg);
        patrol(s, cfg, rng);
    }
    s.prev_input = *input;

    integrate(s, cfg, frame_ms as f32 / 1000.0);
    resolve_overlaps(s, cfg);
    check_fall_out(s, cfg);
    run_due_events(s, cfg, rng);
    update_player_animation(s);
}

fn integrate(s: &mut LevelState, cfg: &GameConfig, dt: f32) {
    let gravity = cfg.world.gravity;
    let width = cfg.world.width;

    let prev_bottom = s.player.body.bottom();
    s.player.body.integrate(gravity, dt);
    s.player.grounded =
        physics::land_on_platforms(&mut s.player.body, prev_bottom, &s.platforms, 0.0);
    physics::clamp_x(&mut s.player.body, width);
    let floor = cfg.world.height + s.player.body.size.y;
    physics::clamp_y(&mut s.player.body, floor);

    for enemy in s.enemies.values_mut() {
        enemy.body.integrate(gravity, dt);
        if enemy.is_patrolling() {
            physics::clamp_x(&mut enemy.body, width);
        }
    }

    for projectile in s.projectiles.iter_active_mut() {
        projectile.body.integrate(gravity, dt);
    }
    let escaped: Vec<ProjectileId> = s
        .projectiles
        .iter_active()
        .filter(|(_, p)| p.body.pos.x < 0.0 || p.body.pos.x > width)
        .map(|(id, _)| id)
        .collect();
    for id in escaped {
        s.projectiles.release(id);
    }

    let bounce = cfg.scoring.collectible_bounce;
    for item in s.collectibles.values_mut() {
        let prev = item.body.bottom();
        item.body.integrate(gravity, dt);
        physics::land_on_platforms(&mut item.body, prev, &s.platforms, bounce);
    }

    if s.goal.state != GoalState::Collected {
        let prev = s.goal.body.bottom();
        s.goal.body.integrate(gravity, dt);
        physics::land_on_platforms(&mut s.goal.body, prev, &s.platforms, 0.0);
    }
}

fn resolve_overlaps(s: &mut LevelState, cfg: &GameConfig) {
    let mut hits: Vec<(ProjectileId, EnemyId)> = Vec::new();
    for (pid, projectile) in s.projectiles.iter_active() {
        let target = s
            .active_roster()
            .find(|(eid, e)| {
                !hits.iter().any(|(_, taken)| taken == eid) && e.body.overlaps(&projectile.body)
            })
            .map(|(eid, _)| eid);
        if let Some(eid) = target {
            hits.push((pid, eid));
        }
    }
    for (pid, eid) in hits {
        hit_enemy(s, pid, eid, cfg);
    }

    if s
        .active_roster()
        .any(|(_, e)| e.body.overlaps(&s.player.body))
    {
        take_damage(s, cfg);
    }

    let picked: Vec<CollectibleId> = s
        .collectibles
        .iter()
        .filter(|(_, item)| item.body.overlaps(&s.player.body))
        .map(|(id, _)| id)
        .collect();
    for id in picked {
        collect(s, id, cfg);
    }

    if s.goal.body.overlaps(&s.player.body) {
        touch_goal(s, cfg);
    }
}

fn check_fall_out(s: &mut LevelState, cfg: &GameConfig) {
    if s.falling_out || s.player.body.pos.y <= cfg.world.height {
        return;
    }
    s.falling_out = true;
    s.cues.push(Cue::Shake);
    s.scheduler
        .schedule(s.clock_ms + cfg.effects.shake_ms, TimedEvent::FallRestart);
    info!("player fell out of the level");
}

fn run_due_events(s: &mut LevelState, cfg: &GameConfig, rng: &mut impl Rng) {
    while let Some(event) = s.scheduler.pop_due(s.clock_ms) {
        debug!("timed event {:?} at {} ms", event, s.clock_ms);
        match event {
            TimedEvent::DamageCooldownEnd => {
                s.player.damage_cooldown = false;
                s.player.tinted = false;
            }
            TimedEvent::DeathReset => {
                s.session.hits = 0;
                restart_level(s, cfg, rng);
            }
            TimedEvent::FallRestart => restart_level(s, cfg, rng),
            TimedEvent::LevelComplete => {
                s.status = LevelStatus::Complete;
                info!("level {} complete", s.definition.id.number());
                break;
            }
            TimedEvent::ExpireProjectile(id) => {
                s.projectiles.release(id);
            }
            TimedEvent::RemoveEnemy(id) => {
                if s.enemies.remove(id).is_some() {
                    debug!("enemy {:?} destroyed", id);
                }
            }
        }
    }
}

/// Rebuild the level around the current session.  The clock keeps running.
fn restart_level(s: &mut LevelState, cfg: &GameConfig, rng: &mut impl Rng) {
    match setup_level(&s.definition, s.session, cfg, rng) {
        Ok(mut fresh) => {
            fresh.clock_ms = s.clock_ms;
            fresh.frame = s.frame;
            fresh.prev_input = s.prev_input;
            fresh.cues.push(Cue::LevelRestarted);
            *s = fresh;
        }
        Err(err) => warn!("cannot restart level: {err}"),
    }
}

fn update_player_animation(s: &mut LevelState) {
    let player = &mut s.player;
    let key = if !player.active {
        AnimationKey::Died
    } else if !player.grounded {
        AnimationKey::Jump
    } else if player.body.vel.x != 0.0 {
        AnimationKey::Run
    } else {
        AnimationKey::Idle
    };
    if key != player.animation {
        player.animation = key;
        player.animation_started_ms = s.clock_ms;
    }
}
