use egg_hunt::compute::*;
use egg_hunt::config::GameConfig;
use egg_hunt::entities::*;
use egg_hunt::levels::LevelId;
use egg_hunt::physics::Body;
use egg_hunt::schedule::TimedEvent;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn level(id: LevelId, rng: &mut StdRng) -> LevelState {
    setup_level(&id.definition(), Session::default(), &GameConfig::default(), rng).unwrap()
}

/// Level one with every enemy removed, so nothing touches the player unless a
/// test puts it there.
fn quiet_level(rng: &mut StdRng) -> LevelState {
    let mut s = level(LevelId::One, rng);
    s.enemies.clear();
    s
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn run_frames(
    state: &LevelState,
    input: FrameInput,
    frames: usize,
    cfg: &GameConfig,
    rng: &mut StdRng,
) -> LevelState {
    let mut s = state.clone();
    for _ in 0..frames {
        s = tick(&s, &input, cfg, rng);
    }
    s
}

/// Enough whole frames to cover `ms`.
fn frames_for(ms: u64, cfg: &GameConfig) -> usize {
    (ms / cfg.frame_ms() + 1) as usize
}

fn settled(rng: &mut StdRng, cfg: &GameConfig) -> LevelState {
    let s = run_frames(&quiet_level(rng), idle(), 120, cfg, rng);
    assert!(s.player.grounded);
    s
}

fn bat_on(origin_x: f32, width: f32, x: f32) -> EnemyAgent {
    EnemyAgent {
        kind: EnemyKind::Bat,
        body: Body::new(Vec2::new(x, 300.0), Vec2::new(60.0, 50.0)),
        patrol: Patrol::Platform { platform: 0, origin_x, width },
        state: EnemyState::Patrolling,
        facing: Facing::Left,
    }
}

fn wolf_at(x: f32) -> EnemyAgent {
    EnemyAgent {
        kind: EnemyKind::Wolf,
        body: Body::new(Vec2::new(x, 623.5), Vec2::new(128.0, 65.0)),
        patrol: Patrol::Level,
        state: EnemyState::Patrolling,
        facing: Facing::Left,
    }
}

// ── setup_level ───────────────────────────────────────────────────────────────

#[test]
fn setup_spawns_roster_for_every_level() {
    let mut rng = seeded_rng();
    for id in [LevelId::One, LevelId::Two, LevelId::Three, LevelId::Four] {
        let def = id.definition();
        let s = level(id, &mut rng);
        assert_eq!(s.count_patrolling(EnemyKind::Bat), def.bat_count);
        assert_eq!(s.count_patrolling(EnemyKind::Wolf), def.wolf_count);
        // anchors plus the ground slab
        assert_eq!(s.platforms.len(), def.platforms.len() + 1);
        assert_eq!(s.backdrop_tint, def.weather.tint());
    }
}

#[test]
fn setup_puts_bats_on_distinct_platforms() {
    let mut rng = seeded_rng();
    for id in [LevelId::One, LevelId::Two, LevelId::Three, LevelId::Four] {
        let s = level(id, &mut rng);
        let mut used: Vec<usize> = s
            .enemies
            .values()
            .filter_map(|e| match e.patrol {
                Patrol::Platform { platform, .. } => Some(platform),
                Patrol::Level => None,
            })
            .collect();
        let bats = used.len();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used.len(), bats, "level {} reused a platform", id.number());
    }
}

#[test]
fn setup_places_wolves_within_spawn_band() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = level(LevelId::Four, &mut rng);
    for wolf in s.enemies.values().filter(|e| e.kind == EnemyKind::Wolf) {
        assert!(wolf.body.pos.x >= 700.0);
        assert!(wolf.body.pos.x <= cfg.world.width - 200.0);
        assert!(wolf.body.vel.x <= -200.0 && wolf.body.vel.x >= -400.0);
    }
}

#[test]
fn setup_starts_with_hidden_egg_and_fresh_player() {
    let mut rng = seeded_rng();
    let s = level(LevelId::Two, &mut rng);
    assert_eq!(s.goal.state, GoalState::Hidden);
    assert_eq!(s.goal.body.pos, Vec2::new(2550.0, 100.0));
    assert_eq!(s.player.body.pos, Vec2::new(50.0, 500.0));
    assert!(s.player.active);
    assert_eq!(s.status, LevelStatus::Playing);
    assert_eq!(s.projectiles.active_count(), 0);
    assert!(s.collectibles.is_empty());
}

#[test]
fn setup_carries_session() {
    let mut rng = seeded_rng();
    let session = Session { score: 1200, hits: 3 };
    let s = setup_level(&LevelId::Three.definition(), session, &GameConfig::default(), &mut rng)
        .unwrap();
    assert_eq!(s.session, session);
}

#[test]
fn setup_is_deterministic_for_a_seed() {
    let a = level(LevelId::One, &mut StdRng::seed_from_u64(7));
    let b = level(LevelId::One, &mut StdRng::seed_from_u64(7));
    let pos = |s: &LevelState| s.enemies.values().map(|e| e.body.pos).collect::<Vec<_>>();
    assert_eq!(pos(&a), pos(&b));
}

// ── player_take_damage ────────────────────────────────────────────────────────

#[test]
fn damage_counts_one_hit() {
    let cfg = GameConfig::default();
    let s = quiet_level(&mut seeded_rng());
    let s2 = player_take_damage(&s, &cfg);
    assert_eq!(s2.session.hits, 1);
    assert!(s2.player.damage_cooldown);
    assert!(s2.player.tinted);
    assert!(s2.cues.contains(&Cue::Hit));
    // original untouched
    assert_eq!(s.session.hits, 0);
}

#[test]
fn damage_ignored_during_cooldown() {
    let cfg = GameConfig::default();
    let s = quiet_level(&mut seeded_rng());
    let s2 = player_take_damage(&player_take_damage(&s, &cfg), &cfg);
    assert_eq!(s2.session.hits, 1);
}

#[test]
fn cooldown_clears_after_delay() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = player_take_damage(&quiet_level(&mut rng), &cfg);

    let before = run_frames(&s, idle(), 60, &cfg, &mut rng); // 960 ms
    assert!(before.player.damage_cooldown);

    let after = run_frames(&before, idle(), 3, &cfg, &mut rng);
    assert!(!after.player.damage_cooldown);
    assert!(!after.player.tinted);

    let again = player_take_damage(&after, &cfg);
    assert_eq!(again.session.hits, 2);
}

#[test]
fn fatal_hit_applies_penalty_and_deactivates() {
    let cfg = GameConfig::default();
    let mut s = quiet_level(&mut seeded_rng());
    s.session.hits = cfg.player.max_hits - 1;
    let s2 = player_take_damage(&s, &cfg);
    assert_eq!(s2.session.hits, cfg.player.max_hits);
    assert_eq!(s2.session.score, -5000);
    assert!(!s2.player.active);
    assert!(s2.scheduler.is_pending(TimedEvent::DeathReset));
}

#[test]
fn death_reset_restarts_level_and_clears_hits() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = quiet_level(&mut rng);
    s.session.hits = cfg.player.max_hits - 1;
    s.session.score = 700;
    let mut s = player_take_damage(&s, &cfg);

    let after = run_frames(&s, idle(), 30, &cfg, &mut rng);
    assert!(!after.player.active);
    assert_eq!(after.player.animation, egg_hunt::animation::AnimationKey::Died);

    for _ in 0..frames_for(cfg.player.death_reset_ms, &cfg) {
        s = tick(&s, &idle(), &cfg, &mut rng);
        if !s.scheduler.is_pending(TimedEvent::DeathReset) {
            break;
        }
    }
    assert!(s.cues.contains(&Cue::LevelRestarted));
    assert!(s.player.active);
    assert_eq!(s.session.hits, 0);
    // the penalty is not refunded
    assert_eq!(s.session.score, 700 - 5000);
    let def = LevelId::One.definition();
    assert_eq!(s.count_patrolling(EnemyKind::Bat), def.bat_count);
    assert_eq!(s.count_patrolling(EnemyKind::Wolf), def.wolf_count);
}

// ── patrol_turn ───────────────────────────────────────────────────────────────

#[test]
fn bat_turns_only_past_platform_edges() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();

    assert_eq!(patrol_turn(&bat_on(100.0, 200.0, 105.0), &cfg, &mut rng), None);
    assert_eq!(patrol_turn(&bat_on(100.0, 200.0, 295.0), &cfg, &mut rng), None);
    assert_eq!(patrol_turn(&bat_on(100.0, 200.0, 200.0), &cfg, &mut rng), None);

    let right = patrol_turn(&bat_on(100.0, 200.0, 104.5), &cfg, &mut rng).unwrap();
    assert!((50.0..=100.0).contains(&right));

    let left = patrol_turn(&bat_on(100.0, 200.0, 295.5), &cfg, &mut rng).unwrap();
    assert!((-100.0..=-50.0).contains(&left));
}

#[test]
fn wolf_turns_at_level_edges() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let edge = cfg.world.width - 69.0;

    assert_eq!(patrol_turn(&wolf_at(edge - 0.5), &cfg, &mut rng), None);
    assert_eq!(patrol_turn(&wolf_at(69.5), &cfg, &mut rng), None);

    let back = patrol_turn(&wolf_at(edge), &cfg, &mut rng).unwrap();
    assert!((-400.0..=-200.0).contains(&back));

    let forward = patrol_turn(&wolf_at(69.0), &cfg, &mut rng).unwrap();
    assert!((200.0..=400.0).contains(&forward));
}

#[test]
fn patrolling_bat_faces_its_velocity() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = quiet_level(&mut rng);
    let id = s.enemies.insert(bat_on(100.0, 200.0, 100.0));
    let s2 = tick(&s, &idle(), &cfg, &mut rng);
    assert!(s2.enemies[id].body.vel.x > 0.0);
    assert_eq!(s2.enemies[id].facing, Facing::Right);
}

// ── firing ────────────────────────────────────────────────────────────────────

fn fire() -> FrameInput {
    FrameInput { fire: true, ..FrameInput::default() }
}

#[test]
fn fire_spawns_projectile_in_facing_direction() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = tick(&quiet_level(&mut rng), &fire(), &cfg, &mut rng);
    assert_eq!(s.projectiles.active_count(), 1);
    assert!(s.cues.contains(&Cue::Shoot));
    let (_, shot) = s.projectiles.iter_active().next().unwrap();
    assert_eq!(shot.body.vel.x, 1000.0);
}

#[test]
fn holding_fire_does_not_autofire() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = run_frames(&quiet_level(&mut rng), fire(), 10, &cfg, &mut rng);
    assert_eq!(s.projectiles.active_count(), 1);
}

#[test]
fn second_press_within_refractory_is_refused() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = tick(&quiet_level(&mut rng), &fire(), &cfg, &mut rng);
    s = tick(&s, &idle(), &cfg, &mut rng);
    s = tick(&s, &fire(), &cfg, &mut rng);
    assert_eq!(s.projectiles.active_count(), 1);
    assert!(!s.cues.contains(&Cue::Shoot));
}

#[test]
fn fire_allowed_again_after_refractory() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = tick(&quiet_level(&mut rng), &fire(), &cfg, &mut rng);
    let s = run_frames(&s, idle(), frames_for(cfg.projectile.refractory_ms, &cfg), &cfg, &mut rng);
    assert_eq!(s.projectiles.active_count(), 0);
    let s = tick(&s, &fire(), &cfg, &mut rng);
    assert_eq!(s.projectiles.active_count(), 1);
}

#[test]
fn projectile_expires_after_lifespan() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = tick(&quiet_level(&mut rng), &fire(), &cfg, &mut rng);

    let early = run_frames(&s, idle(), 14, &cfg, &mut rng); // 224 ms later
    assert_eq!(early.projectiles.active_count(), 1);

    let late = run_frames(&early, idle(), 2, &cfg, &mut rng);
    assert_eq!(late.projectiles.active_count(), 0);
}

// ── projectile_hit_enemy / collect_item ───────────────────────────────────────

#[test]
fn shot_bat_drops_wing_and_reveals_egg() {
    let cfg = GameConfig::default();
    let mut s = quiet_level(&mut seeded_rng());
    let eid = s.enemies.insert(bat_on(100.0, 200.0, 200.0));
    let pid = s.projectiles.spawn(Vec2::new(200.0, 300.0), Vec2::ZERO).unwrap();

    let s2 = projectile_hit_enemy(&s, pid, eid, &cfg);
    assert_eq!(s2.enemies[eid].state, EnemyState::Falling);
    assert_eq!(s2.enemies[eid].body.vel.y, cfg.enemies.fall_velocity);
    assert!(s2.projectiles.get(pid).is_none());
    assert_eq!(s2.goal.state, GoalState::Revealed);
    assert_eq!(s2.collectibles.len(), 1);
    let (wing, item) = s2.collectibles.iter().next().unwrap();
    assert_eq!(item.kind, CollectibleKind::Wing);
    assert_eq!(item.body.pos, Vec2::new(200.0, 300.0));
    assert_eq!(s2.count_patrolling(EnemyKind::Bat), 0);

    let s3 = collect_item(&s2, wing, &cfg);
    assert_eq!(s3.session.score, 500);
    assert!(s3.collectibles.is_empty());
    assert!(s3.cues.contains(&Cue::Collect));
}

#[test]
fn shot_wolf_drops_skull_worth_more() {
    let cfg = GameConfig::default();
    let mut s = quiet_level(&mut seeded_rng());
    let eid = s.enemies.insert(wolf_at(1200.0));
    let pid = s.projectiles.spawn(Vec2::new(1200.0, 620.0), Vec2::ZERO).unwrap();

    let s2 = projectile_hit_enemy(&s, pid, eid, &cfg);
    let (skull, item) = s2.collectibles.iter().next().unwrap();
    assert_eq!(item.kind, CollectibleKind::Skull);
    assert_eq!(collect_item(&s2, skull, &cfg).session.score, 1000);
}

#[test]
fn collecting_twice_scores_once() {
    let cfg = GameConfig::default();
    let mut s = quiet_level(&mut seeded_rng());
    let eid = s.enemies.insert(bat_on(100.0, 200.0, 200.0));
    let pid = s.projectiles.spawn(Vec2::new(200.0, 300.0), Vec2::ZERO).unwrap();
    let s = projectile_hit_enemy(&s, pid, eid, &cfg);
    let (wing, _) = s.collectibles.iter().next().unwrap();
    let s = collect_item(&collect_item(&s, wing, &cfg), wing, &cfg);
    assert_eq!(s.session.score, 500);
}

#[test]
fn falling_enemy_removed_after_delay_and_stale_hit_ignored() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = quiet_level(&mut rng);
    let eid = s.enemies.insert(bat_on(100.0, 200.0, 200.0));
    let pid = s.projectiles.spawn(Vec2::new(200.0, 300.0), Vec2::ZERO).unwrap();
    let s = projectile_hit_enemy(&s, pid, eid, &cfg);

    let s = run_frames(&s, idle(), frames_for(cfg.enemies.removal_delay_ms, &cfg), &cfg, &mut rng);
    assert!(s.enemies.get(eid).is_none());

    let mut s2 = s.clone();
    let pid2 = s2.projectiles.spawn(Vec2::new(10.0, 10.0), Vec2::ZERO).unwrap();
    let s3 = projectile_hit_enemy(&s2, pid2, eid, &cfg);
    // nothing happened: the shot is still in flight and no trophy dropped
    assert!(s3.projectiles.get(pid2).is_some());
    assert_eq!(s3.collectibles.len(), s2.collectibles.len());
    assert_eq!(s3.session, s2.session);
}

#[test]
fn stale_expiry_does_not_release_reused_slot() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = quiet_level(&mut rng);
    let old = s.projectiles.spawn(Vec2::new(500.0, 300.0), Vec2::ZERO).unwrap();
    s.projectiles.release(old);
    let new = s.projectiles.spawn(Vec2::new(500.0, 300.0), Vec2::ZERO).unwrap();
    assert_eq!(old.slot, new.slot);

    s.scheduler.schedule(s.clock_ms, TimedEvent::ExpireProjectile(old));
    let s2 = tick(&s, &idle(), &cfg, &mut rng);
    assert!(s2.projectiles.get(new).is_some());
}

// ── reach_goal ────────────────────────────────────────────────────────────────

#[test]
fn hidden_egg_cannot_be_collected() {
    let cfg = GameConfig::default();
    let s = quiet_level(&mut seeded_rng());
    let s2 = reach_goal(&s, &cfg);
    assert_eq!(s2.goal.state, GoalState::Hidden);
    assert_eq!(s2.session.score, 0);
}

#[test]
fn egg_scores_once_and_completes_after_fade() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = quiet_level(&mut rng);
    s.goal.state = GoalState::Revealed;

    let s = reach_goal(&reach_goal(&s, &cfg), &cfg);
    assert_eq!(s.session.score, 100);
    assert_eq!(s.goal.state, GoalState::Collected);
    assert!(s.cues.contains(&Cue::Fade));

    let fading = run_frames(&s, idle(), 49, &cfg, &mut rng); // 784 ms
    assert_eq!(fading.status, LevelStatus::Playing);

    let done = run_frames(&fading, idle(), 2, &cfg, &mut rng);
    assert_eq!(done.status, LevelStatus::Complete);
    assert_eq!(done.session.score, 100);

    // a finished level no longer advances
    let frozen = tick(&done, &idle(), &cfg, &mut rng);
    assert_eq!(frozen.clock_ms, done.clock_ms);
}

// ── falling out ───────────────────────────────────────────────────────────────

#[test]
fn falling_out_shakes_then_restarts_keeping_session() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = quiet_level(&mut rng);
    s.session = Session { score: 1500, hits: 2 };
    s.player.body.pos.y = cfg.world.height + 40.0;

    let s = tick(&s, &idle(), &cfg, &mut rng);
    assert!(s.falling_out);
    assert!(s.cues.contains(&Cue::Shake));

    // the restart is scheduled once, not every frame below the world
    let s = tick(&s, &idle(), &cfg, &mut rng);
    assert!(!s.cues.contains(&Cue::Shake));

    let clock = s.clock_ms;
    let mut s = s;
    for _ in 0..frames_for(cfg.effects.shake_ms, &cfg) {
        s = tick(&s, &idle(), &cfg, &mut rng);
        if s.cues.contains(&Cue::LevelRestarted) {
            break;
        }
    }
    assert!(s.cues.contains(&Cue::LevelRestarted));
    assert!(!s.falling_out);
    assert!(s.player.body.pos.y < cfg.world.height);
    assert_eq!(s.session, Session { score: 1500, hits: 2 });
    assert!(s.clock_ms > clock);
}

// ── movement & jumping ────────────────────────────────────────────────────────

#[test]
fn player_lands_and_idles() {
    let cfg = GameConfig::default();
    let s = settled(&mut seeded_rng(), &cfg);
    assert_eq!(s.player.body.vel.x, 0.0);
    assert_eq!(s.player.animation, egg_hunt::animation::AnimationKey::Idle);
}

#[test]
fn right_wins_over_left() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = settled(&mut rng, &cfg);
    let both = FrameInput { left: true, right: true, ..FrameInput::default() };
    let s2 = tick(&s, &both, &cfg, &mut rng);
    assert_eq!(s2.player.body.vel.x, cfg.player.speed);
    assert_eq!(s2.player.facing, Facing::Right);
    assert_eq!(s2.player.animation, egg_hunt::animation::AnimationKey::Run);

    let left = FrameInput { left: true, ..FrameInput::default() };
    let s3 = tick(&s2, &left, &cfg, &mut rng);
    assert_eq!(s3.player.body.vel.x, -cfg.player.speed);
    assert_eq!(s3.player.facing, Facing::Left);
}

#[test]
fn jump_only_from_ground() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = settled(&mut rng, &cfg);
    let jump = FrameInput { jump: true, ..FrameInput::default() };

    let up = tick(&s, &jump, &cfg, &mut rng);
    assert!(up.cues.contains(&Cue::Jump));
    assert!(up.player.body.vel.y < 0.0);
    assert!(!up.player.grounded);

    // released and pressed again mid-air
    let mid = tick(&up, &idle(), &cfg, &mut rng);
    let again = tick(&mid, &jump, &cfg, &mut rng);
    assert!(!again.cues.contains(&Cue::Jump));
    assert!(again.player.body.vel.y > up.player.body.vel.y);
}

#[test]
fn player_stays_inside_level_width() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = settled(&mut rng, &cfg);
    let left = FrameInput { left: true, ..FrameInput::default() };
    let s2 = run_frames(&s, left, 30, &cfg, &mut rng);
    assert!(s2.player.body.pos.x >= cfg.player_size().x / 2.0);
}

#[test]
fn clock_advances_by_frame_step() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let s = run_frames(&quiet_level(&mut rng), idle(), 5, &cfg, &mut rng);
    assert_eq!(s.clock_ms, 5 * cfg.frame_ms());
    assert_eq!(s.frame, 5);
}

// ── overlaps resolved by tick ─────────────────────────────────────────────────

fn right() -> FrameInput {
    FrameInput { right: true, ..FrameInput::default() }
}

/// Body of the given size centred `dx` pixels ahead of the player.
fn ahead_of(s: &LevelState, dx: f32, size: Vec2) -> Body {
    Body::new(s.player.body.pos + Vec2::new(dx, 0.0), size)
}

#[test]
fn shot_travels_into_bat_and_wing_is_walked_over() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = settled(&mut rng, &cfg);
    let mut bat = bat_on(s.player.body.pos.x, 300.0, 0.0);
    bat.body = ahead_of(&s, 150.0, Vec2::new(60.0, 50.0));
    let bat_id = s.enemies.insert(bat);

    let s = tick(&s, &fire(), &cfg, &mut rng);
    let s = run_frames(&s, idle(), 14, &cfg, &mut rng);
    assert_eq!(s.enemies[bat_id].state, EnemyState::Falling);
    assert_eq!(s.goal.state, GoalState::Revealed);
    assert_eq!(s.projectiles.active_count(), 0);
    assert_eq!(s.collectibles.len(), 1);
    assert_eq!(s.collectibles.values().next().unwrap().kind, CollectibleKind::Wing);
    assert_eq!(s.session.score, 0);

    let s = run_frames(&s, right(), 45, &cfg, &mut rng);
    assert!(s.collectibles.is_empty());
    assert_eq!(s.session.score, 500);
}

#[test]
fn standing_in_enemy_hurts_once_per_cooldown() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = settled(&mut rng, &cfg);
    let mut bat = bat_on(s.player.body.pos.x - 100.0, 200.0, 0.0);
    bat.body = ahead_of(&s, 0.0, Vec2::new(60.0, 50.0));
    s.enemies.insert(bat);

    let s = tick(&s, &idle(), &cfg, &mut rng);
    assert_eq!(s.session.hits, 1);
    assert!(s.cues.contains(&Cue::Hit));

    let s = run_frames(&s, idle(), 60, &cfg, &mut rng); // 960 ms of contact
    assert_eq!(s.session.hits, 1);

    let s = run_frames(&s, idle(), 5, &cfg, &mut rng);
    assert_eq!(s.session.hits, 2);
}

#[test]
fn walking_over_skull_scores_it() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = settled(&mut rng, &cfg);
    let body = ahead_of(&s, 60.0, Vec2::from(cfg.scoring.collectible_size));
    s.collectibles.insert(Collectible { kind: CollectibleKind::Skull, body });

    let s = run_frames(&s, right(), 20, &cfg, &mut rng);
    assert!(s.collectibles.is_empty());
    assert_eq!(s.session.score, 1000);
}

#[test]
fn walking_into_revealed_egg_completes_level() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = settled(&mut rng, &cfg);
    s.goal.body = ahead_of(&s, 60.0, Vec2::from(cfg.scoring.goal_size));
    s.goal.state = GoalState::Revealed;

    let s = run_frames(&s, right(), 20, &cfg, &mut rng);
    assert_eq!(s.goal.state, GoalState::Collected);
    assert_eq!(s.session.score, 100);

    let s = run_frames(&s, idle(), frames_for(cfg.effects.goal_fade_ms, &cfg), &cfg, &mut rng);
    assert_eq!(s.status, LevelStatus::Complete);
    assert_eq!(s.session.score, 100);
}

#[test]
fn hidden_egg_is_walked_through() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let mut s = settled(&mut rng, &cfg);
    s.goal.body = ahead_of(&s, 60.0, Vec2::from(cfg.scoring.goal_size));

    let s = run_frames(&s, right(), 20, &cfg, &mut rng);
    assert_eq!(s.goal.state, GoalState::Hidden);
    assert_eq!(s.session.score, 0);
}
