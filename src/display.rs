//! Terminal renderer for the level, menu and credits screens.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! world pixels into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use egg_hunt::animation::AnimationKey;
use egg_hunt::config::GameConfig;
use egg_hunt::entities::{
    CollectibleKind, Cue, EnemyAgent, EnemyKind, EnemyState, Facing, GoalState, LevelState,
};
use egg_hunt::physics::Aabb;
use egg_hunt::scoring::HunterTier;
use glam::Vec2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HURT: Color = Color::Red;
const C_BAT: Color = Color::Magenta;
const C_WOLF: Color = Color::DarkYellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_WING: Color = Color::Magenta;
const C_SKULL: Color = Color::Grey;
const C_EGG: Color = Color::Yellow;
const C_PLATFORM: Color = Color::DarkGreen;
const C_GROUND: Color = Color::Green;
const C_TITLE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_MUZZLE: Color = Color::White;
const C_DUST: Color = Color::DarkYellow;
const C_SCORE_FLASH: Color = Color::White;

/// Camera follow smoothing per frame.
const FOLLOW_LERP: f32 = 0.1;
/// Near background layer scroll factor.
const TREE_PARALLAX: f32 = 0.5;
/// World pixels between tree trunks.
const TREE_SPACING: f32 = 160.0;

// Frames each sound cue stays on screen.
const MUZZLE_FRAMES: u32 = 4;
const DUST_FRAMES: u32 = 8;
const SCORE_FLASH_FRAMES: u32 = 15;

// ── Viewport & camera ─────────────────────────────────────────────────────────

/// Maps world pixels onto the terminal.  Row 0 is the HUD and the last row
/// the controls hint; everything between is the play area.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    px_per_col: f32,
    px_per_row: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, cfg: &GameConfig) -> Self {
        let play_rows = rows.saturating_sub(2).max(1) as f32;
        let px_per_row = cfg.world.height / play_rows;
        // Terminal cells are roughly twice as tall as they are wide.
        let px_per_col = px_per_row / 2.0;
        Self {
            cols,
            rows,
            px_per_col,
            px_per_row,
        }
    }

    pub fn width_px(&self) -> f32 {
        self.cols as f32 * self.px_per_col
    }

    fn cell(&self, world: Vec2, camera_x: f32) -> Option<(u16, u16)> {
        let col = ((world.x - camera_x) / self.px_per_col).floor();
        let row = (world.y / self.px_per_row).floor() + 1.0;
        let last_row = self.rows.saturating_sub(2) as f32;
        if col < 0.0 || col >= self.cols as f32 || row < 1.0 || row > last_row {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

/// Scroll position plus the short-lived effects started by cues: shake and
/// fade for the screen, muzzle flash, jump dust and score flash standing in
/// for sounds.
#[derive(Debug, Default)]
pub struct Camera {
    pub x: f32,
    shake_frames: u32,
    fade_frames: u32,
    fade_total: u32,
    muzzle_frames: u32,
    dust_frames: u32,
    dust_at: Vec2,
    score_frames: u32,
}

impl Camera {
    /// Snap onto the player, e.g. when a level starts.
    pub fn reset(&mut self, state: &LevelState, view: &Viewport, cfg: &GameConfig) {
        self.x = Self::target(state, view, cfg);
        self.shake_frames = 0;
        self.fade_frames = 0;
        self.muzzle_frames = 0;
        self.dust_frames = 0;
        self.score_frames = 0;
    }

    /// Follow the player and pick up this frame's cues.
    pub fn update(&mut self, state: &LevelState, view: &Viewport, cfg: &GameConfig) {
        let frame_ms = cfg.frame_ms();
        self.shake_frames = self.shake_frames.saturating_sub(1);
        self.fade_frames = self.fade_frames.saturating_sub(1);
        self.muzzle_frames = self.muzzle_frames.saturating_sub(1);
        self.dust_frames = self.dust_frames.saturating_sub(1);
        self.score_frames = self.score_frames.saturating_sub(1);

        for cue in &state.cues {
            match cue {
                Cue::Shake => self.shake_frames = (cfg.effects.shake_ms / frame_ms) as u32,
                Cue::Fade => {
                    self.fade_total = (cfg.effects.goal_fade_ms / frame_ms).max(1) as u32;
                    self.fade_frames = self.fade_total;
                }
                Cue::LevelRestarted => self.reset(state, view, cfg),
                Cue::Shoot => self.muzzle_frames = MUZZLE_FRAMES,
                Cue::Jump => {
                    self.dust_frames = DUST_FRAMES;
                    self.dust_at = feet(state.player.body.pos, state.player.body.size);
                }
                Cue::Collect => self.score_frames = SCORE_FLASH_FRAMES,
                // rung as a bell by `render`
                Cue::Hit => {}
            }
        }
        let target = Self::target(state, view, cfg);
        self.x += (target - self.x) * FOLLOW_LERP;
    }

    fn target(state: &LevelState, view: &Viewport, cfg: &GameConfig) -> f32 {
        let max_x = (cfg.world.width - view.width_px()).max(0.0);
        (state.player.body.pos.x - view.width_px() / 2.0).clamp(0.0, max_x)
    }

    fn draw_x(&self, view: &Viewport, frame: u64) -> f32 {
        if self.shake_frames == 0 {
            return self.x;
        }
        let jolt = if frame % 2 == 0 { 1.0 } else { -1.0 };
        self.x + jolt * view.px_per_col
    }

    /// 1.0 normally, falling towards 0.0 during the goal fade.
    fn brightness(&self) -> f32 {
        if self.fade_frames == 0 || self.fade_total == 0 {
            return 1.0;
        }
        self.fade_frames as f32 / self.fade_total as f32
    }
}

fn tint_color(tint: u32, scale: f32) -> Color {
    let channel = |shift: u32| (((tint >> shift) & 0xff) as f32 * scale).round() as u8;
    Color::Rgb {
        r: channel(16),
        g: channel(8),
        b: channel(0),
    }
}

fn faded(color: Color, brightness: f32) -> Color {
    if brightness >= 1.0 {
        color
    } else if brightness > 0.5 {
        Color::DarkGrey
    } else {
        Color::Black
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete level frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &LevelState,
    cfg: &GameConfig,
    view: &Viewport,
    camera: &Camera,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let cam_x = camera.draw_x(view, state.frame);
    let light = camera.brightness();

    draw_backdrop(out, state, view, cam_x, light)?;
    for (i, rect) in state.platforms.iter().enumerate() {
        let ground = i + 1 == state.platforms.len();
        draw_platform(out, rect, ground, view, cam_x, light)?;
    }
    if state.goal.state == GoalState::Revealed {
        put(out, view, cam_x, feet(state.goal.body.pos, state.goal.body.size), "0", faded(C_EGG, light))?;
    }
    for item in state.collectibles.values() {
        let (glyph, color) = match item.kind {
            CollectibleKind::Wing => ("w", C_WING),
            CollectibleKind::Skull => ("%", C_SKULL),
        };
        put(out, view, cam_x, feet(item.body.pos, item.body.size), glyph, faded(color, light))?;
    }
    for enemy in state.enemies.values() {
        draw_enemy(out, enemy, state.clock_ms, view, cam_x, light)?;
    }
    for (_, projectile) in state.projectiles.iter_active() {
        put(out, view, cam_x, projectile.body.pos, "-", faded(C_PROJECTILE, light))?;
    }
    draw_player(out, state, view, cam_x, light)?;
    draw_cue_effects(out, state, cfg, view, camera, cam_x)?;
    draw_hud(out, state, cfg, view, camera.score_frames > 0)?;
    draw_controls_hint(out, view)?;

    if state.cues.contains(&Cue::Hit) {
        out.queue(Print("\x07"))?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Title screen with the cast playing their idle loops.
pub fn render_menu<W: Write>(out: &mut W, view: &Viewport, elapsed_ms: u64) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let cy = view.rows / 2;

    centred(out, view, cy.saturating_sub(4), "Egg Hunt: Monster Madness", C_TITLE)?;
    centred(out, view, cy.saturating_sub(2), "Press any key to start", C_HUD_SCORE)?;

    let cx = view.cols / 2;
    let cast = [
        (cx.saturating_sub(12), player_glyph(AnimationKey::Idle, elapsed_ms), C_PLAYER),
        (cx.saturating_sub(1), wolf_glyph(AnimationKey::WolfIdle, elapsed_ms, Facing::Left), C_WOLF),
        (cx + 12, bat_glyph(elapsed_ms), C_BAT),
    ];
    for (col, glyph, color) in cast {
        out.queue(cursor::MoveTo(col, cy + 2))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }

    centred(out, view, view.rows.saturating_sub(1), "← → : Move   ↑ : Jump   SPACE : Shoot   Q : Quit", C_HINT)?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Final score, hunter rank and the restart prompt.
pub fn render_credits<W: Write>(
    out: &mut W,
    view: &Viewport,
    score: i64,
    tier: HunterTier,
    elapsed_ms: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let cy = view.rows / 2;

    centred(out, view, cy.saturating_sub(5), &format!("Final Score: {}", score), C_HUD_SCORE)?;
    centred(out, view, cy.saturating_sub(3), &tier.message(), C_TITLE)?;

    if tier.shows_trophies() {
        let rows = [("0", C_EGG), ("w", C_WING), ("%", C_SKULL)];
        for (i, (glyph, color)) in rows.iter().enumerate() {
            let glyph = if tier.large_trophies() {
                glyph.repeat(2)
            } else {
                glyph.to_string()
            };
            let line = vec![glyph; 5].join("   ");
            centred(out, view, cy.saturating_sub(1) + i as u16, &line, *color)?;
        }
    }

    centred(out, view, cy + 3, player_glyph(tier.animation(), elapsed_ms), C_PLAYER)?;
    centred(out, view, cy + 5, "Press SPACE to Restart   Q : Quit", C_HINT)?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Scenery ───────────────────────────────────────────────────────────────────

fn draw_backdrop<W: Write>(
    out: &mut W,
    state: &LevelState,
    view: &Viewport,
    cam_x: f32,
    light: f32,
) -> std::io::Result<()> {
    // Far layer: a sky band in the weather tint.  Near layer: tree trunks
    // scrolling at half speed, in the same tint.
    let sky = tint_color(state.backdrop_tint, 0.35 * light);
    let trees = tint_color(state.backdrop_tint, 0.6 * light);

    out.queue(style::SetForegroundColor(sky))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print("~".repeat(view.cols as usize)))?;

    let parallax_x = cam_x * TREE_PARALLAX;
    let first = (parallax_x / TREE_SPACING).floor() as i64;
    let last = ((parallax_x + view.width_px()) / TREE_SPACING).ceil() as i64;
    out.queue(style::SetForegroundColor(trees))?;
    for n in first..=last {
        let world_x = n as f32 * TREE_SPACING - parallax_x + cam_x;
        for row in (view.rows / 3)..view.rows.saturating_sub(2) {
            let y = (row as f32 - 1.0) * view.px_per_row;
            if let Some((col, r)) = view.cell(Vec2::new(world_x, y), cam_x) {
                out.queue(cursor::MoveTo(col, r))?;
                out.queue(Print("║"))?;
            }
        }
    }
    Ok(())
}

fn draw_platform<W: Write>(
    out: &mut W,
    rect: &Aabb,
    ground: bool,
    view: &Viewport,
    cam_x: f32,
    light: f32,
) -> std::io::Result<()> {
    let (glyph, color) = if ground { ("█", C_GROUND) } else { ("▀", C_PLATFORM) };
    out.queue(style::SetForegroundColor(faded(color, light)))?;
    let mut x = rect.min.x;
    while x < rect.max.x {
        if let Some((col, row)) = view.cell(Vec2::new(x, rect.min.y), cam_x) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(glyph))?;
        }
        x += view.px_per_col;
    }
    Ok(())
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// Bottom-centre of a body, nudged up so glyphs sit on the surface.
fn feet(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(pos.x, pos.y + size.y / 2.0 - 1.0)
}

fn player_glyph(key: AnimationKey, elapsed_ms: u64) -> &'static str {
    let spec = key.spec();
    let step = (spec.frame_at(elapsed_ms) - spec.start) as usize;
    match key {
        AnimationKey::Run => ["/", "|", "\\", "|", "/", "|"][step % 6],
        AnimationKey::Jump => ["Y", "y"][step % 2],
        AnimationKey::Died => ["x", "_", "."][step.min(2)],
        _ => ["A", "H"][step % 2],
    }
}

fn bat_glyph(elapsed_ms: u64) -> &'static str {
    let spec = AnimationKey::BatFly.spec();
    if (spec.frame_at(elapsed_ms) - spec.start) % 2 == 0 {
        "^v^"
    } else {
        "vOv"
    }
}

fn wolf_glyph(key: AnimationKey, elapsed_ms: u64, facing: Facing) -> &'static str {
    let spec = key.spec();
    let stride = (spec.frame_at(elapsed_ms) - spec.start) % 2 == 0;
    match (facing, stride) {
        (Facing::Left, true) => "<=mm",
        (Facing::Left, false) => "<=nn",
        (Facing::Right, true) => "mm=>",
        (Facing::Right, false) => "nn=>",
    }
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &EnemyAgent,
    clock_ms: u64,
    view: &Viewport,
    cam_x: f32,
    light: f32,
) -> std::io::Result<()> {
    let (glyph, color) = match (enemy.kind, enemy.state) {
        (_, EnemyState::Falling) => ("x", C_HINT),
        (EnemyKind::Bat, _) => (bat_glyph(clock_ms), C_BAT),
        (EnemyKind::Wolf, _) => (wolf_glyph(AnimationKey::WolfRun, clock_ms, enemy.facing), C_WOLF),
    };
    let half = glyph.chars().count() as f32 / 2.0 * view.px_per_col;
    let anchor = feet(enemy.body.pos, enemy.body.size) - Vec2::new(half, 0.0);
    put(out, view, cam_x, anchor, glyph, faded(color, light))
}

fn draw_player<W: Write>(
    out: &mut W,
    state: &LevelState,
    view: &Viewport,
    cam_x: f32,
    light: f32,
) -> std::io::Result<()> {
    // Sprite (2 rows, 1 col): head above a body glyph from the animation.
    let p = &state.player;
    let color = faded(if p.tinted { C_PLAYER_HURT } else { C_PLAYER }, light);
    let elapsed = state.clock_ms.saturating_sub(p.animation_started_ms);
    let base = feet(p.body.pos, p.body.size);
    put(out, view, cam_x, base, player_glyph(p.animation, elapsed), color)?;
    put(out, view, cam_x, base - Vec2::new(0.0, view.px_per_row), "o", color)
}

/// Muzzle flash beside the player and dust where the last jump left the ground.
fn draw_cue_effects<W: Write>(
    out: &mut W,
    state: &LevelState,
    cfg: &GameConfig,
    view: &Viewport,
    camera: &Camera,
    cam_x: f32,
) -> std::io::Result<()> {
    let p = &state.player;
    if camera.muzzle_frames > 0 {
        let reach = p.body.size.x / 2.0 + view.px_per_col;
        let muzzle = p.body.pos + Vec2::new(p.facing.sign() * reach, cfg.projectile.muzzle_offset);
        put(out, view, cam_x, muzzle, "*", C_MUZZLE)?;
    }
    if camera.dust_frames > 0 {
        let at = camera.dust_at - Vec2::new(1.5 * view.px_per_col, 0.0);
        put(out, view, cam_x, at, ".'.", C_DUST)?;
    }
    Ok(())
}

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    cam_x: f32,
    world: Vec2,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(world, cam_x) {
        let room = (view.cols - col) as usize;
        let clipped: String = glyph.chars().take(room).collect();
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(clipped))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &LevelState,
    cfg: &GameConfig,
    view: &Viewport,
    score_flash: bool,
) -> std::io::Result<()> {
    let lives = cfg.player.max_hits.saturating_sub(state.session.hits);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", lives)))?;

    out.queue(cursor::MoveTo(14, 0))?;
    if score_flash {
        out.queue(style::SetForegroundColor(C_SCORE_FLASH))?;
        out.queue(Print(format!("Score: {} +", state.session.score)))?;
    } else {
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(format!("Score: {}", state.session.score)))?;
    }

    let level = format!(
        "[ LEVEL {} · {} ]",
        state.definition.id.number(),
        state.definition.weather.label()
    );
    let lx = view.cols.saturating_sub(level.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(tint_color(state.backdrop_tint, 1.0)))?;
    out.queue(Print(level))?;

    if state.goal.state == GoalState::Revealed {
        centred(out, view, view.rows.saturating_sub(2), "Collect the Egg!", C_EGG)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ / W : Jump   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

fn centred<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
