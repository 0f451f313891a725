mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::{Camera, Viewport};
use egg_hunt::compute::{setup_level, tick};
use egg_hunt::config::GameConfig;
use egg_hunt::entities::{FrameInput, LevelStatus, Session};
use egg_hunt::levels::LevelId;
use egg_hunt::scene::Scene;
use egg_hunt::scoring::hunter_tier;

/// Frames a key stays down after its last press or repeat event. Terminals
/// without release events repeat at 15 Hz or faster, well inside 8 frames.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "egg_hunt", about = "Egg Hunt: Monster Madness, a terminal platformer")]
struct Args {
    /// TOML file overriding the default tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy placement and patrol speeds.
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the menu and start at this level (1-4).
    #[arg(long)]
    level: Option<u8>,
    /// Where log output goes; the terminal belongs to the game.
    #[arg(long, default_value = "egg_hunt.log")]
    log_file: PathBuf,
}

fn is_held(last_seen: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    last_seen
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(last_seen: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(last_seen, k, frame))
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn viewport(cfg: &GameConfig) -> std::io::Result<Viewport> {
    let (cols, rows) = terminal::size()?;
    Ok(Viewport::new(cols, rows, cfg))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cfg: &GameConfig,
) -> std::io::Result<MenuResult> {
    let frame = Duration::from_millis(cfg.frame_ms());
    let started = Instant::now();
    loop {
        display::render_menu(out, &viewport(cfg)?, started.elapsed().as_millis() as u64)?;
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. })) =
            rx.recv_timeout(frame)
        {
            if is_quit(&code, modifiers) {
                return Ok(MenuResult::Quit);
            }
            return Ok(MenuResult::Start);
        }
    }
}

// ── Level loop ────────────────────────────────────────────────────────────────

enum LevelOutcome {
    Complete(Session),
    Quit,
}

/// Run one level until its egg fade finishes or the player quits.
///
/// `last_seen` maps each key to the frame of its latest press or repeat.
/// Keys inside the hold window become this frame's `FrameInput`; the level
/// itself turns held jump and fire into rising edges.
fn play_level<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    id: LevelId,
    session: Session,
    cfg: &GameConfig,
    rng: &mut StdRng,
) -> anyhow::Result<LevelOutcome> {
    let mut state = setup_level(&id.definition(), session, cfg, rng)
        .with_context(|| format!("setting up level {}", id.number()))?;
    let frame_len = Duration::from_millis(cfg.frame_ms());

    let mut view = viewport(cfg)?;
    let mut camera = Camera::default();
    camera.reset(&state, &view, cfg);

    let mut last_seen: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(&code, modifiers) {
                            return Ok(LevelOutcome::Quit);
                        }
                        last_seen.insert(code, frame);
                    }
                    KeyEventKind::Repeat => {
                        last_seen.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        last_seen.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => view = Viewport::new(cols, rows, cfg),
                _ => {}
            }
        }

        let input = FrameInput {
            left: any_held(&last_seen, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: any_held(&last_seen, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            jump: any_held(&last_seen, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            fire: is_held(&last_seen, &KeyCode::Char(' '), frame),
        };

        state = tick(&state, &input, cfg, rng);
        camera.update(&state, &view, cfg);
        display::render(out, &state, cfg, &view, &camera)?;

        if state.status == LevelStatus::Complete {
            return Ok(LevelOutcome::Complete(state.session));
        }

        if let Some(rest) = frame_len.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

// ── Credits ───────────────────────────────────────────────────────────────────

enum CreditsResult {
    Restart,
    Quit,
}

fn show_credits<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    score: i64,
    cfg: &GameConfig,
) -> std::io::Result<CreditsResult> {
    let tier = hunter_tier(score);
    info!("game finished with {} points: {}", score, tier.title());
    let frame = Duration::from_millis(cfg.frame_ms());
    let started = Instant::now();
    loop {
        let elapsed = started.elapsed().as_millis() as u64;
        display::render_credits(out, &viewport(cfg)?, score, tier, elapsed)?;
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. })) =
            rx.recv_timeout(frame)
        {
            if is_quit(&code, modifiers) {
                return Ok(CreditsResult::Quit);
            }
            if code == KeyCode::Char(' ') {
                return Ok(CreditsResult::Restart);
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let cfg = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_or_default()?,
    };
    let first_scene = match args.level {
        Some(n) => match LevelId::from_number(n) {
            Some(id) => Scene::Level(id),
            None => bail!("--level must be between 1 and 4 (got {n})"),
        },
        None => Scene::Menu,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut term = TerminalSession::enter()?;
    let rx = spawn_input_reader();
    run(&mut term.out, &rx, first_scene, &cfg, &mut rng)
}

/// Raw mode on the alternate screen for as long as the value lives.
struct TerminalSession {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    fn enter() -> std::io::Result<Self> {
        let mut out = BufWriter::new(stdout());
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        // Kitty-protocol terminals report releases; elsewhere the hold window covers it.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(Self { out, keyboard_enhanced })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Blocking reads happen on their own thread; scenes poll the channel.
fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    first_scene: Scene,
    cfg: &GameConfig,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let mut scene = first_scene;
    let mut session = Session::default();

    loop {
        match scene {
            Scene::Menu => match show_menu(out, rx, cfg)? {
                MenuResult::Quit => break,
                MenuResult::Start => (scene, session) = Scene::start_game(),
            },
            Scene::Level(id) => match play_level(out, rx, id, session, cfg, rng)? {
                LevelOutcome::Quit => break,
                LevelOutcome::Complete(carried) => {
                    session = carried;
                    scene = Scene::after_level(id);
                }
            },
            Scene::Credits => match show_credits(out, rx, session.score, cfg)? {
                CreditsResult::Quit => break,
                CreditsResult::Restart => (scene, session) = Scene::restart_from_credits(),
            },
        }
    }
    info!("quit with score {}", session.score);
    Ok(())
}
