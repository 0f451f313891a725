//! Tuning knobs for the whole game.
//!
//! Every field has a default matching the shipped game, so a config file
//! only needs to list the values it wants to change:
//!
//! ```toml
//! [player]
//! max_hits = 3
//!
//! [projectile]
//! refractory_ms = 800
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "egg_hunt.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Two background widths.
    pub width: f32,
    /// Background height; falling below it restarts the level.
    pub height: f32,
    pub gravity: f32,
    pub fps: u32,
    pub ground_thickness: f32,
    pub platform_width: f32,
    pub platform_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1040.0,
            canvas_height: 720.0,
            width: 2600.0,
            height: 720.0,
            gravity: 800.0,
            fps: 60,
            ground_thickness: 64.0,
            platform_width: 200.0,
            platform_height: 32.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    /// Upward impulse; applied as a negative y velocity.
    pub jump_velocity: f32,
    pub max_hits: u32,
    pub damage_cooldown_ms: u64,
    /// Delay between the fatal hit and the level reset.
    pub death_reset_ms: u64,
    pub death_penalty: i64,
    pub spawn: (f32, f32),
    pub size: (f32, f32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 240.0,
            jump_velocity: 630.0,
            max_hits: 5,
            damage_cooldown_ms: 1000,
            death_reset_ms: 1000,
            death_penalty: 5000,
            spawn: (50.0, 500.0),
            size: (45.0, 90.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub pool_size: usize,
    pub speed: f32,
    pub lifespan_ms: u64,
    pub refractory_ms: u64,
    /// Spawn offset below the player's centre.
    pub muzzle_offset: f32,
    pub size: (f32, f32),
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            speed: 1000.0,
            lifespan_ms: 250,
            refractory_ms: 1500,
            muzzle_offset: 15.0,
            size: (24.0, 8.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub bat_speed: (f32, f32),
    pub bat_buffer: f32,
    pub bat_hover: f32,
    pub bat_size: (f32, f32),
    pub wolf_speed: (f32, f32),
    pub wolf_buffer: f32,
    /// Sprite frame width; the wolf's patrol margin from each world edge.
    pub wolf_margin: f32,
    pub wolf_size: (f32, f32),
    /// Wolves spawn with x in `wolf_spawn_min ..= world.width - wolf_spawn_edge`.
    pub wolf_spawn_min: f32,
    pub wolf_spawn_edge: f32,
    pub fall_velocity: f32,
    pub removal_delay_ms: u64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            bat_speed: (50.0, 100.0),
            bat_buffer: 5.0,
            bat_hover: 40.0,
            bat_size: (60.0, 50.0),
            wolf_speed: (200.0, 400.0),
            wolf_buffer: 5.0,
            wolf_margin: 64.0,
            wolf_size: (128.0, 65.0),
            wolf_spawn_min: 700.0,
            wolf_spawn_edge: 200.0,
            fall_velocity: 10_000.0,
            removal_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub goal: i64,
    pub wing: i64,
    pub skull: i64,
    /// Distance of the egg from the world's right edge.
    pub goal_edge_offset: f32,
    pub goal_drop_height: f32,
    pub goal_size: (f32, f32),
    pub collectible_size: (f32, f32),
    pub collectible_bounce: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            goal: 100,
            wing: 500,
            skull: 1000,
            goal_edge_offset: 50.0,
            goal_drop_height: 100.0,
            goal_size: (40.0, 48.0),
            collectible_size: (40.0, 32.0),
            collectible_bounce: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub goal_fade_ms: u64,
    pub shake_ms: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            goal_fade_ms: 800,
            shake_ms: 240,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub enemies: EnemyConfig,
    pub scoring: ScoringConfig,
    pub effects: EffectsConfig,
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let cfg: GameConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load an explicitly requested config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Load `egg_hunt.toml` from the working directory if present,
    /// otherwise fall back to the built-in defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.fps == 0 {
            return Err(ConfigError::Invalid("world.fps must be positive".into()));
        }
        if self.world.width < self.world.canvas_width {
            return Err(ConfigError::Invalid(
                "world.width must be at least world.canvas_width".into(),
            ));
        }
        if self.player.max_hits == 0 {
            return Err(ConfigError::Invalid("player.max_hits must be positive".into()));
        }
        if self.projectile.pool_size == 0 {
            return Err(ConfigError::Invalid("projectile.pool_size must be positive".into()));
        }
        for (name, (lo, hi)) in [
            ("enemies.bat_speed", self.enemies.bat_speed),
            ("enemies.wolf_speed", self.enemies.wolf_speed),
        ] {
            if !(lo > 0.0 && lo <= hi) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive range (got {lo}..{hi})"
                )));
            }
        }
        let spawn_max = self.world.width - self.enemies.wolf_spawn_edge;
        if self.enemies.wolf_spawn_min > spawn_max {
            return Err(ConfigError::Invalid(
                "enemies.wolf_spawn_min leaves no room to spawn wolves".into(),
            ));
        }
        Ok(())
    }

    /// Length of one fixed update step.
    pub fn frame_ms(&self) -> u64 {
        (1000 / self.world.fps as u64).max(1)
    }

    /// Top edge of the ground slab.
    pub fn ground_top(&self) -> f32 {
        self.world.canvas_height - self.world.ground_thickness
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::from(self.player.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_game() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.player.speed, 240.0);
        assert_eq!(cfg.player.jump_velocity, 630.0);
        assert_eq!(cfg.player.max_hits, 5);
        assert_eq!(cfg.projectile.pool_size, 10);
        assert_eq!(cfg.projectile.refractory_ms, 1500);
        assert_eq!(cfg.world.gravity, 800.0);
        assert_eq!(cfg.frame_ms(), 16);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let text = "[player]\nmax_hits = 3\n\n[projectile]\nrefractory_ms = 800\n";
        let cfg = GameConfig::from_toml_str(text, Path::new("inline.toml")).unwrap();
        assert_eq!(cfg.player.max_hits, 3);
        assert_eq!(cfg.projectile.refractory_ms, 800);
        assert_eq!(cfg.player.speed, 240.0);
        assert_eq!(cfg.enemies, EnemyConfig::default());
    }

    #[test]
    fn rejects_zero_fps() {
        let err = GameConfig::from_toml_str("[world]\nfps = 0\n", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let text = "[enemies]\nbat_speed = [100.0, 50.0]\n";
        let err = GameConfig::from_toml_str(text, Path::new("x.toml")).unwrap_err();
        assert!(err.to_string().contains("enemies.bat_speed"));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let err = GameConfig::from_toml_str("[player\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("egg_hunt.toml");
        fs::write(&path, "[scoring]\nwing = 700\n").unwrap();
        let cfg = GameConfig::load(&path).unwrap();
        assert_eq!(cfg.scoring.wing, 700);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
