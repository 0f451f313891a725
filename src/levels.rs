//! The four hand-authored levels.

use std::borrow::Cow;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weather {
    Morning,
    Afternoon,
    Twilight,
    Night,
}

impl Weather {
    /// RGB tint for both background layers.
    pub fn tint(self) -> u32 {
        match self {
            Weather::Morning => 0xecdccc,
            Weather::Afternoon => 0xffffff,
            Weather::Twilight => 0xccaacc,
            Weather::Night => 0x555555,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Morning => "morning",
            Weather::Afternoon => "afternoon",
            Weather::Twilight => "twilight",
            Weather::Night => "night",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelId {
    One,
    Two,
    Three,
    Four,
}

impl LevelId {
    pub const FIRST: LevelId = LevelId::One;

    pub fn number(self) -> u8 {
        match self {
            LevelId::One => 1,
            LevelId::Two => 2,
            LevelId::Three => 3,
            LevelId::Four => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<LevelId> {
        match n {
            1 => Some(LevelId::One),
            2 => Some(LevelId::Two),
            3 => Some(LevelId::Three),
            4 => Some(LevelId::Four),
            _ => None,
        }
    }

    /// `None` after the last level: the credits come next.
    pub fn next(self) -> Option<LevelId> {
        Self::from_number(self.number() + 1)
    }

    pub fn definition(self) -> LevelDefinition {
        match self {
            LevelId::One => LEVEL_1,
            LevelId::Two => LEVEL_2,
            LevelId::Three => LEVEL_3,
            LevelId::Four => LEVEL_4,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    #[error("level {0} has no platforms")]
    NoPlatforms(u8),
    #[error("level {level}: platform {index} has a non-finite anchor")]
    BadAnchor { level: u8, index: usize },
    #[error("level {level} wants {bats} bats but has only {platforms} platforms")]
    TooManyBats {
        level: u8,
        bats: usize,
        platforms: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelDefinition {
    pub id: LevelId,
    /// Platform anchors: left edge and vertical centre.
    pub platforms: Cow<'static, [(f32, f32)]>,
    pub weather: Weather,
    pub bat_count: usize,
    pub wolf_count: usize,
}

impl LevelDefinition {
    /// Every bat needs a platform of its own.
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.id.number();
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms(level));
        }
        if let Some(index) = self
            .platforms
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(LevelError::BadAnchor { level, index });
        }
        if self.bat_count > self.platforms.len() {
            return Err(LevelError::TooManyBats {
                level,
                bats: self.bat_count,
                platforms: self.platforms.len(),
            });
        }
        Ok(())
    }
}

pub const LEVEL_1: LevelDefinition = LevelDefinition {
    id: LevelId::One,
    platforms: Cow::Borrowed(&[
        (220.0, 250.0),
        (220.0, 450.0),
        (440.0, 450.0),
        (660.0, 450.0),
        (660.0, 250.0),
        (880.0, 200.0),
        (1100.0, 200.0),
        (1100.0, 400.0),
        (1320.0, 400.0),
        (1540.0, 300.0),
        (1540.0, 500.0),
        (1760.0, 150.0),
        (1760.0, 450.0),
        (1980.0, 200.0),
        (2200.0, 250.0),
        (2420.0, 200.0),
    ]),
    weather: Weather::Morning,
    bat_count: 5,
    wolf_count: 1,
};

pub const LEVEL_2: LevelDefinition = LevelDefinition {
    id: LevelId::Two,
    platforms: Cow::Borrowed(&[
        (2420.0, 250.0),
        (2200.0, 250.0),
        (1980.0, 450.0),
        (1760.0, 450.0),
        (1760.0, 250.0),
        (1540.0, 200.0),
        (1320.0, 200.0),
        (1100.0, 400.0),
        (1320.0, 400.0),
        (880.0, 500.0),
        (660.0, 200.0),
        (660.0, 450.0),
        (440.0, 250.0),
        (220.0, 250.0),
    ]),
    weather: Weather::Afternoon,
    bat_count: 7,
    wolf_count: 2,
};

pub const LEVEL_3: LevelDefinition = LevelDefinition {
    id: LevelId::Three,
    platforms: Cow::Borrowed(&[
        (2420.0, 400.0),
        (2200.0, 400.0),
        (1540.0, 450.0),
        (1760.0, 250.0),
        (1540.0, 250.0),
        (1100.0, 350.0),
        (1320.0, 300.0),
        (880.0, 350.0),
        (660.0, 300.0),
        (440.0, 450.0),
        (440.0, 250.0),
        (220.0, 250.0),
    ]),
    weather: Weather::Twilight,
    bat_count: 10,
    wolf_count: 3,
};

pub const LEVEL_4: LevelDefinition = LevelDefinition {
    id: LevelId::Four,
    platforms: Cow::Borrowed(&[
        (220.0, 400.0),
        (440.0, 300.0),
        (660.0, 200.0),
        (880.0, 200.0),
        (880.0, 400.0),
        (1320.0, 200.0),
        (1320.0, 400.0),
        (1540.0, 200.0),
        (1760.0, 300.0),
        (1980.0, 400.0),
        (2200.0, 400.0),
        (2420.0, 200.0),
    ]),
    weather: Weather::Night,
    bat_count: 12,
    wolf_count: 4,
};
