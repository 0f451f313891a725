//! End-of-game ranking.

use crate::animation::AnimationKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HunterTier {
    Legendary,
    Professional,
    Skilled,
    Average,
}

/// Plain threshold comparison, strictly greater than each bar.
pub fn hunter_tier(score: i64) -> HunterTier {
    if score > 40_000 {
        HunterTier::Legendary
    } else if score > 30_000 {
        HunterTier::Professional
    } else if score > 20_000 {
        HunterTier::Skilled
    } else {
        HunterTier::Average
    }
}

impl HunterTier {
    pub fn title(self) -> &'static str {
        match self {
            HunterTier::Legendary => "Legendary Hunter",
            HunterTier::Professional => "Professional Hunter",
            HunterTier::Skilled => "Skilled Hunter",
            HunterTier::Average => "Average Hunter",
        }
    }

    pub fn message(self) -> String {
        let article = match self {
            HunterTier::Average => "an",
            _ => "a",
        };
        format!("You are {} {}", article, self.title())
    }

    /// Player animation shown under the message.
    pub fn animation(self) -> AnimationKey {
        match self {
            HunterTier::Legendary => AnimationKey::Idle,
            HunterTier::Professional | HunterTier::Skilled => AnimationKey::Run,
            HunterTier::Average => AnimationKey::Died,
        }
    }

    /// Professional and above get rows of eggs, wings and skulls.
    pub fn shows_trophies(self) -> bool {
        matches!(self, HunterTier::Legendary | HunterTier::Professional)
    }

    /// Legendary trophies are drawn larger.
    pub fn large_trophies(self) -> bool {
        self == HunterTier::Legendary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(hunter_tier(40_001), HunterTier::Legendary);
        assert_eq!(hunter_tier(40_000), HunterTier::Professional);
        assert_eq!(hunter_tier(30_000), HunterTier::Skilled);
        assert_eq!(hunter_tier(20_000), HunterTier::Average);
        assert_eq!(hunter_tier(-5_000), HunterTier::Average);
    }

    #[test]
    fn messages_read_naturally() {
        assert_eq!(HunterTier::Legendary.message(), "You are a Legendary Hunter");
        assert_eq!(HunterTier::Average.message(), "You are an Average Hunter");
    }
}
