use serde::{Deserialize, Serialize};
use std::fmt;

/// Rating band a player's market value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillTier {
    Replacement,
    Depth,
    Rotational,
    Starter,
    ProBowl,
    Elite,
}

impl SkillTier {
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            90.. => SkillTier::Elite,
            80..=89 => SkillTier::ProBowl,
            70..=79 => SkillTier::Starter,
            60..=69 => SkillTier::Rotational,
            50..=59 => SkillTier::Depth,
            _ => SkillTier::Replacement,
        }
    }

    fn rating_range(&self) -> (u8, u8) {
        match self {
            SkillTier::Elite => (90, 100),
            SkillTier::ProBowl => (80, 89),
            SkillTier::Starter => (70, 79),
            SkillTier::Rotational => (60, 69),
            SkillTier::Depth => (50, 59),
            SkillTier::Replacement => (0, 49),
        }
    }

    /// Share of the position's franchise tag the band is worth, bottom to top of the band.
    fn tag_share_range(&self) -> (f64, f64) {
        match self {
            SkillTier::Elite => (0.95, 1.20),
            SkillTier::ProBowl => (0.65, 0.95),
            SkillTier::Starter => (0.35, 0.65),
            SkillTier::Rotational => (0.15, 0.35),
            SkillTier::Depth => (0.06, 0.15),
            SkillTier::Replacement => (0.0, 0.06),
        }
    }

    /// Tag share for `rating`, interpolated linearly inside the band.
    pub fn tag_share(&self, rating: u8) -> f64 {
        let (low_rating, high_rating) = self.rating_range();
        let (low_share, high_share) = self.tag_share_range();

        let position = rating.clamp(low_rating, high_rating) - low_rating;
        let width = (high_rating - low_rating).max(1);

        let fraction = position as f64 / width as f64;
        low_share * (1.0 - fraction) + high_share * fraction
    }

    pub fn contract_years(&self, age: u8, peak_age: u8) -> u8 {
        let base: u8 = match self {
            SkillTier::Elite => 5,
            SkillTier::ProBowl => 4,
            SkillTier::Starter => 3,
            SkillTier::Rotational => 2,
            SkillTier::Depth | SkillTier::Replacement => 1,
        };

        let trimmed = if age >= peak_age.saturating_add(3) {
            base.saturating_sub(2)
        } else if age > peak_age {
            base.saturating_sub(1)
        } else {
            base
        };

        trimmed.max(1)
    }

    pub fn guarantee_pct(&self, age: u8, peak_age: u8) -> f64 {
        let base = match self {
            SkillTier::Elite => 0.60,
            SkillTier::ProBowl => 0.45,
            SkillTier::Starter => 0.30,
            SkillTier::Rotational => 0.15,
            SkillTier::Depth => 0.05,
            SkillTier::Replacement => 0.0,
        };

        if age > peak_age.saturating_add(2) { base * 0.75 } else { base }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillTier::Elite => "Elite",
            SkillTier::ProBowl => "Pro Bowl",
            SkillTier::Starter => "Starter",
            SkillTier::Rotational => "Rotational",
            SkillTier::Depth => "Depth",
            SkillTier::Replacement => "Replacement",
        };
        write!(f, "{}", name)
    }
}
