//! Single-pull resolution.
//!
//! One uniform roll in [0, 100) is compared against two disjoint bands: the
//! 5★ band `[0, c5)` followed by the 4★ band `[c5, c5 + c4)`. Everything else
//! is a 3★. Featured/standard splits use an independent second roll.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gacha::config::{FourStarGuaranteeModel, PullConfiguration};
use crate::gacha::rng::Rng;
use crate::gacha::state::RateState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Standard3,
    Standard4,
    Featured4,
    Standard5,
    Featured5,
}

impl Outcome {
    pub const ALL: [Outcome; 5] = [
        Outcome::Standard3,
        Outcome::Standard4,
        Outcome::Featured4,
        Outcome::Standard5,
        Outcome::Featured5,
    ];

    pub const fn rarity(self) -> u8 {
        match self {
            Self::Standard3 => 3,
            Self::Standard4 | Self::Featured4 => 4,
            Self::Standard5 | Self::Featured5 => 5,
        }
    }

    pub const fn is_featured(self) -> bool {
        matches!(self, Self::Featured4 | Self::Featured5)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard3 => "3*",
            Self::Standard4 => "Non-featured 4*",
            Self::Featured4 => "Featured 4*",
            Self::Standard5 => "Non-featured 5*",
            Self::Featured5 => "Featured 5*",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// True when the next pull is forced to be a 5★ by the hard-pity cap.
#[inline]
pub fn hard_pity_reached(config: &PullConfiguration, state: &RateState) -> bool {
    config
        .hard_pity_cap
        .map_or(false, |cap| state.pulls_since_5star.saturating_add(1) >= cap)
}

/// Resolve one pull. Returns the outcome and the state after it.
pub fn pull(config: &PullConfiguration, state: RateState, rng: &mut Rng) -> (Outcome, RateState) {
    let mut next = state;

    // Soft pity ramps apply to this pull and persist until the rarity hits.
    if next.pulls_since_5star >= config.soft_pity_start_5star {
        next.current_5star_chance += config.pity_increment_5star;
    }
    if next.pulls_since_4star >= config.soft_pity_start_4star {
        next.current_4star_chance += config.pity_increment_4star;
    }

    let forced_five = hard_pity_reached(config, &next);
    let roll = rng.roll_percent();

    if forced_five || roll < next.current_5star_chance {
        let featured = next.five_guaranteed || rng.chance(config.featured_odds);
        next.five_guaranteed = !featured;
        next.current_5star_chance = config.base_5star_chance;
        next.pulls_since_5star = 0;
        next.pulls_since_4star = next.pulls_since_4star.saturating_add(1);
        let outcome = if featured {
            Outcome::Featured5
        } else {
            Outcome::Standard5
        };
        return (outcome, next);
    }

    if roll < next.current_5star_chance + next.current_4star_chance {
        let featured = match config.four_star_guarantee_model {
            FourStarGuaranteeModel::None => rng.chance(config.four_star_featured_odds),
            FourStarGuaranteeModel::Persistent => {
                let featured =
                    next.four_guaranteed || rng.chance(config.four_star_featured_odds);
                next.four_guaranteed = !featured;
                featured
            }
        };
        next.current_4star_chance = config.base_4star_chance;
        next.pulls_since_4star = 0;
        next.pulls_since_5star = next.pulls_since_5star.saturating_add(1);
        let outcome = if featured {
            Outcome::Featured4
        } else {
            Outcome::Standard4
        };
        return (outcome, next);
    }

    next.pulls_since_4star = next.pulls_since_4star.saturating_add(1);
    next.pulls_since_5star = next.pulls_since_5star.saturating_add(1);
    (Outcome::Standard3, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_star_increments_both_counters_without_reset() {
        let config = PullConfiguration {
            base_4star_chance: 0.0,
            base_5star_chance: 0.0,
            pity_increment_4star: 0.0,
            pity_increment_5star: 0.0,
            hard_pity_cap: None,
            ..PullConfiguration::default()
        };
        let mut rng = Rng::new(1);
        let state = RateState::seeded(&config, 4, 9, false, false);
        let (outcome, next) = pull(&config, state, &mut rng);
        assert_eq!(outcome, Outcome::Standard3);
        assert_eq!(next.pulls_since_4star, 5);
        assert_eq!(next.pulls_since_5star, 10);
    }

    #[test]
    fn soft_pity_accumulates_until_hit() {
        let config = PullConfiguration {
            base_4star_chance: 0.0,
            base_5star_chance: 0.0,
            soft_pity_start_5star: 2,
            pity_increment_5star: 0.0,
            pity_increment_4star: 0.0,
            hard_pity_cap: None,
            ..PullConfiguration::default()
        };
        let ramping = PullConfiguration {
            pity_increment_5star: 1e-12,
            ..config.clone()
        };
        let mut rng = Rng::new(2);
        let mut state = RateState::fresh(&ramping);
        let mut chances = Vec::new();
        for _ in 0..5 {
            let (_, next) = pull(&ramping, state, &mut rng);
            chances.push(next.current_5star_chance);
            state = next;
        }
        assert_eq!(chances[0], 0.0);
        assert_eq!(chances[1], 0.0);
        assert!(chances[2] > 0.0);
        assert!(chances.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn labels_match_rarity() {
        for outcome in Outcome::ALL {
            assert!((3..=5).contains(&outcome.rarity()));
        }
        assert!(Outcome::Featured4.is_featured());
        assert!(!Outcome::Standard5.is_featured());
        assert_eq!(Outcome::Featured5.to_string(), "Featured 5*");
    }
}
