use serde::{Deserialize, Serialize};

use crate::gacha::config::PullConfiguration;

/// Pity counters, current chances and guarantee flags of one trial.
///
/// A plain value: the engine takes it by value and returns the next state, so
/// trials never share it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateState {
    pub pulls_since_4star: u32,
    pub pulls_since_5star: u32,
    pub current_4star_chance: f64,
    pub current_5star_chance: f64,
    pub five_guaranteed: bool,
    pub four_guaranteed: bool,
}

impl RateState {
    /// Zero pity, base chances, no guarantees.
    pub fn fresh(config: &PullConfiguration) -> Self {
        Self {
            pulls_since_4star: 0,
            pulls_since_5star: 0,
            current_4star_chance: config.base_4star_chance,
            current_5star_chance: config.base_5star_chance,
            five_guaranteed: false,
            four_guaranteed: false,
        }
    }

    /// Start mid-pity. Current chances include the soft-pity increments a trial
    /// would have accumulated pulling up to these counters.
    ///
    /// Calculators that restart at the base chance for any starting pity report
    /// more pulls than this for starts past soft pity; below soft pity the two
    /// agree.
    pub fn seeded(
        config: &PullConfiguration,
        pulls_since_4star: u32,
        pulls_since_5star: u32,
        five_guaranteed: bool,
        four_guaranteed: bool,
    ) -> Self {
        Self {
            pulls_since_4star,
            pulls_since_5star,
            current_4star_chance: ramped_chance(
                config.base_4star_chance,
                config.pity_increment_4star,
                config.soft_pity_start_4star,
                pulls_since_4star,
            ),
            current_5star_chance: ramped_chance(
                config.base_5star_chance,
                config.pity_increment_5star,
                config.soft_pity_start_5star,
                pulls_since_5star,
            ),
            five_guaranteed,
            four_guaranteed,
        }
    }
}

fn ramped_chance(base: f64, increment: f64, soft_pity_start: u32, pity: u32) -> f64 {
    base + increment * pity.saturating_sub(soft_pity_start) as f64
}
