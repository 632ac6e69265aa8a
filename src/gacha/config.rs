//! Banner configuration: base rates, soft/hard pity and featured odds.
//!
//! All chances are percentages in [0, 100]. A configuration is built once per
//! batch and never mutated; [PullConfiguration::validate] is the only gate
//! between caller input and the pull engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Soft-pity increment as a multiple of the base chance when none is given.
pub const DEFAULT_PITY_MULTIPLIER: f64 = 10.0;

/// How the featured/standard split of a 4★ is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FourStarGuaranteeModel {
    /// Independent roll against `four_star_featured_odds` on every 4★; no carry-over.
    None,
    /// A standard 4★ forces the next 4★ to be featured, like the 5★ guarantee.
    Persistent,
}

impl Default for FourStarGuaranteeModel {
    fn default() -> Self {
        Self::Persistent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullConfiguration {
    pub base_4star_chance: f64,
    pub base_5star_chance: f64,
    /// Pity count at which the 4★ chance starts increasing.
    pub soft_pity_start_4star: u32,
    /// Pity count at which the 5★ chance starts increasing.
    pub soft_pity_start_5star: u32,
    pub pity_increment_4star: f64,
    pub pity_increment_5star: f64,
    /// Chance that a non-guaranteed 5★ is the featured one ("50/50").
    pub featured_odds: f64,
    /// Chance that a non-guaranteed 4★ is one of the featured ones.
    pub four_star_featured_odds: f64,
    /// Absolute pull count (since the last 5★) that forces a 5★.
    pub hard_pity_cap: Option<u32>,
    pub four_star_guarantee_model: FourStarGuaranteeModel,
    /// Number of featured 4★ items sharing the featured 4★ rate.
    pub featured_4star_count: u32,
    /// Number of non-featured 4★ items (characters and light cones) in the pool.
    pub standard_4star_pool: u32,
}

impl Default for PullConfiguration {
    fn default() -> Self {
        Self::character_banner()
    }
}

impl PullConfiguration {
    /// Limited character event banner.
    pub fn character_banner() -> Self {
        Self {
            base_4star_chance: 5.1,
            base_5star_chance: 0.6,
            soft_pity_start_4star: 8,
            soft_pity_start_5star: 73,
            pity_increment_4star: 5.1 * DEFAULT_PITY_MULTIPLIER,
            pity_increment_5star: 0.6 * DEFAULT_PITY_MULTIPLIER,
            featured_odds: 56.4,
            four_star_featured_odds: 50.0,
            hard_pity_cap: Some(90),
            four_star_guarantee_model: FourStarGuaranteeModel::Persistent,
            featured_4star_count: 3,
            standard_4star_pool: 42,
        }
    }

    /// Limited light cone event banner.
    pub fn light_cone_banner() -> Self {
        Self {
            base_4star_chance: 6.6,
            base_5star_chance: 0.8,
            soft_pity_start_4star: 7,
            soft_pity_start_5star: 65,
            pity_increment_4star: 6.6 * DEFAULT_PITY_MULTIPLIER,
            pity_increment_5star: 0.8 * DEFAULT_PITY_MULTIPLIER,
            featured_odds: 75.0,
            four_star_featured_odds: 75.0,
            hard_pity_cap: Some(80),
            four_star_guarantee_model: FourStarGuaranteeModel::Persistent,
            featured_4star_count: 3,
            standard_4star_pool: 42,
        }
    }

    /// Replace both soft-pity increments with `multiplier` times the current base chances.
    pub fn with_pity_multiplier(self, multiplier: f64) -> Self {
        Self {
            pity_increment_4star: self.base_4star_chance * multiplier,
            pity_increment_5star: self.base_5star_chance * multiplier,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percent("base_4star_chance", self.base_4star_chance)?;
        check_percent("base_5star_chance", self.base_5star_chance)?;
        check_percent("featured_odds", self.featured_odds)?;
        check_percent("four_star_featured_odds", self.four_star_featured_odds)?;
        check_increment("pity_increment_4star", self.pity_increment_4star)?;
        check_increment("pity_increment_5star", self.pity_increment_5star)?;
        if self.hard_pity_cap == Some(0) {
            return Err(ConfigError::ZeroHardPity);
        }
        if self.featured_4star_count == 0 {
            return Err(ConfigError::EmptyPool {
                field: "featured_4star_count",
            });
        }
        if self.standard_4star_pool == 0 {
            return Err(ConfigError::EmptyPool {
                field: "standard_4star_pool",
            });
        }
        Ok(())
    }

    /// Chance a specific featured 4★ is the one drawn, given a featured 4★.
    pub fn featured_4star_share(&self) -> f64 {
        100.0 / self.featured_4star_count.max(1) as f64
    }

    /// Chance a specific standard 4★ is the one drawn, given a standard 4★.
    pub fn standard_4star_share(&self) -> f64 {
        100.0 / self.standard_4star_pool.max(1) as f64
    }
}

fn check_percent(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::ChanceOutOfRange { field, value });
    }
    Ok(())
}

fn check_increment(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidIncrement { field, value });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ChanceOutOfRange { field: &'static str, value: f64 },
    InvalidIncrement { field: &'static str, value: f64 },
    ZeroHardPity,
    EmptyPool { field: &'static str },
}

impl ConfigError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::ChanceOutOfRange { field, .. } => field,
            Self::InvalidIncrement { field, .. } => field,
            Self::ZeroHardPity => "hard_pity_cap",
            Self::EmptyPool { field } => field,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChanceOutOfRange { field, value } => {
                write!(f, "{field} must be a percentage in [0, 100], got {value}")
            }
            Self::InvalidIncrement { field, value } => {
                write!(f, "{field} must be a finite non-negative percentage, got {value}")
            }
            Self::ZeroHardPity => write!(f, "hard_pity_cap must be at least 1 when set"),
            Self::EmptyPool { field } => write!(f, "{field} must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
