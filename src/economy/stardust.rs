//! Rough estimate of stardust (secondary currency) gained from duplicate pulls.
//!
//! Only featured 4★ copies are tracked individually. Standard 4★ and 5★
//! duplicates are rolled against the owned share of the standard roster, which
//! degrades as the pull count grows. All chances are percentages.

use serde::{Deserialize, Serialize};

use crate::batch::MeanOutcomeCounts;
use crate::gacha::{OutcomeCounts, Rng};

pub const DUST_PER_PULL: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Character,
    LightCone,
}

impl Default for BannerKind {
    fn default() -> Self {
        Self::Character
    }
}

/// Dust values and roster sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StardustRules {
    pub standard_4star_roster: u32,
    pub standard_5star_roster: u32,
    pub four_star_duplicate: u64,
    pub four_star_max_eidolon_bonus: u64,
    pub four_star_featured_late: u64,
    pub five_star_duplicate: u64,
    pub five_star_max_eidolon_bonus: u64,
    pub five_star_featured_late: u64,
    /// Copies of one item after which duplicates pay the "late" rate.
    pub max_eidolon_copies: u32,
}

impl Default for StardustRules {
    fn default() -> Self {
        Self {
            standard_4star_roster: 21,
            standard_5star_roster: 7,
            four_star_duplicate: 8,
            four_star_max_eidolon_bonus: 12,
            four_star_featured_late: 20,
            five_star_duplicate: 40,
            five_star_max_eidolon_bonus: 60,
            five_star_featured_late: 100,
            max_eidolon_copies: 7,
        }
    }
}

/// What the player already owns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub owned_4stars: u32,
    pub e6_4stars: u32,
    pub owned_standard_5stars: u32,
    pub e6_5stars: u32,
    /// Copies already owned of each featured 4★ (not eidolon level).
    pub owned_featured: Vec<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StardustEstimate {
    pub dust: u64,
    pub pulls: u64,
    pub remaining_dust: u64,
}

impl StardustEstimate {
    fn from_dust(dust: u64) -> Self {
        Self {
            dust,
            pulls: dust / DUST_PER_PULL,
            remaining_dust: dust % DUST_PER_PULL,
        }
    }
}

/// Round batch means to whole pulls per category.
pub fn rounded_counts(means: &MeanOutcomeCounts) -> OutcomeCounts {
    let round = |v: f64| v.max(0.0).round() as u32;
    OutcomeCounts {
        standard3: round(means.standard3),
        standard4: round(means.standard4),
        featured4: round(means.featured4),
        standard5: round(means.standard5),
        featured5: round(means.featured5),
    }
}

fn share_percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

pub fn estimate_stardust(
    counts: &OutcomeCounts,
    inventory: &Inventory,
    banner: BannerKind,
    featured_4star_count: u32,
    rules: &StardustRules,
    rng: &mut Rng,
) -> StardustEstimate {
    let mut dust = 0u64;

    let dupe_4 = share_percent(inventory.owned_4stars, rules.standard_4star_roster);
    let max_eidolon_4 = share_percent(inventory.e6_4stars, inventory.owned_4stars);
    let dupe_5 = share_percent(inventory.owned_standard_5stars, rules.standard_5star_roster);
    let max_eidolon_5 = share_percent(inventory.e6_5stars, inventory.owned_standard_5stars);

    for _ in 0..counts.standard4 {
        dust += standard_duplicate_dust(
            rng,
            dupe_4,
            max_eidolon_4,
            rules.four_star_duplicate,
            rules.four_star_max_eidolon_bonus,
        );
    }

    match banner {
        BannerKind::Character => {
            let slots = featured_4star_count.max(1) as usize;
            let mut owned: Vec<u32> = (0..slots)
                .map(|i| inventory.owned_featured.get(i).copied().unwrap_or(0))
                .collect();
            for _ in 0..counts.featured4 {
                let copies = &mut owned[rng.index(slots)];
                *copies += 1;
                dust += match *copies {
                    1 => 0,
                    c if c <= rules.max_eidolon_copies => rules.four_star_duplicate,
                    _ => rules.four_star_featured_late,
                };
            }
        }
        // Light cones have no eidolons; every featured copy converts at the base rate.
        BannerKind::LightCone => {
            dust += u64::from(counts.featured4) * rules.four_star_duplicate;
        }
    }

    for _ in 0..counts.standard5 {
        dust += standard_duplicate_dust(
            rng,
            dupe_5,
            max_eidolon_5,
            rules.five_star_duplicate,
            rules.five_star_max_eidolon_bonus,
        );
    }

    dust += featured_five_dust(counts.featured5, rules);

    StardustEstimate::from_dust(dust)
}

fn standard_duplicate_dust(
    rng: &mut Rng,
    duplicate_chance: f64,
    max_eidolon_chance: f64,
    duplicate: u64,
    max_eidolon_bonus: u64,
) -> u64 {
    let roll = rng.roll_percent();
    let is_character = rng.coin_flip();
    if roll >= duplicate_chance {
        return 0;
    }
    if is_character && roll < max_eidolon_chance {
        duplicate + max_eidolon_bonus
    } else {
        duplicate
    }
}

/// The first featured 5★ is new; copies 2..=7 give the duplicate rate, later ones the late rate.
fn featured_five_dust(featured5: u32, rules: &StardustRules) -> u64 {
    let duplicates = u64::from(featured5).saturating_sub(1);
    let at_duplicate_rate = duplicates.min(u64::from(rules.max_eidolon_copies).saturating_sub(1));
    at_duplicate_rate * rules.five_star_duplicate
        + (duplicates - at_duplicate_rate) * rules.five_star_featured_late
}
